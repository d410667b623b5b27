//! Arena storage for statement graphs.
//!
//! Statements live in a [`QueryGraph`] and reference each other through
//! [`StatementId`] handles. Identity is the handle: two structurally
//! identical statements inserted separately are distinct nodes, and all
//! per-statement maps in the compiler are keyed (or flat-indexed) by
//! handle. Cloning the graph clones the arena, which is how a build
//! isolates itself from the caller's statements.

use indexmap::IndexMap;

use crate::error::ValidationError;
use crate::filter::Filter;
use crate::output::OutClause;

/// A lightweight handle to a statement in a [`QueryGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct StatementId(u32);

impl StatementId {
    /// Raw index for flat per-statement arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StatementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The element type a leaf query selects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum ElementType {
    Node,
    Way,
    Relation,
    Area,
    /// Any element type (`nwr`).
    Any,
}

impl ElementType {
    /// The Overpass QL type specifier.
    pub fn specifier(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "rel",
            Self::Area => "area",
            Self::Any => "nwr",
        }
    }
}

/// One of the four fixed recursion operators.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecurseMode {
    /// `>` — all nodes and ways referenced by the input.
    Down,
    /// `>>` — like `>`, following relation membership transitively.
    DownRelations,
    /// `<` — all ways and relations referencing the input.
    Up,
    /// `<<` — like `<`, following relation membership transitively.
    UpRelations,
}

impl RecurseMode {
    pub fn operator(self) -> &'static str {
        match self {
            Self::Down => ">",
            Self::DownRelations => ">>",
            Self::Up => "<",
            Self::UpRelations => "<<",
        }
    }
}

/// The closed set of statement shapes.
#[derive(Clone, Debug)]
pub enum StatementKind {
    /// A typed element query with an ordered filter list.
    Query {
        element: ElementType,
        filters: Vec<Filter>,
    },
    /// Union of the results of zero or more statements.
    Union(Vec<StatementId>),
    /// Elements of `minuend` that are not in `subtrahend`.
    Difference {
        minuend: StatementId,
        subtrahend: StatementId,
    },
    /// A raw query template with named statement placeholders.
    ///
    /// `{name}` is substituted by the bound statement's variable name,
    /// and the reserved `{:out}` placeholder by the output variable
    /// (an underscore when none is assigned).
    Raw {
        template: String,
        bindings: IndexMap<String, StatementId>,
    },
    /// A recursion operator over an optional input set.
    Recurse {
        mode: RecurseMode,
        input: Option<StatementId>,
    },
    /// `is_in` — the areas covering the input set's elements, or a
    /// single coordinate. Input set and coordinate are mutually
    /// exclusive; at least one must be present at render time.
    OverlappingAreas {
        input: Option<StatementId>,
        point: Option<(f64, f64)>,
    },
}

/// One statement node: its shape, naming hint, and output requests.
#[derive(Clone, Debug)]
pub struct Statement {
    pub kind: StatementKind,
    /// Preferred variable name if this statement is materialized.
    pub label: Option<String>,
    /// Ordered output requests, one `out` line each.
    pub out_clauses: Vec<OutClause>,
}

impl Statement {
    /// Direct predecessors in the dependency DAG, in declared order.
    pub fn dependencies(&self) -> Vec<StatementId> {
        match &self.kind {
            StatementKind::Query { filters, .. } => {
                filters.iter().flat_map(Filter::dependencies).collect()
            }
            StatementKind::Union(operands) => operands.clone(),
            StatementKind::Difference {
                minuend,
                subtrahend,
            } => vec![*minuend, *subtrahend],
            StatementKind::Raw { bindings, .. } => bindings.values().copied().collect(),
            StatementKind::Recurse { input, .. } => input.iter().copied().collect(),
            StatementKind::OverlappingAreas { input, .. } => input.iter().copied().collect(),
        }
    }
}

/// Arena of statements forming one dependency DAG (or several, since
/// roots are chosen at build time).
#[derive(Clone, Debug, Default)]
pub struct QueryGraph {
    statements: Vec<Statement>,
}

impl QueryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements in the arena.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Insert a statement and return its handle.
    pub fn insert(&mut self, kind: StatementKind) -> StatementId {
        let id = StatementId(self.statements.len() as u32);
        self.statements.push(Statement {
            kind,
            label: None,
            out_clauses: Vec::new(),
        });
        id
    }

    pub fn statement(&self, id: StatementId) -> &Statement {
        &self.statements[id.index()]
    }

    pub fn statement_mut(&mut self, id: StatementId) -> &mut Statement {
        &mut self.statements[id.index()]
    }

    /// Set the naming hint used when the statement is materialized.
    pub fn set_label(&mut self, id: StatementId, label: impl Into<String>) {
        self.statement_mut(id).label = Some(label.into());
    }

    /// Record an output request. Each call appends one `out` line.
    pub fn request_output(
        &mut self,
        id: StatementId,
        options: impl IntoIterator<Item = crate::output::OutOption>,
    ) {
        let clause = OutClause::new(options);
        self.statement_mut(id).out_clauses.push(clause);
    }

    /// Union of the given statements, in order.
    pub fn union(&mut self, operands: impl IntoIterator<Item = StatementId>) -> StatementId {
        self.insert(StatementKind::Union(operands.into_iter().collect()))
    }

    /// Elements of `minuend` that are not in `subtrahend`.
    pub fn difference(&mut self, minuend: StatementId, subtrahend: StatementId) -> StatementId {
        self.insert(StatementKind::Difference {
            minuend,
            subtrahend,
        })
    }

    /// A raw query template with named statement bindings.
    ///
    /// Fails if the template contains an unnamed `{}` placeholder.
    pub fn raw<N: Into<String>>(
        &mut self,
        template: impl Into<String>,
        bindings: impl IntoIterator<Item = (N, StatementId)>,
    ) -> Result<StatementId, ValidationError> {
        let template = template.into();
        if template.contains("{}") {
            return Err(ValidationError::UnnamedPlaceholder);
        }
        let bindings = bindings
            .into_iter()
            .map(|(name, id)| (name.into(), id))
            .collect();
        Ok(self.insert(StatementKind::Raw { template, bindings }))
    }

    pub fn recurse(&mut self, mode: RecurseMode, input: Option<StatementId>) -> StatementId {
        self.insert(StatementKind::Recurse { mode, input })
    }

    pub fn recurse_down(&mut self, input: Option<StatementId>) -> StatementId {
        self.recurse(RecurseMode::Down, input)
    }

    pub fn recurse_down_relations(&mut self, input: Option<StatementId>) -> StatementId {
        self.recurse(RecurseMode::DownRelations, input)
    }

    pub fn recurse_up(&mut self, input: Option<StatementId>) -> StatementId {
        self.recurse(RecurseMode::Up, input)
    }

    pub fn recurse_up_relations(&mut self, input: Option<StatementId>) -> StatementId {
        self.recurse(RecurseMode::UpRelations, input)
    }

    /// Areas covering the elements of the input set.
    pub fn overlapping_areas(&mut self, input: StatementId) -> StatementId {
        self.insert(StatementKind::OverlappingAreas {
            input: Some(input),
            point: None,
        })
    }

    /// Areas covering a single coordinate.
    pub fn overlapping_areas_at(&mut self, lat: f64, lon: f64) -> StatementId {
        self.insert(StatementKind::OverlappingAreas {
            input: None,
            point: Some((lat, lon)),
        })
    }
}
