//! Reference counting and forced materialization.
//!
//! A statement can render inline inside its single consumer only when
//! nothing else needs its result by name. Two things rule that out:
//! more than one incoming edge, and consumers that can only reference a
//! set through a variable (intersection, area, pivot and around filters,
//! and raw template bindings).

use overql_core::{Filter, QueryGraph, StatementId, StatementKind};

use crate::traverse::{traverse, Visitor};

#[derive(Clone, Copy, Default)]
struct DepEntry {
    ref_count: u32,
    forced: bool,
}

/// Per-statement facts gathered in one traversal from the build root.
pub struct DependencyAnalysis {
    entries: Vec<DepEntry>,
}

impl DependencyAnalysis {
    /// Incoming dependency edges, counting the build root's own entry
    /// edge as one.
    pub fn ref_count(&self, id: StatementId) -> u32 {
        self.entries[id.index()].ref_count
    }

    /// Whether some consumer can only reference this statement through
    /// a variable.
    pub fn is_forced(&self, id: StatementId) -> bool {
        self.entries[id.index()].forced
    }

    /// Whether the emitter may render this statement in place instead
    /// of materializing it into a variable.
    pub fn can_inline(&self, graph: &QueryGraph, id: StatementId) -> bool {
        let entry = self.entries[id.index()];
        !entry.forced && entry.ref_count <= 1 && graph.statement(id).out_clauses.is_empty()
    }
}

struct Analyzer {
    entries: Vec<DepEntry>,
}

impl Analyzer {
    fn force(&mut self, id: StatementId) {
        self.entries[id.index()].forced = true;
    }
}

impl Visitor for Analyzer {
    type Error = std::convert::Infallible;

    fn pre(&mut self, graph: &QueryGraph, id: StatementId) -> Result<(), Self::Error> {
        self.entries[id.index()].ref_count += 1;

        match &graph.statement(id).kind {
            StatementKind::Query { filters, .. } => {
                for filter in filters {
                    if matches!(
                        filter,
                        Filter::Intersection(_)
                            | Filter::Area(_)
                            | Filter::Pivot(_)
                            | Filter::Around { .. }
                    ) {
                        for dependency in filter.dependencies() {
                            self.force(dependency);
                        }
                    }
                }
            }
            StatementKind::Raw { bindings, .. } => {
                for bound in bindings.values() {
                    self.force(*bound);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Count references and mark forced statements, starting from `root`.
pub fn analyze(graph: &QueryGraph, root: StatementId) -> DependencyAnalysis {
    let mut analyzer = Analyzer {
        entries: vec![DepEntry::default(); graph.len()],
    };
    match traverse(graph, root, &mut analyzer) {
        Ok(()) => DependencyAnalysis {
            entries: analyzer.entries,
        },
        Err(e) => match e {},
    }
}
