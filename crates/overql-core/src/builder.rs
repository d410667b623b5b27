//! Fluent construction of leaf element queries.
//!
//! The builder collects filters and inserts one `Query` statement into
//! the graph on [`QueryBuilder::finish`]. Deriving from an existing
//! statement starts the filter list with an intersection on it, which
//! the compiler later inlines whenever the parent is single-use.

use chrono::{DateTime, Utc};

use crate::filter::{Filter, TagComparison, UserRef};
use crate::graph::{ElementType, QueryGraph, StatementId, StatementKind};

/// Builder for one leaf element query.
#[must_use = "call finish() to insert the statement"]
pub struct QueryBuilder<'g> {
    graph: &'g mut QueryGraph,
    element: ElementType,
    label: Option<String>,
    filters: Vec<Filter>,
}

impl QueryGraph {
    /// Start a query of the given element type.
    pub fn query(&mut self, element: ElementType) -> QueryBuilder<'_> {
        QueryBuilder {
            graph: self,
            element,
            label: None,
            filters: Vec::new(),
        }
    }

    /// Start a `node` query.
    pub fn nodes(&mut self) -> QueryBuilder<'_> {
        self.query(ElementType::Node)
    }

    /// Start a `way` query.
    pub fn ways(&mut self) -> QueryBuilder<'_> {
        self.query(ElementType::Way)
    }

    /// Start a `rel` query.
    pub fn relations(&mut self) -> QueryBuilder<'_> {
        self.query(ElementType::Relation)
    }

    /// Start an `area` query.
    pub fn areas(&mut self) -> QueryBuilder<'_> {
        self.query(ElementType::Area)
    }

    /// Start an untyped (`nwr`) query.
    pub fn elements(&mut self) -> QueryBuilder<'_> {
        self.query(ElementType::Any)
    }

    /// Start a query over the results of an existing statement, keeping
    /// its element type when it is a leaf query.
    pub fn derive(&mut self, parent: StatementId) -> QueryBuilder<'_> {
        let element = match &self.statement(parent).kind {
            StatementKind::Query { element, .. } => *element,
            _ => ElementType::Any,
        };
        let mut builder = self.query(element);
        builder.filters.push(Filter::Intersection(vec![parent]));
        builder
    }
}

impl QueryBuilder<'_> {
    /// Naming hint used if the statement gets materialized.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Select a single OSM id.
    pub fn id(self, id: u64) -> Self {
        self.filter(Filter::Ids(vec![id]))
    }

    /// Select a list of OSM ids.
    pub fn ids(self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.filter(Filter::Ids(ids.into_iter().collect()))
    }

    pub fn bounding_box(self, south: f64, west: f64, north: f64, east: f64) -> Self {
        self.filter(Filter::BoundingBox {
            south,
            west,
            north,
            east,
        })
    }

    /// Restrict to the results of another statement.
    pub fn input_set(self, input: StatementId) -> Self {
        self.filter(Filter::Intersection(vec![input]))
    }

    /// Restrict to elements within the given area set.
    pub fn within(self, areas: StatementId) -> Self {
        self.filter(Filter::Area(areas))
    }

    /// Restrict to elements on the outline of the given area set.
    pub fn outlines_of(self, areas: StatementId) -> Self {
        self.filter(Filter::Pivot(areas))
    }

    /// Restrict to elements within `radius` meters of another set.
    pub fn around(self, radius: f64, input: StatementId) -> Self {
        self.filter(Filter::Around {
            radius,
            input: Some(input),
            points: Vec::new(),
        })
    }

    /// Restrict to elements within `radius` meters of the given points.
    pub fn around_points(self, radius: f64, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.filter(Filter::Around {
            radius,
            input: None,
            points: points.into_iter().collect(),
        })
    }

    /// Restrict to elements inside the given polygon.
    pub fn polygon(self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.filter(Filter::Polygon(points.into_iter().collect()))
    }

    /// Tag equality: `["key"="value"]`.
    pub fn tag(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter(Filter::tag(key, value))
    }

    /// Tag inequality: `["key"!="value"]`.
    pub fn tag_not(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter(Filter::Tag {
            comparison: TagComparison::NotEquals {
                key: key.into(),
                value: value.into(),
            },
            case_sensitive: true,
        })
    }

    /// Case-insensitive tag equality: `["key"="value",i]`.
    pub fn tag_insensitive(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter(Filter::Tag {
            comparison: TagComparison::Equals {
                key: key.into(),
                value: value.into(),
            },
            case_sensitive: false,
        })
    }

    /// Key presence: `["key"]`.
    pub fn has_key(self, key: impl Into<String>) -> Self {
        self.filter(Filter::has_key(key))
    }

    /// Key absence: `[!"key"]`.
    pub fn lacks_key(self, key: impl Into<String>) -> Self {
        self.filter(Filter::lacks_key(key))
    }

    /// Tag value regex match: `["key"~"pattern"]`.
    pub fn value_matches(self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(Filter::Tag {
            comparison: TagComparison::ValueMatches {
                key: key.into(),
                pattern: pattern.into(),
            },
            case_sensitive: true,
        })
    }

    /// Negated tag value regex match: `["key"!~"pattern"]`.
    pub fn value_not_matches(self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(Filter::Tag {
            comparison: TagComparison::ValueNotMatches {
                key: key.into(),
                pattern: pattern.into(),
            },
            case_sensitive: true,
        })
    }

    /// Regex match on both key and value: `[~"kpat"~"vpat"]`.
    pub fn keys_values_match(
        self,
        key_pattern: impl Into<String>,
        value_pattern: impl Into<String>,
    ) -> Self {
        self.filter(Filter::Tag {
            comparison: TagComparison::KeyValueMatch {
                key_pattern: key_pattern.into(),
                value_pattern: value_pattern.into(),
            },
            case_sensitive: true,
        })
    }

    /// Restrict to elements changed since the given date.
    pub fn changed_since(self, date: DateTime<Utc>) -> Self {
        self.filter(Filter::Newer(date))
    }

    /// Restrict to elements changed between the two given dates.
    pub fn changed_between(self, lower: DateTime<Utc>, upper: DateTime<Utc>) -> Self {
        self.filter(Filter::Changed {
            lower,
            upper: Some(upper),
        })
    }

    /// Restrict to elements last edited by any of the given users.
    pub fn last_changed_by(self, users: impl IntoIterator<Item = UserRef>) -> Self {
        self.filter(Filter::User(users.into_iter().collect()))
    }

    /// Insert the statement into the graph.
    pub fn finish(self) -> StatementId {
        let QueryBuilder {
            graph,
            element,
            label,
            filters,
        } = self;
        let id = graph.insert(StatementKind::Query { element, filters });
        if let Some(label) = label {
            graph.set_label(id, label);
        }
        id
    }
}
