//! Core data structures for the overql Overpass QL builder.
//!
//! This crate holds the node model and nothing else:
//! - `graph` - the statement arena and handle type
//! - `filter` - value and relational filters on leaf queries
//! - `output` - output requests (`out` lines)
//! - `render` - statement rendering against a naming oracle
//! - `builder` - fluent construction of leaf queries
//! - `settings` - the global settings header
//!
//! The compiler pipeline (traversal, analysis, simplification,
//! emission) lives in the `overql` crate.

pub mod builder;
pub mod error;
pub mod filter;
pub mod graph;
pub mod output;
pub mod render;
pub mod settings;

#[cfg(test)]
mod settings_tests;
#[cfg(test)]
pub mod test_utils;

pub use builder::QueryBuilder;
pub use error::{InternalError, RenderError, ValidationError};
pub use filter::{Filter, TagComparison, UserRef};
pub use graph::{ElementType, QueryGraph, RecurseMode, Statement, StatementId, StatementKind};
pub use output::{OutClause, OutOption};
pub use render::{NameOracle, NoNames};
pub use settings::{CsvOptions, OutputFormat, Settings};

/// Timestamp format used by date filters and settings.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
