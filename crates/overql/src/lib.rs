//! Compiler for composable Overpass QL statement graphs.
//!
//! Statements are built into a [`QueryGraph`] and compiled by [`build`]:
//! - `traverse` - depth-first walk over the dependency DAG
//! - `analyze` - cycle detection and dependency analysis
//! - `simplify` - filter-chain inlining
//! - `vars` - variable allocation for materialized statements
//! - `emit` - ordered program text generation
//! - `beautify` - optional re-indentation of compiled text
//!
//! ```
//! use overql::{build, QueryGraph};
//!
//! let mut graph = QueryGraph::new();
//! let bars = graph.nodes().tag("amenity", "bar").finish();
//! let near = graph.derive(bars).tag("tourism", "yes").finish();
//! let text = build(&graph, near, None).unwrap();
//! assert_eq!(text, "node[\"amenity\"=\"bar\"][\"tourism\"=\"yes\"];");
//! ```

pub mod analyze;
pub mod beautify;
pub mod build;
pub mod emit;
pub mod simplify;
pub mod traverse;
pub mod vars;

#[cfg(test)]
mod beautify_tests;
#[cfg(test)]
mod simplify_tests;
#[cfg(test)]
mod vars_tests;

pub use analyze::{analyze, detect_cycles, DependencyAnalysis};
pub use beautify::beautify;
pub use build::build;
pub use emit::emit;
pub use simplify::simplify;
pub use traverse::{post_order, traverse, Visitor};
pub use vars::VariableManager;

pub use overql_core::{
    CsvOptions, ElementType, Filter, InternalError, NameOracle, OutClause, OutOption,
    OutputFormat, QueryBuilder, QueryGraph, RecurseMode, RenderError, Settings, Statement,
    StatementId, StatementKind, TagComparison, UserRef, ValidationError,
};

/// Any error the single build entry point can produce.
///
/// A build either returns complete program text or fails with one of
/// these; there is no partial output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The dependency relation contains a cycle through this statement.
    #[error("circular dependency: statement {0} depends on its own result")]
    CircularDependency(StatementId),
    /// A statement or filter is configured in a way that cannot render.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A compiler invariant was broken. Never expected for valid input.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<RenderError> for BuildError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Validation(e) => Self::Validation(e),
            RenderError::Internal(e) => Self::Internal(e),
        }
    }
}
