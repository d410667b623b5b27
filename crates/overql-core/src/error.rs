//! Validation and internal-consistency errors raised while rendering.
//!
//! Validation errors are caller mistakes (a filter or statement that
//! cannot be rendered as configured). Internal errors indicate a broken
//! invariant in the compiler itself and should never surface for a
//! valid statement graph; tests assert the pipeline keeps it that way.

use crate::graph::StatementId;

/// A statement or filter is configured in a way that has no rendering.
///
/// Raised lazily, at the moment the offending node is rendered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("empty intersection filter")]
    EmptyIntersection,
    #[error("around filter given both an input set and coordinates")]
    AroundConflictingInputs,
    #[error("around filter given neither an input set nor coordinates")]
    AroundMissingInput,
    #[error("user filter must list at least one user")]
    NoUsers,
    #[error("invalid regex {pattern:?}: {message}")]
    InvalidRegex { pattern: String, message: String },
    #[error("is_in given both an input set and a coordinate")]
    OverlappingAreasConflictingInputs,
    #[error("is_in given neither an input set nor a coordinate")]
    OverlappingAreasMissingInput,
    #[error("raw template placeholders must be named")]
    UnnamedPlaceholder,
    #[error("raw template references unbound placeholder {{{0}}}")]
    UnboundPlaceholder(String),
    #[error("csv output requires at least one field")]
    CsvWithoutFields,
    #[error("timeout must be a positive number of seconds")]
    NonPositiveTimeout,
}

/// A compiler invariant does not hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("statement {0} already has a variable")]
    AlreadyNamed(StatementId),
    #[error("statement {0} has no variable but one is required")]
    MissingName(StatementId),
    #[error("raw template has no output placeholder for variable {0:?}")]
    NoOutPlaceholder(String),
}

/// Any error a statement rendering can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}
