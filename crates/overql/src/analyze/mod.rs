//! Pre-build analysis passes.
//!
//! Both passes are single traversals from the build root:
//! - cycle detection, which rejects graphs a build could not order
//! - dependency analysis, which counts references and marks statements
//!   that must be materialized into a variable

mod cycle;
mod deps;

#[cfg(test)]
mod cycle_tests;

pub use cycle::detect_cycles;
pub use deps::{analyze, DependencyAnalysis};
