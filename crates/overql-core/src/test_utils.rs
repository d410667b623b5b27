//! Shared helpers for core tests.

use indexmap::IndexMap;

use crate::graph::StatementId;
use crate::render::NameOracle;

/// A hand-filled name table standing in for the compiler's allocator.
#[derive(Debug, Default)]
pub struct Names(IndexMap<StatementId, String>);

impl Names {
    pub fn assign(&mut self, id: StatementId, name: &str) {
        self.0.insert(id, name.to_string());
    }
}

impl NameOracle for Names {
    fn name(&self, id: StatementId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }
}
