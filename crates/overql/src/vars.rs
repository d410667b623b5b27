//! Variable allocation for materialized statements.

use indexmap::IndexMap;

use overql_core::{InternalError, NameOracle, StatementId};

/// Assigns variable names in registration order.
///
/// A statement's label is honored when no earlier statement claimed
/// it; otherwise the statement falls back to a generated `set_<n>`
/// name. The counter advances on every registration, claimed label or
/// not, so generated names reflect materialization order.
#[derive(Debug, Default)]
pub struct VariableManager {
    names: IndexMap<StatementId, String>,
    next_id: u32,
}

impl VariableManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a variable to a statement and return it.
    pub fn register(
        &mut self,
        id: StatementId,
        label: Option<&str>,
    ) -> Result<&str, InternalError> {
        if self.names.contains_key(&id) {
            return Err(InternalError::AlreadyNamed(id));
        }
        let name = match label {
            Some(label) if !self.is_claimed(label) => label.to_string(),
            _ => format!("set_{}", self.next_id),
        };
        self.next_id += 1;
        Ok(self.names.entry(id).or_insert(name))
    }

    pub fn is_named(&self, id: StatementId) -> bool {
        self.names.contains_key(&id)
    }

    fn is_claimed(&self, label: &str) -> bool {
        self.names.values().any(|name| name == label)
    }
}

impl NameOracle for VariableManager {
    fn name(&self, id: StatementId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}
