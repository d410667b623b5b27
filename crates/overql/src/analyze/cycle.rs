//! Cycle detection over the dependency relation.

use overql_core::{QueryGraph, StatementId};

use crate::traverse::{traverse, Visitor};
use crate::BuildError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unseen,
    /// Entered but not yet left: an edge back here closes a cycle.
    Open,
    Closed,
}

struct CycleDetector {
    states: Vec<VisitState>,
}

impl Visitor for CycleDetector {
    type Error = BuildError;

    fn pre(&mut self, _graph: &QueryGraph, id: StatementId) -> Result<(), BuildError> {
        match self.states[id.index()] {
            VisitState::Unseen => {
                self.states[id.index()] = VisitState::Open;
                Ok(())
            }
            VisitState::Open => Err(BuildError::CircularDependency(id)),
            VisitState::Closed => Ok(()),
        }
    }

    fn post(&mut self, _graph: &QueryGraph, id: StatementId) -> Result<(), BuildError> {
        self.states[id.index()] = VisitState::Closed;
        Ok(())
    }
}

/// Fail if any statement reachable from `root` depends, directly or
/// transitively, on its own result.
pub fn detect_cycles(graph: &QueryGraph, root: StatementId) -> Result<(), BuildError> {
    let mut detector = CycleDetector {
        states: vec![VisitState::Unseen; graph.len()],
    };
    traverse(graph, root, &mut detector)
}
