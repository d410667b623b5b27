//! Depth-first traversal over the statement DAG.
//!
//! The walk starts at the build root and follows dependency edges. The
//! pre hook fires once per *edge*, so a statement referenced from three
//! places is announced three times; descent and the post hook happen
//! only on the first encounter. Dependency analysis relies on exactly
//! this asymmetry to count references in one pass.

use std::convert::Infallible;

use overql_core::{QueryGraph, StatementId};

/// Hooks invoked while walking the dependency DAG.
///
/// Both hooks default to no-ops; implement only what a pass needs.
pub trait Visitor {
    type Error;

    /// Called on every edge into `id`, before descending.
    fn pre(&mut self, graph: &QueryGraph, id: StatementId) -> Result<(), Self::Error> {
        let _ = (graph, id);
        Ok(())
    }

    /// Called once per statement, after all its dependencies.
    fn post(&mut self, graph: &QueryGraph, id: StatementId) -> Result<(), Self::Error> {
        let _ = (graph, id);
        Ok(())
    }
}

/// Walk the DAG reachable from `root`, firing the visitor's hooks.
pub fn traverse<V: Visitor>(
    graph: &QueryGraph,
    root: StatementId,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let mut visited = vec![false; graph.len()];
    walk(graph, root, visitor, &mut visited)
}

fn walk<V: Visitor>(
    graph: &QueryGraph,
    id: StatementId,
    visitor: &mut V,
    visited: &mut [bool],
) -> Result<(), V::Error> {
    visitor.pre(graph, id)?;
    if visited[id.index()] {
        return Ok(());
    }
    visited[id.index()] = true;
    for dependency in graph.statement(id).dependencies() {
        walk(graph, dependency, visitor, visited)?;
    }
    visitor.post(graph, id)
}

/// Statements reachable from `root` in dependency-first order, ending
/// with `root` itself. Each statement appears exactly once.
pub fn post_order(graph: &QueryGraph, root: StatementId) -> Vec<StatementId> {
    struct Collect(Vec<StatementId>);

    impl Visitor for Collect {
        type Error = Infallible;

        fn post(&mut self, _graph: &QueryGraph, id: StatementId) -> Result<(), Infallible> {
            self.0.push(id);
            Ok(())
        }
    }

    let mut collect = Collect(Vec::new());
    match traverse(graph, root, &mut collect) {
        Ok(()) => collect.0,
        Err(e) => match e {},
    }
}
