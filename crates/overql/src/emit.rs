//! Program text generation.
//!
//! Statements are emitted in dependency-first order so every variable
//! is assigned before it is read. The root always renders last and
//! writes to the default set; every other reachable statement either
//! needs a variable (and gets its own line) or is left for its single
//! consumer to render inline.

use overql_core::{QueryGraph, StatementId};

use crate::analyze::DependencyAnalysis;
use crate::traverse::{traverse, Visitor};
use crate::vars::VariableManager;
use crate::BuildError;

struct Emitter<'a> {
    root: StatementId,
    analysis: &'a DependencyAnalysis,
    vars: VariableManager,
    lines: Vec<String>,
}

impl Visitor for Emitter<'_> {
    type Error = BuildError;

    fn post(&mut self, graph: &QueryGraph, id: StatementId) -> Result<(), BuildError> {
        if id == self.root {
            self.lines.push(graph.render(id, &self.vars, None)?);
        } else if !self.analysis.can_inline(graph, id) {
            let label = graph.statement(id).label.clone();
            let name = self.vars.register(id, label.as_deref())?.to_string();
            self.lines.push(graph.render(id, &self.vars, Some(&name))?);
        }
        Ok(())
    }
}

/// Emit the program text for the graph reachable from `root`.
pub fn emit(
    graph: &QueryGraph,
    root: StatementId,
    analysis: &DependencyAnalysis,
) -> Result<String, BuildError> {
    let mut emitter = Emitter {
        root,
        analysis,
        vars: VariableManager::new(),
        lines: Vec::new(),
    };
    traverse(graph, root, &mut emitter)?;
    Ok(emitter.lines.join("\n"))
}
