//! The build pipeline.

use overql_core::{QueryGraph, Settings, StatementId};

use crate::analyze::{analyze, detect_cycles};
use crate::emit::emit;
use crate::simplify::simplify;
use crate::BuildError;

/// Compile the statement graph reachable from `root` into Overpass QL
/// text, optionally prefixed by a settings header line.
///
/// The caller's graph is never modified: simplification runs on a
/// clone, so a graph can be built repeatedly, with different roots or
/// settings, and keep producing the same text.
pub fn build(
    graph: &QueryGraph,
    root: StatementId,
    settings: Option<&Settings>,
) -> Result<String, BuildError> {
    detect_cycles(graph, root)?;
    let analysis = analyze(graph, root);

    let mut working = graph.clone();
    simplify(&mut working, root, &analysis);

    let body = emit(&working, root, &analysis)?;
    match settings {
        Some(settings) => {
            let header = settings.render()?;
            Ok(format!("{header}\n{body}"))
        }
        None => Ok(body),
    }
}
