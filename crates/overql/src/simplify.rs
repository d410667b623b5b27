//! Filter-chain inlining.
//!
//! A query that intersects with exactly one other query of the same
//! element type is equivalent to that query with the filters of both,
//! so the chain collapses into a single statement. Splicing across
//! element types would widen or narrow the selection, so only
//! same-type operands are eligible. Statements run in dependency-first
//! order, which lets chains collapse end to end in one pass.

use overql_core::{ElementType, Filter, QueryGraph, StatementId, StatementKind};

use crate::analyze::DependencyAnalysis;
use crate::traverse::post_order;

/// Splice single-use same-type query operands out of intersection
/// filters, in place. Spliced statements stay in the arena but become
/// unreachable from `root`.
pub fn simplify(graph: &mut QueryGraph, root: StatementId, analysis: &DependencyAnalysis) {
    for id in post_order(graph, root) {
        let (element, filters) = match &graph.statement(id).kind {
            StatementKind::Query { element, filters } => (*element, filters.clone()),
            _ => continue,
        };

        let mut rebuilt = Vec::with_capacity(filters.len());
        for filter in filters {
            let Filter::Intersection(operands) = filter else {
                rebuilt.push(filter);
                continue;
            };
            let mut kept = Vec::new();
            for operand in operands {
                match splice_filters(graph, analysis, operand, element) {
                    Some(spliced) => rebuilt.extend(spliced),
                    None => kept.push(operand),
                }
            }
            if !kept.is_empty() {
                rebuilt.push(Filter::Intersection(kept));
            }
        }

        if let StatementKind::Query { filters, .. } = &mut graph.statement_mut(id).kind {
            *filters = rebuilt;
        }
    }
}

/// The operand's filters when it can be spliced into its consumer:
/// a query of the same element type whose result nothing else needs.
fn splice_filters(
    graph: &QueryGraph,
    analysis: &DependencyAnalysis,
    operand: StatementId,
    element: ElementType,
) -> Option<Vec<Filter>> {
    if analysis.ref_count(operand) > 1 {
        return None;
    }
    let statement = graph.statement(operand);
    if !statement.out_clauses.is_empty() {
        return None;
    }
    match &statement.kind {
        StatementKind::Query {
            element: operand_element,
            filters,
        } if *operand_element == element => Some(filters.clone()),
        _ => None,
    }
}
