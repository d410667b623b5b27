//! Filter-chain inlining tests.

use overql_core::{Filter, OutOption, QueryGraph, StatementId, StatementKind};

use crate::analyze::analyze;
use crate::simplify::simplify;

fn filters(g: &QueryGraph, id: StatementId) -> &[Filter] {
    match &g.statement(id).kind {
        StatementKind::Query { filters, .. } => filters,
        kind => panic!("expected a query, got {kind:?}"),
    }
}

fn has_intersection(g: &QueryGraph, id: StatementId) -> bool {
    filters(g, id)
        .iter()
        .any(|f| matches!(f, Filter::Intersection(_)))
}

#[test]
fn chains_collapse_end_to_end() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.derive(a).tag("amenity", "bar").finish();
    let c = g.derive(b).tag("parking", "yes").finish();
    let d = g.derive(c).tag("tourism", "yes").finish();

    let analysis = analyze(&g, d);
    simplify(&mut g, d, &analysis);

    assert!(!has_intersection(&g, d));
    assert_eq!(filters(&g, d).len(), 3);
}

#[test]
fn shared_parents_are_not_spliced() {
    let mut g = QueryGraph::new();
    let a = g.nodes().bounding_box(10.0, 20.0, 30.0, 40.0).finish();
    let b = g.derive(a).tag("amenity", "bar").finish();
    let u = g.union([a, b]);

    let analysis = analyze(&g, u);
    simplify(&mut g, u, &analysis);

    // Both the union and the filter still reach `a`.
    assert!(has_intersection(&g, b));
}

#[test]
fn cross_type_operands_are_not_spliced() {
    let mut g = QueryGraph::new();
    let a = g.nodes().tag("amenity", "bar").finish();
    let b = g.ways().input_set(a).finish();

    let analysis = analyze(&g, b);
    simplify(&mut g, b, &analysis);

    assert!(has_intersection(&g, b));
    assert_eq!(filters(&g, b).len(), 1);
}

#[test]
fn operands_with_output_requests_are_not_spliced() {
    let mut g = QueryGraph::new();
    let a = g.nodes().tag("amenity", "bar").finish();
    g.request_output(a, [OutOption::Body]);
    let b = g.derive(a).tag("tourism", "yes").finish();

    let analysis = analyze(&g, b);
    simplify(&mut g, b, &analysis);

    assert!(has_intersection(&g, b));
}

#[test]
fn combinator_operands_are_not_spliced() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let u = g.union([a, b]);
    let c = g.derive(u).tag("amenity", "bar").finish();

    let analysis = analyze(&g, c);
    simplify(&mut g, c, &analysis);

    assert!(has_intersection(&g, c));
}

#[test]
fn partial_intersections_keep_their_other_operands() {
    let mut g = QueryGraph::new();
    let spliceable = g.nodes().tag("amenity", "bar").finish();
    let pinned = g.nodes().finish();
    g.request_output(pinned, [OutOption::Body]);
    let root = g
        .nodes()
        .filter(Filter::Intersection(vec![spliceable, pinned]))
        .finish();

    let analysis = analyze(&g, root);
    simplify(&mut g, root, &analysis);

    let rebuilt = filters(&g, root);
    assert_eq!(rebuilt.len(), 2);
    assert!(matches!(rebuilt[0], Filter::Tag { .. }));
    match &rebuilt[1] {
        Filter::Intersection(kept) => assert_eq!(kept, &vec![pinned]),
        other => panic!("expected a residual intersection, got {other:?}"),
    }
}
