//! Cycle detection tests.
//!
//! The graph API can only create forward references, so cycles are
//! closed by mutating a union's operand list after insertion.

use overql_core::{QueryGraph, StatementId, StatementKind};

use crate::analyze::detect_cycles;
use crate::BuildError;

fn push_operand(g: &mut QueryGraph, union: StatementId, operand: StatementId) {
    if let StatementKind::Union(operands) = &mut g.statement_mut(union).kind {
        operands.push(operand);
    }
}

#[test]
fn diamond_is_not_a_cycle() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let c = g.union([a, b]);
    let d = g.union([a, b, c]);

    assert_eq!(detect_cycles(&g, d), Ok(()));
}

#[test]
fn self_through_operand_is_a_cycle() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let c = g.union([a, b]);
    let d = g.union([a, b, c]);
    push_operand(&mut g, c, d);

    assert_eq!(detect_cycles(&g, d), Err(BuildError::CircularDependency(d)));
}

#[test]
fn deep_sharing_is_not_a_cycle() {
    let mut g = QueryGraph::new();
    let leaves: Vec<_> = (0..7).map(|_| g.nodes().finish()).collect();
    let &[a, b, c, d, e, f, h] = leaves.as_slice() else {
        unreachable!()
    };

    let u1 = g.union([a, b]);
    let u2 = g.union([c, d, u1]);
    let u3 = g.union([e, f]);
    let u4 = g.union([h, u2, u3]);
    push_operand(&mut g, u2, u3);
    push_operand(&mut g, u4, u1);
    push_operand(&mut g, u4, u2);
    push_operand(&mut g, u4, u3);

    assert_eq!(detect_cycles(&g, u4), Ok(()));
}

#[test]
fn indirect_cycle_is_detected() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let c = g.nodes().finish();
    let d = g.nodes().finish();
    let e = g.nodes().finish();
    let f = g.nodes().finish();
    let h = g.nodes().finish();

    let u1 = g.union([a, b]);
    let u2 = g.union([c, d, u1]);
    let u3 = g.union([e, f]);
    let u4 = g.union([h, u2, u3]);
    push_operand(&mut g, u3, u2);
    push_operand(&mut g, u1, u3);
    push_operand(&mut g, u4, u2);
    push_operand(&mut g, u4, u3);

    assert!(matches!(
        detect_cycles(&g, u4),
        Err(BuildError::CircularDependency(_))
    ));
}

#[test]
fn cycle_through_an_intersection_filter_is_detected() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.derive(a).finish();
    if let StatementKind::Query { filters, .. } = &mut g.statement_mut(a).kind {
        filters.push(overql_core::Filter::Intersection(vec![b]));
    }

    assert!(matches!(
        detect_cycles(&g, b),
        Err(BuildError::CircularDependency(_))
    ));
}
