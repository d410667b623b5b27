//! Variable allocation tests.

use overql_core::{InternalError, NameOracle, QueryGraph};

use crate::vars::VariableManager;

#[test]
fn generated_names_follow_registration_order() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let mut vars = VariableManager::new();

    assert_eq!(vars.register(a, None), Ok("set_0"));
    assert_eq!(vars.register(b, None), Ok("set_1"));
    assert_eq!(vars.name(a), Some("set_0"));
    assert_eq!(vars.name(b), Some("set_1"));
}

#[test]
fn unclaimed_labels_are_honored() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let mut vars = VariableManager::new();

    assert_eq!(vars.register(a, Some("stations")), Ok("stations"));
}

#[test]
fn claimed_labels_fall_back_to_generated_names() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let c = g.nodes().finish();
    let mut vars = VariableManager::new();

    assert_eq!(vars.register(a, Some("stations")), Ok("stations"));
    // The counter advances on every registration, so the fallback
    // reflects how many statements were materialized before it.
    assert_eq!(vars.register(b, Some("stations")), Ok("set_1"));
    assert_eq!(vars.register(c, None), Ok("set_2"));
}

#[test]
fn registering_twice_is_an_error() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let mut vars = VariableManager::new();

    vars.register(a, None).unwrap();
    assert_eq!(
        vars.register(a, None),
        Err(InternalError::AlreadyNamed(a))
    );
}

#[test]
fn is_named_tracks_registration() {
    let mut g = QueryGraph::new();
    let a = g.nodes().finish();
    let b = g.nodes().finish();
    let mut vars = VariableManager::new();
    vars.register(a, None).unwrap();

    assert!(vars.is_named(a));
    assert!(!vars.is_named(b));
}
