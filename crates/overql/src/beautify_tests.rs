//! Beautifier tests.
//!
//! Expected strings are asserted with escapes because the exact
//! leading whitespace of every line is the point.

use overql_core::QueryGraph;

use crate::beautify::beautify;
use crate::build::build;

#[test]
fn single_statements_are_untouched() {
    let input = "node[\"amenity\"=\"bar\"][\"parking\"=\"yes\"][\"tourism\"=\"yes\"];";
    assert_eq!(beautify(input), input);
}

#[test]
fn unions_break_and_indent() {
    let input = "(node(128); node(42.0,43.0,44.0,45.0););";
    assert_eq!(
        beautify(input),
        "\n(\n  node(128\n);\nnode(42.0,43.0,44.0,45.0\n);\n);"
    );
}

#[test]
fn assignments_split_before_the_arrow() {
    let input = "node(10.0,20.0,30.0,40.0)->.set_0;\n\
                 node.set_0[\"amenity\"=\"bar\"]->.set_1;\n\
                 .set_1 out;\n\
                 (.set_0; .set_1;);\n\
                 out;";
    assert_eq!(
        beautify(input),
        "node(10.0,20.0,30.0,40.0\n)->.set_0;\n\
         node.set_0[\"amenity\"=\"bar\"]->.set_1;\n\
         .set_1 out;\n\
         (\n.set_0;\n.set_1;\n);\n\
         out;"
    );
}

#[test]
fn nested_combinators_indent_by_depth() {
    let input = "((node(128); .set_0;); - (.set_0; node(id:16,32);););";
    assert_eq!(
        beautify(input),
        "\n(\n  (\n    node(128\n  );\n  .set_0;\n);\n- (.set_0;\nnode(id:16,32\n);\n);\n);"
    );
}

#[test]
fn out_lines_stay_with_their_statements() {
    let input = "node(42)->.set_0;\n.set_0 out body;\n(.set_0; node(43););\nout geom;";
    assert_eq!(
        beautify(input),
        "node(42\n)->.set_0;\n.set_0 out body;\n(\n.set_0;\nnode(43\n);\n);\nout geom;"
    );
}

#[test]
fn beautified_build_output_keeps_every_token() {
    let mut g = QueryGraph::new();
    let a = g.nodes().id(128).finish();
    let b = g.nodes().bounding_box(42.0, 43.0, 44.0, 45.0).finish();
    let root = g.union([a, b]);

    let compiled = build(&g, root, None).unwrap();
    let pretty = beautify(&compiled);
    let stripped: String = pretty.chars().filter(|c| !c.is_whitespace()).collect();
    let compact: String = compiled.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(stripped, compact);
}
