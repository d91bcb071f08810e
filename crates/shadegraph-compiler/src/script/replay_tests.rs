use indoc::indoc;
use shadegraph_core::{PortType, Target};

use super::{ScriptErrors, replay};
use crate::Error;
use crate::blocks::BlockRegistry;
use crate::test_utils::from_script;

/// Script errors as `start..end: message` lines.
fn errors(source: &str) -> String {
    match replay(source, &BlockRegistry::stock()) {
        Ok(_) => "ok".to_string(),
        Err(Error::Script(errors)) => errors
            .iter()
            .map(|e| format!("{}..{}: {}\n", e.span.start, e.span.end, e.message))
            .collect(),
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn builds_blocks_properties_and_wires() {
    let graph = replay(
        indoc! {r#"
            let tint = InputBlock("tint");
            tint.mode = "uniform";
            tint.type = "Color3";
            tint.value = [1, 0.5, 0];
            let out = FragmentOutputBlock("out");
            tint.output -> out.rgb;
        "#},
        &BlockRegistry::stock(),
    )
    .expect("replay");

    assert_eq!(graph.len(), 2);
    let tint = graph.block_by_name("tint").expect("tint block");
    let out = graph.block_by_name("out").expect("out block");
    let rgb = graph.input_by_name(out, "rgb").expect("rgb input");
    let upstream = graph.port(rgb).connected_point().expect("connected");

    assert_eq!(graph.port(upstream).owner(), tint);
    assert_eq!(graph.resolved_type(upstream), PortType::Color3);
    assert_eq!(graph.block(tint).target(), Some(Target::VertexAndFragment));
}

#[test]
fn properties_are_applied_together() {
    // No single assignment here is a valid input block on its own.
    let material = from_script(indoc! {r#"
        let position = InputBlock("position");
        position.mode = "attribute";
        position.attribute = "position";
        position.type = "Vector3";
    "#})
    .expect("replay");

    let block = material.graph().block_by_name("position").expect("block");
    let properties = material.graph().block(block).kind().serialize();
    assert_eq!(properties["mode"], "attribute");
    assert_eq!(properties["attribute"], "position");
    assert_eq!(material.graph().block(block).target(), Some(Target::Vertex));
}

#[test]
fn target_statements_override_affinity() {
    let material = from_script(indoc! {r#"
        let mul = MultiplyBlock("mul");
        mul.target = "Fragment";
        let add = AddBlock("add");
        add.target = null;
    "#})
    .expect("replay");
    let graph = material.graph();

    let mul = graph.block_by_name("mul").expect("mul");
    let add = graph.block_by_name("add").expect("add");
    assert_eq!(graph.block(mul).target(), Some(Target::Fragment));
    assert_eq!(graph.block(add).target(), None);
}

#[test]
fn final_mergers_become_outputs() {
    let material = from_script(indoc! {r#"
        let v = VertexOutputBlock("v");
        let f = FragmentOutputBlock("f");
        let other = DotBlock("other");
    "#})
    .expect("replay");

    assert_eq!(material.vertex_outputs().len(), 1);
    assert_eq!(material.fragment_outputs().len(), 1);
    assert_eq!(material.name(), "test");
}

#[test]
fn unknown_class() {
    insta::assert_snapshot!(errors(r#"let a = Sparkle("a");"#), @"8..15: unknown block class `Sparkle`");
}

#[test]
fn duplicate_and_undeclared_identifiers() {
    let source = indoc! {r#"
        let a = DotBlock("a");
        let a = AddBlock("again");
        b.value = 1;
        a.output -> c.left;
    "#};

    insta::assert_snapshot!(errors(source), @r"
    26..27: `a` is already declared
    49..50: `b` is not declared
    74..75: `c` is not declared
    ");
}

#[test]
fn bad_ports_and_types() {
    let source = indoc! {r#"
        let m = InputBlock("m");
        m.mode = "uniform";
        m.type = "Float";
        m.value = [1];
        let out = FragmentOutputBlock("out");
        m.output -> out.alpha;
        m.output -> out.rgb;
    "#};

    insta::assert_snapshot!(errors(source), @r"
    116..138: block `out` has no port named `alpha`
    139..159: cannot connect `m.output` (Float) to `out.rgb` (Color3)
    ");
}

#[test]
fn invalid_properties_point_at_the_first_assignment() {
    let source = indoc! {r#"
        let c = InputBlock("c");
        c.mode = "constant";
        c.type = "Float";
        c.value = [1, 2];
    "#};

    insta::assert_snapshot!(errors(source), @"25..45: invalid properties for `c`: `Float` takes 1 value(s), got 2");
}

#[test]
fn invalid_target() {
    insta::assert_snapshot!(
        errors(r#"let a = AddBlock("a"); a.target = "Geometry";"#),
        @r#"23..45: invalid target: unknown variant `Geometry`, expected one of `Neutral`, `Vertex`, `Fragment`, `VertexAndFragment`"#
    );
}

#[test]
fn parse_errors_stop_before_replay() {
    // The undeclared `z` is never looked up.
    insta::assert_snapshot!(errors("z.a = ;"), @"6..7: expected value, found `;`");
}

#[test]
fn rendered_errors_annotate_the_source() {
    let source = "let a = Sparkle(\"a\");";
    let Err(Error::Script(errors)) = replay(source, &BlockRegistry::stock()) else {
        panic!("expected script errors");
    };

    let plain = errors.printer(source).render();
    assert!(plain.starts_with("error: unknown block class `Sparkle`"));
    assert!(plain.contains("1 | let a = Sparkle(\"a\");"));
    assert!(plain.contains("^^^^^^^"));

    let with_path = errors.printer(source).path("scene.sg").render();
    assert!(with_path.contains("--> scene.sg:1:9"));

    let colored = errors.printer(source).colored(true).render();
    assert!(colored.contains('\x1b'));
}

#[test]
fn empty_errors_render_nothing() {
    let errors = ScriptErrors::default();
    assert!(errors.printer("source").render().is_empty());
}
