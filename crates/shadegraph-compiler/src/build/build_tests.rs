use shadegraph_core::{PortType, Stage, Target};

use crate::blocks::{
    AddBlock, FragmentOutputBlock, InputBlock, MultiplyBlock, TransformBlock, VertexOutputBlock,
};
use crate::build::{BuildOptions, Session};
use crate::diagnostics::DiagnosticKind;
use crate::graph::ConnectOptions;
use crate::material::Material;
use crate::test_utils::{
    IDENTITY, TestBlock, add_vertex_half, basic_material, compile, compile_with,
};
use crate::{Error, shot_build};

#[test]
fn basic_material_compiles() {
    let mut material = basic_material();
    let shaders = compile(&mut material);

    insta::assert_snapshot!(shaders.vertex, @r"
    attribute vec3 position;
    uniform mat4 u_worldViewProjection;

    void main(void) {
      vec4 output0 = u_worldViewProjection * vec4(position, 1.0);
      gl_Position = output0;
    }
    ");
    insta::assert_snapshot!(shaders.fragment, @r"
    precision highp float;

    uniform vec3 u_color;

    void main(void) {
      gl_FragColor = vec4(u_color, 1.0);
    }
    ");
    assert!(shaders.diagnostics.is_empty());
}

#[test]
fn uniforms_are_listed_once() {
    let mut material = basic_material();
    let shaders = compile(&mut material);

    let names: Vec<_> = shaders.uniforms.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["u_worldViewProjection", "u_color"]);
    assert_eq!(shaders.uniforms[1].ty, PortType::Color3);
    assert_eq!(shaders.uniforms[1].value, [1.0, 0.5, 0.0]);
}

#[test]
fn comments_precede_each_block() {
    let mut material = basic_material();
    let shaders = compile_with(&mut material, BuildOptions::new().emit_comments(true));

    insta::assert_snapshot!(shaders.vertex, @r"
    attribute vec3 position;
    uniform mat4 u_worldViewProjection;

    void main(void) {
      // transform
      vec4 output0 = u_worldViewProjection * vec4(position, 1.0);
      // vertexOutput
      gl_Position = output0;
    }
    ");
}

#[test]
fn rebuild_is_deterministic() {
    let mut material = basic_material();
    let first = compile(&mut material);
    let second = compile(&mut material);

    assert_eq!(first.vertex, second.vertex);
    assert_eq!(first.fragment, second.fragment);
}

#[test]
fn building_twice_in_one_session_is_a_no_op() {
    let mut material = basic_material();
    let root = material.vertex_outputs()[0];
    let mut session = Session::new(1, BuildOptions::default());
    let graph = material.graph_mut();

    assert!(!graph.build(root, &mut session, Stage::Vertex));
    let body = session.state(Stage::Vertex).body().to_string();
    let declarations = session.state(Stage::Vertex).declarations().to_vec();

    assert!(graph.build(root, &mut session, Stage::Vertex));
    assert_eq!(session.state(Stage::Vertex).body(), body);
    assert_eq!(session.state(Stage::Vertex).declarations(), declarations);
    assert_eq!(graph.block(root).build_id(), Some(1));
    assert_eq!(graph.block(root).build_target(), Some(Stage::Vertex));
}

#[test]
fn constants_are_declared_per_stage() {
    let mut material = Material::new("constant");
    add_vertex_half(&mut material);
    let half = material.add_block("half", InputBlock::float(0.5));
    let out = material.add_block("out", FragmentOutputBlock);
    let rgb = material.add_block("rgb", InputBlock::uniform(PortType::Color3, [1.0, 1.0, 1.0]));
    material.connect(rgb, out).expect("rgb");
    material.connect(half, out).expect("alpha");
    material.add_output_node(out).expect("fragment output");

    let shaders = compile(&mut material);

    insta::assert_snapshot!(shaders.fragment, @r"
    precision highp float;

    uniform vec3 u_rgb;
    const float c_half = 0.5;

    void main(void) {
      gl_FragColor = vec4(u_rgb, c_half);
    }
    ");
}

#[test]
fn optional_and_required_inputs() {
    let mut material = Material::new("inputs");
    add_vertex_half(&mut material);
    let color = material.add_block("color", InputBlock::uniform(PortType::Color4, [1.0; 4]));
    let mul = material.add_block("mul", MultiplyBlock);
    let out = material.add_block("out", FragmentOutputBlock);
    material.connect(color, mul).expect("color -> mul");
    material.connect(mul, out).expect("mul -> out");
    material.add_output_node(out).expect("fragment output");

    let shaders = compile(&mut material);

    assert_eq!(
        shaders
            .diagnostics
            .count_of(DiagnosticKind::UnconnectedRequiredInput),
        1
    );
    insta::assert_snapshot!(shaders.fragment, @r"
    precision highp float;

    uniform vec4 u_color;

    void main(void) {
      vec4 output0 = u_color * vec4(0.0);
      gl_FragColor = output0;
    }
    ");
}

#[test_log::test]
fn strict_builds_fail_on_warnings() {
    let mut material = Material::new("strict");
    add_vertex_half(&mut material);
    let color = material.add_block("color", InputBlock::uniform(PortType::Color4, [1.0; 4]));
    let mul = material.add_block("mul", MultiplyBlock);
    let out = material.add_block("out", FragmentOutputBlock);
    material.connect(color, mul).expect("color -> mul");
    material.connect(mul, out).expect("mul -> out");
    material.add_output_node(out).expect("fragment output");

    let Err(Error::BuildFailed(diagnostics)) =
        material.build(BuildOptions::new().fail_on_warnings(true))
    else {
        panic!("strict build should fail");
    };
    insta::assert_snapshot!(diagnostics.render(), @r"
    warning: required input `right` is not connected
      --> mul.right
    ");
}

#[test]
fn missing_entries_fail_the_build() {
    let mut material = Material::new("empty");

    let Err(Error::BuildFailed(diagnostics)) = material.build(BuildOptions::default()) else {
        panic!("empty material should fail");
    };

    assert_eq!(diagnostics.count_of(DiagnosticKind::MissingVertexEntry), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::MissingFragmentEntry), 1);
}

#[test]
fn unconnected_fragment_output_is_an_error() {
    let mut material = Material::new("dark");
    add_vertex_half(&mut material);
    let out = material.add_block("out", FragmentOutputBlock);
    material.add_output_node(out).expect("fragment output");

    let Err(Error::BuildFailed(diagnostics)) = material.build(BuildOptions::default()) else {
        panic!("unconnected output should fail");
    };

    assert_eq!(
        diagnostics.count_of(DiagnosticKind::FragmentOutputUnconnected),
        1
    );
    assert_eq!(
        diagnostics.count_of(DiagnosticKind::UnconnectedRequiredInput),
        0
    );
}

#[test]
fn non_finite_values_fail_the_build() {
    let mut material = Material::new("nan");
    add_vertex_half(&mut material);
    let rgb = material.add_block(
        "rgb",
        InputBlock::uniform(PortType::Color3, [1.0, f64::INFINITY, 0.0]),
    );
    let alpha = material.add_block("alpha", InputBlock::float(f64::NAN));
    let out = material.add_block("out", FragmentOutputBlock);
    material.connect(rgb, out).expect("rgb -> out");
    material.connect(alpha, out).expect("alpha -> out");
    material.add_output_node(out).expect("fragment output");

    let Err(Error::BuildFailed(diagnostics)) = material.build(BuildOptions::default()) else {
        panic!("non-finite values should fail");
    };

    insta::assert_snapshot!(diagnostics.render(), @r"
    error: value `inf` is not a finite number
      --> rgb

    error: value `NaN` is not a finite number
      --> alpha
    ");
}

#[test]
fn cycles_are_reported_not_followed() {
    let mut material = Material::new("cycle");
    add_vertex_half(&mut material);
    let a = material.add_block("a", AddBlock);
    let b = material.add_block("b", AddBlock);
    let out = material.add_block("out", FragmentOutputBlock);
    material.connect(a, b).expect("a -> b");
    material.connect(b, a).expect("b -> a");
    let graph = material.graph_mut();
    let b_output = graph.block(b).outputs()[0];
    let rgb = graph.input_by_name(out, "rgb").expect("rgb input");
    graph.connect_ports(b_output, rgb).expect("b -> out.rgb");
    material.add_output_node(out).expect("fragment output");

    let Err(Error::BuildFailed(diagnostics)) = material.build(BuildOptions::default()) else {
        panic!("cyclic graph should fail");
    };

    assert_eq!(diagnostics.count_of(DiagnosticKind::CycleDetected), 1);
    let cycle = diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::CycleDetected)
        .map(|d| d.location.to_string());
    assert_eq!(cycle.as_deref(), Some("b"));
}

#[test]
fn unresolved_outputs_are_reported() {
    let mut material = Material::new("unresolved");
    add_vertex_half(&mut material);
    let mul = material.add_block("mul", MultiplyBlock);
    let out = material.add_block("out", FragmentOutputBlock);
    material
        .connect_with(mul, out, &ConnectOptions::new().input("a"))
        .expect("mul -> out.a");
    material.add_output_node(out).expect("fragment output");

    let Err(Error::BuildFailed(diagnostics)) = material.build(BuildOptions::default()) else {
        panic!("no color input should fail");
    };

    assert_eq!(diagnostics.count_of(DiagnosticKind::UnresolvedType), 1);
    assert_eq!(
        diagnostics.count_of(DiagnosticKind::UnconnectedRequiredInput),
        2
    );
}

#[test]
fn forward_pass_builds_dual_stage_consumers() {
    let mut material = Material::new("forward");
    add_vertex_half(&mut material);
    let color = material.add_block("color", InputBlock::attribute("color", PortType::Color3));
    let probe = material.add_block(
        "probe",
        TestBlock::new()
            .input("in", PortType::AutoDetect)
            .output("shade", PortType::Color3)
            .target(Target::VertexAndFragment),
    );
    let out = material.add_block("out", FragmentOutputBlock);
    material.connect(color, probe).expect("color -> probe");
    material.connect(probe, out).expect("probe -> out");
    material.add_output_node(out).expect("fragment output");

    let shaders = compile(&mut material);

    insta::assert_snapshot!(shaders.vertex, @r"
    attribute vec3 position;
    uniform mat4 u_worldViewProjection;
    attribute vec3 color;
    varying vec3 v_color;

    void main(void) {
      vec4 output0 = u_worldViewProjection * vec4(position, 1.0);
      gl_Position = output0;
      vec3 shade = color;
      v_color = color;
    }
    ");
    insta::assert_snapshot!(shaders.fragment, @r"
    precision highp float;

    varying vec3 v_color;

    void main(void) {
      vec3 shade = v_color;
      gl_FragColor = vec4(shade, 1.0);
    }
    ");
}

#[test_log::test]
fn verbose_builds_still_compile() {
    let mut material = basic_material();
    let shaders = compile_with(&mut material, BuildOptions::new().verbose(true));
    assert!(shaders.vertex.contains("gl_Position = output0;"));
}

#[test]
fn script_build_snapshot() {
    shot_build!(r#"
        let position = InputBlock("position");
        position.mode = "attribute";
        position.type = "Vector3";
        position.attribute = "position";
        let transform = TransformBlock("transform");
        let vertexOutput = VertexOutputBlock("vertexOutput");
        position.output -> transform.vector;
        transform.output -> vertexOutput.vector;

        let color = InputBlock("color");
        color.mode = "constant";
        color.type = "Color4";
        color.value = [0.2, 0.4, 0.6, 1.0];
        let out = FragmentOutputBlock("out");
        color.output -> out.rgba;
    "#, @r"
    [vertex]
    attribute vec3 position;

    void main(void) {
      vec4 output0 = mat4(1.0) * vec4(position, 1.0);
      gl_Position = output0;
    }

    [fragment]
    precision highp float;

    const vec4 c_color = vec4(0.2, 0.4, 0.6, 1.0);

    void main(void) {
      gl_FragColor = c_color;
    }

    [diagnostics]
    warning: required input `transform` is not connected
      --> transform.transform
    ");
}

#[test]
fn script_without_vertex_output_fails() {
    shot_build!(r#"
        let color = InputBlock("color");
        color.mode = "uniform";
        color.type = "Color3";
        color.value = [1.0, 1.0, 1.0];
        let out = FragmentOutputBlock("out");
        color.output -> out.rgb;
    "#, @r"
    error: no vertex output reached during build
      --> test
      = hint: add a VertexOutputBlock and register it as an output
    ");
}

#[test]
fn same_named_uniforms_get_distinct_names() {
    let mut material = Material::new("two uniforms");
    let position = material.add_block(
        "position",
        InputBlock::attribute("position", PortType::Vector3),
    );
    let scale = material.add_block("k", InputBlock::uniform(PortType::Vector3, [2.0, 2.0, 2.0]));
    let mul = material.add_block("mul", MultiplyBlock);
    let wvp = material.add_block("wvp", InputBlock::uniform(PortType::Matrix, IDENTITY));
    let transform = material.add_block("transform", TransformBlock::default());
    let vertex = material.add_block("vertexOutput", VertexOutputBlock);
    let rgb = material.add_block("rgb", InputBlock::uniform(PortType::Color3, [1.0, 0.5, 0.0]));
    let alpha = material.add_block("k", InputBlock::uniform(PortType::Float, [0.5]));
    let out = material.add_block("out", FragmentOutputBlock);
    for (from, to) in [
        (position, mul),
        (scale, mul),
        (mul, transform),
        (wvp, transform),
        (transform, vertex),
        (rgb, out),
        (alpha, out),
    ] {
        material.connect(from, to).expect("fixture wiring");
    }
    material.add_output_node(vertex).expect("vertex output");
    material.add_output_node(out).expect("fragment output");

    let shaders = compile(&mut material);

    insta::assert_snapshot!(shaders.vertex, @r"
    attribute vec3 position;
    uniform vec3 u_k;
    uniform mat4 u_wvp;

    void main(void) {
      vec3 output0 = position * u_k;
      vec4 output1 = u_wvp * vec4(output0, 1.0);
      gl_Position = output1;
    }
    ");
    insta::assert_snapshot!(shaders.fragment, @r"
    precision highp float;

    uniform vec3 u_rgb;
    uniform float u_k1;

    void main(void) {
      gl_FragColor = vec4(u_rgb, u_k1);
    }
    ");

    let uniforms: Vec<_> = shaders
        .uniforms
        .iter()
        .map(|u| (u.name.as_str(), u.ty))
        .collect();
    assert_eq!(
        uniforms,
        [
            ("u_k", PortType::Vector3),
            ("u_wvp", PortType::Matrix),
            ("u_rgb", PortType::Color3),
            ("u_k1", PortType::Float),
        ]
    );
}

