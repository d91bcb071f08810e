use indoc::indoc;
use serde_json::json;
use shadegraph_compiler::{BlockRegistry, BuildOptions, CompiledShaders, Material};
use shadegraph_core::Colors;

use super::compile::{StageChoice, render_shaders};

const SCRIPT: &str = indoc! {r#"
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
"#};

fn compile(script: &str) -> CompiledShaders {
    let mut material = Material::from_script("test", script, &BlockRegistry::stock()).unwrap();
    material.build(BuildOptions::default()).unwrap()
}

#[test]
fn both_stages_get_headers() {
    let shaders = compile(SCRIPT);

    insta::assert_snapshot!(render_shaders(&shaders, StageChoice::Both, Colors::OFF), @r"
    // Vertex shader
    attribute vec3 position;

    void main(void) {
      vec4 output0 = mat4(1.0) * vec4(position, 1.0);
      gl_Position = output0;
    }

    // Fragment shader
    precision highp float;

    const vec4 c_color = vec4(0.2, 0.4, 0.6, 1.0);

    void main(void) {
      gl_FragColor = c_color;
    }
    ");
}

#[test]
fn single_stage_is_printed_bare() {
    let shaders = compile(SCRIPT);

    assert_eq!(
        render_shaders(&shaders, StageChoice::Vertex, Colors::OFF),
        shaders.vertex
    );
    assert_eq!(
        render_shaders(&shaders, StageChoice::Fragment, Colors::ON),
        shaders.fragment
    );
}

#[test]
fn colored_headers_are_dimmed() {
    let shaders = compile(SCRIPT);
    let out = render_shaders(&shaders, StageChoice::Both, Colors::ON);

    assert!(out.starts_with(&format!("{}// Vertex shader{}\n", Colors::ON.dim, Colors::ON.reset)));
    assert!(out.contains(&format!("{}// Fragment shader{}\n", Colors::ON.dim, Colors::ON.reset)));
}

#[test]
fn uniform_table_serializes_by_type_name() {
    let script = SCRIPT.replace(r#"color.mode = "constant";"#, r#"color.mode = "uniform";"#);
    let shaders = compile(&script);

    assert_eq!(
        serde_json::to_value(&shaders.uniforms).unwrap(),
        json!([{ "name": "u_color", "type": "Color4", "value": [0.2, 0.4, 0.6, 1.0] }])
    );
}
