use crate::{PortType, Stage, Target};

#[test]
fn glsl_type_for_concrete_kinds() {
    assert_eq!(PortType::Float.glsl_type(), Some("float"));
    assert_eq!(PortType::Color3.glsl_type(), Some("vec3"));
    assert_eq!(PortType::Vector3.glsl_type(), Some("vec3"));
    assert_eq!(PortType::Color4.glsl_type(), Some("vec4"));
    assert_eq!(PortType::Matrix.glsl_type(), Some("mat4"));
}

#[test]
fn inference_markers_have_no_glsl_type() {
    assert_eq!(PortType::AutoDetect.glsl_type(), None);
    assert_eq!(PortType::BasedOnInput.glsl_type(), None);
    assert!(!PortType::AutoDetect.is_concrete());
    assert!(PortType::Matrix.is_concrete());
}

#[test]
fn components_match_glsl_shape() {
    assert_eq!(PortType::Float.components(), Some(1));
    assert_eq!(PortType::Color4.components(), Some(4));
    assert_eq!(PortType::Matrix.components(), Some(16));
    assert_eq!(PortType::AutoDetect.components(), None);
}

#[test]
fn stage_pairs_with_other() {
    assert_eq!(Stage::Vertex.other(), Stage::Fragment);
    assert_eq!(Stage::Fragment.other(), Stage::Vertex);
    assert_eq!(Stage::Vertex, Target::Vertex);
    assert_ne!(Target::Neutral, Stage::Fragment);
}

#[test]
fn target_allows_stage() {
    assert!(Target::Neutral.allows(Stage::Fragment));
    assert!(Target::VertexAndFragment.allows(Stage::Vertex));
    assert!(Target::Vertex.allows(Stage::Vertex));
    assert!(!Target::Vertex.allows(Stage::Fragment));
    assert!(!Target::Fragment.allows(Stage::Vertex));
}

#[test]
fn serde_uses_variant_names() {
    let json = serde_json::to_string(&PortType::Vector3).unwrap();
    assert_eq!(json, r#""Vector3""#);

    let target: Target = serde_json::from_str(r#""VertexAndFragment""#).unwrap();
    assert_eq!(target, Target::VertexAndFragment);
}
