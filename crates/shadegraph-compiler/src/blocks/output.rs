//! Final mergers: the blocks that write a stage's built-in outputs.

use shadegraph_core::{PortType, Target};

use super::{BlockKind, Ports};
use crate::build::Codegen;
use crate::diagnostics::DiagnosticKind;

/// Writes the clip-space position.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexOutputBlock;

impl BlockKind for VertexOutputBlock {
    fn class_name(&self) -> &'static str {
        "VertexOutputBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        ports.register_input("vector", PortType::Vector4);
    }

    fn target(&self) -> Option<Target> {
        Some(Target::Vertex)
    }

    fn is_final_merger(&self) -> bool {
        true
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        let vector = cx.write_variable(cx.input(0));
        cx.statement(&format!("gl_Position = {vector};"));
    }
}

/// Writes the fragment color from `rgba`, or from `rgb` plus an optional `a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentOutputBlock;

impl BlockKind for FragmentOutputBlock {
    fn class_name(&self) -> &'static str {
        "FragmentOutputBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        ports.register_optional_input("rgba", PortType::Color4);
        ports.register_optional_input("rgb", PortType::Color3);
        ports.register_optional_input("a", PortType::Float);
    }

    fn target(&self) -> Option<Target> {
        Some(Target::Fragment)
    }

    fn is_final_merger(&self) -> bool {
        true
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        let (rgba, rgb, a) = (cx.input(0), cx.input(1), cx.input(2));

        if cx.is_connected(rgba) {
            let value = cx.write_variable(rgba);
            cx.statement(&format!("gl_FragColor = {value};"));
        } else if cx.is_connected(rgb) {
            let color = cx.write_variable(rgb);
            let alpha = if cx.is_connected(a) {
                cx.write_variable(a)
            } else {
                "1.0".to_string()
            };
            cx.statement(&format!("gl_FragColor = vec4({color}, {alpha});"));
        } else {
            cx.report(DiagnosticKind::FragmentOutputUnconnected, None).emit();
            cx.statement("gl_FragColor = vec4(0.0);");
        }
    }
}
