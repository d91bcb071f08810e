use serde::{Deserialize, Serialize};
use serde_json::Value;
use shadegraph_core::PortType;

use super::{BlockKind, Ports};
use crate::build::Codegen;

/// Multiplies a vector by a matrix, widening 2- and 3-component vectors to `vec4`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformBlock {
    /// `w` used when widening the vector.
    #[serde(default = "default_complement_w")]
    pub complement_w: f64,
}

fn default_complement_w() -> f64 {
    1.0
}

impl Default for TransformBlock {
    fn default() -> Self {
        Self {
            complement_w: default_complement_w(),
        }
    }
}

impl TransformBlock {
    /// Transform directions rather than points.
    pub fn direction() -> Self {
        Self { complement_w: 0.0 }
    }
}

impl BlockKind for TransformBlock {
    fn class_name(&self) -> &'static str {
        "TransformBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        ports.register_input("vector", PortType::AutoDetect);
        ports.register_input("transform", PortType::Matrix);
        ports.register_output("output", PortType::Vector4);
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        let vector = cx.input(0);
        let value = cx.write_variable(vector);
        let transform = cx.write_variable(cx.input(1));
        let w = cx.write_float(self.complement_w);
        let widened = match cx.resolved_type(vector).components() {
            Some(3) => format!("vec4({value}, {w})"),
            Some(2) => format!("vec4({value}, 0.0, {w})"),
            _ => value,
        };
        let decl = cx.declare_output(cx.output(0));
        cx.statement(&format!("{decl} = {transform} * {widened};"));
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn deserialize(&mut self, properties: &Value, _root_url: &str) -> serde_json::Result<()> {
        if !properties.is_null() {
            *self = serde_json::from_value(properties.clone())?;
        }
        Ok(())
    }
}
