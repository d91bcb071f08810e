//! Value sources: mesh attributes, host-bound uniforms, inline constants.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shadegraph_core::utils::float_literal;
use shadegraph_core::{NamePool, PortType, Target};

use super::{BlockKind, Ports};
use crate::build::Codegen;
use crate::diagnostics::DiagnosticKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Attribute,
    Uniform,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputBlock {
    mode: InputMode,
    #[serde(rename = "type")]
    value_type: PortType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    value: Vec<f64>,
}

impl Default for InputBlock {
    fn default() -> Self {
        Self::float(0.0)
    }
}

impl InputBlock {
    /// Per-vertex mesh data, e.g. `position` or `uv`.
    pub fn attribute(name: impl Into<String>, ty: PortType) -> Self {
        Self {
            mode: InputMode::Attribute,
            value_type: ty,
            attribute: Some(name.into()),
            value: Vec::new(),
        }
    }

    /// Value bound by the host at draw time; `value` is its initial content.
    pub fn uniform(ty: PortType, value: impl Into<Vec<f64>>) -> Self {
        Self {
            mode: InputMode::Uniform,
            value_type: ty,
            attribute: None,
            value: value.into(),
        }
    }

    /// Value inlined into the shader source.
    pub fn constant(ty: PortType, value: impl Into<Vec<f64>>) -> Self {
        Self {
            mode: InputMode::Constant,
            value_type: ty,
            attribute: None,
            value: value.into(),
        }
    }

    pub fn float(value: f64) -> Self {
        Self::constant(PortType::Float, [value])
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    /// GLSL literal for the stored value.
    pub fn literal(&self) -> String {
        let first = self.value.first().copied().unwrap_or(0.0);
        match self.value_type {
            PortType::Float => float_literal(first),
            PortType::Int => format!("{}", first as i64),
            ty => {
                let glsl = ty.glsl_type().unwrap_or("float");
                let parts: Vec<String> = self.value.iter().map(|&v| float_literal(v)).collect();
                format!("{glsl}({})", parts.join(", "))
            }
        }
    }

    fn validate(&self) -> serde_json::Result<()> {
        let Some(components) = self.value_type.components() else {
            return Err(serde_json::Error::custom(format!(
                "`{}` is not a concrete type",
                self.value_type
            )));
        };
        match self.mode {
            InputMode::Attribute if self.attribute.as_deref().is_none_or(str::is_empty) => {
                Err(serde_json::Error::custom("attribute inputs need an `attribute` name"))
            }
            InputMode::Attribute => Ok(()),
            InputMode::Uniform | InputMode::Constant if self.value.len() != components => {
                Err(serde_json::Error::custom(format!(
                    "`{}` takes {components} value(s), got {}",
                    self.value_type,
                    self.value.len()
                )))
            }
            InputMode::Uniform | InputMode::Constant => match self.non_finite() {
                Some(v) => Err(serde_json::Error::custom(format!(
                    "`{}` values must be finite, got {v}",
                    self.value_type
                ))),
                None => Ok(()),
            },
        }
    }

    /// First stored value that has no literal form.
    fn non_finite(&self) -> Option<f64> {
        self.value.iter().copied().find(|v| !v.is_finite())
    }
}

impl BlockKind for InputBlock {
    fn class_name(&self) -> &'static str {
        "InputBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        ports.register_output("output", PortType::AutoDetect);
    }

    fn target(&self) -> Option<Target> {
        match self.mode {
            InputMode::Attribute => Some(Target::Vertex),
            InputMode::Uniform | InputMode::Constant => Some(Target::VertexAndFragment),
        }
    }

    fn is_input(&self) -> bool {
        true
    }

    fn is_attribute(&self) -> bool {
        self.mode == InputMode::Attribute
    }

    fn value_type(&self) -> Option<PortType> {
        Some(self.value_type)
    }

    fn is_program_wide(&self) -> bool {
        self.mode == InputMode::Uniform
    }

    fn output_variable(&self, block_name: &str, _port: &str, names: &mut NamePool) -> String {
        match (self.mode, &self.attribute) {
            (InputMode::Attribute, Some(name)) => {
                names.reserve(name);
                name.clone()
            }
            (InputMode::Constant, _) => names.free_name(&format!("c_{block_name}")),
            _ => names.free_name(&format!("u_{block_name}")),
        }
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        let output = cx.output(0);
        let name = cx.variable(output).to_string();
        let glsl = cx.glsl_type(output);

        if let Some(v) = self.non_finite().filter(|_| self.mode != InputMode::Attribute) {
            cx.report(DiagnosticKind::NonFiniteValue, None)
                .message(v.to_string())
                .emit();
            return;
        }

        match self.mode {
            InputMode::Attribute => {
                cx.state().emit_attribute(&name, glsl);
            }
            InputMode::Uniform => {
                cx.state().emit_uniform(&name, glsl);
                cx.shared()
                    .register_uniform(&name, self.value_type, &self.value);
            }
            InputMode::Constant => {
                let literal = self.literal();
                cx.state().emit_constant(&name, glsl, &literal);
            }
        }
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn deserialize(&mut self, properties: &Value, _root_url: &str) -> serde_json::Result<()> {
        if properties.is_null() {
            return Ok(());
        }
        let restored: Self = serde_json::from_value(properties.clone())?;
        restored.validate()?;
        *self = restored;
        Ok(())
    }
}
