//! Block kinds: port layout, stage affinity, code generation, persistence.

mod input;
mod math;
mod output;
mod registry;
mod transform;


use std::fmt;

use serde_json::Value;
use shadegraph_core::{NamePool, PortType, Target};

use crate::build::Codegen;

pub use input::{InputBlock, InputMode};
pub use math::{AddBlock, DotBlock, MultiplyBlock};
pub use output::{FragmentOutputBlock, VertexOutputBlock};
pub use registry::{BlockFactory, BlockRegistry};
pub use transform::TransformBlock;

/// Behavior shared by every block of one class.
///
/// The graph owns identity, wiring and build bookkeeping; a kind only
/// describes its ports and turns resolved inputs into GLSL.
pub trait BlockKind: fmt::Debug {
    /// Registry key and the class name written by dumps.
    fn class_name(&self) -> &'static str;

    fn register_ports(&self, ports: &mut Ports);

    fn target(&self) -> Option<Target> {
        Some(Target::Neutral)
    }

    /// Output blocks that terminate a stage.
    fn is_final_merger(&self) -> bool {
        false
    }

    /// Blocks that introduce values (attributes, uniforms, constants).
    fn is_input(&self) -> bool {
        false
    }

    /// Per-vertex mesh data, only readable in the vertex stage.
    fn is_attribute(&self) -> bool {
        false
    }

    /// Type that `AutoDetect` outputs of this block resolve to.
    fn value_type(&self) -> Option<PortType> {
        None
    }

    /// Outputs named once per build and declared under that name in both stages.
    fn is_program_wide(&self) -> bool {
        false
    }

    /// Variable name for `port`, drawn from the stage's pool or, for
    /// program-wide outputs, from the pool shared by the whole build.
    fn output_variable(&self, block_name: &str, port: &str, names: &mut NamePool) -> String {
        let _ = block_name;
        names.free_name(port)
    }

    fn generate(&self, cx: &mut Codegen<'_>);

    /// Class-specific properties, `null` when the class has none.
    fn serialize(&self) -> Value {
        Value::Null
    }

    /// Restore properties written by `serialize`. `root_url` resolves relative asset paths.
    fn deserialize(&mut self, properties: &Value, root_url: &str) -> serde_json::Result<()> {
        let _ = (properties, root_url);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PortDecl {
    pub(crate) name: String,
    pub(crate) ty: PortType,
    pub(crate) optional: bool,
    pub(crate) target: Option<Target>,
}

/// Port layout collected from `BlockKind::register_ports`.
///
/// Indices returned by the `register_*` methods are positions within the
/// inputs or outputs list respectively.
#[derive(Debug, Default)]
pub struct Ports {
    pub(crate) inputs: Vec<PortDecl>,
    pub(crate) outputs: Vec<PortDecl>,
    pub(crate) links: Vec<(usize, usize)>,
    pub(crate) type_sources: Vec<(usize, usize)>,
}

impl Ports {
    pub fn register_input(&mut self, name: &str, ty: PortType) -> usize {
        self.register_input_with(name, ty, false, None)
    }

    pub fn register_optional_input(&mut self, name: &str, ty: PortType) -> usize {
        self.register_input_with(name, ty, true, None)
    }

    pub fn register_input_with(
        &mut self,
        name: &str,
        ty: PortType,
        optional: bool,
        target: Option<Target>,
    ) -> usize {
        self.inputs.push(PortDecl {
            name: name.to_string(),
            ty,
            optional,
            target,
        });
        self.inputs.len() - 1
    }

    pub fn register_output(&mut self, name: &str, ty: PortType) -> usize {
        self.register_output_with(name, ty, None)
    }

    pub fn register_output_with(&mut self, name: &str, ty: PortType, target: Option<Target>) -> usize {
        self.outputs.push(PortDecl {
            name: name.to_string(),
            ty,
            optional: false,
            target,
        });
        self.outputs.len() - 1
    }

    /// Make two `AutoDetect` inputs follow whichever of them gets connected first.
    pub fn link_connection_types(&mut self, a: usize, b: usize) {
        self.links.push((a, b));
    }

    /// Make a `BasedOnInput` output mirror the resolved type of `input`.
    pub fn set_type_source(&mut self, output: usize, input: usize) {
        self.type_sources.push((output, input));
    }
}
