//! Test fixtures and snapshot macros.

use shadegraph_core::{PortType, Target};

use crate::blocks::{
    AddBlock, BlockKind, BlockRegistry, DotBlock, FragmentOutputBlock, InputBlock, MultiplyBlock,
    Ports, TransformBlock, VertexOutputBlock,
};
use crate::build::{BuildOptions, Codegen};
use crate::graph::BlockId;
use crate::material::{CompiledShaders, Material};
use crate::{Error, Result};

/// Snapshot test for both compiled stages of a construction script.
#[macro_export]
macro_rules! shot_build {
    ($script:literal, @$expected:tt) => {{
        let script = indoc::indoc!($script).trim();
        let output = $crate::test_utils::render_build(script);
        insta::assert_snapshot!(output, @$expected);
    }};
}

pub const IDENTITY: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Handles into the vertex half shared by most fixtures.
pub struct VertexHalf {
    pub position: BlockId,
    pub wvp: BlockId,
    pub transform: BlockId,
    pub output: BlockId,
}

/// `position` transformed by `worldViewProjection` into `gl_Position`.
pub fn add_vertex_half(material: &mut Material) -> VertexHalf {
    let position = material.add_block(
        "position",
        InputBlock::attribute("position", PortType::Vector3),
    );
    let wvp = material.add_block(
        "worldViewProjection",
        InputBlock::uniform(PortType::Matrix, IDENTITY),
    );
    let transform = material.add_block("transform", TransformBlock::default());
    let output = material.add_block("vertexOutput", VertexOutputBlock);

    material.connect(position, transform).expect("position -> transform");
    material.connect(wvp, transform).expect("wvp -> transform");
    material.connect(transform, output).expect("transform -> vertexOutput");
    material.add_output_node(output).expect("vertex output node");

    VertexHalf {
        position,
        wvp,
        transform,
        output,
    }
}

/// Vertex half plus a uniform color written straight to the fragment output.
pub fn basic_material() -> Material {
    let mut material = Material::new("basic");
    add_vertex_half(&mut material);

    let color = material.add_block(
        "color",
        InputBlock::uniform(PortType::Color3, [1.0, 0.5, 0.0]),
    );
    let fragment = material.add_block("fragmentOutput", FragmentOutputBlock);
    material.connect(color, fragment).expect("color -> fragmentOutput");
    material.add_output_node(fragment).expect("fragment output node");
    material
}

/// A per-vertex `color` attribute read by three fragment-stage blocks.
pub fn vertex_color_material() -> Material {
    let mut material = Material::new("vertex color");
    add_vertex_half(&mut material);

    let color = material.add_block("color", InputBlock::attribute("color", PortType::Color3));
    let tint = material.add_block(
        "tint",
        InputBlock::uniform(PortType::Color3, [1.0, 1.0, 1.0]),
    );
    let mul = material.add_block("mul", MultiplyBlock);
    let add = material.add_block("add", AddBlock);
    let dot = material.add_block("dot", DotBlock);
    let fragment = material.add_block("fragmentOutput", FragmentOutputBlock);

    for (from, to) in [
        (color, mul),
        (tint, mul),
        (color, add),
        (mul, add),
        (color, dot),
        (add, dot),
        (add, fragment),
        (dot, fragment),
    ] {
        material.connect(from, to).expect("fixture wiring");
    }
    material.add_output_node(fragment).expect("fragment output node");
    material
}

pub fn compile(material: &mut Material) -> CompiledShaders {
    compile_with(material, BuildOptions::default())
}

pub fn compile_with(material: &mut Material, options: BuildOptions) -> CompiledShaders {
    match material.build(options) {
        Ok(shaders) => shaders,
        Err(Error::BuildFailed(diagnostics)) => {
            panic!("build failed:\n{}", diagnostics.render())
        }
        Err(e) => panic!("build failed: {e}"),
    }
}

pub fn from_script(script: &str) -> Result<Material> {
    Material::from_script("test", script, &BlockRegistry::stock())
}

/// Both stages of a script's build, or its rendered diagnostics.
pub fn render_build(script: &str) -> String {
    let mut material = match from_script(script) {
        Ok(material) => material,
        Err(Error::Script(errors)) => return errors.printer(script).render(),
        Err(e) => return e.to_string(),
    };
    match material.build(BuildOptions::default()) {
        Ok(shaders) => {
            let mut out = format!(
                "[vertex]\n{}\n[fragment]\n{}",
                shaders.vertex, shaders.fragment
            );
            if !shaders.diagnostics.is_empty() {
                out.push_str("\n[diagnostics]\n");
                out.push_str(&shaders.diagnostics.render());
            }
            out
        }
        Err(Error::BuildFailed(diagnostics)) => diagnostics.render(),
        Err(e) => e.to_string(),
    }
}

/// Block kind with a configurable port layout.
#[derive(Debug, Clone, Default)]
pub struct TestBlock {
    inputs: Vec<(&'static str, PortType, bool)>,
    outputs: Vec<(&'static str, PortType, Option<Target>)>,
    target: Option<Target>,
    final_merger: bool,
}

impl TestBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, name: &'static str, ty: PortType) -> Self {
        self.inputs.push((name, ty, false));
        self
    }

    pub fn optional_input(mut self, name: &'static str, ty: PortType) -> Self {
        self.inputs.push((name, ty, true));
        self
    }

    pub fn output(mut self, name: &'static str, ty: PortType) -> Self {
        self.outputs.push((name, ty, None));
        self
    }

    pub fn pinned_output(mut self, name: &'static str, ty: PortType, target: Target) -> Self {
        self.outputs.push((name, ty, Some(target)));
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn final_merger(mut self) -> Self {
        self.final_merger = true;
        self
    }
}

impl BlockKind for TestBlock {
    fn class_name(&self) -> &'static str {
        "TestBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        for &(name, ty, optional) in &self.inputs {
            ports.register_input_with(name, ty, optional, None);
        }
        for &(name, ty, target) in &self.outputs {
            ports.register_output_with(name, ty, target);
        }
    }

    fn target(&self) -> Option<Target> {
        self.target
    }

    fn is_final_merger(&self) -> bool {
        self.final_merger
    }

    /// Each output copies the first input, or a zero when there is none.
    fn generate(&self, cx: &mut Codegen<'_>) {
        let source = if self.inputs.is_empty() {
            None
        } else {
            Some(cx.write_variable(cx.input(0)))
        };
        for index in 0..self.outputs.len() {
            let output = cx.output(index);
            let value = source
                .clone()
                .unwrap_or_else(|| cx.resolved_type(output).zero_literal().to_string());
            let decl = cx.declare_output(output);
            cx.statement(&format!("{decl} = {value};"));
        }
        if self.final_merger && !self.inputs.is_empty() {
            let value = cx.write_variable(cx.input(0));
            cx.statement(&format!("sink = {value};"));
        }
    }
}
