//! Component-wise arithmetic on two linked operands.

use shadegraph_core::PortType;

use super::{BlockKind, Ports};
use crate::build::Codegen;

fn register_operands(ports: &mut Ports) -> usize {
    let left = ports.register_input("left", PortType::AutoDetect);
    let right = ports.register_input("right", PortType::AutoDetect);
    ports.link_connection_types(left, right);
    left
}

/// `output = left <op> right`, typed after `left`.
fn register_arithmetic(ports: &mut Ports) {
    let left = register_operands(ports);
    let output = ports.register_output("output", PortType::BasedOnInput);
    ports.set_type_source(output, left);
}

fn write_binary(cx: &mut Codegen<'_>, op: &str) {
    let output = cx.output(0);
    let left = cx.write_variable(cx.input(0));
    let right = cx.write_variable(cx.input(1));
    let decl = cx.declare_output(output);
    cx.statement(&format!("{decl} = {left} {op} {right};"));
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplyBlock;

impl BlockKind for MultiplyBlock {
    fn class_name(&self) -> &'static str {
        "MultiplyBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        register_arithmetic(ports);
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        write_binary(cx, "*");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddBlock;

impl BlockKind for AddBlock {
    fn class_name(&self) -> &'static str {
        "AddBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        register_arithmetic(ports);
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        write_binary(cx, "+");
    }
}

/// Dot product of two same-typed vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotBlock;

impl BlockKind for DotBlock {
    fn class_name(&self) -> &'static str {
        "DotBlock"
    }

    fn register_ports(&self, ports: &mut Ports) {
        register_operands(ports);
        ports.register_output("output", PortType::Float);
    }

    fn generate(&self, cx: &mut Codegen<'_>) {
        let output = cx.output(0);
        let left = cx.write_variable(cx.input(0));
        let right = cx.write_variable(cx.input(1));
        let decl = cx.declare_output(output);
        cx.statement(&format!("{decl} = dot({left}, {right});"));
    }
}
