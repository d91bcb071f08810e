//! Context handed to `BlockKind::generate`.

use shadegraph_core::utils::float_literal;
use shadegraph_core::{PortType, Stage};

use super::{BuildState, SharedBuildData};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Location};
use crate::graph::{Block, BlockId, Graph, PortId};

pub struct Codegen<'a> {
    graph: &'a Graph,
    block: BlockId,
    state: &'a mut BuildState,
    shared: &'a mut SharedBuildData,
}

impl<'a> Codegen<'a> {
    pub(crate) fn new(
        graph: &'a Graph,
        block: BlockId,
        state: &'a mut BuildState,
        shared: &'a mut SharedBuildData,
    ) -> Self {
        Self {
            graph,
            block,
            state,
            shared,
        }
    }

    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn block(&self) -> &Block {
        self.graph.block(self.block)
    }

    pub fn state(&mut self) -> &mut BuildState {
        &mut *self.state
    }

    pub fn shared(&mut self) -> &mut SharedBuildData {
        &mut *self.shared
    }

    /// Input port by declaration index.
    pub fn input(&self, index: usize) -> PortId {
        self.block().inputs()[index]
    }

    /// Output port by declaration index.
    pub fn output(&self, index: usize) -> PortId {
        self.block().outputs()[index]
    }

    pub fn is_connected(&self, input: PortId) -> bool {
        self.graph.port(input).is_connected()
    }

    pub fn resolved_type(&self, port: PortId) -> PortType {
        self.graph.resolved_type(port)
    }

    pub fn variable(&self, port: PortId) -> &str {
        self.graph.variable_name(port)
    }

    /// Expression reading `input`: the producer's variable, or a zero of the input's type.
    pub fn write_variable(&self, input: PortId) -> String {
        if self.is_connected(input) {
            return self.variable(input).to_string();
        }
        self.resolved_type(input).zero_literal().to_string()
    }

    /// `"<glsl type> <name>"` for a local holding `output`.
    ///
    /// An unresolved type is reported and declared as `float`.
    pub fn declare_output(&mut self, output: PortId) -> String {
        let glsl = self.glsl_type(output);
        format!("{glsl} {}", self.variable(output))
    }

    /// GLSL type of `port`, reporting and falling back to `float` when unresolved.
    pub fn glsl_type(&mut self, port: PortId) -> &'static str {
        let ty = self.resolved_type(port);
        match ty.glsl_type() {
            Some(glsl) => glsl,
            None => {
                let name = self.graph.port(port).name().to_string();
                self.report(DiagnosticKind::UnresolvedType, Some(&name))
                    .message(name.clone())
                    .emit();
                "float"
            }
        }
    }

    pub fn write_float(&self, value: f64) -> String {
        float_literal(value)
    }

    pub fn statement(&mut self, text: &str) {
        self.state.write_statement(text);
    }

    /// Report a diagnostic located at this block, or at one of its ports.
    pub fn report(&mut self, kind: DiagnosticKind, port: Option<&str>) -> DiagnosticBuilder<'_> {
        let block = self.graph.block(self.block).name();
        let location = match port {
            Some(port) => Location::port(block, port),
            None => Location::block(block),
        };
        self.shared.diagnostics.report(kind, location)
    }
}
