//! Per-block build: dependencies first, then naming, code, and the forward pass.

use shadegraph_core::{Stage, Target};

use super::{Codegen, Session};
use crate::diagnostics::{DiagnosticKind, Location};
use crate::graph::{BlockId, Graph, PortId};

impl Graph {
    /// Generate `block` into `stage`'s state, building its upstream first.
    ///
    /// Returns `true` if the block had already been built in this session
    /// (or is part of a cycle currently being built), `false` if it was built now.
    pub fn build(&mut self, block: BlockId, session: &mut Session, stage: Stage) -> bool {
        if self.is_built(block, session, stage) {
            return true;
        }
        if !session.in_progress.insert(block) {
            let name = self.block(block).name().to_string();
            session
                .shared
                .diagnostics
                .report(DiagnosticKind::CycleDetected, Location::block(&name))
                .message(name)
                .emit();
            return true;
        }

        let already = self.build_block(block, session, stage);
        session.in_progress.remove(&block);
        already
    }

    /// Memo check. Dual-stage blocks are generated once per stage they are used in.
    fn is_built(&self, block: BlockId, session: &Session, stage: Stage) -> bool {
        let b = self.block(block);
        if b.build_id != Some(session.shared.build_id) {
            return false;
        }
        b.target() != Some(Target::VertexAndFragment) || session.state(stage).is_generated(block)
    }

    fn build_block(&mut self, block: BlockId, session: &mut Session, stage: Stage) -> bool {
        self.build_dependencies(block, session, stage);

        // Dependencies may have built this block through a forward pass.
        if self.is_built(block, session, stage) {
            return true;
        }

        let (name, class) = {
            let b = self.block(block);
            (b.name().to_string(), b.class_name())
        };
        if session.shared.options.verbose {
            log::info!("{}: Building {name} [{class}]", stage.shader_label());
        } else {
            log::debug!("{}: Building {name} [{class}]", stage.shader_label());
        }

        self.name_outputs(block, session, stage);

        if self.block(block).is_final_merger() {
            session.shared.checks.mark(stage);
        }

        {
            let (state, shared) = session.parts(stage);
            if shared.options.emit_comments && !self.block(block).is_input() {
                state.write_comment(&name);
            }
            let graph: &Graph = self;
            let mut cx = Codegen::new(graph, block, state, shared);
            graph.block(block).kind().generate(&mut cx);
        }

        let entry = self.block_mut(block);
        entry.build_id = Some(session.shared.build_id);
        entry.build_target = Some(stage);
        session.state_mut(stage).mark_generated(block);

        self.forward(block, session, stage);
        false
    }

    fn build_dependencies(&mut self, block: BlockId, session: &mut Session, stage: Stage) {
        let target = self.block(block).target();
        let inputs = self.block(block).inputs().to_vec();

        for input in inputs {
            let point = self.port(input);
            let Some(upstream) = point.connected_point() else {
                if !point.is_optional() && session.shared.reported_inputs.insert(input) {
                    let port = point.name().to_string();
                    let location = Location::port(self.block(block).name(), &port);
                    session
                        .shared
                        .diagnostics
                        .report(DiagnosticKind::UnconnectedRequiredInput, location)
                        .message(port)
                        .emit();
                }
                continue;
            };

            if let Some(target) = target.filter(|&t| t != Target::Neutral) {
                if point.target() == Some(target) || point.target() == Some(stage.target()) {
                    continue;
                }
            }

            if self.port(upstream).owner() != block {
                self.bridge(input, session, stage);
            }
        }
    }

    /// Make `input`'s producer available to `stage`.
    ///
    /// Vertex-only producers feeding the fragment stage are built in the vertex
    /// stage and their value is passed through a `v_<name>` varying.
    fn bridge(&mut self, input: PortId, session: &mut Session, stage: Stage) {
        let upstream = self.ensure_upstream(input);
        let producer = self.port(upstream).owner();

        if stage == Stage::Fragment && self.block(producer).requires_vertex() {
            if !session.vertex.is_generated(producer) {
                self.build(producer, session, Stage::Vertex);
            }
        } else {
            self.build(producer, session, stage);
        }

        if stage != Stage::Fragment {
            return;
        }
        // Anything the fragment stage did not generate itself is read through a varying.
        if session.fragment.is_generated(producer) || session.in_progress.contains(&producer) {
            return;
        }
        let source = self.block(producer);

        let value = self.variable_name(upstream).to_string();
        let varying = format!("v_{value}");
        let glsl = match self.resolved_type(upstream).glsl_type() {
            Some(glsl) => glsl,
            None => {
                let location = Location::port(source.name(), self.port(upstream).name());
                session
                    .shared
                    .diagnostics
                    .report(DiagnosticKind::UnresolvedType, location)
                    .message(self.port(upstream).name())
                    .emit();
                "float"
            }
        };

        if session.vertex.emit_varying(&varying, glsl) {
            log::debug!("bridging {} through `{varying}`", self.port_label(upstream));
            session
                .vertex
                .write_statement(&format!("{varying} = {value};"));
        }
        session.fragment.emit_varying(&varying, glsl);

        let point = self.port_mut(input);
        point.variable_name = varying;
        point.enforce_variable_name = true;
    }

    fn name_outputs(&mut self, block: BlockId, session: &mut Session, stage: Stage) {
        let b = self.block(block);
        let kind = b.kind();
        let mut assigned = Vec::new();
        for &output in b.outputs() {
            let point = self.port(output);
            if !point.target().is_none_or(|t| t.allows(stage)) {
                continue;
            }
            let name = if kind.is_program_wide() {
                session.program_variable(output, |names| {
                    kind.output_variable(b.name(), point.name(), names)
                })
            } else {
                kind.output_variable(b.name(), point.name(), session.state_mut(stage).names_mut())
            };
            assigned.push((output, name));
        }
        for (output, name) in assigned {
            self.port_mut(output).variable_name = name;
        }
    }

    /// Build downstream consumers that the current stage also owns.
    ///
    /// A consumer may depend on a block still resolving its own inputs further
    /// up the stack; that block is completed here and the outer call finds it
    /// memoized, so cycle tracking restarts for this pass.
    fn forward(&mut self, block: BlockId, session: &mut Session, stage: Stage) {
        let outer = std::mem::take(&mut session.in_progress);
        self.forward_endpoints(block, session, stage);
        session.in_progress = outer;
    }

    fn forward_endpoints(&mut self, block: BlockId, session: &mut Session, stage: Stage) {
        let outputs = self.block(block).outputs().to_vec();
        for output in outputs {
            if self.port(output).target() == Some(stage.target()) {
                continue;
            }
            let endpoints = self.port(output).endpoints().to_vec();
            for endpoint in endpoints {
                let consumer = self.port(endpoint).owner();
                let owned = self
                    .block(consumer)
                    .target()
                    .is_some_and(|t| t != stage.target());
                if owned && session.is_active(stage, consumer) {
                    self.build(consumer, session, stage);
                }
            }
        }
    }
}
