//! A named graph with registered output blocks, compiled as a unit.

use indexmap::IndexSet;
use shadegraph_core::{Stage, Target};

use crate::blocks::BlockKind;
use crate::build::{BuildOptions, Session, UniformInfo};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Location};
use crate::graph::{BlockId, ConnectOptions, Graph, PortId};
use crate::{Error, Result};

/// Output of a successful build.
#[derive(Debug, Clone)]
pub struct CompiledShaders {
    pub vertex: String,
    pub fragment: String,
    pub uniforms: Vec<UniformInfo>,
    /// Warnings that did not fail the build.
    pub diagnostics: Diagnostics,
}

impl CompiledShaders {
    pub fn source(&self, stage: Stage) -> &str {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }
}

#[derive(Debug)]
pub struct Material {
    name: String,
    graph: Graph,
    pub(crate) vertex_outputs: Vec<BlockId>,
    pub(crate) fragment_outputs: Vec<BlockId>,
    build_id: u64,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_graph(name, Graph::new())
    }

    /// Wrap a graph, registering every final merger it contains as an output.
    pub fn from_graph(name: impl Into<String>, graph: Graph) -> Self {
        let mut material = Self {
            name: name.into(),
            graph,
            vertex_outputs: Vec::new(),
            fragment_outputs: Vec::new(),
            build_id: 0,
        };
        let mergers: Vec<BlockId> = material
            .graph
            .blocks()
            .filter(|b| b.is_final_merger())
            .map(|b| b.id())
            .collect();
        for block in mergers {
            // Only final mergers were collected.
            let _ = material.add_output_node(block);
        }
        material
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn vertex_outputs(&self) -> &[BlockId] {
        &self.vertex_outputs
    }

    pub fn fragment_outputs(&self) -> &[BlockId] {
        &self.fragment_outputs
    }

    pub fn add_block(&mut self, name: impl Into<String>, kind: impl BlockKind + 'static) -> BlockId {
        self.graph.add_block(name, kind)
    }

    pub fn connect(&mut self, from: BlockId, to: BlockId) -> Result<(PortId, PortId)> {
        self.graph.connect(from, to, &ConnectOptions::default())
    }

    pub fn connect_with(
        &mut self,
        from: BlockId,
        to: BlockId,
        options: &ConnectOptions,
    ) -> Result<(PortId, PortId)> {
        self.graph.connect(from, to, options)
    }

    /// Register a final merger as the root of its stage.
    pub fn add_output_node(&mut self, block: BlockId) -> Result<()> {
        let b = self.graph.block(block);
        if !b.is_final_merger() {
            return Err(Error::NotAnOutputNode(b.name().to_string()));
        }
        let list = match b.target() {
            Some(Target::Vertex) => &mut self.vertex_outputs,
            Some(Target::Fragment) => &mut self.fragment_outputs,
            _ => return Err(Error::NotAnOutputNode(b.name().to_string())),
        };
        if !list.contains(&block) {
            list.push(block);
        }
        Ok(())
    }

    /// Compile both stages.
    ///
    /// Fails with `Error::BuildFailed` when an error-severity diagnostic was
    /// recorded, or any diagnostic when `fail_on_warnings` is set.
    pub fn build(&mut self, options: BuildOptions) -> Result<CompiledShaders> {
        self.build_id += 1;
        let mut session = Session::new(self.build_id, options);
        log::debug!("building material `{}` (build {})", self.name, self.build_id);

        let vertex_reachable = self.graph.collect_upstream(&self.vertex_outputs);
        let fragment_reachable = self.graph.collect_upstream(&self.fragment_outputs);
        self.prepare(&mut session, &vertex_reachable, &fragment_reachable);

        for root in self.vertex_outputs.clone() {
            self.graph.build(root, &mut session, Stage::Vertex);
        }

        for &block in &fragment_reachable {
            if self.graph.block(block).target() == Some(Target::VertexAndFragment) {
                self.graph.invalidate(block);
            }
        }

        for root in self.fragment_outputs.clone() {
            self.graph.build(root, &mut session, Stage::Fragment);
        }

        self.check_entry_points(&mut session);
        self.finish(session)
    }

    fn prepare(
        &mut self,
        session: &mut Session,
        vertex_reachable: &IndexSet<BlockId>,
        fragment_reachable: &IndexSet<BlockId>,
    ) {
        self.graph
            .reset_variable_names(vertex_reachable.iter().chain(fragment_reachable));

        let graph = &self.graph;
        let cross_vertex = fragment_reachable.iter().copied().filter(|&b| {
            matches!(
                graph.block(b).target(),
                Some(Target::Vertex | Target::VertexAndFragment)
            )
        });
        session.set_active(
            Stage::Vertex,
            self.vertex_outputs.iter().copied().chain(cross_vertex),
        );

        let cross_fragment = vertex_reachable
            .iter()
            .copied()
            .filter(|&b| graph.block(b).target() == Some(Target::VertexAndFragment));
        session.set_active(
            Stage::Fragment,
            self.fragment_outputs.iter().copied().chain(cross_fragment),
        );
    }

    fn check_entry_points(&self, session: &mut Session) {
        let checks = session.shared().checks();
        let diagnostics = &mut session.shared.diagnostics;
        if !checks.emit_vertex {
            diagnostics
                .report(DiagnosticKind::MissingVertexEntry, Location::block(&self.name))
                .emit();
        }
        if !checks.emit_fragment {
            diagnostics
                .report(DiagnosticKind::MissingFragmentEntry, Location::block(&self.name))
                .emit();
        }
    }

    fn finish(&self, session: Session) -> Result<CompiledShaders> {
        let fail_on_warnings = session.shared().options().is_fail_on_warnings();
        let diagnostics = session.diagnostics();
        if diagnostics.has_errors() || (fail_on_warnings && diagnostics.has_warnings()) {
            return Err(Error::BuildFailed(session.into_diagnostics()));
        }

        let vertex = session.state(Stage::Vertex).finalize();
        let fragment = session.state(Stage::Fragment).finalize();
        let uniforms = session.shared().uniforms().cloned().collect();
        log::info!(
            "built material `{}`: {} uniform(s), {} warning(s)",
            self.name,
            session.shared().uniforms.len(),
            session.diagnostics().warning_count()
        );
        Ok(CompiledShaders {
            vertex,
            fragment,
            uniforms,
            diagnostics: session.into_diagnostics(),
        })
    }
}
