use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use shadegraph_core::{NamePool, PortType, Stage};

use super::{BuildOptions, BuildState};
use crate::diagnostics::Diagnostics;
use crate::graph::{BlockId, PortId};

/// Whether each stage reached its final merger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryChecks {
    pub emit_vertex: bool,
    pub emit_fragment: bool,
}

impl EntryChecks {
    pub fn mark(&mut self, stage: Stage) {
        match stage {
            Stage::Vertex => self.emit_vertex = true,
            Stage::Fragment => self.emit_fragment = true,
        }
    }
}

/// A uniform the compiled program expects the host to bind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PortType,
    pub value: Vec<f64>,
}

/// Data shared by both stages of one build.
#[derive(Debug)]
pub struct SharedBuildData {
    pub(crate) build_id: u64,
    pub(crate) options: BuildOptions,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) checks: EntryChecks,
    pub(crate) uniforms: IndexMap<String, UniformInfo>,
    pub(crate) reported_inputs: HashSet<PortId>,
    /// Names of program-wide outputs, fixed the first time either stage builds them.
    program_variables: IndexMap<PortId, String>,
    program_names: NamePool,
}

impl SharedBuildData {
    pub fn build_id(&self) -> u64 {
        self.build_id
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn checks(&self) -> EntryChecks {
        self.checks
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &UniformInfo> {
        self.uniforms.values()
    }

    pub fn register_uniform(&mut self, name: &str, ty: PortType, value: &[f64]) {
        self.uniforms
            .entry(name.to_string())
            .or_insert_with(|| UniformInfo {
                name: name.to_string(),
                ty,
                value: value.to_vec(),
            });
    }
}

/// One build pass over a graph: both stage states plus shared data.
#[derive(Debug)]
pub struct Session {
    pub(crate) shared: SharedBuildData,
    pub(crate) vertex: BuildState,
    pub(crate) fragment: BuildState,
    active_vertex: IndexSet<BlockId>,
    active_fragment: IndexSet<BlockId>,
    pub(crate) in_progress: HashSet<BlockId>,
}

impl Session {
    pub fn new(build_id: u64, options: BuildOptions) -> Self {
        Self {
            shared: SharedBuildData {
                build_id,
                options,
                diagnostics: Diagnostics::new(),
                checks: EntryChecks::default(),
                uniforms: IndexMap::new(),
                reported_inputs: HashSet::new(),
                program_variables: IndexMap::new(),
                program_names: NamePool::new(),
            },
            vertex: BuildState::new(Stage::Vertex),
            fragment: BuildState::new(Stage::Fragment),
            active_vertex: IndexSet::new(),
            active_fragment: IndexSet::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn shared(&self) -> &SharedBuildData {
        &self.shared
    }

    pub fn state(&self, stage: Stage) -> &BuildState {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }

    pub(crate) fn state_mut(&mut self, stage: Stage) -> &mut BuildState {
        match stage {
            Stage::Vertex => &mut self.vertex,
            Stage::Fragment => &mut self.fragment,
        }
    }

    pub(crate) fn parts(&mut self, stage: Stage) -> (&mut BuildState, &mut SharedBuildData) {
        match stage {
            Stage::Vertex => (&mut self.vertex, &mut self.shared),
            Stage::Fragment => (&mut self.fragment, &mut self.shared),
        }
    }

    /// Name of a program-wide output, shared by both stages.
    ///
    /// The first request allocates through `allocate`, skipping anything
    /// either stage already uses, and reserves the result in both stages.
    pub(crate) fn program_variable(
        &mut self,
        port: PortId,
        allocate: impl Fn(&mut NamePool) -> String,
    ) -> String {
        if let Some(name) = self.shared.program_variables.get(&port) {
            return name.clone();
        }
        let mut name = allocate(&mut self.shared.program_names);
        while self.vertex.names().contains(&name) || self.fragment.names().contains(&name) {
            name = allocate(&mut self.shared.program_names);
        }
        self.vertex.names_mut().reserve(&name);
        self.fragment.names_mut().reserve(&name);
        self.shared.program_variables.insert(port, name.clone());
        name
    }

    /// Blocks the forward pass may build in `stage`.
    pub fn set_active(&mut self, stage: Stage, blocks: impl IntoIterator<Item = BlockId>) {
        let set = match stage {
            Stage::Vertex => &mut self.active_vertex,
            Stage::Fragment => &mut self.active_fragment,
        };
        set.extend(blocks);
    }

    pub fn is_active(&self, stage: Stage, block: BlockId) -> bool {
        match stage {
            Stage::Vertex => self.active_vertex.contains(&block),
            Stage::Fragment => self.active_fragment.contains(&block),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.shared.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.shared.diagnostics
    }
}
