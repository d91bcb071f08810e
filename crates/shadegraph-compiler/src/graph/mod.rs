//! Block/port arena.
//!
//! Blocks and ports live in flat vectors owned by `Graph` and are addressed
//! by copyable handles. A connection is stored on both sides: the input
//! records its single upstream output, the output lists its downstream inputs.

mod connect;
mod port;


use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shadegraph_core::{PortType, Stage, Target};

use crate::blocks::{BlockKind, Ports};
use crate::{Error, Result};

pub use connect::ConnectOptions;
pub use port::{ConnectionPoint, PortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(u32);

impl PortId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the graph: identity, stage affinity, ports and build bookkeeping.
#[derive(Debug)]
pub struct Block {
    id: BlockId,
    name: String,
    target_override: Option<Option<Target>>,
    is_final_merger: bool,
    is_input: bool,
    inputs: Vec<PortId>,
    outputs: Vec<PortId>,
    pub(crate) build_id: Option<u64>,
    pub(crate) build_target: Option<Stage>,
    kind: Box<dyn BlockKind>,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    /// Stage affinity: the explicit override if any, else what the kind reports.
    pub fn target(&self) -> Option<Target> {
        self.target_override.unwrap_or_else(|| self.kind.target())
    }

    /// Affinity set through `Graph::set_target`, if any.
    pub fn target_override(&self) -> Option<Option<Target>> {
        self.target_override
    }

    pub fn is_final_merger(&self) -> bool {
        self.is_final_merger
    }

    pub fn is_input(&self) -> bool {
        self.is_input
    }

    pub fn inputs(&self) -> &[PortId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[PortId] {
        &self.outputs
    }

    /// Build session that last generated code for this block.
    pub fn build_id(&self) -> Option<u64> {
        self.build_id
    }

    /// Stage this block was last generated into.
    pub fn build_target(&self) -> Option<Stage> {
        self.build_target
    }

    pub fn kind(&self) -> &dyn BlockKind {
        self.kind.as_ref()
    }

    /// Must be generated in the vertex stage, even when consumed by the fragment stage.
    pub(crate) fn requires_vertex(&self) -> bool {
        self.target() == Some(Target::Vertex) || self.kind.is_attribute()
    }
}

#[derive(Debug, Default)]
pub struct Graph {
    blocks: Vec<Block>,
    ports: Vec<ConnectionPoint>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn add_block(&mut self, name: impl Into<String>, kind: impl BlockKind + 'static) -> BlockId {
        self.add_boxed(name, Box::new(kind))
    }

    /// Add a block, registering the ports its kind declares.
    pub fn add_boxed(&mut self, name: impl Into<String>, kind: Box<dyn BlockKind>) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        let mut ports = Ports::default();
        kind.register_ports(&mut ports);

        let base = self.ports.len();
        let input_count = ports.inputs.len();
        let mut inputs = Vec::with_capacity(input_count);
        let mut outputs = Vec::with_capacity(ports.outputs.len());

        for decl in ports.inputs {
            inputs.push(PortId(self.ports.len() as u32));
            self.ports
                .push(ConnectionPoint::new(decl, id, PortDirection::Input));
        }
        for decl in ports.outputs {
            outputs.push(PortId(self.ports.len() as u32));
            self.ports
                .push(ConnectionPoint::new(decl, id, PortDirection::Output));
        }

        for (a, b) in ports.links {
            let (a, b) = (PortId((base + a) as u32), PortId((base + b) as u32));
            self.ports[a.index()].linked_source = Some(b);
            self.ports[b.index()].linked_source = Some(a);
        }
        for (output, input) in ports.type_sources {
            let output = PortId((base + input_count + output) as u32);
            self.ports[output.index()].type_source = Some(PortId((base + input) as u32));
        }

        self.blocks.push(Block {
            id,
            name: name.into(),
            target_override: None,
            is_final_merger: kind.is_final_merger(),
            is_input: kind.is_input(),
            inputs,
            outputs,
            build_id: None,
            build_target: None,
            kind,
        });
        id
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + use<> {
        (0..self.blocks.len() as u32).map(BlockId)
    }

    pub fn port(&self, id: PortId) -> &ConnectionPoint {
        &self.ports[id.index()]
    }

    pub(crate) fn port_mut(&mut self, id: PortId) -> &mut ConnectionPoint {
        &mut self.ports[id.index()]
    }

    /// First block with the given display name.
    pub fn block_by_name(&self, name: &str) -> Option<BlockId> {
        self.blocks.iter().find(|b| b.name == name).map(|b| b.id)
    }

    pub fn input_by_name(&self, block: BlockId, name: &str) -> Option<PortId> {
        self.block(block)
            .inputs
            .iter()
            .copied()
            .find(|&p| self.port(p).name() == name)
    }

    pub fn output_by_name(&self, block: BlockId, name: &str) -> Option<PortId> {
        self.block(block)
            .outputs
            .iter()
            .copied()
            .find(|&p| self.port(p).name() == name)
    }

    pub(crate) fn require_input(&self, block: BlockId, name: &str) -> Result<PortId> {
        self.input_by_name(block, name)
            .ok_or_else(|| Error::UnknownPort {
                block: self.block(block).name.clone(),
                port: name.to_string(),
            })
    }

    pub(crate) fn require_output(&self, block: BlockId, name: &str) -> Result<PortId> {
        self.output_by_name(block, name)
            .ok_or_else(|| Error::UnknownPort {
                block: self.block(block).name.clone(),
                port: name.to_string(),
            })
    }

    /// `block.port` label used in errors and logs.
    pub fn port_label(&self, port: PortId) -> String {
        let point = self.port(port);
        format!("{}.{}", self.block(point.owner()).name, point.name())
    }

    /// Override the stage affinity of a block.
    pub fn set_target(&mut self, block: BlockId, target: Option<Target>) {
        self.block_mut(block).target_override = Some(target);
    }

    /// Hand a property bag to the block kind.
    pub fn apply_properties(&mut self, block: BlockId, properties: &Value, root_url: &str) -> Result<()> {
        let entry = &mut self.blocks[block.index()];
        entry
            .kind
            .deserialize(properties, root_url)
            .map_err(|e| Error::InvalidProperty {
                block: entry.name.clone(),
                detail: e.to_string(),
            })
    }

    /// Type a port presents to its peers after `AutoDetect`/`BasedOnInput` resolution.
    ///
    /// Returns the marker itself when nothing upstream pins the type down.
    pub fn resolved_type(&self, port: PortId) -> PortType {
        self.resolve_type(port, 0)
    }

    fn resolve_type(&self, port: PortId, depth: usize) -> PortType {
        let point = self.port(port);
        if depth > self.ports.len() {
            return PortType::AutoDetect;
        }

        match point.declared_type() {
            PortType::AutoDetect => {
                let owner = self.block(point.owner());
                if let Some(ty) = owner.kind.value_type() {
                    return ty;
                }
                if let Some(upstream) = point.connected_point() {
                    return self.resolve_type(upstream, depth + 1);
                }
                if let Some(linked) = point.linked_source {
                    if self.port(linked).is_connected() {
                        return self.resolve_type(linked, depth + 1);
                    }
                }
                PortType::AutoDetect
            }
            PortType::BasedOnInput => match point.type_source {
                Some(source) => self.resolve_type(source, depth + 1),
                None => PortType::BasedOnInput,
            },
            concrete => concrete,
        }
    }

    /// Emitted variable name for a port in the current build.
    ///
    /// An input reads its upstream's name unless a bridge enforced its own.
    pub fn variable_name(&self, port: PortId) -> &str {
        let point = self.port(port);
        if point.is_input() && !point.enforce_variable_name {
            if let Some(upstream) = point.connected_point() {
                return self.variable_name(upstream);
            }
        }
        &point.variable_name
    }

    /// Blocks reachable upstream from `roots`, roots included, in discovery order.
    pub fn collect_upstream(&self, roots: &[BlockId]) -> IndexSet<BlockId> {
        let mut seen = IndexSet::new();
        let mut stack: Vec<BlockId> = roots.iter().rev().copied().collect();
        while let Some(block) = stack.pop() {
            if !seen.insert(block) {
                continue;
            }
            for &input in self.block(block).inputs.iter().rev() {
                if let Some(upstream) = self.port(input).connected_point() {
                    stack.push(self.port(upstream).owner());
                }
            }
        }
        seen
    }

    /// Clear per-build naming state on every port of `blocks`.
    pub(crate) fn reset_variable_names<'a>(&mut self, blocks: impl IntoIterator<Item = &'a BlockId>) {
        for &block in blocks {
            let ports: Vec<PortId> = {
                let b = self.block(block);
                b.inputs.iter().chain(&b.outputs).copied().collect()
            };
            for port in ports {
                let point = self.port_mut(port);
                point.variable_name.clear();
                point.enforce_variable_name = false;
            }
        }
    }

    /// Forget that `block` was built, so the current session generates it again.
    pub(crate) fn invalidate(&mut self, block: BlockId) {
        let b = self.block_mut(block);
        b.build_id = None;
        b.build_target = None;
    }
}
