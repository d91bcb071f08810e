use shadegraph_core::{PortType, Target};

use super::{BlockId, PortId};
use crate::blocks::PortDecl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// A typed port on a block.
#[derive(Debug, Clone)]
pub struct ConnectionPoint {
    name: String,
    declared_type: PortType,
    optional: bool,
    target: Option<Target>,
    direction: PortDirection,
    owner: BlockId,
    connected: Option<PortId>,
    pub(crate) endpoints: Vec<PortId>,
    pub(crate) variable_name: String,
    pub(crate) enforce_variable_name: bool,
    /// Sibling input whose type this `AutoDetect` input follows.
    pub(crate) linked_source: Option<PortId>,
    /// Input whose resolved type this `BasedOnInput` output mirrors.
    pub(crate) type_source: Option<PortId>,
}

impl ConnectionPoint {
    pub(crate) fn new(decl: PortDecl, owner: BlockId, direction: PortDirection) -> Self {
        Self {
            name: decl.name,
            declared_type: decl.ty,
            optional: decl.optional,
            target: decl.target,
            direction,
            owner,
            connected: None,
            endpoints: Vec::new(),
            variable_name: String::new(),
            enforce_variable_name: false,
            linked_source: None,
            type_source: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> PortType {
        self.declared_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::Input
    }

    pub fn owner(&self) -> BlockId {
        self.owner
    }

    /// Upstream output feeding this input.
    pub fn connected_point(&self) -> Option<PortId> {
        self.connected
    }

    pub fn is_connected(&self) -> bool {
        self.connected.is_some()
    }

    /// Downstream inputs fed by this output, in connection order.
    pub fn endpoints(&self) -> &[PortId] {
        &self.endpoints
    }

    pub fn has_endpoints(&self) -> bool {
        !self.endpoints.is_empty()
    }

    pub fn is_variable_name_enforced(&self) -> bool {
        self.enforce_variable_name
    }

    pub(crate) fn set_connected(&mut self, upstream: Option<PortId>) {
        self.connected = upstream;
    }
}
