//! Connection rules: type compatibility, port selection, wiring.

use shadegraph_core::{PortType, Target};

use super::{BlockId, Graph, PortId};
use crate::{Error, Result};

/// Explicit port names for a block-level connection. `None` picks automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    pub output: Option<String>,
    pub input: Option<String>,
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.output = Some(name.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.input = Some(name.into());
        self
    }
}

fn is_wildcard(ty: PortType) -> bool {
    !ty.is_concrete()
}

/// Affinities that do not restrict which stage a port or block lands in.
fn is_unpinned(target: Option<Target>) -> bool {
    matches!(
        target,
        None | Some(Target::Neutral) | Some(Target::VertexAndFragment)
    )
}

impl Graph {
    /// Whether `output` may feed `input`, comparing resolved types.
    pub fn can_connect_to(&self, output: PortId, input: PortId) -> bool {
        let from = self.resolved_type(output);
        let to = self.resolved_type(input);
        from == to || is_wildcard(from) || is_wildcard(to)
    }

    /// Wire `output` into `input`.
    ///
    /// Panics if the handles have the wrong direction.
    pub fn connect_ports(&mut self, output: PortId, input: PortId) -> Result<()> {
        self.ensure_output(output);
        let target = self.ensure_input(input);

        if target.is_connected() {
            return Err(Error::InputAlreadyConnected {
                input: self.port_label(input),
            });
        }
        if !self.can_connect_to(output, input) {
            return Err(Error::ConnectionTypeMismatch {
                output: self.port_label(output),
                input: self.port_label(input),
                output_type: self.resolved_type(output),
                input_type: self.resolved_type(input),
            });
        }

        self.port_mut(input).set_connected(Some(output));
        self.port_mut(output).endpoints.push(input);
        log::trace!(
            "connected {} -> {}",
            self.port_label(output),
            self.port_label(input)
        );
        Ok(())
    }

    /// Remove the wire between `output` and `input` on both sides.
    pub fn disconnect_ports(&mut self, output: PortId, input: PortId) -> Result<()> {
        self.ensure_output(output);
        if self.ensure_input(input).connected_point() != Some(output) {
            return Err(Error::NotConnected {
                output: self.port_label(output),
                input: self.port_label(input),
            });
        }
        self.port_mut(input).set_connected(None);
        self.port_mut(output).endpoints.retain(|&p| p != input);
        Ok(())
    }

    /// Disconnect every output of `from` that feeds `to`.
    pub fn disconnect(&mut self, from: BlockId, to: BlockId) -> Result<()> {
        let mut wires = Vec::new();
        for &output in self.block(from).outputs() {
            for &input in self.port(output).endpoints() {
                if self.port(input).owner() == to {
                    wires.push((output, input));
                }
            }
        }
        if wires.is_empty() {
            return Err(Error::NotConnected {
                output: self.block(from).name().to_string(),
                input: self.block(to).name().to_string(),
            });
        }
        for (output, input) in wires {
            self.disconnect_ports(output, input)?;
        }
        Ok(())
    }

    /// Connect two blocks, choosing ports automatically unless `options` names them.
    ///
    /// Walks `from`'s outputs in declaration order, starting with the first one
    /// compatible with `to`'s affinity, until one finds a free compatible input.
    /// Nothing is wired when no pair matches.
    pub fn connect(&mut self, from: BlockId, to: BlockId, options: &ConnectOptions) -> Result<(PortId, PortId)> {
        if let (Some(output), Some(input)) = (&options.output, &options.input) {
            let output = self.require_output(from, output)?;
            let input = self.require_input(to, input)?;
            self.connect_ports(output, input)?;
            return Ok((output, input));
        }

        let explicit_input = match &options.input {
            Some(name) => Some(self.require_input(to, name)?),
            None => None,
        };
        let mut candidate = match &options.output {
            Some(name) => Some(self.require_output(from, name)?),
            None => self.first_available_output(from, to),
        };

        while let Some(output) = candidate {
            let input = match explicit_input {
                Some(input) => Some(input).filter(|&i| !self.port(i).is_connected()),
                None => self.first_available_input(to, Some(output)),
            };
            if let Some(input) = input {
                if self.can_connect_to(output, input) {
                    self.connect_ports(output, input)?;
                    return Ok((output, input));
                }
            }
            if options.output.is_some() {
                break;
            }
            candidate = self.sibling_output(output);
        }

        Err(Error::NoCompatibleMatch {
            from: self.block(from).name().to_string(),
            to: self.block(to).name().to_string(),
        })
    }

    /// First unconnected input of `block` that `for_output` could feed.
    pub fn first_available_input(&self, block: BlockId, for_output: Option<PortId>) -> Option<PortId> {
        let wanted = for_output.map(|o| self.resolved_type(o));
        self.block(block).inputs().iter().copied().find(|&input| {
            if self.port(input).is_connected() {
                return false;
            }
            let Some(wanted) = wanted else {
                return true;
            };
            let ty = self.resolved_type(input);
            ty == wanted || ty == PortType::AutoDetect
        })
    }

    /// First output of `block` whose affinity suits `for_block`.
    pub fn first_available_output(&self, block: BlockId, for_block: BlockId) -> Option<PortId> {
        let wanted = self.block(for_block).target();
        self.block(block).outputs().iter().copied().find(|&output| {
            let target = self.port(output).target();
            is_unpinned(wanted) || is_unpinned(target) || target == wanted
        })
    }

    /// Next output after `output` on the same block, in declaration order.
    pub fn sibling_output(&self, output: PortId) -> Option<PortId> {
        let outputs = self.block(self.port(output).owner()).outputs();
        let position = outputs.iter().position(|&p| p == output)?;
        outputs.get(position + 1).copied()
    }
}
