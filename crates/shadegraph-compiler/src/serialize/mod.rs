//! JSON graph documents.
//!
//! A document lists blocks with their class, display name and properties,
//! then the wires between them by block id and port name. Ids are positions
//! in the source graph and only need to be unique within one document.


use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shadegraph_core::Target;

use crate::blocks::BlockRegistry;
use crate::graph::{BlockId, ConnectOptions, Graph};
use crate::material::Material;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub name: String,
    pub blocks: Vec<BlockEntry>,
    #[serde(default)]
    pub connections: Vec<ConnectionEntry>,
    #[serde(default)]
    pub vertex_outputs: Vec<u32>,
    #[serde(default)]
    pub fragment_outputs: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub id: u32,
    pub class: String,
    pub name: String,
    /// Stage affinity set on the block. `Some(None)` is a cleared affinity,
    /// written as `null`; an absent key keeps the class default.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<Option<Target>>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEntry {
    pub from: u32,
    pub output: String,
    pub to: u32,
    pub input: String,
}

impl GraphDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Any value of a key that is present, `null` included.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn document_id(block: BlockId) -> u32 {
    block.index() as u32
}

impl Material {
    /// Capture blocks, properties, wiring and output registration.
    pub fn serialize(&self) -> GraphDocument {
        let graph = self.graph();
        let blocks = graph
            .blocks()
            .map(|block| BlockEntry {
                id: document_id(block.id()),
                class: block.class_name().to_string(),
                name: block.name().to_string(),
                target: block.target_override(),
                properties: block.kind().serialize(),
            })
            .collect();

        let mut connections = Vec::new();
        for block in graph.blocks() {
            for &input in block.inputs() {
                let Some(upstream) = graph.port(input).connected_point() else {
                    continue;
                };
                connections.push(ConnectionEntry {
                    from: document_id(graph.port(upstream).owner()),
                    output: graph.port(upstream).name().to_string(),
                    to: document_id(block.id()),
                    input: graph.port(input).name().to_string(),
                });
            }
        }

        GraphDocument {
            name: self.name().to_string(),
            blocks,
            connections,
            vertex_outputs: self.vertex_outputs.iter().map(|&b| document_id(b)).collect(),
            fragment_outputs: self.fragment_outputs.iter().map(|&b| document_id(b)).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        self.serialize().to_json()
    }

    /// Rebuild a material from a document.
    ///
    /// Without explicit output lists, every final merger becomes an output.
    pub fn deserialize(document: &GraphDocument, registry: &BlockRegistry, root_url: &str) -> Result<Self> {
        let mut graph = Graph::new();
        let mut ids: HashMap<u32, BlockId> = HashMap::new();

        for entry in &document.blocks {
            if ids.contains_key(&entry.id) {
                return Err(serde_json::Error::custom(format!("duplicate block id {}", entry.id)).into());
            }
            let kind = registry.create(&entry.class)?;
            let block = graph.add_boxed(entry.name.clone(), kind);
            graph.apply_properties(block, &entry.properties, root_url)?;
            if let Some(target) = entry.target {
                graph.set_target(block, target);
            }
            ids.insert(entry.id, block);
        }

        let resolve = |id: u32| {
            ids.get(&id)
                .copied()
                .ok_or_else(|| Error::UnknownBlock(format!("#{id}")))
        };

        for wire in &document.connections {
            let options = ConnectOptions::new()
                .output(&wire.output)
                .input(&wire.input);
            graph.connect(resolve(wire.from)?, resolve(wire.to)?, &options)?;
        }

        if document.vertex_outputs.is_empty() && document.fragment_outputs.is_empty() {
            return Ok(Material::from_graph(document.name.clone(), graph));
        }

        let outputs: Vec<BlockId> = document
            .vertex_outputs
            .iter()
            .chain(&document.fragment_outputs)
            .map(|&id| resolve(id))
            .collect::<Result<_>>()?;
        let mut material = Material::from_graph(document.name.clone(), graph);
        material.vertex_outputs.clear();
        material.fragment_outputs.clear();
        for block in outputs {
            material.add_output_node(block)?;
        }
        Ok(material)
    }

    pub fn from_json(text: &str, registry: &BlockRegistry, root_url: &str) -> Result<Self> {
        Self::deserialize(&GraphDocument::from_json(text)?, registry, root_url)
    }

    /// Independent copy produced by a serialize/deserialize round trip.
    pub fn clone_with(&self, registry: &BlockRegistry, root_url: &str) -> Result<Self> {
        Self::deserialize(&self.serialize(), registry, root_url)
    }
}
