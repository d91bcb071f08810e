//! shadegraph compiler: node graph wiring, two-stage code generation, persistence.
//!
//! This crate provides the compilation pipeline for shader node graphs:
//! - `graph` - block/port arena and connection rules
//! - `blocks` - the `BlockKind` trait and the stock block library
//! - `build` - build sessions, per-stage build states, traversal and bridging
//! - `diagnostics` - non-fatal findings collected during a build
//! - `dump` - replayable construction scripts
//! - `script` - lexer/parser/replay for construction scripts
//! - `serialize` - JSON graph documents
//! - `material` - the high-level `Material` facade

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod blocks;
pub mod build;
pub mod diagnostics;
pub mod dump;
pub mod graph;
mod invariants;
pub mod material;
pub mod script;
pub mod serialize;

#[cfg(test)]
pub mod test_utils;

pub use blocks::{BlockKind, BlockRegistry, Ports};
pub use build::{BuildOptions, BuildState, Session, SharedBuildData, UniformInfo};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Location, Severity};
pub use graph::{BlockId, ConnectOptions, Graph, PortId};
pub use material::{CompiledShaders, Material};
pub use script::ScriptErrors;
pub use serialize::GraphDocument;

pub use shadegraph_core::{PortType, Stage, Target};

/// Errors that can occur while assembling, compiling or loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The two ports carry incompatible types.
    #[error("cannot connect `{output}` ({output_type}) to `{input}` ({input_type})")]
    ConnectionTypeMismatch {
        output: String,
        input: String,
        output_type: PortType,
        input_type: PortType,
    },

    /// Block-level connection exhausted every output without a compatible input.
    #[error("unable to find a compatible match between `{from}` and `{to}`")]
    NoCompatibleMatch { from: String, to: String },

    #[error("input `{input}` is already connected")]
    InputAlreadyConnected { input: String },

    #[error("`{output}` is not connected to `{input}`")]
    NotConnected { output: String, input: String },

    #[error("block `{block}` has no port named `{port}`")]
    UnknownPort { block: String, port: String },

    #[error("unknown block `{0}`")]
    UnknownBlock(String),

    #[error("unknown block class `{0}`")]
    UnknownBlockClass(String),

    #[error("block `{0}` is not a final merger")]
    NotAnOutputNode(String),

    #[error("invalid properties for `{block}`: {detail}")]
    InvalidProperty { block: String, detail: String },

    #[error("invalid graph document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("script has {} error(s)", .0.len())]
    Script(ScriptErrors),

    #[error("build failed with {} error(s)", .0.error_count())]
    BuildFailed(Diagnostics),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
