#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for shadegraph.
//!
//! Two groups:
//! - **Type tags**: `PortType` (what flows through a port) and `Target`/`Stage`
//!   (where a block or port may execute)
//! - **Naming**: `NamePool` for shader variable allocation, plus identifier and
//!   literal helpers in `utils`

pub mod colors;
pub mod names;
pub mod utils;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod names_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use names::NamePool;

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Port Types
// ============================================================================

/// Type tag carried by a connection point.
///
/// Concrete kinds map 1:1 to a shading-language type. `AutoDetect` and
/// `BasedOnInput` are inference markers resolved through the graph wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortType {
    Float,
    Int,
    Vector2,
    Vector3,
    Vector4,
    Color3,
    Color4,
    Matrix,
    /// Takes the type of whatever gets connected.
    AutoDetect,
    /// Takes the type of a designated sibling input.
    BasedOnInput,
}

impl PortType {
    /// GLSL keyword for this type. `None` for unresolved inference markers.
    pub fn glsl_type(self) -> Option<&'static str> {
        match self {
            PortType::Float => Some("float"),
            PortType::Int => Some("int"),
            PortType::Vector2 => Some("vec2"),
            PortType::Vector3 | PortType::Color3 => Some("vec3"),
            PortType::Vector4 | PortType::Color4 => Some("vec4"),
            PortType::Matrix => Some("mat4"),
            PortType::AutoDetect | PortType::BasedOnInput => None,
        }
    }

    pub fn is_concrete(self) -> bool {
        !matches!(self, PortType::AutoDetect | PortType::BasedOnInput)
    }

    /// Number of scalar components, used to validate literal values.
    pub fn components(self) -> Option<usize> {
        match self {
            PortType::Float | PortType::Int => Some(1),
            PortType::Vector2 => Some(2),
            PortType::Vector3 | PortType::Color3 => Some(3),
            PortType::Vector4 | PortType::Color4 => Some(4),
            PortType::Matrix => Some(16),
            PortType::AutoDetect | PortType::BasedOnInput => None,
        }
    }

    /// Zero literal of this type, for unconnected inputs.
    pub fn zero_literal(self) -> &'static str {
        match self {
            PortType::Int => "0",
            PortType::Vector2 => "vec2(0.0)",
            PortType::Vector3 | PortType::Color3 => "vec3(0.0)",
            PortType::Vector4 | PortType::Color4 => "vec4(0.0)",
            PortType::Matrix => "mat4(1.0)",
            PortType::Float | PortType::AutoDetect | PortType::BasedOnInput => "0.",
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ============================================================================
// Targets
// ============================================================================

/// Stage affinity of a block or connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Runs wherever its consumer runs.
    Neutral,
    Vertex,
    Fragment,
    /// Compiled separately for both stages.
    VertexAndFragment,
}

impl Target {
    /// Whether something with this affinity can run in `stage`.
    pub fn allows(self, stage: Stage) -> bool {
        match self {
            Target::Neutral | Target::VertexAndFragment => true,
            Target::Vertex => stage == Stage::Vertex,
            Target::Fragment => stage == Stage::Fragment,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One of the two pipeline stages a build session compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// The paired stage.
    pub fn other(self) -> Stage {
        match self {
            Stage::Vertex => Stage::Fragment,
            Stage::Fragment => Stage::Vertex,
        }
    }

    pub fn target(self) -> Target {
        match self {
            Stage::Vertex => Target::Vertex,
            Stage::Fragment => Target::Fragment,
        }
    }

    /// Human-readable label used in build logs.
    pub fn shader_label(self) -> &'static str {
        match self {
            Stage::Vertex => "Vertex shader",
            Stage::Fragment => "Fragment shader",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<Target> for Stage {
    fn eq(&self, other: &Target) -> bool {
        self.target() == *other
    }
}

impl PartialEq<Stage> for Target {
    fn eq(&self, other: &Stage) -> bool {
        *self == other.target()
    }
}
