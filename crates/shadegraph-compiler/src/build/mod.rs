//! Two-stage code generation.
//!
//! A build walks the graph from the registered output blocks: first the
//! vertex roots, then the fragment roots. Each block generates its GLSL
//! into the `BuildState` of the stage it lands in; values produced in the
//! vertex stage and consumed in the fragment stage cross through varyings.

mod codegen;
mod session;
mod state;
mod walk;

#[cfg(test)]
mod build_tests;

pub use codegen::Codegen;
pub use session::{EntryChecks, Session, SharedBuildData, UniformInfo};
pub use state::BuildState;

/// Options for a single build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Prefix each block's code with a `// <name>` comment
    pub(crate) emit_comments: bool,
    /// Log each block as it is built
    pub(crate) verbose: bool,
    /// Treat warnings as build failures
    pub(crate) fail_on_warnings: bool,
}

impl BuildOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to emit per-block comments.
    pub fn emit_comments(mut self, value: bool) -> Self {
        self.emit_comments = value;
        self
    }

    /// Set whether to log every built block at info level.
    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Set whether warnings fail the build.
    pub fn fail_on_warnings(mut self, value: bool) -> Self {
        self.fail_on_warnings = value;
        self
    }

    pub fn is_emit_comments(&self) -> bool {
        self.emit_comments
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_fail_on_warnings(&self) -> bool {
        self.fail_on_warnings
    }
}
