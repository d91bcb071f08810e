use std::collections::HashSet;

use indexmap::IndexSet;
use shadegraph_core::{NamePool, Stage};

use crate::graph::BlockId;

/// Accumulated source and naming scope for one shader stage.
#[derive(Debug)]
pub struct BuildState {
    stage: Stage,
    declarations: Vec<String>,
    declared: HashSet<String>,
    varyings: IndexSet<String>,
    body: String,
    names: NamePool,
    generated: HashSet<BlockId>,
}

impl BuildState {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            declarations: Vec::new(),
            declared: HashSet::new(),
            varyings: IndexSet::new(),
            body: String::new(),
            names: NamePool::new(),
            generated: HashSet::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Statements emitted into `main` so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Top-level declaration lines, in emission order.
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// Varyings this stage declared, in emission order.
    pub fn varyings(&self) -> impl Iterator<Item = &str> {
        self.varyings.iter().map(String::as_str)
    }

    pub fn names(&self) -> &NamePool {
        &self.names
    }

    pub(crate) fn names_mut(&mut self) -> &mut NamePool {
        &mut self.names
    }

    /// Whether `block`'s code was emitted into this stage.
    pub fn is_generated(&self, block: BlockId) -> bool {
        self.generated.contains(&block)
    }

    pub(crate) fn mark_generated(&mut self, block: BlockId) {
        self.generated.insert(block);
    }

    pub fn write_statement(&mut self, statement: &str) {
        self.body.push_str("  ");
        self.body.push_str(statement);
        self.body.push('\n');
    }

    pub fn write_comment(&mut self, text: &str) {
        self.body.push_str("  // ");
        self.body.push_str(text);
        self.body.push('\n');
    }

    /// Add a top-level declaration for `name` unless one exists. Returns whether it was added.
    pub fn declare(&mut self, name: &str, line: String) -> bool {
        if !self.declared.insert(name.to_string()) {
            return false;
        }
        self.declarations.push(line);
        true
    }

    pub fn emit_attribute(&mut self, name: &str, glsl: &str) -> bool {
        self.declare(name, format!("attribute {glsl} {name};"))
    }

    pub fn emit_uniform(&mut self, name: &str, glsl: &str) -> bool {
        self.declare(name, format!("uniform {glsl} {name};"))
    }

    pub fn emit_constant(&mut self, name: &str, glsl: &str, literal: &str) -> bool {
        self.declare(name, format!("const {glsl} {name} = {literal};"))
    }

    /// Declare a varying once per state. Returns whether this call declared it.
    pub fn emit_varying(&mut self, name: &str, glsl: &str) -> bool {
        if !self.varyings.insert(name.to_string()) {
            return false;
        }
        self.declare(name, format!("varying {glsl} {name};"))
    }

    /// Complete shader source: header, declarations, then `main`.
    pub fn finalize(&self) -> String {
        let mut out = String::new();
        if self.stage == Stage::Fragment {
            out.push_str("precision highp float;\n\n");
        }
        for line in &self.declarations {
            out.push_str(line);
            out.push('\n');
        }
        if !self.declarations.is_empty() {
            out.push('\n');
        }
        out.push_str("void main(void) {\n");
        out.push_str(&self.body);
        out.push_str("}\n");
        out
    }
}
