//! Replayable construction scripts.
//!
//! A dump declares each reachable block once, sets its properties, and wires
//! it to already-declared producers:
//!
//! ```text
//! let color = InputBlock("color");
//! color.mode = "uniform";
//!
//! let out = FragmentOutputBlock("out");
//! color.output -> out.rgb;
//! ```
//!
//! `script::replay` reads the format back into a graph.


use std::fmt::Write;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use shadegraph_core::Colors;
use shadegraph_core::utils::{to_identifier, unique_identifier};

use crate::graph::{BlockId, Graph};
use crate::material::Material;
use crate::script::lexer::KEYWORDS;

/// Emit the script for everything connected to `root`.
pub fn dump_code(graph: &Graph, root: BlockId) -> String {
    let mut dumper = Dumper::new(graph);
    dumper.visit(root);
    dumper.render()
}

/// Builder for rendering graph dumps.
pub struct Dumper<'g> {
    graph: &'g Graph,
    colors: Colors,
    order: Vec<BlockId>,
    visited: IndexSet<BlockId>,
}

impl<'g> Dumper<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            colors: Colors::OFF,
            order: Vec::new(),
            visited: IndexSet::new(),
        }
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    /// Queue `root` and every block connected to it, producers before consumers.
    pub fn visit(&mut self, root: BlockId) {
        if !self.visited.insert(root) {
            return;
        }
        let block = self.graph.block(root);
        for &input in block.inputs() {
            if let Some(upstream) = self.graph.port(input).connected_point() {
                self.visit(self.graph.port(upstream).owner());
            }
        }
        self.order.push(root);
        for &output in block.outputs() {
            for &endpoint in self.graph.port(output).endpoints() {
                self.visit(self.graph.port(endpoint).owner());
            }
        }
    }

    /// Queue every block in the graph, including disconnected ones.
    pub fn visit_all(&mut self) {
        for block in self.graph.block_ids() {
            self.visit(block);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        let mut idents: IndexMap<BlockId, String> = IndexMap::new();
        let mut deferred = Vec::new();

        for (i, &id) in self.order.iter().enumerate() {
            let block = self.graph.block(id);
            let ident = unique_identifier(&to_identifier(block.name()), |candidate| {
                KEYWORDS.contains(&candidate) || idents.values().any(|taken| taken == candidate)
            });

            if i > 0 {
                writeln!(w)?;
            }
            writeln!(
                w,
                "{}let{} {}{ident}{} = {}{}{}({}{}{});",
                c.dim,
                c.reset,
                c.blue,
                c.reset,
                c.blue,
                block.class_name(),
                c.reset,
                c.green,
                quote(block.name()),
                c.reset
            )?;

            if let Some(target) = block.target_override() {
                let value = target.map_or(Value::Null, |t| Value::String(t.to_string()));
                writeln!(w, "{ident}.target = {};", value)?;
            }
            if let Value::Object(properties) = block.kind().serialize() {
                for (key, value) in properties {
                    writeln!(w, "{ident}.{key} = {}{value}{};", c.green, c.reset)?;
                }
            }

            idents.insert(id, ident);

            for &input in block.inputs() {
                let Some(upstream) = self.graph.port(input).connected_point() else {
                    continue;
                };
                let producer = self.graph.port(upstream).owner();
                let wire = (producer, upstream, input);
                match idents.get(&producer) {
                    Some(_) => self.write_wire(w, &idents, wire)?,
                    None => deferred.push(wire),
                }
            }
        }

        for wire in deferred {
            self.write_wire(w, &idents, wire)?;
        }
        Ok(())
    }

    fn write_wire(
        &self,
        w: &mut impl Write,
        idents: &IndexMap<BlockId, String>,
        (producer, output, input): (BlockId, crate::graph::PortId, crate::graph::PortId),
    ) -> std::fmt::Result {
        let c = self.colors;
        let consumer = self.graph.port(input).owner();
        let (Some(from), Some(to)) = (idents.get(&producer), idents.get(&consumer)) else {
            return Ok(());
        };
        writeln!(
            w,
            "{from}.{}{}{} {}->{} {to}.{}{}{};",
            c.green,
            self.graph.port(output).name(),
            c.reset,
            c.dim,
            c.reset,
            c.green,
            self.graph.port(input).name(),
            c.reset
        )
    }
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

impl Material {
    /// Script reproducing the whole material, starting from its output blocks.
    pub fn dump(&self) -> String {
        self.dumper(false).render()
    }

    pub fn dumper(&self, colored: bool) -> Dumper<'_> {
        let mut dumper = Dumper::new(self.graph()).colored(colored);
        for &root in self.vertex_outputs().iter().chain(self.fragment_outputs()) {
            dumper.visit(root);
        }
        dumper.visit_all();
        dumper
    }
}
