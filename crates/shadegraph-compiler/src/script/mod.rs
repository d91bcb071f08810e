//! Construction scripts: the text format written by `dump`.

pub mod lexer;
pub mod parser;

#[cfg(test)]
mod replay_tests;

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use shadegraph_core::Target;

use crate::blocks::BlockRegistry;
use crate::graph::{BlockId, ConnectOptions, Graph};
use crate::material::Material;
use crate::{Error, Result};

use parser::{Spanned, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub message: String,
    pub span: Range<usize>,
}

impl ScriptError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            self.span.start, self.span.end, self.message
        )
    }
}

/// Every problem found while parsing or replaying one script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptErrors(Vec<ScriptError>);

impl ScriptErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptError> {
        self.0.iter()
    }

    pub fn printer<'e>(&'e self, source: &'e str) -> ScriptErrorsPrinter<'e> {
        ScriptErrorsPrinter {
            errors: self,
            source,
            path: None,
            colored: false,
        }
    }
}

impl From<Vec<ScriptError>> for ScriptErrors {
    fn from(errors: Vec<ScriptError>) -> Self {
        Self(errors)
    }
}

/// Renders script errors as annotated source excerpts.
pub struct ScriptErrorsPrinter<'e> {
    errors: &'e ScriptErrors,
    source: &'e str,
    path: Option<&'e str>,
    colored: bool,
}

impl<'e> ScriptErrorsPrinter<'e> {
    pub fn path(mut self, path: &'e str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, error) in self.errors.iter().enumerate() {
            let range = adjust_range(&error.span, self.source.len());
            let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range)
                    .label(&error.message),
            );
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let report: Vec<Group> = vec![Level::ERROR.primary_title(&error.message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }
}

/// Widen empty spans to one character so the annotation stays visible.
fn adjust_range(range: &Range<usize>, limit: usize) -> Range<usize> {
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range.clone()
}

/// Rebuild a graph from a script.
pub fn replay(source: &str, registry: &BlockRegistry) -> Result<Graph> {
    replay_with_root(source, registry, "")
}

/// Rebuild a graph from a script, resolving relative assets against `root_url`.
pub fn replay_with_root(source: &str, registry: &BlockRegistry, root_url: &str) -> Result<Graph> {
    let (statements, mut errors) = parser::parse(source);
    if !errors.is_empty() {
        return Err(Error::Script(errors.into()));
    }

    let mut replay = Replay {
        graph: Graph::new(),
        idents: HashMap::new(),
        errors: Vec::new(),
    };

    for statement in &statements {
        if let Statement::Declare {
            ident, class, name, ..
        } = statement
        {
            replay.declare(registry, ident, class, name);
        }
    }

    let mut properties: IndexMap<BlockId, (Map<String, Value>, Range<usize>)> = IndexMap::new();
    for statement in &statements {
        if let Statement::Property {
            ident,
            key,
            value,
            span,
        } = statement
        {
            let Some(block) = replay.lookup(ident) else {
                continue;
            };
            if key.value == "target" {
                replay.set_target(block, value, span);
                continue;
            }
            properties
                .entry(block)
                .or_insert_with(|| (Map::new(), span.clone()))
                .0
                .insert(key.value.clone(), value.clone());
        }
    }
    for (block, (map, span)) in properties {
        if let Err(e) = replay
            .graph
            .apply_properties(block, &Value::Object(map), root_url)
        {
            replay.errors.push(ScriptError::new(e.to_string(), span));
        }
    }

    for statement in &statements {
        if let Statement::Connect {
            from,
            output,
            to,
            input,
            span,
        } = statement
        {
            let (Some(from), Some(to)) = (replay.lookup(from), replay.lookup(to)) else {
                continue;
            };
            let options = ConnectOptions::new()
                .output(&output.value)
                .input(&input.value);
            if let Err(e) = replay.graph.connect(from, to, &options) {
                replay.errors.push(ScriptError::new(e.to_string(), span.clone()));
            }
        }
    }

    errors.append(&mut replay.errors);
    if !errors.is_empty() {
        return Err(Error::Script(errors.into()));
    }
    log::debug!("replayed {} block(s) from script", replay.graph.len());
    Ok(replay.graph)
}

struct Replay {
    graph: Graph,
    idents: HashMap<String, BlockId>,
    errors: Vec<ScriptError>,
}

impl Replay {
    fn declare(
        &mut self,
        registry: &BlockRegistry,
        ident: &Spanned<String>,
        class: &Spanned<String>,
        name: &str,
    ) {
        if self.idents.contains_key(&ident.value) {
            self.errors.push(ScriptError::new(
                format!("`{}` is already declared", ident.value),
                ident.span.clone(),
            ));
            return;
        }
        match registry.create(&class.value) {
            Ok(kind) => {
                let block = self.graph.add_boxed(name, kind);
                self.idents.insert(ident.value.clone(), block);
            }
            Err(e) => self
                .errors
                .push(ScriptError::new(e.to_string(), class.span.clone())),
        }
    }

    /// Block bound to `ident`, reporting undeclared names.
    fn lookup(&mut self, ident: &Spanned<String>) -> Option<BlockId> {
        let block = self.idents.get(&ident.value).copied();
        if block.is_none() {
            self.errors.push(ScriptError::new(
                format!("`{}` is not declared", ident.value),
                ident.span.clone(),
            ));
        }
        block
    }

    fn set_target(&mut self, block: BlockId, value: &Value, span: &Range<usize>) {
        match serde_json::from_value::<Option<Target>>(value.clone()) {
            Ok(target) => self.graph.set_target(block, target),
            Err(e) => self
                .errors
                .push(ScriptError::new(format!("invalid target: {e}"), span.clone())),
        }
    }
}

impl Material {
    /// Build a material from a script, registering its final mergers as outputs.
    pub fn from_script(name: impl Into<String>, source: &str, registry: &BlockRegistry) -> Result<Self> {
        let graph = replay(source, registry)?;
        Ok(Self::from_graph(name, graph))
    }
}
