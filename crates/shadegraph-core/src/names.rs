//! Unique variable-name allocation for generated shader source.
//!
//! Each build stage owns one pool, and a build keeps one more for uniforms,
//! which both stages declare under the same name. Names are keyed by a
//! semantic prefix (usually the port name); repeated requests for the same
//! prefix get numeric suffixes.

use std::collections::{HashMap, HashSet};

/// Words that collide with GLSL keywords or builtins when used bare.
const RESERVED: &[&str] = &["output", "texture", "input", "sample", "main"];

/// Allocator of unique variable names within one scope.
#[derive(Debug, Clone, Default)]
pub struct NamePool {
    /// Last suffix handed out for each prefix.
    counters: HashMap<String, u32>,
    /// Every name in use, allocated or reserved.
    taken: HashSet<String>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh name derived from `prefix`.
    ///
    /// Non-word characters are stripped. The first request returns the bare
    /// prefix (reserved words start at `prefix0`); later requests return
    /// `prefix1`, `prefix2`, ... skipping anything already taken.
    pub fn free_name(&mut self, prefix: &str) -> String {
        let mut base: String = prefix
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
            base.insert(0, 'v');
        }

        let mut candidate = match self.counters.get(&base) {
            None => {
                self.counters.insert(base.clone(), 0);
                if RESERVED.contains(&base.as_str()) {
                    format!("{base}0")
                } else {
                    base.clone()
                }
            }
            Some(_) => self.bump(&base),
        };

        while self.taken.contains(&candidate) {
            candidate = self.bump(&base);
        }

        self.taken.insert(candidate.clone());
        candidate
    }

    /// Mark `name` as used so `free_name` never returns it.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_owned());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Number of names handed out or reserved.
    #[inline]
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    fn bump(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_owned()).or_insert(0);
        *counter += 1;
        format!("{base}{counter}")
    }
}
