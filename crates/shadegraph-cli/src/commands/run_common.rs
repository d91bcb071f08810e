//! Shared logic for commands that load and build a graph.

use std::path::Path;

use shadegraph_compiler::{BuildOptions, CompiledShaders, Diagnostics, Error, Material};

use super::graph_loader::load_material;

/// Label used for the graph in diagnostics.
pub fn graph_label(path: &Path) -> String {
    if path.as_os_str() == "-" {
        return "<stdin>".to_string();
    }
    path.to_string_lossy().into_owned()
}

/// Load the graph, or report why it cannot be loaded and exit.
pub fn load_or_exit(path: &Path, name: Option<&str>, color: bool) -> Material {
    load_material(path, name).unwrap_or_else(|e| {
        eprint!("{}", e.render(color));
        std::process::exit(1);
    })
}

/// Build the material, printing diagnostics to stderr. Exits on a failed build.
pub fn build_or_exit(
    material: &mut Material,
    options: BuildOptions,
    label: &str,
    color: bool,
) -> CompiledShaders {
    match material.build(options) {
        Ok(shaders) => {
            eprint!("{}", diagnostics_report(&shaders.diagnostics, label, color));
            shaders
        }
        Err(Error::BuildFailed(diagnostics)) => {
            eprint!("{}", diagnostics_report(&diagnostics, label, color));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Everything a build reports on stderr: each diagnostic once, sorted by location.
pub fn diagnostics_report(diagnostics: &Diagnostics, label: &str, color: bool) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }
    let printer = diagnostics.printer().path(label);
    printer.colored(color).sorted(true).render()
}
