use std::fs;
use std::io::{self, Read};
use std::path::Path;

use shadegraph_compiler::{BlockRegistry, Error, Material, ScriptErrors};

/// Failure to turn a `<GRAPH>` argument into a material.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("unsupported graph file '{0}': expected a .json document or a .sg script")]
    UnsupportedFormat(String),

    #[error("script '{path}' has {} error(s)", .errors.len())]
    Script {
        path: String,
        text: String,
        errors: ScriptErrors,
    },

    #[error("{0}")]
    Graph(Error),
}

impl LoadError {
    /// Report for stderr; script errors are annotated against their source.
    pub fn render(&self, colored: bool) -> String {
        match self {
            LoadError::Script { path, text, errors } => {
                errors.printer(text).path(path).colored(colored).render()
            }
            other => format!("error: {other}\n"),
        }
    }
}

enum Format {
    Document,
    Script,
}

/// Load a material from a `.json` document, a `.sg` script, or a script on stdin (`-`).
///
/// Scripts are named after their file stem and documents keep their stored
/// name, unless `name` overrides it.
pub fn load_material(path: &Path, name: Option<&str>) -> Result<Material, LoadError> {
    let registry = BlockRegistry::stock();

    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(LoadError::Stdin)?;
        return from_script("<stdin>", name.unwrap_or("stdin"), &text, &registry);
    }

    let label = path.to_string_lossy().into_owned();
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Format::Document,
        Some("sg") => Format::Script,
        _ => return Err(LoadError::UnsupportedFormat(label)),
    };
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: label.clone(),
        source,
    })?;

    match format {
        Format::Script => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| label.clone());
            from_script(&label, name.unwrap_or(&stem), &text, &registry)
        }
        Format::Document => {
            let mut material = Material::from_json(&text, &registry, &root_url(path))
                .map_err(LoadError::Graph)?;
            if let Some(name) = name {
                material.set_name(name);
            }
            Ok(material)
        }
    }
}

fn from_script(
    label: &str,
    name: &str,
    text: &str,
    registry: &BlockRegistry,
) -> Result<Material, LoadError> {
    match Material::from_script(name, text, registry) {
        Ok(material) => Ok(material),
        Err(Error::Script(errors)) => Err(LoadError::Script {
            path: label.to_string(),
            text: text.to_string(),
            errors,
        }),
        Err(e) => Err(LoadError::Graph(e)),
    }
}

/// Directory assets referenced by the document are resolved against.
fn root_url(path: &Path) -> String {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => format!("{}/", dir.display()),
        _ => String::new(),
    }
}
