use std::path::PathBuf;

use shadegraph_compiler::{BuildOptions, CompiledShaders};
use shadegraph_core::Colors;

use super::run_common::{build_or_exit, graph_label, load_or_exit};

/// Which shader `compile` prints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageChoice {
    Vertex,
    Fragment,
    #[default]
    Both,
}

pub struct CompileArgs {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub stage: StageChoice,
    pub uniforms: bool,
    pub comments: bool,
    pub strict: bool,
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let label = graph_label(&args.graph_path);
    let mut material = load_or_exit(&args.graph_path, args.name.as_deref(), args.color);

    let options = BuildOptions::new()
        .emit_comments(args.comments)
        .verbose(args.verbose)
        .fail_on_warnings(args.strict);
    let shaders = build_or_exit(&mut material, options, &label, args.color);

    if args.uniforms {
        match serde_json::to_string_pretty(&shaders.uniforms) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", render_shaders(&shaders, args.stage, Colors::new(args.color)));
}

/// Shader text for the selected stage; both stages get a header line each.
pub fn render_shaders(shaders: &CompiledShaders, stage: StageChoice, colors: Colors) -> String {
    match stage {
        StageChoice::Vertex => shaders.vertex.clone(),
        StageChoice::Fragment => shaders.fragment.clone(),
        StageChoice::Both => format!(
            "{dim}// Vertex shader{reset}\n{}\n{dim}// Fragment shader{reset}\n{}",
            shaders.vertex,
            shaders.fragment,
            dim = colors.dim,
            reset = colors.reset,
        ),
    }
}
