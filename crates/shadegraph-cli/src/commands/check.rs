use std::path::PathBuf;

use shadegraph_compiler::BuildOptions;

use super::run_common::{build_or_exit, graph_label, load_or_exit};

pub struct CheckArgs {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub strict: bool,
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let label = graph_label(&args.graph_path);
    let mut material = load_or_exit(&args.graph_path, args.name.as_deref(), args.color);

    let options = BuildOptions::new()
        .verbose(args.verbose)
        .fail_on_warnings(args.strict);
    build_or_exit(&mut material, options, &label, args.color);

    // Silent on success (like cargo check), warnings already went to stderr
}
