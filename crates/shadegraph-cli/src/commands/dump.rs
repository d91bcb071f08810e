use std::path::PathBuf;

use shadegraph_compiler::dump::Dumper;

use super::run_common::load_or_exit;

pub struct DumpArgs {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub root: Option<String>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let material = load_or_exit(&args.graph_path, args.name.as_deref(), args.color);

    let Some(root_name) = &args.root else {
        print!("{}", material.dumper(args.color).render());
        return;
    };

    let graph = material.graph();
    let Some(root) = graph.block_by_name(root_name) else {
        eprintln!("error: unknown block '{}'", root_name);
        std::process::exit(1);
    };
    let mut dumper = Dumper::new(graph).colored(args.color);
    dumper.visit(root);
    print!("{}", dumper.render());
}
