use std::fs;
use std::path::PathBuf;

use super::run_common::load_or_exit;

pub struct ExportArgs {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: ExportArgs) {
    let material = load_or_exit(&args.graph_path, args.name.as_deref(), args.color);

    let json = match material.to_json() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let Some(path) = &args.output else {
        println!("{json}");
        return;
    };
    if let Err(e) = fs::write(path, format!("{json}\n")) {
        eprintln!("error: failed to write '{}': {}", path.display(), e);
        std::process::exit(1);
    }
    log::info!("wrote `{}` to {}", material.name(), path.display());
}
