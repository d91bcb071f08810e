mod cli;
mod commands;

use cli::{CheckParams, CompileParams, DumpParams, ExportParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();

    if let Some((_, m)) = matches.subcommand() {
        env_logger::Builder::new()
            .filter_level(verbosity(m))
            .format_timestamp(None)
            .init();
    }

    match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("export", m)) => {
            let params = ExportParams::from_matches(m);
            commands::export::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
