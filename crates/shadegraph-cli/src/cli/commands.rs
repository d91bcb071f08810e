//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every command accepts the full build flag set; flags a command does not
//! use are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden build args (for commands that don't compile).
fn with_hidden_build_args(cmd: Command) -> Command {
    cmd.arg(comments_arg().hide(true))
        .arg(strict_arg().hide(true))
}

/// Add hidden dump/export args (for commands that print shaders or diagnostics).
fn with_hidden_file_args(cmd: Command) -> Command {
    cmd.arg(root_arg().hide(true))
        .arg(output_file_arg().hide(true))
}

/// Add hidden output selection args (for commands that don't print shaders).
fn with_hidden_compile_args(cmd: Command) -> Command {
    cmd.arg(stage_arg().hide(true))
        .arg(uniforms_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("shadegraph")
        .about("Compile shader node graphs into vertex and fragment shaders")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(export_command())
}

/// Compile a graph and print the generated shaders.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile a graph into vertex and fragment shaders")
        .override_usage(
            "\
  shadegraph compile <GRAPH> [--stage <STAGE>]
  shadegraph compile <GRAPH> --uniforms",
        )
        .after_help(
            r#"EXAMPLES:
  shadegraph compile material.sg                  # both stages
  shadegraph compile material.json --stage fragment
  shadegraph compile material.sg --comments -v    # annotate and log each block
  shadegraph compile material.sg --uniforms       # uniform table as JSON
  cat material.sg | shadegraph compile -          # script from stdin"#,
        )
        .arg(graph_path_arg())
        .arg(name_arg())
        .arg(stage_arg())
        .arg(uniforms_arg())
        .arg(comments_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg());

    with_hidden_file_args(cmd)
}

/// Build a graph and report diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Build a graph and report diagnostics")
        .override_usage(
            "\
  shadegraph check <GRAPH>
  shadegraph check <GRAPH> --strict",
        )
        .after_help(
            r#"EXAMPLES:
  shadegraph check material.sg            # errors fail, warnings are shown
  shadegraph check material.json --strict # warnings fail too"#,
        )
        .arg(graph_path_arg())
        .arg(name_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(comments_arg().hide(true));

    with_hidden_compile_args(with_hidden_file_args(cmd))
}

/// Print the construction script that rebuilds a graph.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the construction script for a graph")
        .override_usage(
            "\
  shadegraph dump <GRAPH>
  shadegraph dump <GRAPH> --root <NAME>",
        )
        .after_help(
            r#"EXAMPLES:
  shadegraph dump material.json               # whole material
  shadegraph dump material.json --root out    # blocks connected to `out`"#,
        )
        .arg(graph_path_arg())
        .arg(name_arg())
        .arg(root_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(output_file_arg().hide(true));

    with_hidden_compile_args(with_hidden_build_args(cmd))
}

/// Print the JSON document for a graph.
pub fn export_command() -> Command {
    let cmd = Command::new("export")
        .about("Print the JSON document for a graph")
        .override_usage(
            "\
  shadegraph export <GRAPH>
  shadegraph export <GRAPH> -o <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  shadegraph export material.sg                   # document to stdout
  shadegraph export material.sg -o material.json  # write to file"#,
        )
        .arg(graph_path_arg())
        .arg(name_arg())
        .arg(output_file_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(root_arg().hide(true));

    with_hidden_compile_args(with_hidden_build_args(cmd))
}
