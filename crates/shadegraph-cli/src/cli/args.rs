//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! Commands that ignore an arg still accept it hidden (via `.hide(true)`),
//! so one flag set works across `compile`, `check`, `dump` and `export`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Graph document or construction script (positional).
pub fn graph_path_arg() -> Arg {
    Arg::new("graph_path")
        .value_name("GRAPH")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Graph document (.json) or construction script (.sg), `-` for stdin")
}

/// Material name (--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .long("name")
        .value_name("NAME")
        .help("Material name (defaults to the file stem)")
}

/// Shader stage to print (--stage).
pub fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .value_name("STAGE")
        .default_value("both")
        .value_parser(["vertex", "fragment", "both"])
        .help("Shader stage to print")
}

/// Print the uniform table instead of shader code (--uniforms).
pub fn uniforms_arg() -> Arg {
    Arg::new("uniforms")
        .long("uniforms")
        .action(ArgAction::SetTrue)
        .help("Print the uniform table as JSON instead of shader code")
}

/// Emit a comment before each block's code (--comments).
pub fn comments_arg() -> Arg {
    Arg::new("comments")
        .long("comments")
        .action(ArgAction::SetTrue)
        .help("Emit a comment with the block name before its code")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v logs each built block, -vv for traversal details)")
}

/// Dump only what is connected to one block (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("NAME")
        .help("Dump only the blocks connected to this block")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}
