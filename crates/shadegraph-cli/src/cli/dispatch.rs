//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::{CompileArgs, StageChoice};
use crate::commands::dump::DumpArgs;
use crate::commands::export::ExportArgs;

pub struct CompileParams {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub stage: StageChoice,
    pub uniforms: bool,
    pub comments: bool,
    pub strict: bool,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            name: m.get_one::<String>("name").cloned(),
            stage: parse_stage(m),
            uniforms: m.get_flag("uniforms"),
            comments: m.get_flag("comments"),
            strict: m.get_flag("strict"),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            graph_path: p.graph_path,
            name: p.name,
            stage: p.stage,
            uniforms: p.uniforms,
            comments: p.comments,
            strict: p.strict,
            verbose: p.verbose > 0,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub strict: bool,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: comments, stage, uniforms, root, output are parsed but not extracted
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            name: m.get_one::<String>("name").cloned(),
            strict: m.get_flag("strict"),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            graph_path: p.graph_path,
            name: p.name,
            strict: p.strict,
            verbose: p.verbose > 0,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub root: Option<String>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            name: m.get_one::<String>("name").cloned(),
            root: m.get_one::<String>("root").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            graph_path: p.graph_path,
            name: p.name,
            root: p.root,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExportParams {
    pub graph_path: PathBuf,
    pub name: Option<String>,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl ExportParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            name: m.get_one::<String>("name").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<ExportParams> for ExportArgs {
    fn from(p: ExportParams) -> Self {
        Self {
            graph_path: p.graph_path,
            name: p.name,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

/// Log level for `-v` repetitions; warnings are always shown.
pub fn verbosity(m: &ArgMatches) -> log::LevelFilter {
    match m.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn graph_path(m: &ArgMatches) -> PathBuf {
    // Required positional: clap rejects the command line without it.
    m.get_one::<PathBuf>("graph_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_stage(m: &ArgMatches) -> StageChoice {
    match m.get_one::<String>("stage").map(|s| s.as_str()) {
        Some("vertex") => StageChoice::Vertex,
        Some("fragment") => StageChoice::Fragment,
        _ => StageChoice::Both,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
