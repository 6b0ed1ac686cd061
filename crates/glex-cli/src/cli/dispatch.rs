//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields and ignore hidden ones
//! - `Into<*Args>` impls bridge dispatch to the command handlers
//! - With `-l`, a single positional is the input, not a grammar file

use std::path::PathBuf;

use clap::ArgMatches;
use glex_vm::{TickLimits, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::{DumpArgs, DumpFormat};
use crate::commands::eval::EvalArgs;
use crate::commands::trace::TraceArgs;

pub struct EvalParams {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub entry: Option<String>,
    pub ticks: u32,
    pub depth: u32,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: verbose is parsed but not extracted (unified flags)
}

impl EvalParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let lang = m.get_one::<String>("lang").cloned();
        let (grammar_path, input_path) = shift_positional_to_input(
            lang.is_some(),
            m.get_one::<PathBuf>("grammar_path").cloned(),
            m.get_one::<PathBuf>("input_path").cloned(),
        );

        Self {
            grammar_path,
            lang,
            input_path,
            input_text: m.get_one::<String>("input_text").cloned(),
            entry: m.get_one::<String>("entry").cloned(),
            ticks: parse_ticks(m),
            depth: parse_depth(m),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<EvalParams> for EvalArgs {
    fn from(p: EvalParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            grammar_path: p.grammar_path,
            lang: p.lang,
            input_path: p.input_path,
            input_text: p.input_text,
            entry: p.entry,
            limits: limits(p.ticks, p.depth),
            pretty,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub entry: Option<String>,
    pub ticks: u32,
    pub depth: u32,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let lang = m.get_one::<String>("lang").cloned();
        let (grammar_path, input_path) = shift_positional_to_input(
            lang.is_some(),
            m.get_one::<PathBuf>("grammar_path").cloned(),
            m.get_one::<PathBuf>("input_path").cloned(),
        );

        Self {
            grammar_path,
            lang,
            input_path,
            input_text: m.get_one::<String>("input_text").cloned(),
            entry: m.get_one::<String>("entry").cloned(),
            ticks: parse_ticks(m),
            depth: parse_depth(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            grammar_path: p.grammar_path,
            lang: p.lang,
            input_path: p.input_path,
            input_text: p.input_text,
            entry: p.entry,
            limits: limits(p.ticks, p.depth),
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub format: DumpFormat,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let format = match m.get_one::<String>("format").map(|s| s.as_str()) {
            Some("json") => DumpFormat::Json,
            Some("binary") => DumpFormat::Binary,
            _ => DumpFormat::Text,
        };

        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            format,
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        // Files get plain text even when the terminal supports color.
        let color = p.output.is_none() && p.color.should_colorize();

        Self {
            grammar_path: p.grammar_path,
            lang: p.lang,
            format: p.format,
            output: p.output,
            color,
        }
    }
}

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            lang: p.lang,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_ticks(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("ticks").copied().unwrap_or(1000)
}

fn parse_depth(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("depth").copied().unwrap_or(256)
}

fn limits(ticks: u32, depth: u32) -> TickLimits {
    TickLimits::new()
        .max_no_progress_ticks(ticks)
        .recursion_limit(depth)
}

/// When -l is used with a single positional arg, shift it from grammar to input.
/// This enables: `glex eval -l aya input.aya`
fn shift_positional_to_input(
    has_lang: bool,
    grammar_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_lang && grammar_path.is_some() && input_path.is_none() {
        (None, grammar_path)
    } else {
        (grammar_path, input_path)
    }
}
