//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: commands accept each other's flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Positional shifting: -l shifts a single positional to input
//! 4. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use glex_vm::Verbosity;

use super::*;
use crate::cli::commands::{
    check_command, dump_command, eval_command, langs_command, trace_command,
};
use crate::commands::dump::DumpFormat;
use crate::commands::eval::EvalArgs;
use crate::commands::trace::TraceArgs;

#[test]
fn eval_grammar_and_input_positionals() {
    let m = eval_command()
        .try_get_matches_from(["eval", "grammar.json", "input.txt"])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    assert_eq!(params.grammar_path, Some(PathBuf::from("grammar.json")));
    assert_eq!(params.input_path, Some(PathBuf::from("input.txt")));
    assert_eq!(params.lang, None);
    assert_eq!(params.ticks, 1000);
    assert_eq!(params.depth, 256);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn eval_lang_shifts_positional_to_input() {
    let m = eval_command()
        .try_get_matches_from(["eval", "-l", "aya", "input.aya"])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    assert_eq!(params.grammar_path, None);
    assert_eq!(params.input_path, Some(PathBuf::from("input.aya")));
    assert_eq!(params.lang.as_deref(), Some("aya"));
}

#[test]
fn eval_lang_keeps_two_positionals() {
    let m = eval_command()
        .try_get_matches_from(["eval", "-l", "aya", "grammar.json", "input.aya"])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    // Both are kept so the loader can report the conflict.
    assert_eq!(params.grammar_path, Some(PathBuf::from("grammar.json")));
    assert_eq!(params.input_path, Some(PathBuf::from("input.aya")));
}

#[test]
fn eval_inline_input_and_options() {
    let m = eval_command()
        .try_get_matches_from([
            "eval",
            "-l",
            "regex",
            "-s",
            "a+",
            "--entry",
            "Literal",
            "--ticks",
            "50",
            "--compact",
            "--color",
            "never",
        ])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    assert_eq!(params.input_text.as_deref(), Some("a+"));
    assert_eq!(params.entry.as_deref(), Some("Literal"));
    assert_eq!(params.ticks, 50);
    assert!(params.compact);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn eval_limits_reach_args() {
    let m = eval_command()
        .try_get_matches_from(["eval", "-l", "aya", "-s", "1", "--ticks", "70", "--depth", "32"])
        .unwrap();
    let args: EvalArgs = EvalParams::from_matches(&m).into();

    assert_eq!(args.limits.get_max_no_progress_ticks(), 70);
    assert_eq!(args.limits.get_recursion_limit(), 32);
}

#[test]
fn eval_rejects_non_numeric_ticks() {
    let result = eval_command().try_get_matches_from(["eval", "g.json", "-s", "x", "--ticks", "lots"]);
    assert!(result.is_err());
}

#[test]
fn eval_accepts_trace_flags() {
    let result = eval_command().try_get_matches_from(["eval", "g.json", "in.txt", "-vv"]);
    assert!(
        result.is_ok(),
        "eval should accept trace flags: {:?}",
        result.err()
    );
}

#[test]
fn trace_accepts_eval_flags() {
    let result = trace_command().try_get_matches_from(["trace", "g.json", "in.txt", "--compact"]);
    assert!(
        result.is_ok(),
        "trace should accept eval flags: {:?}",
        result.err()
    );
}

#[test]
fn trace_verbosity_levels() {
    let verbosity = |argv: &[&str]| {
        let m = trace_command().try_get_matches_from(argv).unwrap();
        let args: TraceArgs = TraceParams::from_matches(&m).into();
        args.verbosity
    };

    assert_eq!(verbosity(&["trace", "-l", "re", "-s", "a"]), Verbosity::Default);
    assert_eq!(verbosity(&["trace", "-l", "re", "-s", "a", "-v"]), Verbosity::Verbose);
    assert_eq!(
        verbosity(&["trace", "-l", "re", "-s", "a", "-vv"]),
        Verbosity::VeryVerbose
    );
    assert_eq!(
        verbosity(&["trace", "-l", "re", "-s", "a", "-vvv"]),
        Verbosity::VeryVerbose
    );
}

#[test]
fn dump_accepts_input_and_eval_flags() {
    let result = dump_command().try_get_matches_from([
        "dump", "g.json", "in.txt", "-s", "x", "--ticks", "5", "--entry", "A", "-v",
    ]);
    assert!(
        result.is_ok(),
        "dump should accept input and eval flags: {:?}",
        result.err()
    );

    let params = DumpParams::from_matches(&result.unwrap());
    assert_eq!(params.grammar_path, Some(PathBuf::from("g.json")));
    assert_eq!(params.format, DumpFormat::Text);
}

#[test]
fn dump_format_and_output() {
    let m = dump_command()
        .try_get_matches_from(["dump", "-l", "aya", "--format", "binary", "-o", "aya.bin"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.lang.as_deref(), Some("aya"));
    assert_eq!(params.format, DumpFormat::Binary);
    assert_eq!(params.output, Some(PathBuf::from("aya.bin")));
}

#[test]
fn dump_rejects_unknown_format() {
    let result = dump_command().try_get_matches_from(["dump", "g.json", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn check_accepts_input_args() {
    let result = check_command().try_get_matches_from(["check", "g.json", "in.txt", "-s", "x"]);
    assert!(
        result.is_ok(),
        "check should accept input args: {:?}",
        result.err()
    );

    let params = CheckParams::from_matches(&result.unwrap());
    assert_eq!(params.grammar_path, Some(PathBuf::from("g.json")));
}

#[test]
fn langs_takes_no_args() {
    assert!(langs_command().try_get_matches_from(["langs"]).is_ok());
    assert!(langs_command().try_get_matches_from(["langs", "extra"]).is_err());
}

#[test]
fn dump_help_hides_eval_and_input_flags() {
    let help = dump_command().render_help().to_string();

    assert!(!help.contains("--ticks"), "dump help should not show --ticks");
    assert!(!help.contains("--depth"), "dump help should not show --depth");
    assert!(!help.contains("--entry"), "dump help should not show --entry");
    assert!(
        !help.contains("Inline input text"),
        "dump help should not show -s description"
    );
    assert!(
        !help.contains("Show every node"),
        "dump help should not show -v description"
    );
}

#[test]
fn eval_help_hides_trace_flags() {
    let help = eval_command().render_help().to_string();
    assert!(
        !help.contains("Show every node"),
        "eval help should not show -v description"
    );
}

#[test]
fn trace_help_hides_compact() {
    let help = trace_command().render_help().to_string();
    assert!(
        !help.contains("--compact"),
        "trace help should not show --compact"
    );
}

#[test]
fn cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["glex"]);
    assert!(result.is_err());
}
