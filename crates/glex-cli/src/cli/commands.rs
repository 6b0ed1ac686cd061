//! Command builders for the CLI.
//!
//! eval and trace accept each other's flags, with the irrelevant ones hidden
//! from `--help`. dump and check accept (and ignore) the input flags too, so a
//! command line can be switched between subcommands without editing it.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that don't read input).
fn with_hidden_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg().hide(true))
        .arg(input_text_arg().hide(true))
}

/// Add hidden evaluation args (for commands that don't evaluate).
fn with_hidden_eval_args(cmd: Command) -> Command {
    cmd.arg(entry_arg().hide(true))
        .arg(ticks_arg().hide(true))
        .arg(depth_arg().hide(true))
        .arg(compact_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("glex")
        .about("Tokenize text with graph grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(eval_command())
        .subcommand(trace_command())
        .subcommand(dump_command())
        .subcommand(check_command())
        .subcommand(langs_command())
}

/// Tokenize input and print the result as JSON.
pub fn eval_command() -> Command {
    let cmd = Command::new("eval")
        .about("Tokenize input and print tags as JSON")
        .override_usage(
            "\
  glex eval <GRAMMAR> <INPUT>
  glex eval <GRAMMAR> -s <TEXT>
  glex eval -l <LANG> <INPUT>
  glex eval -l <LANG> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  glex eval grammar.json input.txt       # tokenize a file
  glex eval -l regex -s 'a[0-9]+'        # bundled grammar, inline input
  cat in.aya | glex eval -l aya -        # input from stdin
  glex eval -l aya -s '1 2' --entry Token

EXIT STATUS:
  0  all input consumed
  1  input left over that no state accepts
  2  evaluation failed after a commit point, or bad arguments"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(lang_arg())
        .arg(input_text_arg())
        .arg(entry_arg())
        .arg(ticks_arg())
        .arg(depth_arg())
        .arg(compact_arg())
        .arg(color_arg());

    with_hidden_trace_args(cmd)
}

/// Trace a single attempt.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace one evaluation attempt node by node")
        .override_usage(
            "\
  glex trace <GRAMMAR> <INPUT>
  glex trace <GRAMMAR> -s <TEXT>
  glex trace -l <LANG> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  glex trace -l regex -s 'a+'           # states, sub-states and tags
  glex trace -l regex -s 'a+' -v        # every node and repetition
  glex trace -l regex -s 'a+' -vv       # with input previews"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(lang_arg())
        .arg(input_text_arg())
        .arg(entry_arg())
        .arg(ticks_arg())
        .arg(depth_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    cmd.arg(compact_arg().hide(true))
}

/// Show or re-serialize a grammar.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show a grammar, or convert it between formats")
        .override_usage(
            "\
  glex dump <GRAMMAR> [--format text|json|binary] [-o FILE]
  glex dump -l <LANG> [--format text|json|binary] [-o FILE]",
        )
        .after_help(
            r#"EXAMPLES:
  glex dump -l aya                           # tree listing
  glex dump grammar.json --format binary -o grammar.bin
  glex dump grammar.bin --format json        # back to JSON"#,
        )
        .arg(grammar_path_arg())
        .arg(lang_arg())
        .arg(format_arg())
        .arg(output_file_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_eval_args(with_hidden_input_args(cmd)))
}

/// Validate a grammar.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .override_usage(
            "\
  glex check <GRAMMAR>
  glex check -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  glex check grammar.json     # regexes, dangling states
  glex check -l regex"#,
        )
        .arg(grammar_path_arg())
        .arg(lang_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_eval_args(with_hidden_input_args(cmd)))
}

/// List bundled grammars.
pub fn langs_command() -> Command {
    Command::new("langs").about("List bundled grammars")
}
