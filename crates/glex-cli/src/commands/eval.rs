//! Tokenize input and print the result as JSON.

use std::path::PathBuf;

use glex_vm::{Evaluator, Graph, TickLimits, Tokenized};

use super::loader::{self, LoadError};
use super::report::ReportPrinter;

pub struct EvalArgs {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub entry: Option<String>,
    pub limits: TickLimits,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: EvalArgs) {
    let (graph, input) = prepare(&args).unwrap_or_else(|e| loader::fail(e));
    let result = tokenize(&graph, &input, args.entry.as_deref(), args.limits);

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    println!("{}", json.unwrap_or_else(|e| loader::fail(e)));

    let code = exit_code(&result);
    if code != 0 {
        let label = input_label(&args);
        let printer = ReportPrinter::new(&input)
            .path(&label)
            .colored(args.color);
        match &result.last_error {
            Some(err) => eprintln!("{}", printer.failure(result.matched_len, err)),
            None => eprintln!("{}", printer.unmatched(result.matched_len)),
        }
        std::process::exit(code);
    }
}

/// Load the grammar, lower it and read the input.
pub fn prepare(args: &EvalArgs) -> Result<(Graph, String), LoadError> {
    let grammar = loader::load_grammar(args.grammar_path.as_deref(), args.lang.as_deref())?;
    let input = loader::load_input(
        args.input_text.as_deref(),
        args.input_path.as_deref(),
        args.grammar_path.as_deref(),
    )?;
    Ok((grammar.build_graph()?, input))
}

pub fn tokenize(graph: &Graph, input: &str, entry: Option<&str>, limits: TickLimits) -> Tokenized {
    evaluator(graph, entry, limits).evaluate_all(input)
}

/// Evaluator for `entry`, or the grammar root.
pub fn evaluator<'g>(graph: &'g Graph, entry: Option<&str>, limits: TickLimits) -> Evaluator<'g> {
    let mut builder = Evaluator::builder(graph).limits(limits);
    if let Some(entry) = entry {
        builder = builder.entry(entry);
    }
    builder.build()
}

/// 0 when everything matched, 1 for a leftover suffix, 2 for a failure.
pub fn exit_code(result: &Tokenized) -> i32 {
    if result.last_error.is_some() {
        2
    } else if result.unmatched_suffix.is_some() {
        1
    } else {
        0
    }
}

fn input_label(args: &EvalArgs) -> String {
    match &args.input_path {
        Some(p) if p.as_os_str() != "-" => p.display().to_string(),
        Some(_) => "<stdin>".to_owned(),
        None => "<input>".to_owned(),
    }
}
