//! Trace a single evaluation attempt for debugging.

use std::path::PathBuf;

use glex_core::{Colors, TagPrinter, utf16};
use glex_vm::{MatchOutcome, PrintTracer, TickLimits, Verbosity};

use super::eval::{EvalArgs, evaluator, prepare};
use super::loader;
use super::report::ReportPrinter;

pub struct TraceArgs {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub entry: Option<String>,
    pub limits: TickLimits,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let TraceArgs {
        grammar_path,
        lang,
        input_path,
        input_text,
        entry,
        limits,
        verbosity,
        color,
    } = args;
    let (graph, input) = prepare(&EvalArgs {
        grammar_path,
        lang,
        input_path,
        input_text,
        entry: entry.clone(),
        limits,
        pretty: false,
        color,
    })
    .unwrap_or_else(|e| loader::fail(e));

    let evaluator = evaluator(&graph, entry.as_deref(), limits);

    let colors = Colors::new(color);
    let mut tracer = PrintTracer::new(&graph, &input, verbosity, colors);
    let outcome = evaluator.evaluate_with(&input, &mut tracer);
    tracer.print();
    println!("{}---{}", colors.dim, colors.reset);

    match outcome {
        MatchOutcome::Matched { len, tags } => {
            println!("{}", TagPrinter::new(&tags).source(&input).colored(color).render());
            println!(
                "{}matched {} of {} units{}",
                colors.dim,
                len,
                utf16::len(&input),
                colors.reset
            );
        }
        MatchOutcome::NoMatch => {
            eprintln!("no match");
            std::process::exit(1);
        }
        MatchOutcome::Failed(err) => {
            eprintln!(
                "{}",
                ReportPrinter::new(&input).colored(color).failure(0, &err)
            );
            std::process::exit(2);
        }
    }
}
