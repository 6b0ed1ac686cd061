//! Backtracking evaluator for glex grammar graphs.
//!
//! A [`Grammar`](glex_core::Grammar) is lowered into a [`Graph`] once and then
//! shared read-only by any number of evaluations. Each call to
//! [`Evaluator::evaluate`] runs a single attempt with its own no-progress
//! counter; [`Evaluator::evaluate_all`] drives attempts until the input is
//! consumed or no state accepts it.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Backend, BackendError, ErrorKind, EvalError, Evaluator, EvaluatorBuilder, FlatErrorKind,
    FlatEvalError, FlatEvalResult, FlatTag, Graph, GraphError, GraphNode, ModelHandle,
    MatchOutcome, NativeBackend, NodeId, NoopTracer, PrintTracer, Resolved, Step, TickLimits,
    Tokenized, Tracer, Verbosity, flatten, unflatten,
};
