//! Evaluation engine.
//!
//! The graph is walked recursively with ordered choice. Every matcher returns
//! one of three outcomes: a partial match, a silent reject that lets the caller
//! try its next alternative, or a hard failure that unwinds to the driver.

mod backend;
mod error;
mod eval;
mod flat;
mod graph;
mod source;
mod trace;

#[cfg(test)]
mod backend_tests;
#[cfg(test)]
mod flat_tests;
#[cfg(test)]
mod graph_tests;

pub use backend::{Backend, BackendError, ModelHandle, NativeBackend};
pub use error::{ErrorKind, EvalError};
pub use eval::{Evaluator, EvaluatorBuilder, MatchOutcome, TickLimits, Tokenized};
pub use flat::{FlatErrorKind, FlatEvalError, FlatEvalResult, FlatTag, Resolved, flatten, unflatten};
pub use graph::{Graph, GraphError, GraphNode, NodeId, Step};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
