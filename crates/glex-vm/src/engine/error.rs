//! Hard failures raised during evaluation.

use serde::Serialize;

/// Why an evaluation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Too many nodes visited without consuming input, or nested too deeply.
    LoopLimitExceeded,
    /// A state was referenced that the graph does not define.
    UnknownNodeKind,
    /// A committed node rejected every alternative.
    NoMatch,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::LoopLimitExceeded => "LoopLimitExceeded",
            ErrorKind::UnknownNodeKind => "UnknownNodeKind",
            ErrorKind::NoMatch => "NoMatch",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure that unwound every pending alternative.
///
/// Both stacks read from the outermost entry to the innermost one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub message: String,
    pub tag_stack: Vec<String>,
    pub state_stack: Vec<String>,
    /// Input of the failing attempt consumed up to the failure point.
    pub committed_input: String,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tag_stack: Vec::new(),
            state_stack: Vec::new(),
            committed_input: String::new(),
        }
    }
}

pub(crate) fn no_match_message(transitions: usize, content: &str, kind: &str) -> String {
    format!(
        "None of the {transitions} possible transitions of the '{content}' {kind}-Node accepted the input."
    )
}

pub(crate) fn loop_limit_message(max_ticks: u32) -> String {
    format!("Exceeded the maximum amount of ticks without progressing. ({max_ticks})")
}

pub(crate) fn recursion_limit_message(max_depth: u32) -> String {
    format!("Exceeded the maximum depth of nested nodes. ({max_depth})")
}

pub(crate) fn unknown_state_message(name: &str) -> String {
    format!("Tried to evaluate unknown state: {name}")
}
