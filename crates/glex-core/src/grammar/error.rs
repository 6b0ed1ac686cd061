//! Errors raised while constructing or decoding a grammar.

/// Error during grammar construction or parsing.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
    Binary(postcard::Error),
    /// A top-level node does not define a state.
    NotAState { index: usize, kind: &'static str },
    /// Two top-level nodes define the same state.
    DuplicateState(String),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
            Self::NotAState { index, kind } => {
                write!(f, "top-level node #{index} must be a State, found {kind}")
            }
            Self::DuplicateState(name) => write!(f, "state '{name}' is defined twice"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
            Self::NotAState { .. } | Self::DuplicateState(_) => None,
        }
    }
}
