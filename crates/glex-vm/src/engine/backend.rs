//! Engine boundary for serialized grammars and flat results.
//!
//! External engines load a grammar from its binary form, hand out a handle and
//! answer evaluations in the flat encoding of [`super::flat`]. [`NativeBackend`]
//! speaks the same protocol on top of the in-process evaluator, so callers can
//! swap one for the other.

use std::collections::BTreeMap;

use glex_core::{Grammar, GrammarError, Symbol};

use super::eval::{Evaluator, MatchOutcome};
use super::flat::{FlatEvalError, FlatEvalResult, flatten};
use super::graph::{Graph, GraphError};

/// Handle to a grammar loaded into a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelHandle(u32);

impl ModelHandle {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to decode grammar: {0}")]
    Decode(#[from] GrammarError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("unknown model handle {0}")]
    UnknownModel(u32),
}

/// Operations every evaluation engine exposes.
pub trait Backend {
    /// Load a grammar in the binary format of [`Grammar::to_binary`].
    fn load_grammar(&mut self, serialized: &[u8]) -> Result<ModelHandle, BackendError>;

    /// Tag names by index.
    fn tag_names(&self, model: ModelHandle) -> Result<BTreeMap<u32, String>, BackendError>;

    /// State names by index.
    fn state_names(&self, model: ModelHandle) -> Result<BTreeMap<u32, String>, BackendError>;

    /// One attempt from the state at `root_state_idx`.
    fn evaluate(
        &self,
        model: ModelHandle,
        root_state_idx: u32,
        input: &str,
        max_no_progress_ticks: u32,
    ) -> Result<FlatEvalResult, BackendError>;
}

/// Backend running the in-process evaluator.
#[derive(Debug, Default)]
pub struct NativeBackend {
    models: Vec<Graph>,
}

impl NativeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an already decoded grammar.
    pub fn load(&mut self, grammar: &Grammar) -> Result<ModelHandle, BackendError> {
        let graph = Graph::build(grammar)?;
        let handle = ModelHandle(self.models.len() as u32);
        self.models.push(graph);
        Ok(handle)
    }

    fn model(&self, model: ModelHandle) -> Result<&Graph, BackendError> {
        self.models
            .get(model.0 as usize)
            .ok_or(BackendError::UnknownModel(model.0))
    }
}

impl Backend for NativeBackend {
    fn load_grammar(&mut self, serialized: &[u8]) -> Result<ModelHandle, BackendError> {
        let grammar = Grammar::from_binary(serialized)?;
        self.load(&grammar)
    }

    fn tag_names(&self, model: ModelHandle) -> Result<BTreeMap<u32, String>, BackendError> {
        Ok(self.model(model)?.tag_names())
    }

    fn state_names(&self, model: ModelHandle) -> Result<BTreeMap<u32, String>, BackendError> {
        Ok(self.model(model)?.state_names())
    }

    fn evaluate(
        &self,
        model: ModelHandle,
        root_state_idx: u32,
        input: &str,
        max_no_progress_ticks: u32,
    ) -> Result<FlatEvalResult, BackendError> {
        let graph = self.model(model)?;
        // An out-of-range index becomes a name no state can have, so the
        // evaluator reports it as an unknown state.
        let entry = graph
            .try_state_name(root_state_idx)
            .map_or_else(|| format!("#{root_state_idx}"), str::to_owned);

        let evaluator = Evaluator::builder(graph)
            .entry(entry)
            .max_no_progress_ticks(max_no_progress_ticks)
            .build();

        let tag_index = |name: &str| graph.tag_symbol(name).map_or(u32::MAX, Symbol::as_u32);
        let state_index = |name: &str| graph.state_symbol(name).map_or(u32::MAX, Symbol::as_u32);

        Ok(match evaluator.evaluate(input) {
            MatchOutcome::Matched { len, tags } => FlatEvalResult {
                match_len: len,
                tags: flatten(&tags, &tag_index),
                error: None,
            },
            MatchOutcome::NoMatch => FlatEvalResult::default(),
            MatchOutcome::Failed(err) => FlatEvalResult {
                match_len: 0,
                tags: Vec::new(),
                error: Some(FlatEvalError {
                    kind: err.kind.into(),
                    message: err.message,
                    tag_index_stack: err.tag_stack.iter().map(|t| tag_index(t)).collect(),
                    state_index_stack: err.state_stack.iter().map(|s| state_index(s)).collect(),
                    committed_input: err.committed_input,
                }),
            },
        })
    }
}
