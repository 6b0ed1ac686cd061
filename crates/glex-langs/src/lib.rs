//! Grammars bundled with glex.
//!
//! Each grammar ships as JSON and is lowered into a [`Graph`] on first use.
//! Languages are enabled by cargo features (`lang-regex`, `lang-aya`).

use std::sync::Arc;

use glex_core::Grammar;
use glex_vm::{Evaluator, Graph, Tokenized};

pub mod builtin;
pub mod lint;

pub use builtin::*;


/// Shared handle to a bundled language.
pub type Lang = Arc<LangInner>;

#[derive(Debug)]
pub struct LangInner {
    name: &'static str,
    aliases: &'static [&'static str],
    grammar: Grammar,
    graph: Graph,
}

impl LangInner {
    /// Parse and lower a bundled grammar.
    ///
    /// Panics on malformed data; every bundled grammar is loaded by the tests.
    pub(crate) fn from_json(
        name: &'static str,
        aliases: &'static [&'static str],
        json: &str,
    ) -> Self {
        let grammar = Grammar::from_json(json)
            .unwrap_or_else(|e| panic!("bundled grammar '{name}' is malformed: {e}"));
        let graph = Graph::build(&grammar)
            .unwrap_or_else(|e| panic!("bundled grammar '{name}' does not lower: {e}"));
        Self {
            name,
            aliases,
            grammar,
            graph,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Names accepted by [`from_name`], including the canonical one.
    pub fn aliases(&self) -> &[&'static str] {
        self.aliases
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Evaluator starting at the grammar root with default limits.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.graph)
    }

    /// Tokenize `input` from the grammar root.
    pub fn tokenize(&self, input: &str) -> Tokenized {
        self.evaluator().evaluate_all(input)
    }
}
