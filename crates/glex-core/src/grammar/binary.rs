//! Binary serialization for grammars using postcard.

use serde::{Deserialize, Serialize};

use super::GrammarError;
use super::types::Grammar;
use crate::TreeNode;

#[derive(Deserialize)]
struct BinaryGrammar {
    root: String,
    states: Vec<TreeNode>,
}

/// Borrowed twin of `BinaryGrammar`; postcard encodes both identically.
#[derive(Serialize)]
struct BinaryGrammarRef<'a> {
    root: &'a str,
    states: Vec<&'a TreeNode>,
}

impl Grammar {
    /// Deserialize grammar from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        let raw: BinaryGrammar = postcard::from_bytes(bytes).map_err(GrammarError::Binary)?;
        Grammar::new(raw.root, raw.states)
    }

    /// Serialize grammar to binary format.
    pub fn to_binary(&self) -> Vec<u8> {
        let raw = BinaryGrammarRef {
            root: self.root(),
            states: self.states().map(|(_, node)| node).collect(),
        };
        postcard::to_allocvec(&raw).expect("serialization should not fail")
    }
}
