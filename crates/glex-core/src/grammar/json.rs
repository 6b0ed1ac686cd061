//! JSON format for grammars.
//!
//! Nodes are flat objects tagged by `kind`, with variant fields inline:
//!
//! ```json
//! { "commit": true, "kind": "SubState", "state": "Token",
//!   "repetition": { "greedy": true, "min": 0 },
//!   "transitions": [ { "kind": "MatchLiteral", "text": "]" } ] }
//! ```

use serde::{Deserialize, Serialize};

use super::GrammarError;
use super::types::Grammar;
use crate::{NodeVariant, Repetition, TreeNode};

impl Grammar {
    /// Parse grammar from JSON string.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        Grammar::new(raw.root, raw.states.into_iter().map(Into::into))
    }

    /// Serialize grammar to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        let raw = RawGrammar {
            root: self.root().to_owned(),
            states: self.states().map(|(_, node)| node.into()).collect(),
        };
        serde_json::to_string_pretty(&raw).expect("serialization should not fail")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawGrammar {
    root: String,
    states: Vec<RawTreeNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTreeNode {
    #[serde(default, skip_serializing_if = "is_false")]
    commit: bool,
    #[serde(flatten)]
    node: RawNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    transitions: Vec<RawTreeNode>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
enum RawNode {
    State {
        name: String,
    },
    MatchLiteral {
        text: String,
    },
    MatchUnicode {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
    MatchRegex {
        pattern: String,
    },
    SubState {
        state: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        repetition: Option<RawRepetition>,
    },
    ApplyTag {
        tag: String,
    },
}

/// Missing `min` is 0, missing `max` is unbounded.
#[derive(Debug, Serialize, Deserialize)]
struct RawRepetition {
    #[serde(default)]
    greedy: bool,
    #[serde(default)]
    min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<u32>,
}

impl From<RawTreeNode> for TreeNode {
    fn from(raw: RawTreeNode) -> Self {
        Self {
            commit: raw.commit,
            node: raw.node.into(),
            transitions: raw.transitions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RawNode> for NodeVariant {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::State { name } => NodeVariant::State { name },
            RawNode::MatchLiteral { text } => NodeVariant::MatchLiteral { text },
            RawNode::MatchUnicode { min, max } => NodeVariant::MatchUnicode { min, max },
            RawNode::MatchRegex { pattern } => NodeVariant::MatchRegex { pattern },
            RawNode::SubState { state, repetition } => NodeVariant::SubState {
                state,
                repetition: repetition.map_or(Repetition::ONCE, |r| {
                    Repetition::new(r.greedy, r.min, r.max)
                }),
            },
            RawNode::ApplyTag { tag } => NodeVariant::ApplyTag { tag },
        }
    }
}

impl From<&TreeNode> for RawTreeNode {
    fn from(node: &TreeNode) -> Self {
        Self {
            commit: node.commit,
            node: (&node.node).into(),
            transitions: node.transitions.iter().map(Into::into).collect(),
        }
    }
}

impl From<&NodeVariant> for RawNode {
    fn from(node: &NodeVariant) -> Self {
        match node {
            NodeVariant::State { name } => RawNode::State { name: name.clone() },
            NodeVariant::MatchLiteral { text } => RawNode::MatchLiteral { text: text.clone() },
            NodeVariant::MatchUnicode { min, max } => RawNode::MatchUnicode {
                min: *min,
                max: *max,
            },
            NodeVariant::MatchRegex { pattern } => RawNode::MatchRegex {
                pattern: pattern.clone(),
            },
            NodeVariant::SubState { state, repetition } => RawNode::SubState {
                state: state.clone(),
                repetition: (*repetition != Repetition::ONCE).then(|| RawRepetition {
                    greedy: repetition.greedy,
                    min: repetition.min_repeat,
                    max: repetition.max_repeat,
                }),
            },
            NodeVariant::ApplyTag { tag } => RawNode::ApplyTag { tag: tag.clone() },
        }
    }
}
