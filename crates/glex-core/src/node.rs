//! Grammar nodes as authored: a tree per named state.
//!
//! States are the only nodes that may be referenced recursively. A `SubState`
//! names its target instead of linking to it, so cyclic grammars stay plain trees
//! here and the cycles are only closed at evaluation time.

use serde::{Deserialize, Serialize};

/// How often a `SubState` invokes its target state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repetition {
    /// Prefer another repetition over leaving the loop.
    pub greedy: bool,
    pub min_repeat: u32,
    /// `None` is unbounded.
    pub max_repeat: Option<u32>,
}

impl Default for Repetition {
    fn default() -> Self {
        Self::ONCE
    }
}

impl Repetition {
    /// Exactly once. The repetition of a `SubState` without an explicit one.
    pub const ONCE: Self = Self {
        greedy: false,
        min_repeat: 1,
        max_repeat: Some(1),
    };

    pub fn new(greedy: bool, min_repeat: u32, max_repeat: Option<u32>) -> Self {
        Self {
            greedy,
            min_repeat,
            max_repeat,
        }
    }

    /// `{0,1}`
    pub fn optional(greedy: bool) -> Self {
        Self::new(greedy, 0, Some(1))
    }

    /// `{0,}`
    pub fn zero_or_more(greedy: bool) -> Self {
        Self::new(greedy, 0, None)
    }

    /// `{1,}`
    pub fn one_or_more(greedy: bool) -> Self {
        Self::new(greedy, 1, None)
    }

    /// Quantifier suffix in regex-like notation, e.g. `" *"` or `{2,5}?`.
    pub fn suffix(&self) -> String {
        let mut s = match (self.min_repeat, self.max_repeat) {
            (1, Some(1)) => String::new(),
            (0, Some(1)) => " ?".to_string(),
            (0, None) => " *".to_string(),
            (1, None) => " +".to_string(),
            (min, Some(max)) => format!("{{{min},{max}}}"),
            (min, None) => format!("{{{min},}}"),
        };
        if Some(self.min_repeat) != self.max_repeat && !self.greedy {
            s.push('?');
        }
        s
    }
}

/// The six node kinds a grammar graph is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeVariant {
    /// Named entry point. Matches nothing itself, dispatches to its transitions.
    State { name: String },
    /// Exact UTF-16 prefix. An empty literal always matches.
    MatchLiteral { text: String },
    /// One UTF-16 code unit with a value in `[min, max]`.
    MatchUnicode { min: Option<u32>, max: Option<u32> },
    /// Regex anchored at the current position, dot matches newline.
    MatchRegex { pattern: String },
    /// Invokes the named state according to `repetition`, then continues.
    SubState {
        state: String,
        repetition: Repetition,
    },
    /// Wraps whatever the continuation matches in a tag.
    ApplyTag { tag: String },
}

impl NodeVariant {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeVariant::State { .. } => "State",
            NodeVariant::MatchLiteral { .. } => "MatchLiteral",
            NodeVariant::MatchUnicode { .. } => "MatchUnicode",
            NodeVariant::MatchRegex { .. } => "MatchRegex",
            NodeVariant::SubState { .. } => "SubState",
            NodeVariant::ApplyTag { .. } => "ApplyTag",
        }
    }

    /// Short human-readable description used in diagnostics.
    pub fn content_text(&self) -> String {
        match self {
            NodeVariant::State { name } => name.clone(),
            NodeVariant::MatchLiteral { text } => text.clone(),
            NodeVariant::MatchUnicode { min, max } => {
                let mut s = String::new();
                if let Some(min) = min {
                    s.push_str(&format!("{} < ", i64::from(*min) - 1));
                }
                s.push_str("charCode");
                if let Some(max) = max {
                    s.push_str(&format!(" < {}", i64::from(*max) + 1));
                }
                s
            }
            NodeVariant::MatchRegex { pattern } => pattern.clone(),
            NodeVariant::SubState { state, repetition } => {
                format!("{}{}", state, repetition.suffix())
            }
            NodeVariant::ApplyTag { tag } => tag.clone(),
        }
    }
}

/// A node plus its commit flag and ordered transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Turns "no transition accepted" into a hard failure.
    pub commit: bool,
    pub node: NodeVariant,
    /// Tried in order, first to accept wins.
    pub transitions: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(node: NodeVariant) -> Self {
        Self {
            commit: false,
            node,
            transitions: Vec::new(),
        }
    }

    pub fn state(name: impl Into<String>) -> Self {
        Self::new(NodeVariant::State { name: name.into() })
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(NodeVariant::MatchLiteral { text: text.into() })
    }

    pub fn unicode(min: Option<u32>, max: Option<u32>) -> Self {
        Self::new(NodeVariant::MatchUnicode { min, max })
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(NodeVariant::MatchRegex {
            pattern: pattern.into(),
        })
    }

    pub fn sub_state(state: impl Into<String>, repetition: Repetition) -> Self {
        Self::new(NodeVariant::SubState {
            state: state.into(),
            repetition,
        })
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::new(NodeVariant::ApplyTag { tag: tag.into() })
    }

    /// Mark this node as a commit point.
    pub fn committed(mut self) -> Self {
        self.commit = true;
        self
    }

    /// Append transitions.
    pub fn then(mut self, transitions: impl IntoIterator<Item = TreeNode>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Name of the state this node defines, if it is a `State`.
    pub fn state_name(&self) -> Option<&str> {
        match &self.node {
            NodeVariant::State { name } => Some(name),
            _ => None,
        }
    }

    /// Content text with control characters escaped, safe for one-line messages.
    pub fn content_text(&self) -> String {
        escape_text(&self.node.content_text())
    }

    /// Number of nodes in this subtree, including self.
    pub fn size(&self) -> usize {
        1 + self.transitions.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Escape `\n`, `\r` and `\t`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
