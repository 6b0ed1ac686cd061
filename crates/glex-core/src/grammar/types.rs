use indexmap::IndexMap;
use indexmap::map::Entry;

use super::GrammarError;
use crate::TreeNode;

/// Named states plus the root state name.
///
/// Built once and read-only afterwards. State order is definition order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    root: String,
    states: IndexMap<String, TreeNode>,
}

impl Grammar {
    /// Build a grammar from top-level state nodes.
    ///
    /// Every node must wrap a `State` and names must be unique. References
    /// between states are not checked here: an undefined `SubState` target or
    /// root only surfaces when evaluation reaches it.
    pub fn new(
        root: impl Into<String>,
        states: impl IntoIterator<Item = TreeNode>,
    ) -> Result<Self, GrammarError> {
        let mut by_name = IndexMap::new();
        for (index, node) in states.into_iter().enumerate() {
            let Some(name) = node.state_name() else {
                return Err(GrammarError::NotAState {
                    index,
                    kind: node.node.kind_name(),
                });
            };
            match by_name.entry(name.to_owned()) {
                Entry::Occupied(e) => return Err(GrammarError::DuplicateState(e.key().clone())),
                Entry::Vacant(e) => {
                    e.insert(node);
                }
            }
        }

        Ok(Self {
            root: root.into(),
            states: by_name,
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Same states, different root.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn state(&self, name: &str) -> Option<&TreeNode> {
        self.states.get(name)
    }

    /// States in definition order.
    pub fn states(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.states.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Total node count across all states.
    pub fn node_count(&self) -> usize {
        self.states.values().map(TreeNode::size).sum()
    }
}
