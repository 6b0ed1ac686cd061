//! Compiled grammar graph.
//!
//! Nodes live in one arena and are addressed by [`NodeId`]. States refer to each
//! other through the state name table, so recursive grammars need no cycles in
//! the arena itself: a `SubState` step holds a [`Symbol`] that is looked up in
//! `entries` each time it is evaluated.

use std::collections::BTreeMap;

use glex_core::{Grammar, Interner, NodeVariant, Repetition, Symbol, TreeNode};
use regex_automata::meta::{self, Regex};
use regex_automata::util::syntax;

use super::source::unit_pattern;

/// Index of a node in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// What a node does when evaluated.
#[derive(Debug)]
pub enum Step {
    State {
        name: Symbol,
    },
    /// Pre-encoded to UTF-16.
    Literal {
        text: String,
        units: Box<[u16]>,
    },
    Unicode {
        min: Option<u32>,
        max: Option<u32>,
    },
    Regex {
        pattern: String,
        regex: Regex,
    },
    SubState {
        state: Symbol,
        repetition: Repetition,
    },
    ApplyTag {
        tag: Symbol,
    },
}

#[derive(Debug)]
pub struct GraphNode {
    pub commit: bool,
    pub step: Step,
    pub transitions: Vec<NodeId>,
}

/// Errors raised while lowering a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid regex /{pattern}/ in state '{state}': {source}")]
    Regex {
        state: String,
        pattern: String,
        #[source]
        source: Box<meta::BuildError>,
    },
}

/// Arena of compiled nodes plus the state and tag name tables.
///
/// Immutable after [`Graph::build`]; share it by reference across threads.
#[derive(Debug)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    states: Interner,
    tags: Interner,
    /// Entry node per state symbol. `None` for names that are referenced but
    /// never defined.
    entries: Vec<Option<NodeId>>,
    root: String,
}

impl Graph {
    /// Lower `grammar` into an arena.
    ///
    /// Defined states are interned first in definition order, so their symbols
    /// are `0..grammar.len()`. Names that are only referenced follow.
    pub fn build(grammar: &Grammar) -> Result<Self, GraphError> {
        let mut states = Interner::new();
        for (name, _) in grammar.states() {
            states.intern(name);
        }

        let mut builder = Builder {
            nodes: Vec::with_capacity(grammar.node_count()),
            states,
            tags: Interner::new(),
            current_state: "",
        };

        let mut defined = Vec::with_capacity(grammar.len());
        for (name, node) in grammar.states() {
            builder.current_state = name;
            let id = builder.lower(node)?;
            defined.push((builder.states.intern(name), id));
        }

        let mut entries = vec![None; builder.states.len()];
        for (sym, id) in defined {
            entries[sym.as_usize()] = Some(id);
        }

        Ok(Self {
            nodes: builder.nodes,
            states: builder.states,
            tags: builder.tags,
            entries,
            root: grammar.root().to_owned(),
        })
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.as_usize()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Entry node of a state by name.
    pub fn entry(&self, name: &str) -> Option<NodeId> {
        self.state_symbol(name).and_then(|sym| self.entry_of(sym))
    }

    #[inline]
    pub fn entry_of(&self, state: Symbol) -> Option<NodeId> {
        self.entries.get(state.as_usize()).copied().flatten()
    }

    pub fn state_symbol(&self, name: &str) -> Option<Symbol> {
        self.states.get(name)
    }

    pub fn state_name(&self, state: Symbol) -> &str {
        self.states.resolve(state)
    }

    /// State name by raw table index, for indices that come from outside.
    pub fn try_state_name(&self, index: u32) -> Option<&str> {
        self.states.try_resolve(Symbol::from_raw(index))
    }

    pub fn tag_symbol(&self, name: &str) -> Option<Symbol> {
        self.tags.get(name)
    }

    pub fn tag_name(&self, tag: Symbol) -> &str {
        self.tags.resolve(tag)
    }

    /// State names by index, including referenced but undefined ones.
    pub fn state_names(&self) -> BTreeMap<u32, String> {
        self.states.table()
    }

    /// Tag names by index.
    pub fn tag_names(&self) -> BTreeMap<u32, String> {
        self.tags.table()
    }

    /// Names of the defined states, in definition order.
    pub fn defined_states(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(|(sym, _)| self.entry_of(*sym).is_some())
            .map(|(_, name)| name)
    }

    /// Reconstruct the authored variant of a node, for messages.
    pub fn describe(&self, id: NodeId) -> NodeVariant {
        match &self.node(id).step {
            Step::State { name } => NodeVariant::State {
                name: self.state_name(*name).to_owned(),
            },
            Step::Literal { text, .. } => NodeVariant::MatchLiteral { text: text.clone() },
            Step::Unicode { min, max } => NodeVariant::MatchUnicode {
                min: *min,
                max: *max,
            },
            Step::Regex { pattern, .. } => NodeVariant::MatchRegex {
                pattern: pattern.clone(),
            },
            Step::SubState { state, repetition } => NodeVariant::SubState {
                state: self.state_name(*state).to_owned(),
                repetition: *repetition,
            },
            Step::ApplyTag { tag } => NodeVariant::ApplyTag {
                tag: self.tag_name(*tag).to_owned(),
            },
        }
    }

    /// Dangling references, in the order they appear.
    ///
    /// Each entry is `(referencing state, missing state)`. An undefined root is
    /// reported with an empty referencing state.
    pub fn validate(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        if self.entry(&self.root).is_none() {
            missing.push((String::new(), self.root.clone()));
        }

        for (sym, name) in self.states.iter() {
            let Some(entry) = self.entry_of(sym) else {
                continue;
            };
            let mut stack = vec![entry];
            while let Some(id) = stack.pop() {
                let node = self.node(id);
                if let Step::SubState { state, .. } = &node.step
                    && self.entry_of(*state).is_none()
                {
                    missing.push((name.to_owned(), self.state_name(*state).to_owned()));
                }
                stack.extend(node.transitions.iter().rev());
            }
        }
        missing
    }
}

struct Builder<'g> {
    nodes: Vec<GraphNode>,
    states: Interner,
    tags: Interner,
    current_state: &'g str,
}

impl<'g> Builder<'g> {
    fn lower(&mut self, tree: &'g TreeNode) -> Result<NodeId, GraphError> {
        let step = match &tree.node {
            NodeVariant::State { name } => Step::State {
                name: self.states.intern(name),
            },
            NodeVariant::MatchLiteral { text } => Step::Literal {
                text: text.clone(),
                units: text.encode_utf16().collect(),
            },
            NodeVariant::MatchUnicode { min, max } => Step::Unicode {
                min: *min,
                max: *max,
            },
            NodeVariant::MatchRegex { pattern } => Step::Regex {
                pattern: pattern.clone(),
                regex: self.compile(pattern)?,
            },
            NodeVariant::SubState { state, repetition } => Step::SubState {
                state: self.states.intern(state),
                repetition: *repetition,
            },
            NodeVariant::ApplyTag { tag } => Step::ApplyTag {
                tag: self.tags.intern(tag),
            },
        };

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(GraphNode {
            commit: tree.commit,
            step,
            transitions: Vec::with_capacity(tree.transitions.len()),
        });

        for child in &tree.transitions {
            let child_id = self.lower(child)?;
            self.nodes[id.as_usize()].transitions.push(child_id);
        }
        Ok(id)
    }

    fn compile(&self, pattern: &str) -> Result<Regex, GraphError> {
        Regex::builder()
            .syntax(syntax::Config::new().dot_matches_new_line(true))
            .build(&unit_pattern(pattern))
            .map_err(|e| GraphError::Regex {
                state: self.current_state.to_owned(),
                pattern: pattern.to_owned(),
                source: Box::new(e),
            })
    }
}
