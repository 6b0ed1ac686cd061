//! Validate a grammar: regexes compile, every referenced state exists, and
//! every regex pattern tokenizes under the bundled regex grammar.

use std::path::PathBuf;

use glex_core::{Colors, Grammar, NodeVariant, TreeNode};
use glex_vm::Graph;

use super::loader::{self, LoadedGrammar};

pub struct CheckArgs {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub color: bool,
}

/// One problem found in a grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// The graph could not be built, usually a regex the engine rejects.
    Build(String),
    UndefinedRoot(String),
    UndefinedState { state: String, missing: String },
    /// A regex pattern the regex grammar does not fully tokenize.
    Pattern {
        state: String,
        pattern: String,
        offset: usize,
        message: String,
    },
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::Build(message) => write!(f, "{}", message),
            Finding::UndefinedRoot(root) => write!(f, "root state '{}' is not defined", root),
            Finding::UndefinedState { state, missing } => {
                write!(f, "state '{}' references undefined state '{}'", state, missing)
            }
            Finding::Pattern {
                state,
                pattern,
                offset,
                message,
            } => write!(
                f,
                "pattern /{}/ in state '{}' at {}: {}",
                pattern, state, offset, message
            ),
        }
    }
}

pub fn run(args: CheckArgs) {
    let loaded = loader::load_grammar(args.grammar_path.as_deref(), args.lang.as_deref())
        .unwrap_or_else(|e| loader::fail(e));
    let c = Colors::new(args.color);

    let found = findings(&loaded);
    if found.is_empty() {
        println!(
            "{}ok:{} {} ({} states, {} nodes)",
            c.green,
            c.reset,
            loaded.label,
            loaded.grammar.len(),
            loaded.grammar.node_count()
        );
        return;
    }

    for finding in &found {
        eprintln!("{}{}:{} {}", c.red, loaded.label, c.reset, finding);
    }
    std::process::exit(1);
}

pub fn findings(loaded: &LoadedGrammar) -> Vec<Finding> {
    let mut found = Vec::new();
    match Graph::build(&loaded.grammar) {
        Ok(graph) => {
            for (state, missing) in graph.validate() {
                found.push(if state.is_empty() {
                    Finding::UndefinedRoot(missing)
                } else {
                    Finding::UndefinedState { state, missing }
                });
            }
        }
        Err(e) => found.push(Finding::Build(e.to_string())),
    }
    found.extend(pattern_findings(&loaded.grammar));
    found
}

#[cfg(feature = "lang-regex")]
fn pattern_findings(grammar: &Grammar) -> Vec<Finding> {
    let mut found = Vec::new();
    for (state, node) in grammar.states() {
        let mut patterns = Vec::new();
        collect_patterns(node, &mut patterns);
        for pattern in patterns {
            for issue in glex_langs::lint::check_pattern(pattern) {
                found.push(Finding::Pattern {
                    state: state.to_owned(),
                    pattern: pattern.to_owned(),
                    offset: issue.offset(),
                    message: issue.message(),
                });
            }
        }
    }
    found
}

#[cfg(not(feature = "lang-regex"))]
fn pattern_findings(_grammar: &Grammar) -> Vec<Finding> {
    Vec::new()
}

#[cfg_attr(not(feature = "lang-regex"), allow(dead_code))]
fn collect_patterns<'g>(node: &'g TreeNode, out: &mut Vec<&'g str>) {
    if let NodeVariant::MatchRegex { pattern } = &node.node {
        out.push(pattern);
    }
    for child in &node.transitions {
        collect_patterns(child, out);
    }
}
