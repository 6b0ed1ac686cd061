//! Show a grammar as a tree, or re-serialize it.

use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use glex_core::{Colors, Grammar, NodeVariant, TreeNode, escape_text};

use super::loader;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpFormat {
    Text,
    Json,
    Binary,
}

pub struct DumpArgs {
    pub grammar_path: Option<PathBuf>,
    pub lang: Option<String>,
    pub format: DumpFormat,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let loaded = loader::load_grammar(args.grammar_path.as_deref(), args.lang.as_deref())
        .unwrap_or_else(|e| loader::fail(e));

    let bytes = match args.format {
        DumpFormat::Text => render_tree(&loaded.grammar, Colors::new(args.color)).into_bytes(),
        DumpFormat::Json => {
            let mut json = loaded.grammar.to_json();
            json.push('\n');
            json.into_bytes()
        }
        DumpFormat::Binary => loaded.grammar.to_binary(),
    };

    let written = match &args.output {
        Some(path) => fs::write(path, &bytes),
        None => std::io::stdout().write_all(&bytes),
    };
    if let Err(e) = written {
        loader::fail(format!("failed to write output: {}", e));
    }
}

/// One line per node, indented by depth. Committed nodes are marked `!`.
pub fn render_tree(grammar: &Grammar, colors: Colors) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}root:{} {}",
        colors.dim,
        colors.reset,
        colors.name(grammar.root())
    );
    for (_, node) in grammar.states() {
        out.push('\n');
        write_node(&mut out, node, 0, colors);
    }
    out
}

fn write_node(out: &mut String, node: &TreeNode, depth: usize, c: Colors) {
    let marker = if node.commit {
        format!("{}!{} ", c.red, c.reset)
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        "{:indent$}{}{}{}{} {}",
        "",
        marker,
        c.dim,
        node.node.kind_name(),
        c.reset,
        label(&node.node, c),
        indent = depth * 2
    );
    for child in &node.transitions {
        write_node(out, child, depth + 1, c);
    }
}

fn label(node: &NodeVariant, c: Colors) -> String {
    match node {
        NodeVariant::MatchLiteral { text } => format!("\"{}\"", c.text(&escape_text(text))),
        NodeVariant::MatchRegex { pattern } => format!("/{}/", c.text(&escape_text(pattern))),
        NodeVariant::State { .. } | NodeVariant::SubState { .. } | NodeVariant::ApplyTag { .. } => {
            c.name(&node.content_text())
        }
        NodeVariant::MatchUnicode { .. } => node.content_text(),
    }
}
