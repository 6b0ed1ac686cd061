//! Tracing infrastructure for debugging evaluation.
//!
//! `NoopTracer` has `#[inline(always)]` empty methods, so the default
//! [`Evaluator::evaluate`](super::Evaluator::evaluate) path compiles down to the
//! bare matcher. Any state a tracer needs for display (indentation, which
//! nodes were shown) lives in the tracer, never in the attempt.

use glex_core::{Colors, escape_text};

use super::error::ErrorKind;
use super::graph::{Graph, NodeId, Step};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// States, sub-state calls and tags.
    #[default]
    Default,
    /// (-v): every node, including matchers and repetition counts.
    Verbose,
    /// (-vv): every node, with a preview of the remaining input on entry.
    VeryVerbose,
}

/// Instrumentation hooks invoked by the evaluator.
///
/// Every `trace_enter` is closed by exactly one of `trace_match`,
/// `trace_reject` or `trace_failure` for the same node:
/// - `trace_enter` - before a node is evaluated at `pos`
/// - `trace_match` - the node and its continuation matched `len` units
/// - `trace_reject` - the node or every continuation rejected
/// - `trace_failure` - a hard failure is unwinding through the node
/// - `trace_repeat` - a `SubState` completed one more repetition
pub trait Tracer {
    fn trace_enter(&mut self, node: NodeId, pos: usize);

    fn trace_match(&mut self, node: NodeId, pos: usize, len: usize);

    fn trace_reject(&mut self, node: NodeId, pos: usize);

    fn trace_failure(&mut self, node: NodeId, pos: usize, kind: ErrorKind);

    fn trace_repeat(&mut self, node: NodeId, count: u32, consumed: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _node: NodeId, _pos: usize) {}

    #[inline(always)]
    fn trace_match(&mut self, _node: NodeId, _pos: usize, _len: usize) {}

    #[inline(always)]
    fn trace_reject(&mut self, _node: NodeId, _pos: usize) {}

    #[inline(always)]
    fn trace_failure(&mut self, _node: NodeId, _pos: usize, _kind: ErrorKind) {}

    #[inline(always)]
    fn trace_repeat(&mut self, _node: NodeId, _count: u32, _consumed: usize) {}
}

const PREVIEW_UNITS: usize = 16;

/// Symbols marking each trace line.
mod symbol {
    pub const ENTER: &str = "▶";
    pub const MATCH: &str = "●";
    pub const REJECT: &str = "○";
    pub const FAIL: &str = "✗";
    pub const REPEAT: &str = "↻";
}

/// Tracer that collects one line per traced event.
pub struct PrintTracer<'g> {
    graph: &'g Graph,
    input: Vec<u16>,
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// One entry per entered node: whether it got a line of its own.
    shown: Vec<bool>,
    depth: usize,
    pos_width: usize,
}

impl<'g> PrintTracer<'g> {
    pub fn new(graph: &'g Graph, input: &str, verbosity: Verbosity, colors: Colors) -> Self {
        let input: Vec<u16> = input.encode_utf16().collect();
        let pos_width = input.len().to_string().len();
        Self {
            graph,
            input,
            verbosity,
            colors,
            lines: Vec::new(),
            shown: Vec::new(),
            depth: 0,
            pos_width,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All trace lines joined by newlines.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        if self.verbosity != Verbosity::Default {
            return true;
        }
        matches!(
            self.graph.node(node).step,
            Step::State { .. } | Step::SubState { .. } | Step::ApplyTag { .. }
        )
    }

    fn describe(&self, node: NodeId) -> String {
        let variant = self.graph.describe(node);
        format!(
            "{} {}",
            variant.kind_name(),
            self.colors.name(&escape_text(&variant.content_text()))
        )
    }

    fn push_line(&mut self, pos: Option<usize>, symbol: &str, content: &str) {
        let c = self.colors;
        let pos = match pos {
            Some(p) => format!("{:>w$}", p, w = self.pos_width),
            None => " ".repeat(self.pos_width),
        };
        self.lines.push(format!(
            "{}{}{} {:indent$}{} {}",
            c.dim,
            pos,
            c.reset,
            "",
            symbol,
            content,
            indent = self.depth * 2
        ));
    }

    fn preview(&self, pos: usize) -> String {
        let start = pos.min(self.input.len());
        let end = (start + PREVIEW_UNITS).min(self.input.len());
        let mut text = escape_text(&String::from_utf16_lossy(&self.input[start..end]));
        if end < self.input.len() {
            text.push('…');
        }
        text
    }

    /// Close the innermost entered node. Returns whether it had a line.
    fn leave(&mut self) -> bool {
        let shown = self.shown.pop().unwrap_or(false);
        if shown {
            self.depth = self.depth.saturating_sub(1);
        }
        shown
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter(&mut self, node: NodeId, pos: usize) {
        let visible = self.is_visible(node);
        self.shown.push(visible);
        if !visible {
            return;
        }

        let mut content = self.describe(node);
        if self.verbosity == Verbosity::VeryVerbose {
            let c = self.colors;
            content.push_str(&format!(" {}", c.text(&self.preview(pos))));
        }
        self.push_line(Some(pos), symbol::ENTER, &content);
        self.depth += 1;
    }

    fn trace_match(&mut self, node: NodeId, pos: usize, len: usize) {
        if !self.leave() {
            return;
        }
        let c = self.colors;
        let content = format!(
            "{} {}{}..{}{}",
            self.describe(node),
            c.dim,
            pos,
            pos + len,
            c.reset
        );
        self.push_line(Some(pos), symbol::MATCH, &content);
    }

    fn trace_reject(&mut self, node: NodeId, pos: usize) {
        if !self.leave() {
            return;
        }
        let content = self.describe(node);
        self.push_line(Some(pos), symbol::REJECT, &content);
    }

    fn trace_failure(&mut self, node: NodeId, pos: usize, kind: ErrorKind) {
        if !self.leave() {
            return;
        }
        let c = self.colors;
        let content = format!("{} {}{}{}", self.describe(node), c.red, kind, c.reset);
        self.push_line(Some(pos), symbol::FAIL, &content);
    }

    fn trace_repeat(&mut self, _node: NodeId, count: u32, consumed: usize) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        let content = format!("{}#{} +{}{}", c.dim, count, consumed, c.reset);
        self.push_line(None, symbol::REPEAT, &content);
    }
}
