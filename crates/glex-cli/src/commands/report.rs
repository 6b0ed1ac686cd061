//! Render evaluation failures against the input they happened in.
//!
//! Offsets from the engine are UTF-16 units; snippets need byte ranges.

use std::ops::Range;

use annotate_snippets::{Annotation, AnnotationKind, Group, Level, Renderer, Snippet};
use glex_core::utf16::{self, byte_offset};
use glex_core::{Colors, escape_text};
use glex_vm::EvalError;

pub struct ReportPrinter<'s> {
    input: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'s> ReportPrinter<'s> {
    pub fn new(input: &'s str) -> Self {
        Self {
            input,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// A hard failure of the attempt that started at `offset`.
    ///
    /// The committed input is marked as context and the position where
    /// matching stalled as the primary span, followed by the state and tag
    /// traces.
    pub fn failure(&self, offset: usize, error: &EvalError) -> String {
        let start = byte_offset(self.input, offset);
        let committed_units = utf16::len(&error.committed_input);
        let stall = byte_offset(self.input, offset + committed_units);

        let mut snippet = self.snippet().annotation(
            AnnotationKind::Primary
                .span(point(self.input, stall))
                .label(error.kind.as_str()),
        );
        if stall > start {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(start..stall)
                    .label("committed here"),
            );
        }

        let report: Vec<Group> =
            vec![Level::ERROR.primary_title(&error.message).element(snippet)];
        let mut out = self.renderer().render(&report).to_string();

        let c = Colors::new(self.colored);
        out.push('\n');
        out.push_str(&format!(
            "{}state trace:{} {}\n",
            c.dim,
            c.reset,
            join_or_none(&error.state_stack)
        ));
        out.push_str(&format!(
            "{}tag trace:{} {}\n",
            c.dim,
            c.reset,
            join_or_none(&error.tag_stack)
        ));
        out.push_str(&format!(
            "{}committed input:{} \"{}\"",
            c.dim,
            c.reset,
            c.text(&escape_text(&error.committed_input))
        ));
        out
    }

    /// Input left over at `offset` that no state accepted.
    pub fn unmatched(&self, offset: usize) -> String {
        let at = byte_offset(self.input, offset);
        let snippet = self.snippet().annotation(
            AnnotationKind::Primary
                .span(point(self.input, at))
                .label("no state accepts the input here"),
        );
        let title = format!(
            "input not fully consumed ({} of {} units)",
            offset,
            utf16::len(self.input)
        );
        let report: Vec<Group> = vec![Level::WARNING.primary_title(&title).element(snippet)];
        self.renderer().render(&report).to_string()
    }

    fn snippet(&self) -> Snippet<'s, Annotation<'s>> {
        let snippet = Snippet::source(self.input).line_start(1);
        match self.path {
            Some(p) => snippet.path(p),
            None => snippet,
        }
    }

    fn renderer(&self) -> Renderer {
        if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        }
    }
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        return "(none)".to_owned();
    }
    names.join(" > ")
}

/// One character at `at`, or an empty span at the end of input.
fn point(s: &str, at: usize) -> Range<usize> {
    let len = s[at..].chars().next().map_or(0, char::len_utf8);
    at..at + len
}
