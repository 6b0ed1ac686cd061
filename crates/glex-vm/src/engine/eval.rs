//! Backtracking evaluator over a compiled [`Graph`].

use glex_core::{Repetition, Symbol, Tag, escape_text};
use regex_automata::{Anchored, Input};
use serde::Serialize;

use super::error::{
    ErrorKind, EvalError, loop_limit_message, no_match_message, recursion_limit_message,
    unknown_state_message,
};
use super::graph::{Graph, NodeId, Step};
use super::source::Source;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for a single attempt.
#[derive(Clone, Copy, Debug)]
pub struct TickLimits {
    /// Nodes that may be visited without consuming input (default: 1,000).
    pub(crate) max_no_progress_ticks: u32,
    /// Maximum nesting of nodes being evaluated (default: 256).
    pub(crate) recursion_limit: u32,
}

impl Default for TickLimits {
    fn default() -> Self {
        Self {
            max_no_progress_ticks: 1000,
            recursion_limit: 256,
        }
    }
}

impl TickLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_no_progress_ticks(mut self, ticks: u32) -> Self {
        self.max_no_progress_ticks = ticks;
        self
    }

    /// Set the recursion limit.
    ///
    /// Every evaluated node holds a few native stack frames until its
    /// continuation finishes, so this bounds stack use as well.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_max_no_progress_ticks(&self) -> u32 {
        self.max_no_progress_ticks
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Result of one attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// `len` UTF-16 units from the start of the input matched.
    Matched { len: usize, tags: Vec<Tag> },
    /// Every alternative rejected without reaching a commit point.
    NoMatch,
    Failed(EvalError),
}

/// Result of [`Evaluator::evaluate_all`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tokenized {
    /// UTF-16 units consumed by successful attempts.
    pub matched_len: usize,
    /// Tags of all attempts, with absolute offsets.
    pub tags: Vec<Tag>,
    /// Input left over, if any.
    pub unmatched_suffix: Option<String>,
    /// Failure that stopped the driver, if any.
    pub last_error: Option<EvalError>,
}

impl Tokenized {
    /// Whether every unit of the input was consumed.
    pub fn is_complete(&self) -> bool {
        self.unmatched_suffix.is_none()
    }
}

/// Evaluates inputs against one entry state of a graph.
///
/// Holds no per-call state, so one evaluator can serve many threads.
pub struct Evaluator<'g> {
    graph: &'g Graph,
    entry: String,
    limits: TickLimits,
}

/// Builder for [`Evaluator`].
pub struct EvaluatorBuilder<'g> {
    graph: &'g Graph,
    entry: Option<String>,
    limits: TickLimits,
}

impl<'g> EvaluatorBuilder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            entry: None,
            limits: TickLimits::default(),
        }
    }

    /// Start from this state instead of the grammar root.
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    pub fn limits(mut self, limits: TickLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_no_progress_ticks(mut self, ticks: u32) -> Self {
        self.limits = self.limits.max_no_progress_ticks(ticks);
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> Evaluator<'g> {
        Evaluator {
            graph: self.graph,
            entry: self.entry.unwrap_or_else(|| self.graph.root().to_owned()),
            limits: self.limits,
        }
    }
}

impl<'g> Evaluator<'g> {
    pub fn builder(graph: &'g Graph) -> EvaluatorBuilder<'g> {
        EvaluatorBuilder::new(graph)
    }

    /// Evaluator for the grammar root with default limits.
    pub fn new(graph: &'g Graph) -> Self {
        Self::builder(graph).build()
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn limits(&self) -> TickLimits {
        self.limits
    }

    /// Match a prefix of `input` starting at the entry state.
    pub fn evaluate(&self, input: &str) -> MatchOutcome {
        self.evaluate_with(input, &mut NoopTracer)
    }

    /// Like [`evaluate`](Self::evaluate), reporting every node visit to `tracer`.
    pub fn evaluate_with<T: Tracer>(&self, input: &str, tracer: &mut T) -> MatchOutcome {
        let source = Source::new(input);
        self.attempt(&source, 0, tracer)
    }

    /// Repeatedly match prefixes until the input is consumed, nothing matches,
    /// or an attempt fails.
    ///
    /// An attempt that matches zero units still contributes its tags, but ends
    /// the loop since the next attempt would start at the same position.
    pub fn evaluate_all(&self, input: &str) -> Tokenized {
        let source = Source::new(input);
        let mut offset = 0;
        let mut tags = Vec::new();
        let mut last_error = None;

        while offset < source.len() {
            match self.attempt(&source, offset, &mut NoopTracer) {
                MatchOutcome::Matched {
                    len,
                    tags: mut attempt_tags,
                } => {
                    for tag in &mut attempt_tags {
                        tag.shift(offset);
                    }
                    tags.extend(attempt_tags);
                    offset += len;
                    if len == 0 {
                        break;
                    }
                }
                MatchOutcome::NoMatch => break,
                MatchOutcome::Failed(err) => {
                    last_error = Some(err);
                    break;
                }
            }
        }

        let unmatched_suffix =
            (offset < source.len()).then(|| source.slice(offset, source.len()));
        Tokenized {
            matched_len: offset,
            tags,
            unmatched_suffix,
            last_error,
        }
    }

    /// One attempt over `source[start..]`. Tag offsets in the outcome are
    /// relative to `start`.
    fn attempt<T: Tracer>(
        &self,
        source: &Source<'_>,
        start: usize,
        tracer: &mut T,
    ) -> MatchOutcome {
        let Some(entry) = self.graph.entry(&self.entry) else {
            return MatchOutcome::Failed(EvalError::new(
                ErrorKind::UnknownNodeKind,
                unknown_state_message(&self.entry),
            ));
        };

        let mut attempt = Attempt {
            graph: self.graph,
            source,
            ticks: 0,
            max_ticks: self.limits.max_no_progress_ticks,
            depth: 0,
            max_depth: self.limits.recursion_limit,
            tracer,
        };

        match attempt.node_matches(entry, start) {
            Ok(Some(partial)) => MatchOutcome::Matched {
                len: partial.len,
                tags: partial
                    .tags
                    .into_iter()
                    .map(|t| t.into_tag(self.graph, start))
                    .collect(),
            },
            Ok(None) => MatchOutcome::NoMatch,
            Err(failure) => MatchOutcome::Failed(failure.into_error(self.graph, source, start)),
        }
    }
}

/// Matched span of a node and everything after it.
struct Partial {
    len: usize,
    tags: Vec<TagNode>,
}

impl Partial {
    fn empty() -> Self {
        Self {
            len: 0,
            tags: Vec::new(),
        }
    }

    /// Prepend what earlier repetitions matched.
    fn after(mut self, consumed: usize, mut tags: Vec<TagNode>) -> Self {
        self.len += consumed;
        tags.append(&mut self.tags);
        self.tags = tags;
        self
    }
}

/// Tag with an interned name and an absolute offset.
struct TagNode {
    tag: Symbol,
    index: usize,
    len: usize,
    children: Vec<TagNode>,
}

impl TagNode {
    fn into_tag(self, graph: &Graph, start: usize) -> Tag {
        Tag::new(
            graph.tag_name(self.tag),
            self.index - start,
            self.len,
            self.children
                .into_iter()
                .map(|c| c.into_tag(graph, start))
                .collect(),
        )
    }
}

/// Hard failure on its way to the driver. Stacks are pushed innermost first.
struct Failure {
    kind: ErrorKind,
    message: String,
    tags: Vec<Symbol>,
    states: Vec<Symbol>,
    /// Absolute offset the committed input runs up to.
    committed_end: usize,
}

impl Failure {
    fn new(kind: ErrorKind, message: String, committed_end: usize) -> Self {
        Self {
            kind,
            message,
            tags: Vec::new(),
            states: Vec::new(),
            committed_end,
        }
    }

    fn into_error(self, graph: &Graph, source: &Source<'_>, start: usize) -> EvalError {
        EvalError {
            kind: self.kind,
            message: self.message,
            tag_stack: self
                .tags
                .iter()
                .rev()
                .map(|&t| graph.tag_name(t).to_owned())
                .collect(),
            state_stack: self
                .states
                .iter()
                .rev()
                .map(|&s| graph.state_name(s).to_owned())
                .collect(),
            committed_input: source.slice(start, self.committed_end),
        }
    }
}

/// `Ok(Some)` matched, `Ok(None)` rejected, `Err` failed hard.
type Outcome = Result<Option<Partial>, Failure>;

/// State of a single attempt. Lives on the stack of one call.
struct Attempt<'a, 's, T: Tracer> {
    graph: &'a Graph,
    source: &'a Source<'s>,
    ticks: u32,
    max_ticks: u32,
    /// Nodes currently being evaluated.
    depth: u32,
    max_depth: u32,
    tracer: &'a mut T,
}

impl<T: Tracer> Attempt<'_, '_, T> {
    fn node_matches(&mut self, id: NodeId, pos: usize) -> Outcome {
        self.tracer.trace_enter(id, pos);
        let outcome = self.tick(pos).and_then(|()| self.nested(id, pos));
        match &outcome {
            Ok(Some(partial)) => self.tracer.trace_match(id, pos, partial.len),
            Ok(None) => self.tracer.trace_reject(id, pos),
            Err(failure) => self.tracer.trace_failure(id, pos, failure.kind),
        }
        outcome
    }

    fn tick(&mut self, pos: usize) -> Result<(), Failure> {
        self.ticks += 1;
        if self.ticks > self.max_ticks {
            return Err(Failure::new(
                ErrorKind::LoopLimitExceeded,
                loop_limit_message(self.max_ticks),
                pos,
            ));
        }
        Ok(())
    }

    /// Evaluate `id` one level deeper, failing once the recursion limit is reached.
    fn nested(&mut self, id: NodeId, pos: usize) -> Outcome {
        if self.depth >= self.max_depth {
            return Err(Failure::new(
                ErrorKind::LoopLimitExceeded,
                recursion_limit_message(self.max_depth),
                pos,
            ));
        }
        self.depth += 1;
        let outcome = self.eval_node(id, pos);
        self.depth -= 1;
        outcome
    }

    fn eval_node(&mut self, id: NodeId, pos: usize) -> Outcome {
        let graph = self.graph;
        let node = graph.node(id);
        match &node.step {
            Step::State { .. } => self.transitions_match(id, pos),
            Step::ApplyTag { tag } => match self.transitions_match(id, pos)? {
                Some(partial) => Ok(Some(Partial {
                    len: partial.len,
                    tags: vec![TagNode {
                        tag: *tag,
                        index: pos,
                        len: partial.len,
                        children: partial.tags,
                    }],
                })),
                None if node.commit => {
                    let mut failure = self.no_match(id, pos);
                    failure.tags.push(*tag);
                    Err(failure)
                }
                None => Ok(None),
            },
            Step::Literal { units, .. } => {
                if !self.source.has_prefix_at(pos, units) {
                    return Ok(None);
                }
                self.advance(id, pos, units.len())
            }
            Step::Unicode { min, max } => {
                let Some(unit) = self.source.unit(pos) else {
                    return Ok(None);
                };
                let unit = u32::from(unit);
                if min.is_some_and(|min| unit < min) || max.is_some_and(|max| unit > max) {
                    return Ok(None);
                }
                self.advance(id, pos, 1)
            }
            Step::Regex { regex, .. } => {
                let Some(rest) = self.source.view_from(pos) else {
                    return Ok(None);
                };
                let Some(m) = regex.search(&Input::new(rest).anchored(Anchored::Yes)) else {
                    return Ok(None);
                };
                self.advance(id, pos, rest[m.range()].chars().count())
            }
            Step::SubState { state, repetition } => {
                let Some(target) = graph.entry_of(*state) else {
                    return Err(Failure::new(
                        ErrorKind::UnknownNodeKind,
                        unknown_state_message(graph.state_name(*state)),
                        pos,
                    ));
                };
                self.repeat(id, pos, target, *repetition)
            }
        }
    }

    /// Continue after a matcher accepted `n` units at `pos`.
    fn advance(&mut self, id: NodeId, pos: usize, n: usize) -> Outcome {
        match self.transitions_match(id, pos + n)? {
            Some(mut partial) => {
                partial.len += n;
                if n > 0 {
                    self.ticks = 0;
                }
                Ok(Some(partial))
            }
            None if self.graph.node(id).commit => Err(self.no_match(id, pos + n)),
            None => Ok(None),
        }
    }

    /// Invoke `target` between `min` and `max` times, then the transitions.
    ///
    /// A non-greedy loop tries to leave as soon as `min` is reached and only
    /// repeats when the transitions reject. A greedy loop repeats until the
    /// target rejects and only then tries the transitions.
    fn repeat(
        &mut self,
        id: NodeId,
        pos: usize,
        target: NodeId,
        repetition: Repetition,
    ) -> Outcome {
        let Repetition {
            greedy,
            min_repeat: min,
            max_repeat: max,
        } = repetition;
        let commit = self.graph.node(id).commit;
        let at_max = |count: u32| max.is_some_and(|max| count >= max);

        let mut count = 0u32;
        let mut consumed = 0usize;
        let mut tags = Vec::new();
        loop {
            let at = pos + consumed;

            if (count >= min && !greedy) || at_max(count) {
                // A rejection here falls through to another repetition.
                if let Some(partial) = self.transitions_match(id, at)? {
                    return Ok(Some(partial.after(consumed, tags)));
                }
            }

            if at_max(count) {
                if count >= min && commit {
                    return Err(self.no_match(id, at));
                }
                return Ok(None);
            }

            let Some(matched) = self.node_matches(target, at)? else {
                if count < min {
                    if count > 0 && commit {
                        return Err(self.no_match(id, at));
                    }
                    return Ok(None);
                }
                if !greedy {
                    if commit {
                        return Err(self.no_match(id, at));
                    }
                    return Ok(None);
                }
                return match self.transitions_match(id, at)? {
                    Some(partial) => Ok(Some(partial.after(consumed, tags))),
                    None if commit => Err(self.no_match(id, at)),
                    None => Ok(None),
                };
            };

            if matched.len > 0 {
                self.ticks = 0;
            } else {
                self.tick(at)?;
            }
            count += 1;
            consumed += matched.len;
            tags.extend(matched.tags);
            self.tracer.trace_repeat(id, count, consumed);
        }
    }

    /// Try each transition in order; an empty list matches nothing.
    ///
    /// A failure passing through a `State` or `ApplyTag` node records its name.
    fn transitions_match(&mut self, id: NodeId, pos: usize) -> Outcome {
        let graph = self.graph;
        let node = graph.node(id);
        if node.transitions.is_empty() {
            return Ok(Some(Partial::empty()));
        }

        for &next in &node.transitions {
            match self.node_matches(next, pos) {
                Ok(Some(partial)) => return Ok(Some(partial)),
                Ok(None) => {}
                Err(mut failure) => {
                    match &node.step {
                        Step::State { name } => failure.states.push(*name),
                        Step::ApplyTag { tag } => failure.tags.push(*tag),
                        Step::Literal { .. }
                        | Step::Unicode { .. }
                        | Step::Regex { .. }
                        | Step::SubState { .. } => {}
                    }
                    return Err(failure);
                }
            }
        }
        Ok(None)
    }

    fn no_match(&self, id: NodeId, committed_end: usize) -> Failure {
        let node = self.graph.node(id);
        let variant = self.graph.describe(id);
        Failure::new(
            ErrorKind::NoMatch,
            no_match_message(
                node.transitions.len(),
                &escape_text(&variant.content_text()),
                variant.kind_name(),
            ),
            committed_end,
        )
    }
}
