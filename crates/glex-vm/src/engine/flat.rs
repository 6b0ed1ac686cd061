//! Flat result encoding shared with external engines.
//!
//! Tags travel as a post-order list where each entry carries its nesting depth
//! (`layer`) and the index of its name in the tag table:
//!
//! ```text
//! A(B, C(D))  =>  B@1  D@2  C@1  A@0
//! ```
//!
//! Errors carry name indices instead of names. Both are resolved against the
//! tables returned by [`Backend::tag_names`](super::Backend::tag_names) and
//! [`Backend::state_names`](super::Backend::state_names).

use std::collections::BTreeMap;

use glex_core::Tag;
use serde::{Deserialize, Serialize};

use super::error::{ErrorKind, EvalError};

const UNKNOWN_NAME: &str = "?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTag {
    /// Nesting depth, 0 for top-level tags.
    pub layer: u32,
    /// Index into the tag name table.
    pub node: u32,
    pub index: usize,
    pub len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatErrorKind {
    InfiniteLoop,
    NoMatch,
    UnknownNodeKind,
}

impl From<ErrorKind> for FlatErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::LoopLimitExceeded => FlatErrorKind::InfiniteLoop,
            ErrorKind::NoMatch => FlatErrorKind::NoMatch,
            ErrorKind::UnknownNodeKind => FlatErrorKind::UnknownNodeKind,
        }
    }
}

impl From<FlatErrorKind> for ErrorKind {
    fn from(kind: FlatErrorKind) -> Self {
        match kind {
            FlatErrorKind::InfiniteLoop => ErrorKind::LoopLimitExceeded,
            FlatErrorKind::NoMatch => ErrorKind::NoMatch,
            FlatErrorKind::UnknownNodeKind => ErrorKind::UnknownNodeKind,
        }
    }
}

/// Error with stacks of name indices, outermost first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEvalError {
    pub kind: FlatErrorKind,
    pub message: String,
    pub tag_index_stack: Vec<u32>,
    pub state_index_stack: Vec<u32>,
    pub committed_input: String,
}

/// One evaluation in flat form. A plain rejection is a zero-length result
/// with no tags and no error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEvalResult {
    pub match_len: usize,
    pub tags: Vec<FlatTag>,
    pub error: Option<FlatEvalError>,
}

/// A [`FlatEvalResult`] with every index replaced by its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub match_len: usize,
    pub tags: Vec<Tag>,
    pub error: Option<EvalError>,
}

impl FlatEvalResult {
    /// Rebuild native tags and errors. Indices missing from a table resolve
    /// to `"?"`.
    pub fn resolve(
        &self,
        tag_names: &BTreeMap<u32, String>,
        state_names: &BTreeMap<u32, String>,
    ) -> Resolved {
        let error = self.error.as_ref().map(|e| EvalError {
            kind: e.kind.into(),
            message: e.message.clone(),
            tag_stack: e
                .tag_index_stack
                .iter()
                .map(|i| lookup(tag_names, *i))
                .collect(),
            state_stack: e
                .state_index_stack
                .iter()
                .map(|i| lookup(state_names, *i))
                .collect(),
            committed_input: e.committed_input.clone(),
        });

        Resolved {
            match_len: self.match_len,
            tags: unflatten(&self.tags, &|i| lookup(tag_names, i)),
            error,
        }
    }
}

fn lookup(names: &BTreeMap<u32, String>, index: u32) -> String {
    names
        .get(&index)
        .map_or_else(|| UNKNOWN_NAME.to_owned(), String::clone)
}

/// Encode a tag forest in post-order with layer = depth.
pub fn flatten(tags: &[Tag], index_of: &impl Fn(&str) -> u32) -> Vec<FlatTag> {
    let mut out = Vec::new();
    for tag in tags {
        flatten_into(tag, 0, index_of, &mut out);
    }
    out
}

fn flatten_into(
    tag: &Tag,
    layer: u32,
    index_of: &impl Fn(&str) -> u32,
    out: &mut Vec<FlatTag>,
) {
    for child in &tag.sub_tags {
        flatten_into(child, layer + 1, index_of, out);
    }
    out.push(FlatTag {
        layer,
        node: index_of(&tag.name),
        index: tag.index,
        len: tag.len,
    });
}

/// Rebuild a tag forest from its flat encoding.
///
/// The layer of the last entry is the root layer. Every root-layer entry is a
/// sibling, and the entries between it and the previous root-layer entry are
/// its descendants.
pub fn unflatten(flat: &[FlatTag], name_of: &impl Fn(u32) -> String) -> Vec<Tag> {
    let Some(last) = flat.last() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut children_start = 0;
    for (i, entry) in flat.iter().enumerate() {
        if entry.layer == last.layer {
            let sub_tags = unflatten(&flat[children_start..i], name_of);
            out.push(Tag::new(name_of(entry.node), entry.index, entry.len, sub_tags));
            children_start = i + 1;
        }
    }
    out
}
