//! Tags: the structured output of a match.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::Colors;
use crate::node::escape_text;

/// A named span over the input. Offsets count UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub index: usize,
    pub len: usize,
    pub sub_tags: Vec<Tag>,
}

impl Tag {
    pub fn new(name: impl Into<String>, index: usize, len: usize, sub_tags: Vec<Tag>) -> Self {
        Self {
            name: name.into(),
            index,
            len,
            sub_tags,
        }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.index + self.len
    }

    /// Move this tag and all descendants `offset` units to the right.
    pub fn shift(&mut self, offset: usize) {
        let mut stack = vec![self];
        while let Some(tag) = stack.pop() {
            tag.index += offset;
            stack.extend(tag.sub_tags.iter_mut().rev());
        }
    }

    /// Visit this tag and its descendants in preorder.
    pub fn walk_preorder<'a>(&'a self, f: &mut impl FnMut(&'a Tag)) {
        let mut stack = vec![self];
        while let Some(tag) = stack.pop() {
            f(tag);
            stack.extend(tag.sub_tags.iter().rev());
        }
    }

    /// Number of tags in this subtree, including self.
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk_preorder(&mut |_| n += 1);
        n
    }
}

/// Builder for rendering a tag forest, one line per tag.
///
/// ```text
/// CharacterClass 1..6 "[0-9]"
///   CharRange 2..5 "0-9"
/// ```
pub struct TagPrinter<'t, 's> {
    tags: &'t [Tag],
    source: Option<&'s str>,
    colors: Colors,
}

impl<'t, 's> TagPrinter<'t, 's> {
    pub fn new(tags: &'t [Tag]) -> Self {
        Self {
            tags,
            source: None,
            colors: Colors::OFF,
        }
    }

    /// Show the matched text of each tag.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let units: Option<Vec<u16>> = self.source.map(|s| s.encode_utf16().collect());
        let mut first = true;
        for tag in self.tags {
            self.format_tag(w, tag, 0, units.as_deref(), &mut first)?;
        }
        Ok(())
    }

    fn format_tag(
        &self,
        w: &mut impl Write,
        tag: &Tag,
        depth: usize,
        units: Option<&[u16]>,
        first: &mut bool,
    ) -> std::fmt::Result {
        let c = &self.colors;
        if !*first {
            w.write_char('\n')?;
        }
        *first = false;

        write!(
            w,
            "{:indent$}{} {}{}..{}{}",
            "",
            c.name(&tag.name),
            c.dim,
            tag.index,
            tag.end(),
            c.reset,
            indent = depth * 2
        )?;

        if let Some(units) = units {
            let end = tag.end().min(units.len());
            let start = tag.index.min(end);
            let text = String::from_utf16_lossy(&units[start..end]);
            write!(w, " \"{}\"", c.text(&escape_text(&text)))?;
        }

        for child in &tag.sub_tags {
            self.format_tag(w, child, depth + 1, units, first)?;
        }
        Ok(())
    }
}
