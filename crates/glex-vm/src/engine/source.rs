//! Input text addressed in UTF-16 code units.

use std::borrow::Cow;

/// Surrogates `0xD800..=0xDFFF` map onto `U+10F800..=U+10FFFF` in the regex view.
///
/// Supplementary chars never reach the view as themselves, so the mapped
/// range cannot collide with real input.
const SURROGATE_BASE: u32 = 0x10_F800;

/// Input of one evaluation, indexable by UTF-16 offset.
///
/// Literal and code-unit matchers compare `units` directly. Regex matchers run
/// on `view`, a string holding exactly one char per unit, so `.` and negated
/// classes step over one unit and a search can start between the two halves
/// of a surrogate pair.
pub(crate) struct Source<'s> {
    text: &'s str,
    units: Vec<u16>,
    view: String,
    /// Byte offset into `view` of every unit, plus the end.
    view_offsets: Vec<usize>,
    /// Byte offset into `text` of every unit boundary; `None` inside a pair.
    byte_offsets: Vec<Option<usize>>,
}

impl<'s> Source<'s> {
    pub fn new(text: &'s str) -> Self {
        let mut units = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        let mut buf = [0u16; 2];
        for (byte, c) in text.char_indices() {
            let encoded = c.encode_utf16(&mut buf);
            byte_offsets.push(Some(byte));
            if encoded.len() == 2 {
                byte_offsets.push(None);
            }
            units.extend_from_slice(encoded);
        }
        byte_offsets.push(Some(text.len()));

        let mut view = String::with_capacity(text.len());
        let mut view_offsets = Vec::with_capacity(units.len() + 1);
        for &unit in &units {
            view_offsets.push(view.len());
            view.push(unit_char(unit));
        }
        view_offsets.push(view.len());

        Self {
            text,
            units,
            view,
            view_offsets,
            byte_offsets,
        }
    }

    /// Length in UTF-16 units.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn unit(&self, pos: usize) -> Option<u16> {
        self.units.get(pos).copied()
    }

    pub fn has_prefix_at(&self, pos: usize, prefix: &[u16]) -> bool {
        self.units
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(prefix))
    }

    /// Regex view from unit `pos` on, or `None` past the end.
    ///
    /// Every char of the view is one unit, so the char count of a match is its
    /// length in units.
    pub fn view_from(&self, pos: usize) -> Option<&str> {
        let byte = *self.view_offsets.get(pos)?;
        Some(&self.view[byte..])
    }

    /// Units `start..end` decoded back to a string. Lone surrogates at the edges
    /// become U+FFFD.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.units.len());
        let start = start.min(end);
        if let (Some(Some(a)), Some(Some(b))) =
            (self.byte_offsets.get(start), self.byte_offsets.get(end))
        {
            return self.text[*a..*b].to_owned();
        }
        String::from_utf16_lossy(&self.units[start..end])
    }
}

/// The view char standing for one UTF-16 unit.
pub(crate) fn unit_char(unit: u16) -> char {
    let unit = u32::from(unit);
    char::from_u32(unit)
        .or_else(|| char::from_u32(SURROGATE_BASE + unit - 0xD800))
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Rewrite supplementary chars in a pattern as their two unit chars, so the
/// pattern reads the same view as the input.
pub(crate) fn unit_pattern(pattern: &str) -> Cow<'_, str> {
    if pattern.chars().all(|c| c.len_utf16() == 1) {
        return Cow::Borrowed(pattern);
    }
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut buf = [0u16; 2];
    for c in pattern.chars() {
        for &unit in c.encode_utf16(&mut buf).iter() {
            out.push(unit_char(unit));
        }
    }
    Cow::Owned(out)
}
