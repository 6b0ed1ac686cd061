//! UTF-16 offsets over `str`.
//!
//! Grammar positions and lengths count UTF-16 code units while Rust strings are
//! indexed by byte. These helpers convert between the two.

/// Number of UTF-16 units needed to encode `s`.
pub fn len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// First char boundary at or after `units`, as `(units, bytes)`.
///
/// An offset inside a surrogate pair rounds up to the end of that char. Offsets
/// past the end clamp to the end of `s`.
pub fn boundary_at(s: &str, units: usize) -> (usize, usize) {
    let mut seen = 0;
    for (byte, c) in s.char_indices() {
        if seen >= units {
            return (seen, byte);
        }
        seen += c.len_utf16();
    }
    (seen, s.len())
}

/// Byte offset of [`boundary_at`].
pub fn byte_offset(s: &str, units: usize) -> usize {
    boundary_at(s, units).1
}
