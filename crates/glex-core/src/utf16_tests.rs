use super::utf16;

#[test]
fn length_counts_surrogate_pairs_twice() {
    assert_eq!(utf16::len(""), 0);
    assert_eq!(utf16::len("abc"), 3);
    assert_eq!(utf16::len("aé😀b"), 5);
}

#[test]
fn byte_offsets_follow_units() {
    let s = "aé😀b";
    assert_eq!(utf16::byte_offset(s, 0), 0);
    assert_eq!(utf16::byte_offset(s, 1), 1);
    assert_eq!(utf16::byte_offset(s, 2), 3);
    // Inside the pair rounds up.
    assert_eq!(utf16::byte_offset(s, 3), 7);
    assert_eq!(utf16::byte_offset(s, 4), 7);
    assert_eq!(utf16::byte_offset(s, 5), 8);
    assert_eq!(utf16::byte_offset(s, 99), 8);
}

#[test]
fn boundary_reports_rounded_units() {
    assert_eq!(utf16::boundary_at("😀x", 1), (2, 4));
    assert_eq!(utf16::boundary_at("😀x", 0), (0, 0));
    assert_eq!(utf16::boundary_at("ab", 7), (2, 2));
}
