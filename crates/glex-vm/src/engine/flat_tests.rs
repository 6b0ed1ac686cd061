use std::collections::BTreeMap;

use glex_core::Tag;

use super::{ErrorKind, FlatErrorKind, FlatEvalError, FlatEvalResult, FlatTag, flatten, unflatten};

fn names() -> BTreeMap<u32, String> {
    ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, n)| (i as u32, n.to_string()))
        .collect()
}

fn index_of(name: &str) -> u32 {
    match name {
        "A" => 0,
        "B" => 1,
        "C" => 2,
        "D" => 3,
        _ => u32::MAX,
    }
}

fn flat(layer: u32, node: u32, index: usize, len: usize) -> FlatTag {
    FlatTag {
        layer,
        node,
        index,
        len,
    }
}

/// `A(B, C(D))` followed by a second root `B`.
fn forest() -> Vec<Tag> {
    vec![
        Tag::new(
            "A",
            0,
            4,
            vec![
                Tag::new("B", 0, 1, vec![]),
                Tag::new("C", 1, 3, vec![Tag::new("D", 2, 1, vec![])]),
            ],
        ),
        Tag::new("B", 4, 2, vec![]),
    ]
}

#[test]
fn flatten_is_post_order_with_depth() {
    let encoded = flatten(&forest(), &index_of);
    assert_eq!(
        encoded,
        vec![
            flat(1, 1, 0, 1),
            flat(2, 3, 2, 1),
            flat(1, 2, 1, 3),
            flat(0, 0, 0, 4),
            flat(0, 1, 4, 2),
        ]
    );
}

#[test]
fn unflatten_restores_forest() {
    let names = names();
    let encoded = flatten(&forest(), &index_of);
    let decoded = unflatten(&encoded, &|i| names[&i].clone());
    assert_eq!(decoded, forest());
}

#[test]
fn unflatten_uses_last_layer_as_root() {
    // Output of a sub-grammar whose top tags sit at layer 2.
    let names = names();
    let encoded = vec![flat(3, 1, 0, 1), flat(2, 0, 0, 2), flat(2, 2, 2, 1)];
    let decoded = unflatten(&encoded, &|i| names[&i].clone());

    assert_eq!(
        decoded,
        vec![
            Tag::new("A", 0, 2, vec![Tag::new("B", 0, 1, vec![])]),
            Tag::new("C", 2, 1, vec![]),
        ]
    );
}

#[test]
fn unflatten_empty() {
    assert!(unflatten(&[], &|_| String::new()).is_empty());
}

#[test]
fn resolve_maps_indices_to_names() {
    let names = names();
    let states: BTreeMap<u32, String> = [(0, "Root".to_string())].into_iter().collect();
    let result = FlatEvalResult {
        match_len: 0,
        tags: vec![],
        error: Some(FlatEvalError {
            kind: FlatErrorKind::InfiniteLoop,
            message: "stuck".into(),
            tag_index_stack: vec![2, 9],
            state_index_stack: vec![0, 7],
            committed_input: "ab".into(),
        }),
    };

    let resolved = result.resolve(&names, &states);
    let err = resolved.error.unwrap();
    assert_eq!(err.kind, ErrorKind::LoopLimitExceeded);
    assert_eq!(err.tag_stack, vec!["C", "?"]);
    assert_eq!(err.state_stack, vec!["Root", "?"]);
    assert_eq!(err.committed_input, "ab");
}

#[test]
fn resolve_unknown_tag_index() {
    let result = FlatEvalResult {
        match_len: 3,
        tags: vec![flat(0, 42, 0, 3)],
        error: None,
    };

    let resolved = result.resolve(&names(), &BTreeMap::new());
    assert_eq!(resolved.match_len, 3);
    assert_eq!(resolved.tags, vec![Tag::new("?", 0, 3, vec![])]);
    assert!(resolved.error.is_none());
}

#[test]
fn error_kinds_map_both_ways() {
    for kind in [
        ErrorKind::LoopLimitExceeded,
        ErrorKind::NoMatch,
        ErrorKind::UnknownNodeKind,
    ] {
        assert_eq!(ErrorKind::from(FlatErrorKind::from(kind)), kind);
    }
    assert_eq!(
        FlatErrorKind::from(ErrorKind::LoopLimitExceeded),
        FlatErrorKind::InfiniteLoop
    );
}
