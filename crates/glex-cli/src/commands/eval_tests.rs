use glex_core::{Grammar, Repetition, TreeNode};
use glex_vm::{ErrorKind, Graph, TickLimits};

use super::eval::*;

#[test]
#[cfg(feature = "lang-regex")]
fn complete_input_exits_zero() {
    let lang = glex_langs::regex();
    let result = tokenize(lang.graph(), "a[0-9]+", None, TickLimits::default());

    assert_eq!(result.matched_len, 7);
    assert_eq!(exit_code(&result), 0);
}

#[test]
#[cfg(feature = "lang-regex")]
fn committed_failure_exits_two() {
    let lang = glex_langs::regex();
    let result = tokenize(lang.graph(), "[a", None, TickLimits::default());

    assert_eq!(result.last_error.as_ref().unwrap().kind, ErrorKind::NoMatch);
    assert_eq!(exit_code(&result), 2);
}

#[test]
#[cfg(feature = "lang-aya")]
fn leftover_input_exits_one() {
    let lang = glex_langs::aya();
    let result = tokenize(lang.graph(), "1 )", None, TickLimits::default());

    assert_eq!(result.matched_len, 2);
    assert_eq!(result.unmatched_suffix.as_deref(), Some(")"));
    assert_eq!(exit_code(&result), 1);
}

#[test]
#[cfg(feature = "lang-aya")]
fn entry_overrides_root() {
    let lang = glex_langs::aya();

    // Token does not skip whitespace on its own.
    let result = tokenize(lang.graph(), "1 2", Some("Token"), TickLimits::default());
    assert_eq!(result.matched_len, 1);
    assert_eq!(result.unmatched_suffix.as_deref(), Some(" 2"));
}

#[test]
fn ticks_bound_zero_width_loops() {
    let grammar = Grammar::new(
        "Loop",
        [
            TreeNode::state("Loop").then([TreeNode::sub_state(
                "Empty",
                Repetition::zero_or_more(true),
            )]),
            TreeNode::state("Empty").then([TreeNode::literal("")]),
        ],
    )
    .unwrap();
    let graph = Graph::build(&grammar).unwrap();

    let result = tokenize(&graph, "x", None, TickLimits::new().max_no_progress_ticks(10));
    let err = result.last_error.as_ref().unwrap();
    assert_eq!(err.kind, ErrorKind::LoopLimitExceeded);
    assert_eq!(exit_code(&result), 2);
}

#[test]
#[cfg(feature = "lang-regex")]
fn result_serializes_to_json() {
    let lang = glex_langs::regex();
    let result = tokenize(lang.graph(), "ab", None, TickLimits::default());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["matched_len"], 2);
    assert_eq!(json["tags"][0]["name"], "Literal");
    assert_eq!(json["tags"][1]["index"], 1);
    assert!(json["unmatched_suffix"].is_null());
    assert!(json["last_error"].is_null());
}

#[test]
fn depth_bounds_recursive_states() {
    let grammar = Grammar::new(
        "S",
        [TreeNode::state("S").then([TreeNode::sub_state("S", Repetition::ONCE)])],
    )
    .unwrap();
    let graph = Graph::build(&grammar).unwrap();

    let limits = TickLimits::new()
        .max_no_progress_ticks(200_000)
        .recursion_limit(64);
    let result = tokenize(&graph, "a", None, limits);
    let err = result.last_error.as_ref().unwrap();
    assert_eq!(err.kind, ErrorKind::LoopLimitExceeded);
    assert_eq!(err.message, "Exceeded the maximum depth of nested nodes. (64)");
    assert_eq!(exit_code(&result), 2);
}
