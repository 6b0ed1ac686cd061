use glex_core::{Grammar, Repetition, TreeNode};

use super::{
    Backend, BackendError, ErrorKind, Evaluator, FlatErrorKind, Graph, MatchOutcome, ModelHandle,
    NativeBackend,
};

fn grammar() -> Grammar {
    Grammar::new(
        "List",
        [
            TreeNode::state("List").then([TreeNode::tag("List").then([TreeNode::literal("[")
                .committed()
                .then([TreeNode::sub_state("Item", Repetition::zero_or_more(false))
                    .committed()
                    .then([TreeNode::literal("]")])])])]),
            TreeNode::state("Item").then([TreeNode::tag("Item").then([TreeNode::regex("[a-z]")])]),
        ],
    )
    .unwrap()
}

fn loaded() -> (NativeBackend, ModelHandle) {
    let mut backend = NativeBackend::new();
    let handle = backend.load_grammar(&grammar().to_binary()).unwrap();
    (backend, handle)
}

#[test]
fn name_tables() {
    let (backend, model) = loaded();

    let states: Vec<_> = backend.state_names(model).unwrap().into_values().collect();
    assert_eq!(states, vec!["List", "Item"]);
    let tags: Vec<_> = backend.tag_names(model).unwrap().into_values().collect();
    assert_eq!(tags, vec!["List", "Item"]);
}

#[test]
fn flat_result_matches_native_evaluation() {
    let (backend, model) = loaded();
    let input = "[ab]";

    let flat = backend.evaluate(model, 0, input, 1000).unwrap();
    let tag_names = backend.tag_names(model).unwrap();
    let state_names = backend.state_names(model).unwrap();
    let resolved = flat.resolve(&tag_names, &state_names);

    let g = Graph::build(&grammar()).unwrap();
    let MatchOutcome::Matched { len, tags } = Evaluator::new(&g).evaluate(input) else {
        panic!("expected match");
    };
    assert_eq!(resolved.match_len, len);
    assert_eq!(resolved.tags, tags);
    assert!(resolved.error.is_none());
    assert_eq!(flat.tags.last().map(|t| t.layer), Some(0));
}

#[test]
fn failure_carries_index_stacks() {
    let (backend, model) = loaded();

    let flat = backend.evaluate(model, 0, "[a", 1000).unwrap();
    let err = flat.error.as_ref().unwrap();
    assert_eq!(err.kind, FlatErrorKind::NoMatch);
    assert_eq!(err.tag_index_stack, vec![0]);
    assert_eq!(err.state_index_stack, vec![0]);
    assert_eq!(err.committed_input, "[a");

    let resolved = flat.resolve(
        &backend.tag_names(model).unwrap(),
        &backend.state_names(model).unwrap(),
    );
    let err = resolved.error.unwrap();
    assert_eq!(err.kind, ErrorKind::NoMatch);
    assert_eq!(err.tag_stack, vec!["List"]);
    assert_eq!(err.state_stack, vec!["List"]);
}

#[test]
fn other_root_state() {
    let (backend, model) = loaded();
    let flat = backend.evaluate(model, 1, "x", 1000).unwrap();
    assert_eq!(flat.match_len, 1);
    assert_eq!(flat.tags.len(), 1);
}

#[test]
fn rejection_is_empty_result() {
    let (backend, model) = loaded();
    let flat = backend.evaluate(model, 0, "x", 1000).unwrap();
    assert_eq!(flat, Default::default());
}

#[test]
fn out_of_range_root_is_unknown_state() {
    let (backend, model) = loaded();
    let flat = backend.evaluate(model, 7, "x", 1000).unwrap();
    let err = flat.error.unwrap();
    assert_eq!(err.kind, FlatErrorKind::UnknownNodeKind);
    assert_eq!(err.message, "Tried to evaluate unknown state: #7");
}

#[test]
fn tick_limit_is_forwarded() {
    let mut backend = NativeBackend::new();
    let grammar = Grammar::new(
        "R",
        [
            TreeNode::state("R").then([TreeNode::sub_state("Z", Repetition::zero_or_more(true))]),
            TreeNode::state("Z").then([TreeNode::literal("")]),
        ],
    )
    .unwrap();
    let model = backend.load(&grammar).unwrap();

    let err = backend.evaluate(model, 0, "", 5).unwrap().error.unwrap();
    assert_eq!(err.kind, FlatErrorKind::InfiniteLoop);
    assert!(err.message.ends_with("(5)"));
}

#[test]
fn handle_from_other_backend() {
    let (backend, _) = loaded();
    let mut other = NativeBackend::new();
    other.load(&grammar()).unwrap();
    let foreign = other.load(&grammar()).unwrap();
    assert_eq!(foreign.as_u32(), 1);

    let err = backend.tag_names(foreign).unwrap_err();
    assert!(matches!(err, BackendError::UnknownModel(1)));
    assert_eq!(err.to_string(), "unknown model handle 1");
}

#[test]
fn corrupt_grammar_is_rejected() {
    let mut backend = NativeBackend::new();
    let err = backend.load_grammar(&[0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}
