use glex_core::{Grammar, NodeVariant, Repetition, TreeNode};

use super::{Graph, GraphError, GraphNode, Step};

fn sample() -> Grammar {
    Grammar::new(
        "Expr",
        [
            TreeNode::state("Expr").then([
                TreeNode::tag("Num").then([TreeNode::regex("[0-9]+")]),
                TreeNode::tag("Paren").then([TreeNode::literal("(").then([TreeNode::sub_state(
                    "Expr",
                    Repetition::ONCE,
                )
                .then([TreeNode::literal(")")])])]),
            ]),
            TreeNode::state("Space").then([TreeNode::sub_state("Blank", Repetition::one_or_more(true))]),
        ],
    )
    .unwrap()
}

#[test]
fn build_lowers_every_node() {
    let grammar = sample();
    let g = Graph::build(&grammar).unwrap();

    assert_eq!(g.node_count(), grammar.node_count());
    assert_eq!(g.root(), "Expr");
    assert!(g.entry("Expr").is_some());
    assert!(g.entry("Space").is_some());
    assert!(g.entry("Blank").is_none());
}

#[test]
fn defined_states_come_first() {
    let g = Graph::build(&sample()).unwrap();

    let states: Vec<_> = g.state_names().into_values().collect();
    assert_eq!(states, vec!["Expr", "Space", "Blank"]);
    assert_eq!(g.defined_states().collect::<Vec<_>>(), vec!["Expr", "Space"]);
    assert_eq!(g.try_state_name(2), Some("Blank"));
    assert_eq!(g.try_state_name(3), None);
}

#[test]
fn tag_table_in_encounter_order() {
    let g = Graph::build(&sample()).unwrap();

    let tags: Vec<_> = g.tag_names().into_iter().collect();
    assert_eq!(tags, vec![(0, "Num".to_string()), (1, "Paren".to_string())]);
    assert_eq!(g.tag_symbol("Paren").map(|s| s.as_u32()), Some(1));
}

#[test]
fn recursion_goes_through_name_table() {
    let g = Graph::build(&sample()).unwrap();
    let expr = g.state_symbol("Expr").unwrap();

    let self_refs = nodes(&g)
        .iter()
        .filter(|n| matches!(n.step, Step::SubState { state, .. } if state == expr))
        .count();
    assert_eq!(self_refs, 1);
}

fn nodes(g: &Graph) -> Vec<&GraphNode> {
    let mut out = Vec::new();
    for name in g.defined_states() {
        let mut stack = vec![g.entry(name).unwrap()];
        while let Some(id) = stack.pop() {
            let node = g.node(id);
            out.push(node);
            stack.extend(node.transitions.iter().rev());
        }
    }
    out
}

#[test]
fn describe_restores_variant() {
    let g = Graph::build(&sample()).unwrap();
    let entry = g.entry("Space").unwrap();
    let sub = g.node(entry).transitions[0];

    assert_eq!(
        g.describe(sub),
        NodeVariant::SubState {
            state: "Blank".into(),
            repetition: Repetition::one_or_more(true),
        }
    );
    assert_eq!(
        g.describe(entry),
        NodeVariant::State {
            name: "Space".into()
        }
    );
}

#[test]
fn validate_reports_dangling_references() {
    let g = Graph::build(&sample()).unwrap();
    assert_eq!(
        g.validate(),
        vec![("Space".to_string(), "Blank".to_string())]
    );
}

#[test]
fn validate_reports_undefined_root() {
    let grammar = Grammar::new("Main", [TreeNode::state("Other")]).unwrap();
    let g = Graph::build(&grammar).unwrap();
    assert_eq!(g.validate(), vec![(String::new(), "Main".to_string())]);
}

#[test]
fn invalid_regex_is_rejected() {
    let grammar = Grammar::new(
        "S",
        [TreeNode::state("S").then([TreeNode::regex("[a-")])],
    )
    .unwrap();

    let err = Graph::build(&grammar).unwrap_err();
    let GraphError::Regex { state, pattern, .. } = &err;
    assert_eq!(state, "S");
    assert_eq!(pattern, "[a-");
    assert!(err.to_string().starts_with("invalid regex /[a-/ in state 'S'"));
}

#[test]
fn literal_is_pre_encoded() {
    let grammar = Grammar::new("S", [TreeNode::state("S").then([TreeNode::literal("ä😀")])]).unwrap();
    let g = Graph::build(&grammar).unwrap();
    let lit = g.node(g.entry("S").unwrap()).transitions[0];

    let Step::Literal { units, .. } = &g.node(lit).step else {
        panic!("expected literal");
    };
    assert_eq!(units.len(), 3);
}
