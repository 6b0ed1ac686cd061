use glex_core::{Colors, Grammar, Repetition, TreeNode};

use super::dump::*;

fn sample() -> Grammar {
    let close = TreeNode::literal("]");
    let items = TreeNode::sub_state("Item", Repetition::zero_or_more(false))
        .committed()
        .then([close]);
    let open = TreeNode::literal("[").committed().then([items]);

    Grammar::new(
        "List",
        [
            TreeNode::state("List").then([TreeNode::tag("List").then([open])]),
            TreeNode::state("Item").then([
                TreeNode::regex("[a-z]\\s*"),
                TreeNode::unicode(Some(128), None),
            ]),
        ],
    )
    .unwrap()
}

#[test]
fn tree_listing() {
    let out = render_tree(&sample(), Colors::OFF);

    insta::assert_snapshot!(out.trim_end(), @r#"
    root: List

    State List
      ApplyTag List
        ! MatchLiteral "["
          ! SubState Item *?
            MatchLiteral "]"

    State Item
      MatchRegex /[a-z]\s*/
      MatchUnicode 127 < charCode
    "#);
}

#[test]
fn tree_listing_colored() {
    let out = render_tree(&sample(), Colors::ON);
    assert!(out.contains("\x1b[34mList\x1b[0m"));
    assert!(out.contains("\x1b[31m!\x1b[0m "));
}

#[test]
#[cfg(feature = "lang-aya")]
fn bundled_listing_names_every_state() {
    let lang = glex_langs::aya();
    let out = render_tree(lang.grammar(), Colors::OFF);

    assert!(out.starts_with("root: Token_space\n"));
    for (name, _) in lang.grammar().states() {
        assert!(out.contains(&format!("\nState {}\n", name)), "{name}");
    }
}
