use crate::{Tag, TagPrinter};

fn sample() -> Vec<Tag> {
    vec![
        Tag::new("Literal", 0, 1, vec![]),
        Tag::new(
            "CharacterClass",
            1,
            5,
            vec![Tag::new(
                "CharRange",
                2,
                3,
                vec![
                    Tag::new("Literal", 2, 1, vec![]),
                    Tag::new("Literal", 4, 1, vec![]),
                ],
            )],
        ),
    ]
}

#[test]
fn render_plain() {
    let tags = sample();
    let out = TagPrinter::new(&tags).render();

    insta::assert_snapshot!(out, @r"
    Literal 0..1
    CharacterClass 1..6
      CharRange 2..5
        Literal 2..3
        Literal 4..5
    ");
}

#[test]
fn render_with_source() {
    let tags = sample();
    let out = TagPrinter::new(&tags).source("a[0-9]+").render();

    insta::assert_snapshot!(out, @r#"
    Literal 0..1 "a"
    CharacterClass 1..6 "[0-9]"
      CharRange 2..5 "0-9"
        Literal 2..3 "0"
        Literal 4..5 "9"
    "#);
}

#[test]
fn render_escapes_control_chars() {
    let tags = vec![Tag::new("Space", 0, 2, vec![])];
    let out = TagPrinter::new(&tags).source("\n\tx").render();
    assert_eq!(out, r#"Space 0..2 "\n\t""#);
}

#[test]
fn render_empty_forest() {
    assert_eq!(TagPrinter::new(&[]).render(), "");
}

#[test]
fn shift_moves_whole_subtree() {
    let mut tags = sample();
    for tag in &mut tags {
        tag.shift(10);
    }

    let mut starts = Vec::new();
    for tag in &tags {
        tag.walk_preorder(&mut |t| starts.push((t.name.as_str(), t.index)));
    }
    assert_eq!(
        starts,
        vec![
            ("Literal", 10),
            ("CharacterClass", 11),
            ("CharRange", 12),
            ("Literal", 12),
            ("Literal", 14),
        ]
    );
}

#[test]
fn count_includes_descendants() {
    let tags = sample();
    assert_eq!(tags[0].count(), 1);
    assert_eq!(tags[1].count(), 4);
    assert_eq!(tags[1].end(), 6);
}
