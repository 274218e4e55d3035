//! The outline grammar on whole documents.

use fsm_parser::fsm::chunking;
use fsm_parser::fsm::engine::ParseError;
use fsm_parser::fsm::formats::to_treeviz_str;
use fsm_parser::fsm::grammars::outline::GRAMMAR;
use fsm_parser::fsm::testing::assert_tree;
use rstest::rstest;

fn parse(text: &str) -> Result<fsm_parser::fsm::elements::Node, ParseError> {
    GRAMMAR.parse(chunking::paragraphs(text))
}

const SECTIONS: &str = "\
1 Introduction

This is the introduction text.

1.1 Background

Some background here.

1.1.1 Fine print

Details, details.

2 Usage

Run the tool like this:

    fsmparse notes.txt
";

const LISTS: &str = "\
1 Lists

1. first item

a) alpha sub item

b) second alpha

2. second item

i. roman sub

ii. roman two

After the list.
";

const CHAIN: &str = "\
1 Chain

1.1 Inner

Inner paragraph text.

State A: begins here

State B: continues

State C: ends here

Closing paragraph text.
";

#[test]
fn sections_nest_by_depth() {
    let tree = parse(SECTIONS).unwrap();
    assert_tree(&tree)
        .kind("body")
        .child_count(2)
        .all_children("section")
        .child(0, |intro| {
            intro
                .attribute("ordinal", "1")
                .attribute("title", "Introduction")
                .child_count(2)
                .child(0, |p| p.kind("paragraph").text("This is the introduction text."))
                .child(1, |background| {
                    background
                        .kind("subsection")
                        .attribute("ordinal", "1.1")
                        .child_count(2)
                        .child(1, |fine| {
                            fine.kind("subsubsection")
                                .attribute("title", "Fine print")
                                .child(0, |p| p.text("Details, details."))
                        })
                })
        })
        .child(1, |usage| {
            usage
                .attribute("title", "Usage")
                .child_count(2)
                .child(1, |pre| pre.kind("preformatted").text_contains("fsmparse notes.txt"))
        });
}

#[test]
fn lists_nest_by_numbering_style() {
    let tree = parse(LISTS).unwrap();
    assert_tree(&tree).child(0, |section| {
        section
            .child_count(2)
            .child(0, |list| {
                list.kind("ordered-list")
                    .attribute("type", "decimal")
                    .child_count(2)
                    .all_children("list-item")
                    .child(0, |item| {
                        item.attribute("ordinal", "1")
                            .text("first item")
                            .child(1, |sub| {
                                sub.kind("ordered-list")
                                    .attribute("type", "lower-alpha")
                                    .child_count(2)
                            })
                    })
                    .child(1, |item| {
                        item.attribute("ordinal", "2").child(1, |sub| {
                            sub.attribute("type", "lower-roman")
                                .child_count(2)
                                .child(1, |last| last.attribute("ordinal", "ii").text("roman two"))
                        })
                    })
            })
            .child(1, |p| p.kind("paragraph").text("After the list."))
    });
}

#[test]
fn lists_render_as_treeviz() {
    let tree = parse(LISTS).unwrap();
    insta::assert_snapshot!(to_treeviz_str(&tree), @r"
    ⧉ body
    └─ § 1 Lists
      ├─ ☰ decimal, 2 items
      │ ├─ • 1 first item
      │ │ └─ ☰ lower-alpha, 2 items
      │ │   ├─ • a alpha sub item
      │ │   └─ • b second alpha
      │ └─ • 2 second item
      │   └─ ☰ lower-roman, 2 items
      │     ├─ • i roman sub
      │     └─ • ii roman two
      └─ ¶ After the list.
    ");
}

#[test]
fn returning_to_an_outer_list() {
    let text = "1. one\n\na) sub\n\ni. deeper\n\nb) back to alpha\n\n2. back to decimal\n";
    let tree = parse(text).unwrap();
    assert_tree(&tree).child_count(1).child(0, |decimal| {
        decimal
            .attribute("type", "decimal")
            .child_count(2)
            .child(0, |one| {
                one.child(1, |alpha| {
                    alpha
                        .attribute("type", "lower-alpha")
                        .child_count(2)
                        .child(0, |sub| {
                            sub.child(1, |roman| roman.attribute("type", "lower-roman").child_count(1))
                        })
                        .child(1, |back| back.text("back to alpha"))
                })
            })
            .child(1, |two| two.text("back to decimal"))
    });
}

#[test]
fn state_chain_after_redirect() {
    let tree = parse(CHAIN).unwrap();
    assert_tree(&tree).child_count(1).child(0, |section| {
        section
            .attribute("title", "Chain")
            .child_count(5)
            .child(0, |sub| sub.kind("subsection").child_count(1))
            .child(1, |a| a.kind("paragraph").attribute("id", "state-a").text("State A: begins here"))
            .child(2, |b| b.attribute("id", "state-b"))
            .child(3, |c| c.attribute("id", "state-c"))
            .child(4, |p| p.no_attribute("id").text("Closing paragraph text."))
    });
}

#[test]
fn header_only_at_top_level() {
    let long = "THE ".repeat(30);
    let long = long.trim_end();
    let text = format!("{long}\n\n1 Section\n\n{long}\n");
    let tree = parse(&text).unwrap();
    assert_tree(&tree)
        .child_count(2)
        .child(0, |h| h.kind("header"))
        .child(1, |s| s.child(0, |p| p.kind("paragraph")));
}

#[rstest]
#[case::short_paragraph("Hi\n", "Body")]
#[case::state_a_without_b("State A: alone\n\nJust a paragraph.\n", "StateA")]
#[case::short_after_state_c("State A: a\n\nState B: b\n\nState C: c\n\nOops\n", "StateC")]
fn unrecognized_input(#[case] text: &str, #[case] expected_state: &str) {
    let err = parse(text).unwrap_err();
    match err {
        ParseError::NoRecognizerMatch { state, .. } => assert_eq!(state, expected_state),
        other => panic!("expected a recognizer failure, got {other}"),
    }
}

#[test]
fn error_names_fragment() {
    let err = parse("Hi\n").unwrap_err();
    assert!(err.to_string().starts_with("no recognizer matched \"Hi\" in state Body"));
}
