//! Property-based tests for the engine and the bundled grammars
//!
//! Parses must be deterministic, must terminate on any finite input, and must leave the state
//! stack at its root entry when they succeed. The memo grammar has a catch-all recognizer in
//! every state, so it has to account for every chunk it is given.

use fsm_parser::fsm::chunking;
use fsm_parser::fsm::elements::Node;
use fsm_parser::fsm::engine::CollectingTrace;
use fsm_parser::fsm::grammars::{memo, outline};
use proptest::prelude::*;

/// Chunks that exercise every outline recognizer.
const OUTLINE_VOCABULARY: &[&str] = &[
    "1 Introduction",
    "1.1 Background",
    "1.1.1 Fine print",
    "2 Next part",
    "1. first item",
    "2) second item",
    "a) alpha item",
    "B. upper alpha item",
    "iv. roman item",
    "A plain paragraph of text.",
    "code   with   gaps",
    "State A: one",
    "State B: two",
    "State C: three",
    "Tiny",
    "A HEADER LINE THAT GOES ON AND ON AND ON, WELL PAST A HUNDRED CHARACTERS, WITHOUT EVER ENDING IN A FULL STOP",
];

fn outline_chunks() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(OUTLINE_VOCABULARY), 0..40)
        .prop_map(|chunks| chunks.into_iter().map(str::to_string).collect())
}

fn memo_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z][A-Za-z .,]{0,30}",
            "  [a-z =;]{1,20}",
            "Title\n=====",
            Just(String::new()),
            Just("   ".to_string()),
        ],
        0..30,
    )
    .prop_map(|lines| lines.join("\n"))
}

/// Elements that consume exactly one chunk in the memo grammar.
fn memo_consumers(node: &Node) -> usize {
    match node {
        Node::Text(_) => 0,
        Node::Element(element) => {
            let own = usize::from(matches!(
                element.kind.as_str(),
                "section" | "paragraph" | "preformatted"
            ));
            own + element.children.iter().map(memo_consumers).sum::<usize>()
        }
    }
}

proptest! {
    #[test]
    fn outline_parse_is_deterministic(chunks in outline_chunks()) {
        let mut first_trace = CollectingTrace::new();
        let mut second_trace = CollectingTrace::new();
        let first = outline::GRAMMAR.parse_traced(chunks.clone(), &mut first_trace);
        let second = outline::GRAMMAR.parse_traced(chunks, &mut second_trace);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_trace.lines, second_trace.lines);
    }

    #[test]
    fn successful_outline_parse_ends_at_root(chunks in outline_chunks()) {
        let mut trace = CollectingTrace::new();
        if outline::GRAMMAR.parse_traced(chunks, &mut trace).is_ok() {
            let last = trace.lines.last().cloned().unwrap_or_default();
            prop_assert!(last.ends_with(": end of input"), "last step: {}", last);
            prop_assert!(!last.contains('/'), "stack not unwound: {}", last);
        }
    }

    #[test]
    fn memo_accounts_for_every_chunk(text in memo_text()) {
        let chunks = chunking::paragraphs(&text);
        let expected = chunks.len();
        let tree = memo::GRAMMAR.parse(chunks).unwrap();
        prop_assert_eq!(memo_consumers(&tree), expected);
    }

    #[test]
    fn paragraph_chunks_are_never_blank(text in "[a-z \t\r\n]{0,120}") {
        for chunk in chunking::paragraphs(&text) {
            prop_assert!(!chunk.trim().is_empty());
            prop_assert!(!chunk.contains('\t'));
            prop_assert!(!chunk.contains('\r'));
        }
    }
}
