//! Memo grammar
//!
//! Paragraph chunks of a short plain text document:
//!
//!     Introduction
//!     ============
//!
//!     Running text, possibly over
//!     several lines.
//!
//!       indented blocks are kept verbatim
//!
//! A heading is a two line chunk whose second line is `=` repeated exactly as many times as
//! the first line is long. Headings open a section that collects everything up to the next
//! heading; text before the first heading goes straight into the body.

use super::{flow, Registered};
use crate::fsm::elements::{Element, Node};
use crate::fsm::engine::{Constructor, Driver, Grammar, Language, ParseResult, Transition};
use once_cell::sync::Lazy;

pub struct Memo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Body,
    Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Section,
    Preformatted,
    Paragraph,
}

impl Language for Memo {
    type Fragment = String;
    type State = State;
    type Symbol = Symbol;
    type Node = Node;
}

pub static GRAMMAR: Lazy<Grammar<Memo>> =
    Lazy::new(|| build().expect("memo grammar is consistent"));

const BODY: Constructor<Memo> = Constructor::framed("make_body", make_body);
const SECTION: Constructor<Memo> = Constructor::framed("make_section", make_section);
const PARAGRAPH: Constructor<Memo> = Constructor::new("make_paragraph", make_paragraph);
const PREFORMATTED: Constructor<Memo> = Constructor::new("make_preformatted", make_preformatted);

pub fn build() -> Result<Grammar<Memo>, crate::fsm::engine::GrammarError> {
    Grammar::<Memo>::builder()
        .recognizer(Symbol::Section, |chunk: &String| heading(chunk).is_some())
        .recognizer(Symbol::Preformatted, |chunk: &String| is_preformatted(chunk))
        .recognizer(Symbol::Paragraph, |_: &String| true)
        .transition(State::Body, Symbol::Section, Transition::child_in(SECTION, State::Section))
        .transitions(
            [State::Body, State::Section],
            Symbol::Paragraph,
            Transition::child(PARAGRAPH),
        )
        .transitions(
            [State::Body, State::Section],
            Symbol::Preformatted,
            Transition::child(PREFORMATTED),
        )
        .transition(State::Section, Symbol::Section, Transition::Stop)
        .initial(State::Body, BODY)
        .build()
}

pub fn registered() -> Registered<Memo> {
    Registered::new(
        "memo",
        "underlined headings, indented preformatted blocks and paragraphs",
        Lazy::force(&GRAMMAR),
    )
}

/// The heading text of a `Title\n=====` chunk.
fn heading(chunk: &str) -> Option<&str> {
    let mut lines = chunk.lines();
    let title = lines.next()?.trim_end();
    let underline = lines.next()?.trim_end();
    if lines.next().is_some() || title.is_empty() {
        return None;
    }
    let matches = underline.chars().all(|c| c == '=')
        && underline.chars().count() == title.chars().count();
    matches.then_some(title)
}

fn is_preformatted(chunk: &str) -> bool {
    !chunk.is_empty() && chunk.lines().all(|line| line.starts_with("  "))
}

fn make_body(driver: &mut Driver<'_, Memo>) -> ParseResult<Option<Node>> {
    let mut body = Element::new("body");
    driver.make_children(&mut body)?;
    Ok(Some(body.into()))
}

fn make_section(driver: &mut Driver<'_, Memo>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    let title = heading(&chunk).unwrap_or(chunk.as_str());
    let mut section = Element::new("section").with_attribute("title", title);
    driver.make_children(&mut section)?;
    Ok(Some(section.into()))
}

fn make_paragraph(driver: &mut Driver<'_, Memo>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    Ok(Some(Element::new("paragraph").with_text(flow(&chunk)).into()))
}

fn make_preformatted(driver: &mut Driver<'_, Memo>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    let text = chunk
        .lines()
        .map(|line| line.strip_prefix("  ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Some(Element::new("preformatted").with_text(text).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::chunking;
    use crate::fsm::testing::assert_tree;

    #[test]
    fn test_heading() {
        assert_eq!(heading("Intro\n====="), Some("Intro"));
        assert_eq!(heading("Intro\n===="), None);
        assert_eq!(heading("Intro\n=====\nmore"), None);
        assert_eq!(heading("Intro"), None);
        assert_eq!(heading("Intro\n-----"), None);
    }

    #[test]
    fn test_memo_document() {
        let text = "Preamble text.\n\nIntro\n=====\n\nFirst paragraph\ncontinues here.\n\n  let x = 1;\n  let y = 2;\n\nUsage\n=====\n\nLast words.\n";
        let tree = GRAMMAR.parse(chunking::paragraphs(text)).unwrap();

        assert_tree(&tree)
            .kind("body")
            .child_count(3)
            .child(0, |p| p.kind("paragraph").text("Preamble text."))
            .child(1, |section| {
                section
                    .kind("section")
                    .attribute("title", "Intro")
                    .child_count(2)
                    .child(0, |p| p.text("First paragraph continues here."))
                    .child(1, |pre| pre.kind("preformatted").text("let x = 1;\nlet y = 2;"))
            })
            .child(2, |section| {
                section
                    .attribute("title", "Usage")
                    .child_count(1)
                    .child(0, |p| p.text("Last words."))
            });
    }
}
