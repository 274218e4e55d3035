//! Outline grammar
//!
//! Paragraph chunks of a structured plain text document with numbered headings and ordered
//! lists:
//!
//!     1 Introduction                      section
//!     1.2 Background                      subsection
//!     1.2.3 Details                       subsubsection
//!     1. First item                       decimal list item
//!     a) nested item                      alpha list item
//!     iv. deeper still                    roman list item
//!     State A: ...                        state chain (A, then B, then C)
//!
//! Headings are single lines whose title does not end with a period. A heading closes every
//! open section at the same or a deeper level. Paragraphs shorter than seven characters are
//! not recognized at all.
//!
//! Lists nest by numbering style. An item of a style that is not open yet starts a sublist
//! inside the current item; an item of a style that is already open somewhere up the stack
//! closes everything below that list. The decision needs the whole state stack, which is why
//! it is a computed transition.
//!
//! The "State A/B/C" paragraphs rewrite the current frame in place instead of nesting, so the
//! body only accepts B after A and C after B. A subsection that meets a "State A" paragraph
//! stops and sends its parent frame back to body state before the paragraph is built there.

use super::{flow, Registered};
use crate::fsm::elements::{Element, Node};
use crate::fsm::engine::{
    Append, Constructor, Driver, Grammar, GrammarError, Language, ParseError, ParseResult,
    Transition,
};
use once_cell::sync::Lazy;
use regex::Regex;

pub struct Outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Body,
    Section,
    Subsection,
    Subsubsection,
    StateA,
    StateB,
    StateC,
    OlDecimal,
    OlAlpha,
    OlRoman,
    ListItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    LiDecimal,
    LiRoman,
    LiAlpha,
    Header,
    Section,
    Subsection,
    Subsubsection,
    Preformatted,
    StateA,
    StateB,
    StateC,
    Paragraph,
}

impl Language for Outline {
    type Fragment = String;
    type State = State;
    type Symbol = Symbol;
    type Node = Node;
}

pub static GRAMMAR: Lazy<Grammar<Outline>> =
    Lazy::new(|| build().expect("outline grammar is consistent"));

static SECTION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d[.\d]*) +(.*[^.])$").unwrap());
static DECIMAL_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([.)]) +").unwrap());
static ROMAN_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([IVXivx]+)([.)]) +").unwrap());
static ALPHA_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z])([.)]) +").unwrap());

const BODY: Constructor<Outline> = Constructor::framed("make_body", make_body);
const SECTION: Constructor<Outline> = Constructor::framed("make_section", make_section);
const SUBSECTION: Constructor<Outline> = Constructor::framed("make_subsection", make_subsection);
const SUBSUBSECTION: Constructor<Outline> =
    Constructor::framed("make_subsubsection", make_subsubsection);
const PARAGRAPH: Constructor<Outline> = Constructor::new("make_paragraph", make_paragraph);
const PREFORMATTED: Constructor<Outline> = Constructor::new("make_preformatted", make_preformatted);
const HEADER: Constructor<Outline> = Constructor::new("make_header", make_header);
const STATE_A: Constructor<Outline> = Constructor::new("make_state_a", make_state_a);
const STATE_B: Constructor<Outline> = Constructor::new("make_state_b", make_state_b);
const STATE_C: Constructor<Outline> = Constructor::new("make_state_c", make_state_c);
const OL_DECIMAL: Constructor<Outline> = Constructor::framed("make_ol_decimal", make_ordered_list);
const OL_ALPHA: Constructor<Outline> = Constructor::framed("make_ol_alpha", make_ordered_list);
const OL_ROMAN: Constructor<Outline> = Constructor::framed("make_ol_roman", make_ordered_list);
const LIST_ITEM: Constructor<Outline> = Constructor::framed("make_listitem", make_listitem);

const SECTIONS: [State; 4] = [
    State::Body,
    State::Section,
    State::Subsection,
    State::Subsubsection,
];
const LISTS: [State; 3] = [State::OlDecimal, State::OlAlpha, State::OlRoman];
const LIST_SYMBOLS: [Symbol; 3] = [Symbol::LiDecimal, Symbol::LiAlpha, Symbol::LiRoman];

pub fn build() -> Result<Grammar<Outline>, GrammarError> {
    let mut builder = Grammar::<Outline>::builder()
        .recognizer(Symbol::LiDecimal, |c: &String| list_style(c).is_some_and(ListStyle::is_decimal))
        .recognizer(Symbol::LiRoman, |c: &String| list_style(c).is_some_and(ListStyle::is_roman))
        .recognizer(Symbol::LiAlpha, |c: &String| list_style(c).is_some_and(ListStyle::is_alpha))
        .recognizer(Symbol::Header, |c: &String| is_header(c))
        .recognizer(Symbol::Section, |c: &String| section_depth(c) == Some(1))
        .recognizer(Symbol::Subsection, |c: &String| section_depth(c) == Some(2))
        .recognizer(Symbol::Subsubsection, |c: &String| section_depth(c) == Some(3))
        .recognizer(Symbol::Preformatted, |c: &String| c.contains("   "))
        .recognizer(Symbol::StateA, |c: &String| c.starts_with("State A:"))
        .recognizer(Symbol::StateB, |c: &String| c.starts_with("State B:"))
        .recognizer(Symbol::StateC, |c: &String| c.starts_with("State C:"))
        .recognizer(Symbol::Paragraph, |c: &String| c.chars().count() > 6)
        // running text and lists, wherever sections are built
        .transitions(SECTIONS, Symbol::Paragraph, Transition::child(PARAGRAPH))
        .transitions(SECTIONS, Symbol::Preformatted, Transition::child(PREFORMATTED))
        .transitions(SECTIONS, Symbol::LiDecimal, Transition::child_in(OL_DECIMAL, State::OlDecimal))
        .transitions(SECTIONS, Symbol::LiAlpha, Transition::child_in(OL_ALPHA, State::OlAlpha))
        .transitions(SECTIONS, Symbol::LiRoman, Transition::child_in(OL_ROMAN, State::OlRoman))
        .transition(State::Body, Symbol::Header, Transition::child(HEADER))
        // sections nest by depth
        .transition(State::Body, Symbol::Section, Transition::child_in(SECTION, State::Section))
        .transition(State::Section, Symbol::Section, Transition::Stop)
        .transition(State::Section, Symbol::Subsection, Transition::child_in(SUBSECTION, State::Subsection))
        .transitions([State::Subsection, State::Subsubsection], Symbol::Section, Transition::Stop)
        .transitions([State::Subsection, State::Subsubsection], Symbol::Subsection, Transition::Stop)
        .transition(State::Subsection, Symbol::Subsubsection, Transition::child_in(SUBSUBSECTION, State::Subsubsection))
        .transition(State::Subsubsection, Symbol::Subsubsection, Transition::Stop)
        // the state chain
        .transition(State::Body, Symbol::StateA, Transition::child_in(STATE_A, State::StateA))
        .transition(State::Subsection, Symbol::StateA, Transition::Redirect(State::Body))
        .transition(State::StateA, Symbol::StateB, Transition::child_in(STATE_B, State::StateB))
        .transition(State::StateB, Symbol::StateC, Transition::child_in(STATE_C, State::StateC))
        .transition(State::StateC, Symbol::Paragraph, Transition::child(PARAGRAPH))
        .transition(State::StateC, Symbol::Section, Transition::child_in(SECTION, State::Section))
        // ordered lists
        .transition(State::OlDecimal, Symbol::LiDecimal, Transition::child_in(LIST_ITEM, State::ListItem))
        .transition(State::OlAlpha, Symbol::LiAlpha, Transition::child_in(LIST_ITEM, State::ListItem))
        .transition(State::OlRoman, Symbol::LiRoman, Transition::child_in(LIST_ITEM, State::ListItem));

    // items of another style nest or close, in lists as well as in their items
    for (list, own) in LISTS.into_iter().zip(LIST_SYMBOLS) {
        for symbol in LIST_SYMBOLS.into_iter().filter(|symbol| *symbol != own) {
            builder = builder.computed(list, symbol, sublist_or_parent);
        }
    }
    for symbol in LIST_SYMBOLS {
        builder = builder.computed(State::ListItem, symbol, sublist_or_parent);
    }

    // anything that is not a list item ends lists and their items
    for symbol in [
        Symbol::Header,
        Symbol::Section,
        Symbol::Subsection,
        Symbol::Subsubsection,
        Symbol::Preformatted,
        Symbol::StateA,
        Symbol::StateB,
        Symbol::StateC,
        Symbol::Paragraph,
    ] {
        let list_frames = LISTS.into_iter().chain([State::ListItem]);
        builder = builder.transitions(list_frames, symbol, Transition::Stop);
    }

    builder.initial(State::Body, BODY).build()
}

pub fn registered() -> Registered<Outline> {
    Registered::new(
        "outline",
        "numbered sections, nested ordered lists and long header lines",
        Lazy::force(&GRAMMAR),
    )
}

/// A list item opens a sublist of its own style, unless a list of that style is already open
/// further up, in which case the item belongs to that list and everything below it closes.
fn sublist_or_parent(symbol: Symbol, stack: &[State]) -> Transition<Outline> {
    let (state, constructor) = match symbol {
        Symbol::LiDecimal => (State::OlDecimal, OL_DECIMAL),
        Symbol::LiAlpha => (State::OlAlpha, OL_ALPHA),
        _ => (State::OlRoman, OL_ROMAN),
    };
    if stack.contains(&state) {
        Transition::Stop
    } else {
        Transition::child_in(constructor, state)
    }
}

/// The list-style-type of an ordered list item, in CSS terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Decimal,
    DecimalLeadingZero,
    LowerRoman,
    UpperRoman,
    LowerAlpha,
    UpperAlpha,
}

impl ListStyle {
    pub fn css_name(self) -> &'static str {
        match self {
            ListStyle::Decimal => "decimal",
            ListStyle::DecimalLeadingZero => "decimal-leading-zero",
            ListStyle::LowerRoman => "lower-roman",
            ListStyle::UpperRoman => "upper-roman",
            ListStyle::LowerAlpha => "lower-alpha",
            ListStyle::UpperAlpha => "upper-alpha",
        }
    }

    fn is_decimal(self) -> bool {
        matches!(self, ListStyle::Decimal | ListStyle::DecimalLeadingZero)
    }

    fn is_roman(self) -> bool {
        matches!(self, ListStyle::LowerRoman | ListStyle::UpperRoman)
    }

    fn is_alpha(self) -> bool {
        matches!(self, ListStyle::LowerAlpha | ListStyle::UpperAlpha)
    }
}

struct ListItem<'c> {
    style: ListStyle,
    ordinal: &'c str,
    rest: &'c str,
}

/// `1. Foo` or `14) bar`, `IX. Foo` or `vii) bar`, `a. Foo` or `Z) bar`.
fn analyze_list_item(chunk: &str) -> Option<ListItem<'_>> {
    let lower = chunk.starts_with(|c: char| c.is_lowercase());
    let (captures, style) = if let Some(captures) = DECIMAL_ITEM.captures(chunk) {
        let style = if chunk.starts_with('0') {
            ListStyle::DecimalLeadingZero
        } else {
            ListStyle::Decimal
        };
        (captures, style)
    } else if let Some(captures) = ROMAN_ITEM.captures(chunk) {
        let style = if lower {
            ListStyle::LowerRoman
        } else {
            ListStyle::UpperRoman
        };
        (captures, style)
    } else if let Some(captures) = ALPHA_ITEM.captures(chunk) {
        let style = if lower {
            ListStyle::LowerAlpha
        } else {
            ListStyle::UpperAlpha
        };
        (captures, style)
    } else {
        return None;
    };

    let whole = captures.get(0)?;
    Some(ListItem {
        style,
        ordinal: captures.get(1)?.as_str(),
        rest: &chunk[whole.end()..],
    })
}

fn list_style(chunk: &str) -> Option<ListStyle> {
    analyze_list_item(chunk).map(|item| item.style)
}

/// `1 Intro` is a section, `1.2 More` a subsection, `1.2.3. Most` a subsubsection.
fn analyze_section_start(chunk: &str) -> Option<(&str, &str)> {
    let captures = SECTION_START.captures(chunk)?;
    let ordinal = captures.get(1)?.as_str().trim_end_matches('.');
    let title = captures.get(2)?.as_str().trim();
    Some((ordinal, title))
}

fn section_depth(chunk: &str) -> Option<usize> {
    analyze_section_start(chunk)
        .map(|(ordinal, _)| ordinal.split('.').filter(|s| !s.is_empty()).count())
}

fn is_header(chunk: &str) -> bool {
    chunk.chars().count() > 100 && !chunk.ends_with('.')
}

fn make_body(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    let mut body = Element::new("body");
    driver.make_children(&mut body)?;
    Ok(Some(body.into()))
}

fn make_heading(driver: &mut Driver<'_, Outline>, kind: &str) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    let (ordinal, title) = analyze_section_start(&chunk).unwrap_or(("", chunk.as_str()));
    let mut section = Element::new(kind)
        .with_attribute("ordinal", ordinal)
        .with_attribute("title", title);
    driver.make_children(&mut section)?;
    Ok(Some(section.into()))
}

fn make_section(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    make_heading(driver, "section")
}

fn make_subsection(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    make_heading(driver, "subsection")
}

fn make_subsubsection(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    make_heading(driver, "subsubsection")
}

fn make_paragraph(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    Ok(Some(Element::new("paragraph").with_text(flow(&chunk)).into()))
}

fn make_preformatted(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    Ok(Some(Element::new("preformatted").with_text(chunk).into()))
}

fn make_header(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    Ok(Some(Element::new("header").with_text(flow(&chunk)).into()))
}

fn make_state(driver: &mut Driver<'_, Outline>, id: &str) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    let paragraph = Element::new("paragraph")
        .with_attribute("id", id)
        .with_text(flow(&chunk));
    Ok(Some(paragraph.into()))
}

fn make_state_a(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    make_state(driver, "state-a")
}

fn make_state_b(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    make_state(driver, "state-b")
}

fn make_state_c(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    make_state(driver, "state-c")
}

/// The list takes the style of its first item, which it builds right away.
fn make_ordered_list(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    let style = driver
        .peek()
        .and_then(|chunk| list_style(chunk))
        .ok_or_else(|| ParseError::construct("make_ordered_list", "expected a list item"))?;
    let mut list = Element::new("ordered-list").with_attribute("type", style.css_name());
    if let Some(item) = driver.make_child(LIST_ITEM, Some(State::ListItem))? {
        list.append(item);
    }
    driver.make_children(&mut list)?;
    Ok(Some(list.into()))
}

fn make_listitem(driver: &mut Driver<'_, Outline>) -> ParseResult<Option<Node>> {
    let chunk = driver.next_fragment()?;
    let mut item = match analyze_list_item(&chunk) {
        Some(parsed) => Element::new("list-item")
            .with_attribute("ordinal", parsed.ordinal)
            .with_text(flow(parsed.rest)),
        None => Element::new("list-item").with_text(flow(&chunk)),
    };
    driver.make_children(&mut item)?;
    Ok(Some(item.into()))
}
