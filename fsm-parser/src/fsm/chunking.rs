//! Fragment sources
//!
//! The engine consumes fragments; for plain text documents those are chunks of the text. This
//! module splits a document into paragraphs (runs of non-blank lines), single lines, or pages
//! (form feed delimited, as produced by pdftotext and similar tools).
//!
//! Before splitting, line separators are normalized to `\n` (`\r\n` and lone `\r` both count)
//! and tabs are expanded to eight column tab stops.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const TAB_WIDTH: usize = 8;
const FORM_FEED: char = '\u{c}';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chunking {
    #[default]
    Paragraph,
    Line,
    Page,
}

impl Chunking {
    pub const ALL: [Chunking; 3] = [Chunking::Paragraph, Chunking::Line, Chunking::Page];

    pub fn name(self) -> &'static str {
        match self {
            Chunking::Paragraph => "paragraph",
            Chunking::Line => "line",
            Chunking::Page => "page",
        }
    }

    pub fn chunk(self, text: &str) -> Vec<String> {
        match self {
            Chunking::Paragraph => paragraphs(text),
            Chunking::Line => lines(text),
            Chunking::Page => pages(text),
        }
    }
}

impl fmt::Display for Chunking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chunking '{0}' (expected paragraph, line or page)")]
pub struct UnknownChunking(pub String);

impl FromStr for Chunking {
    type Err = UnknownChunking;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chunking::ALL
            .into_iter()
            .find(|chunking| chunking.name() == s)
            .ok_or_else(|| UnknownChunking(s.to_string()))
    }
}

/// Normalize line separators to `\n` and expand tabs.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let width = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(width));
                column += width;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Runs of non-blank lines, joined by `\n`. Lines holding only whitespace separate paragraphs
/// just like empty ones.
pub fn paragraphs(text: &str) -> Vec<String> {
    let text = normalize(text);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                chunks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }
    chunks
}

/// Every line, including empty ones.
pub fn lines(text: &str) -> Vec<String> {
    normalize(text).lines().map(str::to_string).collect()
}

/// Form feed delimited pages. A trailing form feed does not start an empty page.
pub fn pages(text: &str) -> Vec<String> {
    let text = normalize(text);
    let mut chunks: Vec<String> = text.split(FORM_FEED).map(str::to_string).collect();
    if chunks.last().is_some_and(|page| page.trim().is_empty()) {
        chunks.pop();
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_paragraphs() {
        let text = "\n\nFirst line\nsecond line\n\n\n\nNext\n  \nLast\n";
        assert_eq!(
            paragraphs(text),
            vec!["First line\nsecond line", "Next", "Last"]
        );
    }

    #[rstest]
    #[case::unix("a\nb\n\nc")]
    #[case::dos("a\r\nb\r\n\r\nc")]
    #[case::mac("a\rb\r\rc")]
    fn test_line_separators(#[case] text: &str) {
        assert_eq!(paragraphs(text), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_tab_expansion() {
        assert_eq!(normalize("\tx"), "        x");
        assert_eq!(normalize("ab\tx"), "ab      x");
        assert_eq!(normalize("a\n\tb"), "a\n        b");
    }

    #[test]
    fn test_lines_keep_empty() {
        assert_eq!(lines("a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_pages() {
        assert_eq!(pages("one\n\u{c}two\n\u{c}"), vec!["one\n", "two\n"]);
        assert!(pages("").is_empty());
    }

    #[rstest]
    #[case("paragraph", Chunking::Paragraph)]
    #[case("line", Chunking::Line)]
    #[case("page", Chunking::Page)]
    fn test_from_str(#[case] name: &str, #[case] expected: Chunking) {
        assert_eq!(name.parse::<Chunking>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_unknown_chunking() {
        let err = "sentence".parse::<Chunking>().unwrap_err();
        assert_eq!(err, UnknownChunking("sentence".into()));
    }
}
