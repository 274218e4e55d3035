//! Engine errors
//!
//! Configuration problems ([GrammarError]) are reported when a grammar is built; everything
//! else happens while parsing ([ParseError]). Both carry `Debug` renderings of the caller's
//! states, symbols and fragments instead of the values themselves, so neither error type
//! depends on the language it came from.

use std::fmt::Debug;
use thiserror::Error;

/// Fragments whose `Debug` rendering is longer than this get shortened in diagnostics.
const DIAGNOSTIC_LIMIT: usize = 90;
const DIAGNOSTIC_HEAD: usize = 25;
const DIAGNOSTIC_TAIL: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar has no initial state and constructor")]
    MissingInitial,

    #[error("recognizer for symbol {symbol} is registered twice")]
    DuplicateRecognizer { symbol: String },

    #[error("transition ({state}, {symbol}) refers to a symbol with no recognizer")]
    UnknownSymbol { state: String, symbol: String },

    #[error("transition ({state}, {symbol}) is defined twice")]
    DuplicateTransition { state: String, symbol: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no recognizer matched {fragment} in state {state} (tried {tried})")]
    NoRecognizerMatch {
        fragment: String,
        state: String,
        tried: String,
    },

    #[error("no transition for ({state}, {symbol})")]
    NoTransition { state: String, symbol: String },

    #[error("cannot redirect from {state}: it has no enclosing state")]
    NoAncestor { state: String },

    #[error("input ended while a fragment was still expected in state {state}")]
    EndOfInput { state: String },

    #[error("{constructor}() consumed nothing in state {state}; the parse would never end")]
    Stalled { constructor: String, state: String },

    #[error("initial constructor {constructor}() produced no root")]
    EmptyRoot { constructor: String },

    #[error("{constructor}(): {message}")]
    Construct {
        constructor: String,
        message: String,
    },
}

impl ParseError {
    /// An error raised from inside a constructor.
    pub fn construct(constructor: &str, message: impl Into<String>) -> Self {
        ParseError::Construct {
            constructor: constructor.to_string(),
            message: message.into(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// The `Debug` rendering of `value`, shortened to its first 25 and last 10 characters when it
/// is longer than 90.
pub(crate) fn diagnostic_text<T: Debug + ?Sized>(value: &T) -> String {
    let text = format!("{:?}", value);
    let count = text.chars().count();
    if count <= DIAGNOSTIC_LIMIT {
        return text;
    }
    let head: String = text.chars().take(DIAGNOSTIC_HEAD).collect();
    let tail: String = text.chars().skip(count - DIAGNOSTIC_TAIL).collect();
    format!("{} [...] {}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_kept() {
        assert_eq!(diagnostic_text("short"), "\"short\"");
    }

    #[test]
    fn test_limit_is_inclusive() {
        // 88 characters plus the two quotes
        let text = "x".repeat(88);
        assert_eq!(diagnostic_text(text.as_str()).chars().count(), 90);
        assert!(!diagnostic_text(text.as_str()).contains("[...]"));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = format!("{}{}", "a".repeat(60), "b".repeat(60));
        let shown = diagnostic_text(text.as_str());
        assert_eq!(
            shown,
            format!("\"{} [...] {}\"", "a".repeat(24), "b".repeat(9))
        );
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "å".repeat(100);
        let shown = diagnostic_text(text.as_str());
        assert!(shown.starts_with('"'));
        assert!(shown.contains(" [...] "));
    }

    #[test]
    fn test_messages() {
        let err = ParseError::NoTransition {
            state: "Body".into(),
            symbol: "Paragraph".into(),
        };
        assert_eq!(err.to_string(), "no transition for (Body, Paragraph)");
        let err = ParseError::construct("make_body", "oops");
        assert_eq!(err.to_string(), "make_body(): oops");
        assert_eq!(
            GrammarError::MissingInitial.to_string(),
            "grammar has no initial state and constructor"
        );
    }
}
