//! Parse tracing
//!
//! The driver reports every decision it makes to a [Tracer]: which recognizer matched, which
//! transition was taken, and how the state stack was rewritten. Tracing is injected per parse
//! so two concurrent parses never share a sink.
//!
//! Each step renders as one line, indented by the current depth and prefixed with the state
//! stack:
//!
//!     Body: Section matched "1 Intro" (of 4)
//!     Body: (Body, Section) -> make_section(), Section

use super::{Language, Transition};
use std::fmt;

/// What happened at one step of a parse.
pub enum TraceEvent<'a, L: Language> {
    /// `make_children` was entered for a parent of the given type.
    Children { parent: &'static str },
    /// The head fragment was matched against the applicable recognizers.
    Analyzed {
        fragment: &'a L::Fragment,
        candidates: &'a [L::Symbol],
        matched: Option<L::Symbol>,
    },
    /// The input is exhausted.
    Exhausted,
    /// A transition was resolved for (state, symbol).
    Transition {
        state: &'a L::State,
        symbol: L::Symbol,
        transition: &'a Transition<L>,
    },
    /// The top of the stack was replaced before a shared constructor ran.
    TopRewritten { from: L::State, to: &'a L::State },
    /// The state below the top was replaced by a redirect.
    AncestorRewritten { from: L::State, to: &'a L::State },
}

/// A traced event together with the state stack at the time (bottom first).
pub struct TraceStep<'a, L: Language> {
    pub stack: &'a [L::State],
    pub event: TraceEvent<'a, L>,
}

impl<L: Language> TraceStep<'_, L> {
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<L: Language> fmt::Display for TraceStep<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.depth().saturating_sub(1));
        let stack = self
            .stack
            .iter()
            .map(|s| format!("{:?}", s))
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{}{}: ", indent, stack)?;

        match &self.event {
            TraceEvent::Children { parent } => {
                write!(f, "make_children({})", short_type_name(parent))
            }
            TraceEvent::Analyzed {
                fragment,
                candidates,
                matched: Some(symbol),
            } => write!(
                f,
                "{:?} matched {} (of {})",
                symbol,
                super::error::diagnostic_text(*fragment),
                candidates.len()
            ),
            TraceEvent::Analyzed {
                fragment,
                candidates,
                matched: None,
            } => write!(
                f,
                "nothing matched {} (tried {:?})",
                super::error::diagnostic_text(*fragment),
                candidates
            ),
            TraceEvent::Exhausted => write!(f, "end of input"),
            TraceEvent::Transition {
                state,
                symbol,
                transition,
            } => write!(f, "({:?}, {:?}) -> {}", state, symbol, transition),
            TraceEvent::TopRewritten { from, to } => {
                write!(f, "top {:?} -> {:?}", from, to)
            }
            TraceEvent::AncestorRewritten { from, to } => {
                write!(f, "caller {:?} -> {:?}", from, to)
            }
        }
    }
}

/// `alloc::vec::Vec<my_crate::Node>` becomes `Vec<Node>`.
fn short_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

/// A sink for parse trace steps.
pub trait Tracer<L: Language> {
    fn record(&mut self, step: &TraceStep<'_, L>);
}

/// Discards every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoidTrace;

impl<L: Language> Tracer<L> for VoidTrace {
    fn record(&mut self, _step: &TraceStep<'_, L>) {}
}

/// Writes every step to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrTrace;

impl<L: Language> Tracer<L> for StderrTrace {
    fn record(&mut self, step: &TraceStep<'_, L>) {
        eprintln!("{}", step);
    }
}

/// Keeps every rendered step, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct CollectingTrace {
    pub lines: Vec<String>,
}

impl CollectingTrace {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: Language> Tracer<L> for CollectingTrace {
    fn record(&mut self, step: &TraceStep<'_, L>) {
        self.lines.push(step.to_string());
    }
}
