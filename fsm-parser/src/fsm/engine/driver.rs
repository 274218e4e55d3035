//! The parse driver
//!
//! One [Driver] exists per parse. It owns the lookahead buffer and the state stack, and is
//! handed to every constructor so it can consume fragments and recurse into
//! [Driver::make_children].
//!
//! The stack discipline is strict: [Driver::make_child] pushes exactly one frame and pops it
//! again whether the constructor succeeds or not, so after the initial constructor returns the
//! stack is back to its single root entry.

use super::error::{diagnostic_text, ParseError, ParseResult};
use super::grammar::Grammar;
use super::lookahead::Lookahead;
use super::trace::{TraceEvent, TraceStep, Tracer};
use super::transition::{Constructor, Frame, Transition};
use super::{Append, Language};
use std::mem;

pub struct Driver<'p, L: Language> {
    grammar: &'p Grammar<L>,
    reader: Lookahead<'p, L::Fragment>,
    stack: Vec<L::State>,
    tracer: &'p mut dyn Tracer<L>,
    /// Fragments consumed so far.
    consumed: usize,
}

impl<'p, L: Language> Driver<'p, L> {
    pub(super) fn new(
        grammar: &'p Grammar<L>,
        reader: Lookahead<'p, L::Fragment>,
        tracer: &'p mut dyn Tracer<L>,
    ) -> Self {
        Driver {
            grammar,
            reader,
            stack: vec![grammar.initial_state().clone()],
            tracer,
            consumed: 0,
        }
    }

    /// Build the root with the initial constructor.
    pub(super) fn run(mut self) -> ParseResult<L::Node> {
        let constructor = self.grammar.initial_constructor();
        let root = constructor.build(&mut self)?;
        debug_assert_eq!(self.stack.len(), 1, "unbalanced state stack");
        root.ok_or_else(|| ParseError::EmptyRoot {
            constructor: constructor.name().to_string(),
        })
    }

    /// Build children into `parent` until the input is exhausted or a transition stops.
    pub fn make_children<P: Append<L::Node>>(&mut self, parent: &mut P) -> ParseResult<()> {
        self.record(TraceEvent::Children {
            parent: std::any::type_name::<P>(),
        });

        loop {
            let Some(symbol) = self.analyze_symbol()? else {
                return Ok(());
            };

            match self.transition(symbol)? {
                Transition::Stop => return Ok(()),
                Transition::Redirect(state) => {
                    self.redirect(state)?;
                    return Ok(());
                }
                Transition::Construct { constructor, state } => {
                    let consumed = self.consumed;
                    let top = self.state().clone();

                    if constructor.frame() == Frame::Shared {
                        if let Some(state) = &state {
                            self.rewrite_top(state.clone());
                        }
                    }

                    let child = self.make_child(constructor, state)?;

                    if self.consumed == consumed && *self.state() == top {
                        return Err(ParseError::Stalled {
                            constructor: constructor.name().to_string(),
                            state: format!("{:?}", top),
                        });
                    }
                    if let Some(child) = child {
                        parent.append(child);
                    }
                }
            }
        }
    }

    /// Run `constructor` in a frame of its own, under `state` or a copy of the current state.
    pub fn make_child(
        &mut self,
        constructor: Constructor<L>,
        state: Option<L::State>,
    ) -> ParseResult<Option<L::Node>> {
        let state = state.unwrap_or_else(|| self.state().clone());
        self.stack.push(state);
        let child = constructor.build(self);
        self.stack.pop();
        child
    }

    /// The next fragment, without consuming it.
    pub fn peek(&mut self) -> Option<&L::Fragment> {
        self.reader.peek()
    }

    /// Consume the next fragment, if there is one.
    pub fn try_next(&mut self) -> Option<L::Fragment> {
        let fragment = self.reader.next();
        if fragment.is_some() {
            self.consumed += 1;
        }
        fragment
    }

    /// Consume the next fragment, failing when the input is exhausted.
    pub fn next_fragment(&mut self) -> ParseResult<L::Fragment> {
        match self.try_next() {
            Some(fragment) => Ok(fragment),
            None => Err(ParseError::EndOfInput {
                state: format!("{:?}", self.state()),
            }),
        }
    }

    pub fn state(&self) -> &L::State {
        self.stack.last().expect("state stack is never empty")
    }

    /// The state stack, bottom first.
    pub fn state_stack(&self) -> &[L::State] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn grammar(&self) -> &'p Grammar<L> {
        self.grammar
    }

    /// Match the head fragment against the recognizers applicable in the current state.
    /// `None` means the input is exhausted.
    fn analyze_symbol(&mut self) -> ParseResult<Option<L::Symbol>> {
        let grammar = self.grammar;
        let state = self.stack.last().expect("state stack is never empty");
        let candidates = grammar.applicable(state);

        let Some(fragment) = self.reader.peek() else {
            self.tracer.record(&TraceStep {
                stack: &self.stack,
                event: TraceEvent::Exhausted,
            });
            return Ok(None);
        };

        let matched = grammar.recognize(state, fragment);
        self.tracer.record(&TraceStep {
            stack: &self.stack,
            event: TraceEvent::Analyzed {
                fragment,
                candidates,
                matched,
            },
        });

        matched.map(Some).ok_or_else(|| ParseError::NoRecognizerMatch {
            fragment: diagnostic_text(fragment),
            state: format!("{:?}", state),
            tried: candidates
                .iter()
                .map(|symbol| format!("{:?}", symbol))
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    fn transition(&mut self, symbol: L::Symbol) -> ParseResult<Transition<L>> {
        let state = self.stack.last().expect("state stack is never empty");
        let rule = self
            .grammar
            .rule(state, symbol)
            .ok_or_else(|| ParseError::NoTransition {
                state: format!("{:?}", state),
                symbol: format!("{:?}", symbol),
            })?;

        let transition = rule.resolve(symbol, &self.stack);
        self.tracer.record(&TraceStep {
            stack: &self.stack,
            event: TraceEvent::Transition {
                state,
                symbol,
                transition: &transition,
            },
        });
        Ok(transition)
    }

    fn rewrite_top(&mut self, state: L::State) {
        let top = self.stack.len() - 1;
        let from = mem::replace(&mut self.stack[top], state);
        self.tracer.record(&TraceStep {
            stack: &self.stack,
            event: TraceEvent::TopRewritten {
                from,
                to: &self.stack[top],
            },
        });
    }

    fn redirect(&mut self, state: L::State) -> ParseResult<()> {
        let len = self.stack.len();
        if len < 2 {
            return Err(ParseError::NoAncestor {
                state: format!("{:?}", self.state()),
            });
        }
        let from = mem::replace(&mut self.stack[len - 2], state);
        self.tracer.record(&TraceStep {
            stack: &self.stack,
            event: TraceEvent::AncestorRewritten {
                from,
                to: &self.stack[len - 2],
            },
        });
        Ok(())
    }

    fn record(&mut self, event: TraceEvent<'_, L>) {
        self.tracer.record(&TraceStep {
            stack: &self.stack,
            event,
        });
    }
}
