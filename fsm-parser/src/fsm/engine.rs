//! Finite State Machine Engine
//!
//!     The engine turns a forward-only stream of fragments (lines, paragraphs, markup elements)
//!     into a tree. It never looks inside a fragment itself: that is the job of the caller's
//!     recognizers (which decide what a fragment looks like) and constructors (which consume
//!     fragments and build nodes).
//!
//!     A grammar is made of three things:
//!
//!         1. An ordered list of recognizers, each tagged with a symbol. Order is the tie-break:
//!            when two recognizers match the same fragment, the earlier one wins.
//!         2. A transition table keyed by (state, symbol). A state names "what kind of children
//!            are being built right now", so the same symbol can mean different things in
//!            different states. Only the recognizers that have an entry for the current state
//!            are ever tried.
//!         3. An initial state and an initial constructor, which builds the root and fills it
//!            by calling back into [Driver::make_children].
//!
//!     Nesting is plain recursion: a constructor consumes its header fragment and asks the
//!     driver to build its children, which may invoke further constructors. The driver keeps
//!     a state stack alongside the call stack, so its depth is the depth of the tree being
//!     built.
//!
//!     Transitions come in three shapes (see [Transition]):
//!
//!         - Construct: build a child with a constructor, optionally in a new state. When the
//!           constructor does not open its own frame ([Frame::Shared]) the new state also
//!           replaces the current top of the stack, so a still-open parent changes what kind
//!           of children it accepts next.
//!         - Stop: build no more children here, return control to the caller.
//!         - Redirect: stop, and overwrite the state one level below the top. The caller that
//!           resumes then continues under the new state. This is the one escape hatch for
//!           rules that need to retarget an ancestor.
//!
//!     A table entry may also be computed from the matched symbol and the whole state stack
//!     (see [Rule::Computed]), e.g. to decide whether a list item opens a new sublist or
//!     belongs to a list that is already open further up.
//!
//!     Example (sketch):
//!
//!         let grammar = Grammar::<Memo>::builder()
//!             .recognizer(Sym::Heading, |f| is_heading(f))
//!             .recognizer(Sym::Text, |_| true)
//!             .transition(St::Body, Sym::Heading, Transition::child_in(SECTION, St::Section))
//!             .transition(St::Section, Sym::Text, Transition::child(PARAGRAPH))
//!             .transition(St::Section, Sym::Heading, Transition::Stop)
//!             .initial(St::Body, BODY)
//!             .build()?;
//!         let tree = grammar.parse(fragments)?;
//!
//!     The grammar is immutable once built and can be shared between any number of parses;
//!     every parse owns its own lookahead buffer and state stack.

mod driver;
mod error;
mod grammar;
mod lookahead;
mod trace;
mod transition;

pub use driver::Driver;
pub use error::{GrammarError, ParseError, ParseResult};
pub use grammar::{Grammar, GrammarBuilder};
pub use lookahead::Lookahead;
pub use trace::{CollectingTrace, StderrTrace, TraceEvent, TraceStep, Tracer, VoidTrace};
pub use transition::{BuildFn, ComputeFn, Constructor, Frame, Rule, Transition};

use std::fmt::Debug;
use std::hash::Hash;

/// The caller-defined types a grammar works with.
///
/// A language is usually a zero-sized marker type; it only exists to tie the four associated
/// types together so the rest of the engine needs a single type parameter.
pub trait Language: Sized + 'static {
    /// One unit of input. Only recognizers and constructors look inside it; the engine uses
    /// its `Debug` rendering for diagnostics.
    type Fragment: Debug;

    /// What kind of children are being built. Used as a map key.
    type State: Clone + Eq + Hash + Debug;

    /// The identity of a recognizer. Used as a map key, so it must be a stable value such as
    /// an enum variant.
    type Symbol: Copy + Eq + Hash + Debug;

    /// The nodes constructors produce.
    type Node;
}

/// The only thing the engine requires from a parent node: being able to take a child.
pub trait Append<C> {
    fn append(&mut self, child: C);
}

impl<C> Append<C> for Vec<C> {
    fn append(&mut self, child: C) {
        self.push(child);
    }
}
