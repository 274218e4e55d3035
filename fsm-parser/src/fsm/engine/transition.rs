//! Transition table entries
//!
//! An entry of the table says what happens once a symbol has been recognized in a state.
//! Entries are either static ([Rule::Static]) or computed from the matched symbol and the
//! current state stack ([Rule::Computed]); both resolve to a [Transition].

use super::{Driver, Language, ParseResult};
use std::fmt;

/// A constructor's build function.
///
/// It consumes the fragments belonging to the node it builds (usually one header fragment,
/// plus all descendants through [Driver::make_children]) and returns the node, or `None` when
/// there is nothing to append.
pub type BuildFn<L> = for<'p> fn(&mut Driver<'p, L>) -> ParseResult<Option<<L as Language>::Node>>;

/// A transition computed from the matched symbol and the state stack (bottom first).
pub type ComputeFn<L> =
    fn(<L as Language>::Symbol, &[<L as Language>::State]) -> Transition<L>;

/// Whether a constructor manages a stack frame of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The constructor builds in place: a transition that names a new state also rewrites the
    /// current top of the stack before the constructor runs.
    Shared,
    /// The constructor opens its own frame (typically a container that builds children in
    /// the new state); the current top is left alone.
    Own,
}

/// A named build function registered with a grammar.
pub struct Constructor<L: Language> {
    name: &'static str,
    frame: Frame,
    build: BuildFn<L>,
}

impl<L: Language> Constructor<L> {
    /// A constructor that shares the current frame.
    pub const fn new(name: &'static str, build: BuildFn<L>) -> Self {
        Constructor {
            name,
            frame: Frame::Shared,
            build,
        }
    }

    /// A constructor that opens its own frame.
    pub const fn framed(name: &'static str, build: BuildFn<L>) -> Self {
        Constructor {
            name,
            frame: Frame::Own,
            build,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub(super) fn build(&self, driver: &mut Driver<'_, L>) -> ParseResult<Option<L::Node>> {
        (self.build)(driver)
    }
}

impl<L: Language> Clone for Constructor<L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: Language> Copy for Constructor<L> {}

impl<L: Language> fmt::Debug for Constructor<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("frame", &self.frame)
            .finish()
    }
}

/// What the driver does once a symbol has been recognized.
pub enum Transition<L: Language> {
    /// Build a child. `state` is the state its children are built in; `None` keeps the
    /// current one.
    Construct {
        constructor: Constructor<L>,
        state: Option<L::State>,
    },
    /// Build no more children, return control to the caller.
    Stop,
    /// Build no more children and overwrite the state one level below the top, so the
    /// caller resumes under it.
    Redirect(L::State),
}

impl<L: Language> Transition<L> {
    /// Build a child in the current state.
    pub fn child(constructor: Constructor<L>) -> Self {
        Transition::Construct {
            constructor,
            state: None,
        }
    }

    /// Build a child whose own children are built in `state`.
    pub fn child_in(constructor: Constructor<L>, state: L::State) -> Self {
        Transition::Construct {
            constructor,
            state: Some(state),
        }
    }
}

impl<L: Language> Clone for Transition<L> {
    fn clone(&self) -> Self {
        match self {
            Transition::Construct { constructor, state } => Transition::Construct {
                constructor: *constructor,
                state: state.clone(),
            },
            Transition::Stop => Transition::Stop,
            Transition::Redirect(state) => Transition::Redirect(state.clone()),
        }
    }
}

impl<L: Language> PartialEq for Transition<L> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Transition::Construct {
                    constructor: a,
                    state: sa,
                },
                Transition::Construct {
                    constructor: b,
                    state: sb,
                },
            ) => a.name == b.name && a.frame == b.frame && sa == sb,
            (Transition::Stop, Transition::Stop) => true,
            (Transition::Redirect(a), Transition::Redirect(b)) => a == b,
            _ => false,
        }
    }
}

impl<L: Language> fmt::Debug for Transition<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Construct { constructor, state } => f
                .debug_struct("Construct")
                .field("constructor", constructor)
                .field("state", state)
                .finish(),
            Transition::Stop => write!(f, "Stop"),
            Transition::Redirect(state) => f.debug_tuple("Redirect").field(state).finish(),
        }
    }
}

impl<L: Language> fmt::Display for Transition<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Construct {
                constructor,
                state: Some(state),
            } => write!(f, "{}(), {:?}", constructor.name, state),
            Transition::Construct {
                constructor,
                state: None,
            } => write!(f, "{}()", constructor.name),
            Transition::Stop => write!(f, "stop"),
            Transition::Redirect(state) => write!(f, "stop, redirect caller to {:?}", state),
        }
    }
}

/// A transition table entry.
pub enum Rule<L: Language> {
    Static(Transition<L>),
    Computed(ComputeFn<L>),
}

impl<L: Language> Rule<L> {
    /// The transition this entry yields for `symbol` given the current state stack.
    pub fn resolve(&self, symbol: L::Symbol, stack: &[L::State]) -> Transition<L> {
        match self {
            Rule::Static(transition) => transition.clone(),
            Rule::Computed(compute) => compute(symbol, stack),
        }
    }
}

impl<L: Language> Clone for Rule<L> {
    fn clone(&self) -> Self {
        match self {
            Rule::Static(transition) => Rule::Static(transition.clone()),
            Rule::Computed(compute) => Rule::Computed(*compute),
        }
    }
}

impl<L: Language> From<Transition<L>> for Rule<L> {
    fn from(transition: Transition<L>) -> Self {
        Rule::Static(transition)
    }
}

impl<L: Language> fmt::Debug for Rule<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Static(transition) => f.debug_tuple("Static").field(transition).finish(),
            Rule::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Toy;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum St {
        Outer,
        Inner,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Sym {
        Item,
    }

    impl Language for Toy {
        type Fragment = &'static str;
        type State = St;
        type Symbol = Sym;
        type Node = String;
    }

    fn build_item(driver: &mut Driver<'_, Toy>) -> ParseResult<Option<String>> {
        Ok(driver.try_next().map(str::to_string))
    }

    const ITEM: Constructor<Toy> = Constructor::new("make_item", build_item);
    const NESTED: Constructor<Toy> = Constructor::framed("make_nested", build_item);

    fn inner_once(_: Sym, stack: &[St]) -> Transition<Toy> {
        if stack.contains(&St::Inner) {
            Transition::Stop
        } else {
            Transition::child_in(NESTED, St::Inner)
        }
    }

    #[test]
    fn test_constructor_frames() {
        assert_eq!(ITEM.frame(), Frame::Shared);
        assert_eq!(NESTED.frame(), Frame::Own);
        assert_eq!(NESTED.name(), "make_nested");
    }

    #[test]
    fn test_static_rule_resolves_to_itself() {
        let rule: Rule<Toy> = Transition::child(ITEM).into();
        assert_eq!(rule.resolve(Sym::Item, &[St::Outer]), Transition::child(ITEM));
    }

    #[test]
    fn test_computed_rule_sees_whole_stack() {
        let rule: Rule<Toy> = Rule::Computed(inner_once);
        assert_eq!(
            rule.resolve(Sym::Item, &[St::Outer]),
            Transition::child_in(NESTED, St::Inner)
        );
        assert_eq!(
            rule.resolve(Sym::Item, &[St::Inner, St::Outer]),
            Transition::Stop
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Transition::child_in(NESTED, St::Inner).to_string(),
            "make_nested(), Inner"
        );
        assert_eq!(Transition::child(ITEM).to_string(), "make_item()");
        assert_eq!(Transition::<Toy>::Stop.to_string(), "stop");
        assert_eq!(
            Transition::<Toy>::Redirect(St::Outer).to_string(),
            "stop, redirect caller to Outer"
        );
    }
}
