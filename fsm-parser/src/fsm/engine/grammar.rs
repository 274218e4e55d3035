//! Grammar configuration
//!
//! A [Grammar] is declared as a single [GrammarBuilder] chain, validated once by
//! [GrammarBuilder::build], and then shared read-only between parses.

use super::driver::Driver;
use super::error::{GrammarError, ParseResult};
use super::lookahead::Lookahead;
use super::trace::{Tracer, VoidTrace};
use super::transition::{ComputeFn, Constructor, Rule, Transition};
use super::Language;
use std::collections::HashMap;
use std::fmt;

type Recognizer<F> = Box<dyn Fn(&F) -> bool + Send + Sync>;

pub struct Grammar<L: Language> {
    /// Symbols in registration order, which is the order recognizers are tried in.
    order: Vec<L::Symbol>,
    recognizers: HashMap<L::Symbol, Recognizer<L::Fragment>>,
    pub(super) transitions: HashMap<(L::State, L::Symbol), Rule<L>>,
    /// Per state, the symbols that have a transition in it, in recognizer order.
    applicable: HashMap<L::State, Vec<L::Symbol>>,
    initial_state: L::State,
    initial_constructor: Constructor<L>,
}

impl<L: Language> Grammar<L> {
    pub fn builder() -> GrammarBuilder<L> {
        GrammarBuilder::new()
    }

    /// Parse a fragment stream into a tree, without tracing.
    pub fn parse<'p, I>(&'p self, fragments: I) -> ParseResult<L::Node>
    where
        I: IntoIterator<Item = L::Fragment>,
        I::IntoIter: 'p,
    {
        let mut tracer = VoidTrace;
        self.parse_traced(fragments, &mut tracer)
    }

    /// Parse a fragment stream into a tree, reporting every step to `tracer`.
    pub fn parse_traced<'p, I>(
        &'p self,
        fragments: I,
        tracer: &'p mut dyn Tracer<L>,
    ) -> ParseResult<L::Node>
    where
        I: IntoIterator<Item = L::Fragment>,
        I::IntoIter: 'p,
    {
        Driver::new(self, Lookahead::new(fragments), tracer).run()
    }

    /// Symbols with a transition in `state`, in the order their recognizers are tried.
    pub fn applicable(&self, state: &L::State) -> &[L::Symbol] {
        self.applicable.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first applicable symbol whose recognizer accepts `fragment`.
    pub fn recognize(&self, state: &L::State, fragment: &L::Fragment) -> Option<L::Symbol> {
        self.applicable(state)
            .iter()
            .copied()
            .find(|symbol| self.recognizers.get(symbol).is_some_and(|r| r(fragment)))
    }

    pub fn rule(&self, state: &L::State, symbol: L::Symbol) -> Option<&Rule<L>> {
        self.transitions.get(&(state.clone(), symbol))
    }

    pub fn symbols(&self) -> &[L::Symbol] {
        &self.order
    }

    pub fn initial_state(&self) -> &L::State {
        &self.initial_state
    }

    pub fn initial_constructor(&self) -> Constructor<L> {
        self.initial_constructor
    }
}

impl<L: Language> fmt::Debug for Grammar<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("symbols", &self.order)
            .field("transitions", &self.transitions.len())
            .field("initial_state", &self.initial_state)
            .field("initial_constructor", &self.initial_constructor.name())
            .finish()
    }
}

pub struct GrammarBuilder<L: Language> {
    recognizers: Vec<(L::Symbol, Recognizer<L::Fragment>)>,
    transitions: Vec<(L::State, L::Symbol, Rule<L>)>,
    initial: Option<(L::State, Constructor<L>)>,
}

impl<L: Language> Default for GrammarBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Language> GrammarBuilder<L> {
    pub fn new() -> Self {
        GrammarBuilder {
            recognizers: Vec::new(),
            transitions: Vec::new(),
            initial: None,
        }
    }

    /// Register a recognizer. Registration order is the order recognizers are tried in.
    pub fn recognizer<R>(mut self, symbol: L::Symbol, recognizer: R) -> Self
    where
        R: Fn(&L::Fragment) -> bool + Send + Sync + 'static,
    {
        self.recognizers.push((symbol, Box::new(recognizer)));
        self
    }

    /// Register the transition for (state, symbol).
    pub fn transition(mut self, state: L::State, symbol: L::Symbol, transition: Transition<L>) -> Self {
        self.transitions.push((state, symbol, Rule::Static(transition)));
        self
    }

    /// Register the same transition for `symbol` in every one of `states`.
    pub fn transitions<S>(mut self, states: S, symbol: L::Symbol, transition: Transition<L>) -> Self
    where
        S: IntoIterator<Item = L::State>,
    {
        for state in states {
            self.transitions
                .push((state, symbol, Rule::Static(transition.clone())));
        }
        self
    }

    /// Register a transition for (state, symbol) that is decided at parse time from the
    /// matched symbol and the state stack.
    pub fn computed(mut self, state: L::State, symbol: L::Symbol, compute: ComputeFn<L>) -> Self {
        self.transitions.push((state, symbol, Rule::Computed(compute)));
        self
    }

    pub fn initial(mut self, state: L::State, constructor: Constructor<L>) -> Self {
        self.initial = Some((state, constructor));
        self
    }

    pub fn build(self) -> Result<Grammar<L>, GrammarError> {
        let (initial_state, initial_constructor) =
            self.initial.ok_or(GrammarError::MissingInitial)?;

        let mut order = Vec::with_capacity(self.recognizers.len());
        let mut recognizers = HashMap::with_capacity(self.recognizers.len());
        for (symbol, recognizer) in self.recognizers {
            if recognizers.insert(symbol, recognizer).is_some() {
                return Err(GrammarError::DuplicateRecognizer {
                    symbol: format!("{:?}", symbol),
                });
            }
            order.push(symbol);
        }

        let mut transitions = HashMap::with_capacity(self.transitions.len());
        let mut states = Vec::new();
        for (state, symbol, rule) in self.transitions {
            if !recognizers.contains_key(&symbol) {
                return Err(GrammarError::UnknownSymbol {
                    state: format!("{:?}", state),
                    symbol: format!("{:?}", symbol),
                });
            }
            if transitions.contains_key(&(state.clone(), symbol)) {
                return Err(GrammarError::DuplicateTransition {
                    state: format!("{:?}", state),
                    symbol: format!("{:?}", symbol),
                });
            }
            if !states.contains(&state) {
                states.push(state.clone());
            }
            transitions.insert((state, symbol), rule);
        }

        let mut applicable = HashMap::with_capacity(states.len());
        for state in states {
            let symbols: Vec<L::Symbol> = order
                .iter()
                .copied()
                .filter(|symbol| transitions.contains_key(&(state.clone(), *symbol)))
                .collect();
            applicable.insert(state, symbols);
        }

        Ok(Grammar {
            order,
            recognizers,
            transitions,
            applicable,
            initial_state,
            initial_constructor,
        })
    }
}
