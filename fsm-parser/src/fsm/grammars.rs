//! Bundled grammars
//!
//! Ready-made grammars for plain text documents, all producing [crate::fsm::elements] trees
//! from `String` fragments:
//!
//!     memo     underlined headings, indented preformatted blocks, paragraphs
//!     outline  numbered sections (three levels), nested ordered lists, long header lines,
//!              preformatted blocks and a small chain of "State X:" paragraphs
//!
//! Each grammar is a static built on first use. [GrammarRegistry] looks them up by name and
//! hides their state and symbol types behind [DocumentGrammar].

pub mod memo;
pub mod outline;

use crate::fsm::elements::Node;
use crate::fsm::engine::{CollectingTrace, Grammar, Language, ParseResult, StderrTrace};
use std::collections::HashMap;

/// Where the steps of a parse are reported.
#[derive(Debug, Default)]
pub enum Trace<'a> {
    #[default]
    Off,
    Stderr,
    Collect(&'a mut CollectingTrace),
}

/// A grammar over text chunks, with its language types erased.
pub trait DocumentGrammar: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn parse(&self, chunks: Vec<String>, trace: Trace<'_>) -> ParseResult<Node>;
}

/// Adapts a static grammar to [DocumentGrammar].
pub struct Registered<L: Language> {
    name: &'static str,
    description: &'static str,
    grammar: &'static Grammar<L>,
}

impl<L: Language> Registered<L> {
    pub fn new(name: &'static str, description: &'static str, grammar: &'static Grammar<L>) -> Self {
        Registered {
            name,
            description,
            grammar,
        }
    }
}

impl<L> DocumentGrammar for Registered<L>
where
    L: Language<Fragment = String, Node = Node>,
    L::State: Send + Sync,
    L::Symbol: Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parse(&self, chunks: Vec<String>, trace: Trace<'_>) -> ParseResult<Node> {
        match trace {
            Trace::Off => self.grammar.parse(chunks),
            Trace::Stderr => self.grammar.parse_traced(chunks, &mut StderrTrace),
            Trace::Collect(sink) => self.grammar.parse_traced(chunks, sink),
        }
    }
}

/// Grammars by name.
pub struct GrammarRegistry {
    grammars: HashMap<String, Box<dyn DocumentGrammar>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        GrammarRegistry {
            grammars: HashMap::new(),
        }
    }

    /// Register a grammar, replacing any grammar of the same name.
    pub fn register<G: DocumentGrammar + 'static>(&mut self, grammar: G) {
        self.grammars
            .insert(grammar.name().to_string(), Box::new(grammar));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DocumentGrammar> {
        self.grammars.get(name).map(|g| g.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.grammars.contains_key(name)
    }

    /// Grammar names, sorted.
    pub fn list_grammars(&self) -> Vec<String> {
        let mut names: Vec<_> = self.grammars.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(memo::registered());
        registry.register(outline::registered());
        registry
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Collapse a multi-line chunk into a single line of running text.
pub(crate) fn flow(chunk: &str) -> String {
    chunk.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = GrammarRegistry::default();
        assert_eq!(registry.list_grammars(), vec!["memo", "outline"]);
        assert!(registry.has("memo"));
        assert!(registry.get("missing").is_none());
        assert!(!registry.get("outline").unwrap().description().is_empty());
    }

    #[test]
    fn test_collecting_trace() {
        let registry = GrammarRegistry::default();
        let mut trace = CollectingTrace::new();
        let chunks = vec!["Just one paragraph here".to_string()];
        registry
            .get("memo")
            .unwrap()
            .parse(chunks, Trace::Collect(&mut trace))
            .unwrap();
        assert_eq!(trace.lines.first().unwrap(), "Body: make_children(Element)");
        assert_eq!(trace.lines.last().unwrap(), "Body: end of input");
    }

    #[test]
    fn test_flow() {
        assert_eq!(flow("  one\n two  three \n"), "one two three");
    }
}
