//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file or a string, splits it into fragments and
//! parses them with one of the registered grammars. The CLI and the integration tests both go
//! through it.
//!
//!     let tree = DocumentLoader::from_path("notes.txt")?
//!         .parse(&ParseOptions::new("outline"))?;

use crate::fsm::chunking::Chunking;
use crate::fsm::elements::Node;
use crate::fsm::engine::{CollectingTrace, ParseError};
use crate::fsm::grammars::{GrammarRegistry, Trace};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown grammar '{name}' (available: {available})")]
    UnknownGrammar { name: String, available: String },
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// How a loaded document is turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub grammar: String,
    pub chunking: Chunking,
    /// Report every parse step on stderr.
    pub trace: bool,
}

impl ParseOptions {
    pub fn new(grammar: impl Into<String>) -> Self {
        ParseOptions {
            grammar: grammar.into(),
            chunking: Chunking::default(),
            trace: false,
        }
    }

    pub fn with_chunking(mut self, chunking: Chunking) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

pub struct DocumentLoader {
    source: String,
    registry: GrammarRegistry,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(Self::from_string(source))
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
            registry: GrammarRegistry::with_defaults(),
        }
    }

    /// Use a registry other than the bundled grammars.
    pub fn with_registry(mut self, registry: GrammarRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn fragments(&self, chunking: Chunking) -> Vec<String> {
        chunking.chunk(&self.source)
    }

    pub fn parse(&self, options: &ParseOptions) -> Result<Node, LoaderError> {
        let trace = if options.trace {
            Trace::Stderr
        } else {
            Trace::Off
        };
        self.parse_with(options, trace)
    }

    /// Parse while collecting the rendered trace lines.
    pub fn parse_collecting(
        &self,
        options: &ParseOptions,
    ) -> (Result<Node, LoaderError>, Vec<String>) {
        let mut sink = CollectingTrace::new();
        let result = self.parse_with(options, Trace::Collect(&mut sink));
        (result, sink.lines)
    }

    fn parse_with(&self, options: &ParseOptions, trace: Trace<'_>) -> Result<Node, LoaderError> {
        let grammar =
            self.registry
                .get(&options.grammar)
                .ok_or_else(|| LoaderError::UnknownGrammar {
                    name: options.grammar.clone(),
                    available: self.registry.list_grammars().join(", "),
                })?;
        Ok(grammar.parse(self.fragments(options.chunking), trace)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::testing::assert_tree;
    use std::io::Write;

    #[test]
    fn test_from_string() {
        let tree = DocumentLoader::from_string("Title\n=====\n\nSome text.\n")
            .parse(&ParseOptions::new("memo"))
            .unwrap();
        assert_tree(&tree)
            .kind("body")
            .child(0, |s| s.attribute("title", "Title").child_count(1));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A paragraph of text.").unwrap();
        let loader = DocumentLoader::from_path(file.path()).unwrap();
        assert_eq!(loader.source(), "A paragraph of text.\n");
        let tree = loader.parse(&ParseOptions::new("memo")).unwrap();
        assert_tree(&tree).child_count(1).child(0, |p| p.kind("paragraph"));
    }

    #[test]
    fn test_missing_file() {
        let err = DocumentLoader::from_path("/definitely/not/here.txt").err().unwrap();
        assert!(matches!(err, LoaderError::Io(_)));
    }

    #[test]
    fn test_unknown_grammar() {
        let err = DocumentLoader::from_string("text")
            .parse(&ParseOptions::new("sonnet"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown grammar 'sonnet' (available: memo, outline)"
        );
    }

    #[test]
    fn test_line_chunking() {
        let loader = DocumentLoader::from_string("one\ntwo\n");
        let tree = loader
            .parse(&ParseOptions::new("memo").with_chunking(Chunking::Line))
            .unwrap();
        assert_tree(&tree).child_count(2).all_children("paragraph");
    }

    #[test]
    fn test_parse_collecting() {
        let loader = DocumentLoader::from_string("Just some words here.\n");
        let (result, lines) = loader.parse_collecting(&ParseOptions::new("memo"));
        assert!(result.is_ok());
        assert!(lines.iter().any(|l| l.contains("Paragraph matched")));
    }
}
