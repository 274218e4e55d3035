//! Document tree
//!
//! A small general purpose tree for grammars that do not need node types of their own: every
//! node is either a named [Element] with string attributes and children, or a run of text.
//! It implements the engine's [Append] contract, so an element can be handed straight to
//! [crate::fsm::engine::Driver::make_children].
//!
//! The tree serializes with serde; text nodes are plain strings and elements are objects:
//!
//!     {"kind": "section", "attributes": {"title": "Intro"}, "children": ["Some text"]}

use crate::fsm::engine::Append;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: impl Into<String>) -> Self {
        Element {
            kind: kind.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All text directly below this element, concatenated.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

impl Append<Node> for Element {
    fn append(&mut self, child: Node) {
        self.children.push(child);
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// The element kind, or `"text"`.
    pub fn kind(&self) -> &str {
        match self {
            Node::Element(element) => &element.kind,
            Node::Text(_) => "text",
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let section = Element::new("section")
            .with_attribute("title", "Intro")
            .with_text("a")
            .with_child(Element::new("p").with_text("b"))
            .with_text("c");

        assert_eq!(section.attribute("title"), Some("Intro"));
        assert_eq!(section.attribute("missing"), None);
        assert_eq!(section.text(), "ac");
        assert_eq!(section.elements().count(), 1);
        assert_eq!(section.children.len(), 3);
    }

    #[test]
    fn test_append() {
        let mut body = Element::new("body");
        body.append(Node::from("x"));
        body.append(Element::new("p").into());
        assert_eq!(body.children[0].as_text(), Some("x"));
        assert_eq!(body.children[1].kind(), "p");
    }

    #[test]
    fn test_serde_shape() {
        let tree = Element::new("section")
            .with_attribute("title", "Intro")
            .with_text("Some text");
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"section","attributes":{"title":"Intro"},"children":["Some text"]}"#
        );

        let empty = serde_json::to_string(&Element::new("hr")).unwrap();
        assert_eq!(empty, r#"{"kind":"hr"}"#);

        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Node::Element(tree));
    }
}
