//! Fluent assertions over element trees
//!
//!     Walking a parsed tree by hand in every test is verbose and breaks whenever the tree
//!     shape changes. [assert_tree] wraps a node in an assertion object whose methods check
//!     one property each and hand the assertion back, so a whole subtree can be verified in a
//!     single chain:
//!
//!         assert_tree(&tree)
//!             .kind("body")
//!             .child_count(2)
//!             .child(0, |section| {
//!                 section
//!                     .kind("section")
//!                     .attribute("title", "Intro")
//!                     .child(0, |p| p.text_starts_with("Welcome"))
//!             });
//!
//!     Every failure message is prefixed with the path of the node being checked (for
//!     example `body[0][2]`), so a failing assertion deep in a tree points at the culprit.

use crate::fsm::elements::Node;

pub fn assert_tree(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: node.kind().to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: &str) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected kind '{}', found '{}'",
            self.context,
            expected,
            self.node.kind()
        );
        self
    }

    pub fn attribute(self, name: &str, expected: &str) -> Self {
        let actual = self.node.as_element().and_then(|e| e.attribute(name));
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected attribute {}='{}', found {:?}",
            self.context,
            name,
            expected,
            actual
        );
        self
    }

    pub fn no_attribute(self, name: &str) -> Self {
        let actual = self.node.as_element().and_then(|e| e.attribute(name));
        assert!(
            actual.is_none(),
            "{}: Expected no attribute '{}', found {:?}",
            self.context,
            name,
            actual
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        let actual = self.text_of();
        assert_eq!(
            actual, expected,
            "{}: Expected text to be '{}', but got '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        let actual = self.text_of();
        assert!(
            actual.starts_with(prefix),
            "{}: Expected text to start with '{}', but got '{}'",
            self.context,
            prefix,
            actual
        );
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        let actual = self.text_of();
        assert!(
            actual.contains(substring),
            "{}: Expected text to contain '{}', but got '{}'",
            self.context,
            substring,
            actual
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            actual,
            self.summary()
        );
        self
    }

    pub fn child<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let children = self.children();
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Every child has the given kind.
    pub fn all_children(self, kind: &str) -> Self {
        for (i, child) in self.children().iter().enumerate() {
            assert_eq!(
                child.kind(),
                kind,
                "{}[{}]: Expected kind '{}', found '{}'",
                self.context,
                i,
                kind,
                child.kind()
            );
        }
        self
    }

    fn children(&self) -> &'a [Node] {
        match self.node {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    fn text_of(&self) -> String {
        match self.node {
            Node::Element(element) => element.text(),
            Node::Text(text) => text.clone(),
        }
    }

    fn summary(&self) -> String {
        self.children()
            .iter()
            .map(Node::kind)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::elements::Element;

    fn sample() -> Node {
        Element::new("body")
            .with_child(Element::new("section").with_attribute("title", "Intro").with_text("Welcome home"))
            .with_text("loose")
            .into()
    }

    #[test]
    fn test_passing_chain() {
        assert_tree(&sample())
            .kind("body")
            .child_count(2)
            .no_attribute("title")
            .child(0, |s| {
                s.kind("section")
                    .attribute("title", "Intro")
                    .text_starts_with("Welcome")
                    .text_contains("home")
            })
            .child(1, |t| t.kind("text").text("loose"));
    }

    #[test]
    #[should_panic(expected = "body[0]: Expected attribute title='Outro'")]
    fn test_failure_names_path() {
        assert_tree(&sample()).child(0, |s| s.attribute("title", "Outro"));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_child_out_of_bounds() {
        assert_tree(&sample()).child(5, |_| ());
    }
}
