//! XML-like tag serialization
//!
//! Serializes element trees to an XML-like format that directly reflects the tree:
//!
//! - Element kind → tag name, attributes in name order
//! - An element whose only child is text keeps the text inline
//! - An element without children self-closes
//! - Everything else nests, two spaces per level
//!
//! ## Example
//!
//! ```text
//! <body>
//!   <section ordinal="1" title="Introduction">
//!     <paragraph>Welcome to the guide</paragraph>
//!   </section>
//! </body>
//! ```

use super::registry::{FormatError, Formatter};
use crate::fsm::elements::{Element, Node};

pub fn to_tag_str(tree: &Node) -> String {
    let mut output = String::new();
    write_node(&mut output, tree, 0);
    output
}

fn write_node(output: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => {
            output.push_str(&indent);
            output.push_str(&escape_xml(text));
            output.push('\n');
        }
        Node::Element(element) => {
            let open = open_tag(element);
            match element.children.as_slice() {
                [] => {
                    output.push_str(&format!("{indent}<{open}/>\n"));
                }
                [Node::Text(text)] => {
                    output.push_str(&format!(
                        "{indent}<{open}>{}</{}>\n",
                        escape_xml(text),
                        element.kind
                    ));
                }
                children => {
                    output.push_str(&format!("{indent}<{open}>\n"));
                    for child in children {
                        write_node(output, child, depth + 1);
                    }
                    output.push_str(&format!("{indent}</{}>\n", element.kind));
                }
            }
        }
    }
}

fn open_tag(element: &Element) -> String {
    let mut tag = element.kind.clone();
    for (name, value) in &element.attributes {
        tag.push_str(&format!(" {}=\"{}\"", name, escape_xml(value)));
    }
    tag
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(to_tag_str(tree))
    }

    fn description(&self) -> &str {
        "XML-like tag format reflecting the tree structure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn test_empty_element_self_closes() {
        let tree = Node::from(Element::new("body"));
        assert_eq!(to_tag_str(&tree), "<body/>\n");
    }

    #[test]
    fn test_nested_tree() {
        let tree: Node = Element::new("body")
            .with_child(
                Element::new("section")
                    .with_attribute("title", "Intro")
                    .with_attribute("ordinal", "1")
                    .with_child(Element::new("paragraph").with_text("A < B & C"))
                    .with_child(Element::new("rule")),
            )
            .with_text("loose")
            .into();

        insta::assert_snapshot!(to_tag_str(&tree), @r#"
        <body>
          <section ordinal="1" title="Intro">
            <paragraph>A &lt; B &amp; C</paragraph>
            <rule/>
          </section>
          loose
        </body>
        "#);
    }
}
