//! Treeviz formatter for element trees
//!
//! One line per element, so a parsed document can be scanned at a glance:
//!
//!     <prefix><connector> <icon> <label>
//!
//! The label is the element's title (prefixed by its ordinal, if any) or otherwise its flowed
//! text, truncated to the label width. Text nodes are folded into their parent's label and do
//! not get lines of their own.
//!
//! Example:
//!
//!     ⧉ body
//!     ├─ ⊤ THE TITLE OF A LONG HEADER...
//!     └─ § 1 Introduction
//!       ├─ ¶ Welcome to the guide
//!       └─ ☰ decimal, 2 items
//!         ├─ • 1 first
//!         └─ • 2 second
//!
//! Icons
//!     body: ⧉
//!     section, subsection, subsubsection: §
//!     header: ⊤
//!     paragraph: ¶
//!     preformatted: 𝒱
//!     ordered-list: ☰
//!     list-item: •
//!     anything else: ○

use super::registry::{FormatError, Formatter};
use crate::fsm::elements::{Element, Node};

pub const DEFAULT_LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(kind: &str) -> &'static str {
    match kind {
        "body" => "⧉",
        "section" | "subsection" | "subsubsection" => "§",
        "header" => "⊤",
        "paragraph" => "¶",
        "preformatted" => "𝒱",
        "ordered-list" => "☰",
        "list-item" => "•",
        _ => "○",
    }
}

fn label(element: &Element) -> String {
    let text = element.text().split_whitespace().collect::<Vec<_>>().join(" ");
    let ordinal = element.attribute("ordinal");
    let label = match (element.kind.as_str(), element.attribute("title")) {
        ("ordered-list", _) => format!(
            "{}, {} items",
            element.attribute("type").unwrap_or("decimal"),
            element.elements().count()
        ),
        (_, Some(title)) => match ordinal {
            Some(ordinal) => format!("{ordinal} {title}"),
            None => title.to_string(),
        },
        _ => match ordinal {
            Some(ordinal) => format!("{ordinal} {text}"),
            None => text,
        },
    };
    if label.trim().is_empty() {
        element.kind.clone()
    } else {
        label.trim().to_string()
    }
}

fn format_element(
    element: &Element,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    width: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(&element.kind),
        truncate(&label(element), width)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    output.push_str(&format_children(element, &child_prefix, width));
    output
}

fn format_children(element: &Element, prefix: &str, width: usize) -> String {
    let children: Vec<&Element> = element.elements().collect();
    let child_count = children.len();
    children
        .into_iter()
        .enumerate()
        .map(|(i, child)| format_element(child, prefix, i, child_count, width))
        .collect()
}

pub fn to_treeviz_str(tree: &Node) -> String {
    to_treeviz_str_with_width(tree, DEFAULT_LABEL_WIDTH)
}

pub fn to_treeviz_str_with_width(tree: &Node, width: usize) -> String {
    match tree {
        Node::Text(text) => format!("◦ {}\n", truncate(text, width)),
        Node::Element(root) => {
            let mut output = format!("{} {}\n", get_icon(&root.kind), truncate(&label(root), width));
            output.push_str(&format_children(root, "", width));
            output
        }
    }
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter {
    pub label_width: usize,
}

impl Default for TreevizFormatter {
    fn default() -> Self {
        TreevizFormatter {
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_width(tree, self.label_width))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
