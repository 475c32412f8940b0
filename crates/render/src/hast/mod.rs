//! HTML element tree produced from mdast and consumed by the rewrite passes.
//!
//! - `visit` - depth-first traversal with parent access
//! - `from_mdast` - markdown-rs mdast to HTML tree conversion

pub mod from_mdast;
pub mod visit;

pub use from_mdast::{Converted, HeadingEntry, from_mdast};
pub use visit::{Parent, ParentElement, visit_elements_mut};

use std::collections::BTreeMap;

/// Value of an element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Plain string attribute.
    String(String),
    /// Space-separated token list (used for `class`).
    List(Vec<String>),
    /// Boolean attribute; `false` is not rendered.
    Bool(bool),
}

/// Attribute map of an element, ordered by attribute name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes.
    pub properties: Properties,
    /// Child nodes in document order.
    pub children: Vec<HtmlNode>,
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Sets a string attribute.
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties
            .insert(name.to_string(), PropertyValue::String(value.into()));
        self
    }

    /// Sets a boolean attribute.
    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.properties
            .insert(name.to_string(), PropertyValue::Bool(value));
        self
    }

    /// Appends a class to the class list.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Replaces the children.
    pub fn with_children(mut self, children: Vec<HtmlNode>) -> Self {
        self.children = children;
        self
    }

    /// Appends a class to the class list.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        match self.properties.get_mut("class") {
            Some(PropertyValue::List(list)) => list.push(class),
            _ => {
                self.properties
                    .insert("class".to_string(), PropertyValue::List(vec![class]));
            }
        }
    }

    /// The element's class list (empty when it has none).
    pub fn class_list(&self) -> &[String] {
        match self.properties.get("class") {
            Some(PropertyValue::List(list)) => list,
            _ => &[],
        }
    }

    /// Returns true when the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    /// Returns a string attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self.properties.get(name) {
            Some(PropertyValue::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            child.collect_text(&mut text);
        }
        text
    }
}

/// Root of an HTML tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    /// Top-level nodes.
    pub children: Vec<HtmlNode>,
}

/// A node of the HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Document root.
    Root(Root),
    /// Element with tag, attributes and children.
    Element(Element),
    /// Text, escaped on output.
    Text(String),
    /// Markup emitted verbatim.
    Raw(String),
}

impl HtmlNode {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Text(value.into())
    }

    /// Creates a root node.
    pub fn root(children: Vec<HtmlNode>) -> Self {
        HtmlNode::Root(Root { children })
    }

    /// Child nodes, for roots and elements.
    pub fn children(&self) -> Option<&Vec<HtmlNode>> {
        match self {
            HtmlNode::Root(root) => Some(&root.children),
            HtmlNode::Element(el) => Some(&el.children),
            HtmlNode::Text(_) | HtmlNode::Raw(_) => None,
        }
    }

    /// Mutable child nodes, for roots and elements.
    pub fn children_mut(&mut self) -> Option<&mut Vec<HtmlNode>> {
        match self {
            HtmlNode::Root(root) => Some(&mut root.children),
            HtmlNode::Element(el) => Some(&mut el.children),
            HtmlNode::Text(_) | HtmlNode::Raw(_) => None,
        }
    }

    /// The element, when this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            HtmlNode::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Returns true when the subtree holds any raw markup.
    pub fn contains_raw(&self) -> bool {
        match self {
            HtmlNode::Raw(_) => true,
            HtmlNode::Text(_) => false,
            _ => self
                .children()
                .is_some_and(|children| children.iter().any(HtmlNode::contains_raw)),
        }
    }

    /// Counts elements with the given tag name in the subtree.
    pub fn count_tag(&self, tag_name: &str) -> usize {
        let own = match self {
            HtmlNode::Element(el) if el.tag_name == tag_name => 1,
            _ => 0,
        };
        own + self
            .children()
            .map(|children| children.iter().map(|c| c.count_tag(tag_name)).sum())
            .unwrap_or(0)
    }

    fn collect_text(&self, buffer: &mut String) {
        match self {
            HtmlNode::Text(text) => buffer.push_str(text),
            HtmlNode::Raw(_) => {}
            _ => {
                if let Some(children) = self.children() {
                    for child in children {
                        child.collect_text(buffer);
                    }
                }
            }
        }
    }
}

impl From<Element> for HtmlNode {
    fn from(el: Element) -> Self {
        HtmlNode::Element(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_accumulates() {
        let mut el = Element::new("code").with_class("language-mermaid");
        el.add_class("highlight");
        assert_eq!(el.class_list(), ["language-mermaid", "highlight"]);
        assert!(el.has_class("highlight"));
        assert!(!el.has_class("mermaid"));
    }

    #[test]
    fn text_content_skips_raw() {
        let el = Element::new("p").with_children(vec![
            HtmlNode::text("a"),
            HtmlNode::Raw("<b>".into()),
            Element::new("em").with_children(vec![HtmlNode::text("b")]).into(),
        ]);
        assert_eq!(el.text_content(), "ab");
    }

    #[test]
    fn counts_tags_and_detects_raw() {
        let tree = HtmlNode::root(vec![
            Element::new("h1").into(),
            Element::new("div")
                .with_children(vec![Element::new("h1").into(), HtmlNode::Raw("x".into())])
                .into(),
        ]);
        assert_eq!(tree.count_tag("h1"), 2);
        assert_eq!(tree.count_tag("div"), 1);
        assert!(tree.contains_raw());
        assert!(!HtmlNode::root(vec![HtmlNode::text("t")]).contains_raw());
    }
}
