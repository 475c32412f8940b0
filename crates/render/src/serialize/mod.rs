//! HTML serialization through a pluggable renderer.
//!
//! [`to_html`] walks the tree and calls one [`HtmlRenderer`] method per token.
//! Table elements go through `table_open`/`table_close` so a decorator such as
//! [`TableWrapper`] can change them without touching anything else.

mod table;

pub use table::TableWrapper;

use crate::hast::{Element, HtmlNode, PropertyValue};

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns true for elements that have no closing tag.
pub fn is_void(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// Writes the tokens of an HTML tree.
pub trait HtmlRenderer {
    /// Opening tag of any element other than `table`.
    fn open_tag(&self, out: &mut String, el: &Element);
    /// Closing tag of any element other than `table`.
    fn close_tag(&self, out: &mut String, el: &Element);
    /// Opening tag of a `table` element.
    fn table_open(&self, out: &mut String, el: &Element);
    /// Closing tag of a `table` element.
    fn table_close(&self, out: &mut String, el: &Element);
    /// A text node.
    fn text(&self, out: &mut String, text: &str);
    /// Raw markup.
    fn raw(&self, out: &mut String, html: &str);
}

/// Plain HTML output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl DefaultRenderer {
    fn write_attributes(out: &mut String, el: &Element) {
        for (name, value) in &el.properties {
            match value {
                PropertyValue::String(value) => write_attribute(out, name, value),
                PropertyValue::List(tokens) if !tokens.is_empty() => {
                    write_attribute(out, name, &tokens.join(" "))
                }
                PropertyValue::List(_) => {}
                PropertyValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                PropertyValue::Bool(false) => {}
            }
        }
    }
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}

impl HtmlRenderer for DefaultRenderer {
    fn open_tag(&self, out: &mut String, el: &Element) {
        out.push('<');
        out.push_str(&el.tag_name);
        Self::write_attributes(out, el);
        out.push('>');
    }

    fn close_tag(&self, out: &mut String, el: &Element) {
        if is_void(&el.tag_name) {
            return;
        }
        out.push_str("</");
        out.push_str(&el.tag_name);
        out.push('>');
    }

    fn table_open(&self, out: &mut String, el: &Element) {
        self.open_tag(out, el);
    }

    fn table_close(&self, out: &mut String, el: &Element) {
        self.close_tag(out, el);
    }

    fn text(&self, out: &mut String, text: &str) {
        out.push_str(&html_escape::encode_text(text));
    }

    fn raw(&self, out: &mut String, html: &str) {
        out.push_str(html);
    }
}

/// Serializes `tree` with `renderer`.
pub fn to_html<R: HtmlRenderer + ?Sized>(tree: &HtmlNode, renderer: &R) -> String {
    let mut out = String::with_capacity(4096);
    write_node(tree, renderer, &mut out);
    out
}

fn write_node<R: HtmlRenderer + ?Sized>(node: &HtmlNode, renderer: &R, out: &mut String) {
    match node {
        HtmlNode::Root(root) => {
            for child in &root.children {
                write_node(child, renderer, out);
            }
        }
        HtmlNode::Element(el) => {
            let table = el.tag_name == "table";
            if table {
                renderer.table_open(out, el);
            } else {
                renderer.open_tag(out, el);
            }
            if !is_void(&el.tag_name) {
                for child in &el.children {
                    write_node(child, renderer, out);
                }
            }
            if table {
                renderer.table_close(out, el);
            } else {
                renderer.close_tag(out, el);
            }
        }
        HtmlNode::Text(text) => renderer.text(out, text),
        HtmlNode::Raw(html) => renderer.raw(out, html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let tree = HtmlNode::root(vec![
            Element::new("a")
                .with_attr("href", "/search?q=a&b=\"c\"")
                .with_children(vec![HtmlNode::text("1 < 2 & 3 > 2")])
                .into(),
        ]);
        assert_eq!(
            to_html(&tree, &DefaultRenderer),
            "<a href=\"/search?q=a&amp;b=&quot;c&quot;\">1 &lt; 2 &amp; 3 &gt; 2</a>"
        );
    }

    #[test]
    fn renders_class_lists_and_flags() {
        let tree: HtmlNode = Element::new("input")
            .with_class("a")
            .with_class("b")
            .with_flag("checked", false)
            .with_flag("disabled", true)
            .with_attr("type", "checkbox")
            .into();
        assert_eq!(
            to_html(&tree, &DefaultRenderer),
            "<input class=\"a b\" disabled type=\"checkbox\">"
        );
    }

    #[test]
    fn raw_is_verbatim() {
        let tree = HtmlNode::root(vec![
            HtmlNode::Raw("<pre class=\"mermaid\">A-->B & C</pre>".into()),
            Element::new("br").into(),
            Element::new("hr").into(),
        ]);
        assert_eq!(
            to_html(&tree, &DefaultRenderer),
            "<pre class=\"mermaid\">A-->B & C</pre><br><hr>"
        );
    }

    #[test]
    fn tables_render_plainly_by_default() {
        let tree: HtmlNode = Element::new("table")
            .with_children(vec![Element::new("tbody").into()])
            .into();
        assert_eq!(to_html(&tree, &DefaultRenderer), "<table><tbody></tbody></table>");
    }
}
