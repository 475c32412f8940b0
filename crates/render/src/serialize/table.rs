use super::HtmlRenderer;
use crate::hast::Element;

/// Wraps every rendered table in `<div class="...">`, delegating everything
/// else to the inner renderer.
///
/// The wrapper tags are written directly against the table tags, with no
/// whitespace in between.
#[derive(Debug, Clone)]
pub struct TableWrapper<R> {
    inner: R,
    class_name: String,
}

impl<R: HtmlRenderer> TableWrapper<R> {
    /// Wraps `inner`, using `class_name` on the wrapper `div`.
    pub fn new(inner: R, class_name: impl Into<String>) -> Self {
        Self {
            inner,
            class_name: class_name.into(),
        }
    }
}

impl<R: HtmlRenderer> HtmlRenderer for TableWrapper<R> {
    fn open_tag(&self, out: &mut String, el: &Element) {
        self.inner.open_tag(out, el);
    }

    fn close_tag(&self, out: &mut String, el: &Element) {
        self.inner.close_tag(out, el);
    }

    fn table_open(&self, out: &mut String, el: &Element) {
        out.push_str("<div class=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&self.class_name));
        out.push_str("\">");
        self.inner.table_open(out, el);
    }

    fn table_close(&self, out: &mut String, el: &Element) {
        self.inner.table_close(out, el);
        out.push_str("</div>");
    }

    fn text(&self, out: &mut String, text: &str) {
        self.inner.text(out, text);
    }

    fn raw(&self, out: &mut String, html: &str) {
        self.inner.raw(out, html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hast::HtmlNode;
    use crate::serialize::{DefaultRenderer, to_html};

    fn table(cell: &str) -> HtmlNode {
        Element::new("table")
            .with_children(vec![
                Element::new("tbody")
                    .with_children(vec![
                        Element::new("tr")
                            .with_children(vec![
                                Element::new("td")
                                    .with_children(vec![HtmlNode::text(cell)])
                                    .into(),
                            ])
                            .into(),
                    ])
                    .into(),
            ])
            .into()
    }

    #[test]
    fn wraps_tables_only() {
        let tree = HtmlNode::root(vec![
            Element::new("p").with_children(vec![HtmlNode::text("before")]).into(),
            table("1"),
            Element::new("div").with_class("note").into(),
        ]);
        let renderer = TableWrapper::new(DefaultRenderer, "table-wrapper");
        assert_eq!(
            to_html(&tree, &renderer),
            "<p>before</p><div class=\"table-wrapper\"><table><tbody><tr><td>1</td></tr></tbody></table></div><div class=\"note\"></div>"
        );
    }

    #[test]
    fn table_markup_is_unchanged_inside_wrapper() {
        let tree = HtmlNode::root(vec![table("a & b"), table("c")]);
        let plain = to_html(&tree, &DefaultRenderer);
        let wrapped = to_html(&tree, &TableWrapper::new(DefaultRenderer, "table-wrapper"));

        let stripped = wrapped
            .replace("<div class=\"table-wrapper\">", "")
            .replace("</table></div>", "</table>");
        assert_eq!(stripped, plain);
        assert_eq!(wrapped.matches("<div class=\"table-wrapper\"><table>").count(), 2);
        assert_eq!(wrapped.matches("</table></div>").count(), 2);
    }

    #[test]
    fn nested_tables_get_their_own_wrappers() {
        let mut outer = Element::new("table");
        outer.children.push(table("inner"));
        let tree: HtmlNode = outer.into();
        let html = to_html(&tree, &TableWrapper::new(DefaultRenderer, "w"));
        assert!(html.starts_with("<div class=\"w\"><table><div class=\"w\"><table>"));
        assert!(html.ends_with("</table></div></table></div>"));
    }
}
