use crate::hast::{HtmlNode, Parent, visit_elements_mut};

/// Turns `<pre><code class="language-mermaid">` pairs into diagram containers.
///
/// The parent is renamed to `container_tag` and the `code` element to
/// `block_tag`; text and attributes are kept so the client-side renderer can
/// read the diagram source. A matching `code` whose parent is not an element
/// is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramPromoter {
    /// Classes identifying diagram source on `code` elements.
    pub marker_classes: Vec<String>,
    /// Tag given to the parent element.
    pub container_tag: String,
    /// Tag given to the `code` element.
    pub block_tag: String,
}

impl Default for DiagramPromoter {
    fn default() -> Self {
        Self {
            marker_classes: vec!["language-mermaid".to_string()],
            container_tag: "mermaid".to_string(),
            block_tag: "div".to_string(),
        }
    }
}

impl DiagramPromoter {
    /// Applies the rename, returning how many diagram blocks were promoted.
    pub fn apply(&self, tree: &mut HtmlNode) -> usize {
        let mut promoted = 0;
        visit_elements_mut(
            tree,
            |el| {
                el.tag_name == "code"
                    && self.marker_classes.iter().any(|class| el.has_class(class))
            },
            |el, parent| {
                if let Parent::Element(parent) = parent {
                    *parent.tag_name = self.container_tag.clone();
                    el.tag_name = self.block_tag.clone();
                    promoted += 1;
                }
            },
        );
        promoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hast::Element;

    fn diagram_code(source: &str) -> Element {
        Element::new("code")
            .with_class("language-mermaid")
            .with_children(vec![HtmlNode::text(source)])
    }

    #[test]
    fn renames_pre_code_pair() {
        let mut tree = HtmlNode::root(vec![
            Element::new("pre")
                .with_children(vec![diagram_code("graph TD;\n  A-->B;").into()])
                .into(),
        ]);

        assert_eq!(DiagramPromoter::default().apply(&mut tree), 1);

        let container = tree.children().unwrap()[0].as_element().unwrap();
        assert_eq!(container.tag_name, "mermaid");
        let block = container.children[0].as_element().unwrap();
        assert_eq!(block.tag_name, "div");
        assert!(block.has_class("language-mermaid"));
        assert_eq!(block.text_content(), "graph TD;\n  A-->B;");
    }

    #[test]
    fn root_parent_is_a_no_op() {
        let mut tree = HtmlNode::root(vec![diagram_code("graph").into()]);
        let before = tree.clone();
        assert_eq!(DiagramPromoter::default().apply(&mut tree), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn missing_parent_is_a_no_op() {
        let mut tree: HtmlNode = diagram_code("graph").into();
        let before = tree.clone();
        assert_eq!(DiagramPromoter::default().apply(&mut tree), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn other_code_blocks_are_untouched() {
        let mut tree = HtmlNode::root(vec![
            Element::new("pre")
                .with_children(vec![
                    Element::new("code")
                        .with_class("language-rust")
                        .with_children(vec![HtmlNode::text("fn main() {}")])
                        .into(),
                ])
                .into(),
            Element::new("p")
                .with_children(vec![Element::new("code").into()])
                .into(),
        ]);
        let before = tree.clone();
        assert_eq!(DiagramPromoter::default().apply(&mut tree), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn matches_are_independent() {
        let mut tree = HtmlNode::root(vec![
            Element::new("pre").with_children(vec![diagram_code("a").into()]).into(),
            Element::new("pre")
                .with_children(vec![
                    Element::new("code")
                        .with_class("language-js")
                        .into(),
                ])
                .into(),
            Element::new("pre").with_children(vec![diagram_code("b").into()]).into(),
        ]);
        assert_eq!(DiagramPromoter::default().apply(&mut tree), 2);
        assert_eq!(tree.count_tag("mermaid"), 2);
        assert_eq!(tree.count_tag("pre"), 1);
        assert_eq!(tree.count_tag("code"), 1);
    }
}
