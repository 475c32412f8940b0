//! Depth-first element traversal with access to the parent.

use super::{Element, HtmlNode, Properties};

/// Mutable view of a parent element's tag and attributes.
///
/// The parent's children are borrowed by the traversal, so only the tag name
/// and properties are exposed.
pub struct ParentElement<'a> {
    /// Parent tag name.
    pub tag_name: &'a mut String,
    /// Parent attributes.
    pub properties: &'a mut Properties,
}

/// The parent of a visited element.
pub enum Parent<'a> {
    /// The element is the tree's top node.
    None,
    /// The element sits directly under a root node.
    Root,
    /// The element sits under another element.
    Element(ParentElement<'a>),
}

/// Visits every element under `tree` once, depth-first in document order.
///
/// Elements accepted by `test` are passed to `visit` together with their
/// parent. Traversal descends into an element's children after it has been
/// visited. Returns the number of matched elements.
pub fn visit_elements_mut<T, F>(tree: &mut HtmlNode, test: T, mut visit: F) -> usize
where
    T: Fn(&Element) -> bool,
    F: FnMut(&mut Element, Parent<'_>),
{
    walk(tree, Parent::None, &test, &mut visit)
}

fn walk<T, F>(node: &mut HtmlNode, parent: Parent<'_>, test: &T, visit: &mut F) -> usize
where
    T: Fn(&Element) -> bool,
    F: FnMut(&mut Element, Parent<'_>),
{
    match node {
        HtmlNode::Root(root) => {
            let mut matched = 0;
            for child in root.children.iter_mut() {
                matched += walk(child, Parent::Root, test, &mut *visit);
            }
            matched
        }
        HtmlNode::Element(el) => {
            let mut matched = 0;
            if test(el) {
                visit(el, parent);
                matched += 1;
            }
            let Element {
                tag_name,
                properties,
                children,
            } = el;
            for child in children.iter_mut() {
                let parent = Parent::Element(ParentElement {
                    tag_name: &mut *tag_name,
                    properties: &mut *properties,
                });
                matched += walk(child, parent, test, &mut *visit);
            }
            matched
        }
        HtmlNode::Text(_) | HtmlNode::Raw(_) => 0,
    }
}
