//! Depth-first traversal over markdown-rs mdast trees.

use markdown::mdast::Node;

/// Visits every node of `root` once, depth-first in document order.
///
/// Each node is checked with `test`; matching nodes are passed to `visit`,
/// which may mutate or replace the node in place. Traversal then continues
/// into the children of whatever node now occupies that slot. Returns the
/// number of nodes that matched.
pub fn visit_mut<T, F>(root: &mut Node, test: T, mut visit: F) -> usize
where
    T: Fn(&Node) -> bool,
    F: FnMut(&mut Node),
{
    walk(root, &test, &mut visit)
}

fn walk<T, F>(node: &mut Node, test: &T, visit: &mut F) -> usize
where
    T: Fn(&Node) -> bool,
    F: FnMut(&mut Node),
{
    let mut matched = 0;
    if test(node) {
        visit(node);
        matched += 1;
    }
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            matched += walk(child, test, visit);
        }
    }
    matched
}

/// Collects the plain text of a subtree (text, inline code and code values).
pub fn plain_text(node: &Node) -> String {
    let mut buffer = String::new();
    collect_text(node, &mut buffer);
    buffer
}

fn collect_text(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(t) => buffer.push_str(&t.value),
        Node::InlineCode(c) => buffer.push_str(&c.value),
        Node::Code(c) => {
            push_separated(buffer, &c.value);
        }
        Node::InlineMath(m) => buffer.push_str(&m.value),
        Node::Math(m) => push_separated(buffer, &m.value),
        Node::Break(_) => buffer.push('\n'),
        _ => {
            if let Some(children) = node.children() {
                let block = is_block(node);
                for child in children {
                    if block && is_block(child) && !buffer.is_empty() && !buffer.ends_with('\n') {
                        buffer.push('\n');
                    }
                    collect_text(child, buffer);
                }
            }
        }
    }
}

fn push_separated(buffer: &mut String, value: &str) {
    if !buffer.is_empty() && !buffer.ends_with('\n') {
        buffer.push('\n');
    }
    buffer.push_str(value);
}

fn is_block(node: &Node) -> bool {
    matches!(
        node,
        Node::Root(_)
            | Node::Paragraph(_)
            | Node::Heading(_)
            | Node::Blockquote(_)
            | Node::List(_)
            | Node::ListItem(_)
            | Node::Table(_)
            | Node::TableRow(_)
            | Node::TableCell(_)
            | Node::Code(_)
            | Node::FootnoteDefinition(_)
    )
}
