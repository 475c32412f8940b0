//! Streaming fix-ups over serialized HTML.
//!
//! Raw HTML embedded in a post never becomes part of the element tree, so
//! tree passes cannot see headings written as markup. This sweep renames them
//! on the final string with lol_html. Raw nodes that must come out byte for
//! byte (diagram wrappers) are put on a [`Shelf`] first and restored after.

use crate::hast::HtmlNode;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use xlog_core::XlogError;

/// Renames every `h1` element in `html` to `h2`, leaving all other bytes as they are.
///
/// The rewriter runs in non-strict mode, so ambiguous markup is passed
/// through instead of rejected.
pub fn demote_raw_headings(html: &str) -> Result<String, XlogError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("h1", |el| {
                el.set_tag_name("h2")?;
                Ok(())
            })],
            strict: false,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| XlogError::Rewrite(err.to_string()))
}

/// Raw fragments lifted out of a tree and replaced by comment placeholders.
#[derive(Debug, Default)]
pub struct Shelf {
    fragments: Vec<String>,
    remaining: usize,
}

impl Shelf {
    /// Replaces every raw node whose markup matches `test` with a placeholder.
    pub fn take<F>(tree: &mut HtmlNode, test: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut shelf = Shelf::default();
        shelf.collect(tree, &test);
        shelf
    }

    fn collect<F>(&mut self, node: &mut HtmlNode, test: &F)
    where
        F: Fn(&str) -> bool,
    {
        match node {
            HtmlNode::Raw(html) if test(html.as_str()) => {
                let placeholder = placeholder(self.fragments.len());
                self.fragments.push(std::mem::replace(html, placeholder));
            }
            HtmlNode::Raw(_) => self.remaining += 1,
            _ => {
                if let Some(children) = node.children_mut() {
                    for child in children {
                        self.collect(child, test);
                    }
                }
            }
        }
    }

    /// Number of shelved fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true when nothing was shelved.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Raw nodes left in the tree.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Swaps each placeholder in `html` back for its fragment.
    pub fn restore(&self, mut html: String) -> String {
        // Last first: a restored fragment may contain placeholder-like text,
        // but only after the earlier real placeholders.
        for (index, fragment) in self.fragments.iter().enumerate().rev() {
            html = html.replacen(&placeholder(index), fragment, 1);
        }
        html
    }
}

fn placeholder(index: usize) -> String {
    format!("<!--xlog-shelf:{}-->", index)
}
