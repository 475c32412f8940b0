//! Rewrites diagram code fences into raw HTML before HTML conversion.
//!
//! A fence such as
//!
//! ````markdown
//! ```mermaid
//! graph TD; A-->B;
//! ```
//! ````
//!
//! becomes an `Html` node holding `<pre class="mermaid" data-diagram="mermaid">graph TD; A-->B;</pre>`,
//! which the client-side diagram library picks up after page load.

use crate::parse::AstTransform;
use crate::visit::visit_mut;
use markdown::mdast::{Html, Node};

/// Language used when no other diagram language is configured.
pub const DEFAULT_DIAGRAM_LANGUAGE: &str = "mermaid";

/// Matches diagram fences and renders their raw replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramFence {
    /// Fence languages treated as diagrams. Compared exactly.
    pub languages: Vec<String>,
    /// Class placed on the wrapper `pre`.
    pub class_name: String,
}

impl Default for DiagramFence {
    fn default() -> Self {
        Self {
            languages: vec![DEFAULT_DIAGRAM_LANGUAGE.to_string()],
            class_name: DEFAULT_DIAGRAM_LANGUAGE.to_string(),
        }
    }
}

impl DiagramFence {
    /// Returns true when `lang` names one of the diagram languages.
    pub fn matches(&self, lang: Option<&str>) -> bool {
        match lang {
            Some(lang) => self.languages.iter().any(|l| l == lang),
            None => false,
        }
    }

    /// Builds the wrapper element for a fence body.
    ///
    /// Attribute values are escaped. The body is embedded as-is: characters
    /// such as `<` or `&` are left for the browser's HTML parser to read.
    pub fn wrap(&self, lang: &str, body: &str) -> String {
        format!("{}{}</pre>", self.open_tag(lang), body)
    }

    /// Returns true when `html` is a wrapper produced by [`DiagramFence::wrap`].
    pub fn is_wrapper(&self, html: &str) -> bool {
        html.ends_with("</pre>")
            && self
                .languages
                .iter()
                .any(|lang| html.starts_with(&self.open_tag(lang)))
    }

    fn open_tag(&self, lang: &str) -> String {
        format!(
            "<pre class=\"{}\" data-diagram=\"{}\">",
            html_escape::encode_double_quoted_attribute(&self.class_name),
            html_escape::encode_double_quoted_attribute(lang)
        )
    }
}

impl AstTransform for DiagramFence {
    fn transform(&self, root: &mut Node) {
        let rewritten = rewrite_diagram_fences(root, self);
        if rewritten > 0 {
            log::debug!("rewrote {} diagram fence(s) to raw HTML", rewritten);
        }
    }
}

/// Replaces every diagram code block in `root` with a raw HTML node.
///
/// Siblings keep their order; only the matched node changes kind. Returns the
/// number of fences rewritten.
pub fn rewrite_diagram_fences(root: &mut Node, fence: &DiagramFence) -> usize {
    visit_mut(
        root,
        |node| matches!(node, Node::Code(code) if fence.matches(code.lang.as_deref())),
        |node| {
            let replacement = match node {
                Node::Code(code) => Node::Html(Html {
                    value: fence.wrap(code.lang.as_deref().unwrap_or_default(), &code.value),
                    position: code.position.take(),
                }),
                _ => return,
            };
            *node = replacement;
        },
    )
}
