use crate::hast::{HtmlNode, visit_elements_mut};

/// Demotes every `h1` in the tree to `h2`.
///
/// The page layout renders the post title as the only `h1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingNormalizer;

impl HeadingNormalizer {
    /// Applies the rename, returning how many headings were demoted.
    pub fn apply(&self, tree: &mut HtmlNode) -> usize {
        visit_elements_mut(
            tree,
            |el| el.tag_name == "h1",
            |el, _| el.tag_name = "h2".to_string(),
        )
    }
}
