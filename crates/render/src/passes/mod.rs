//! Rewrite passes over the HTML element tree.
//!
//! - `headings`: demotes `h1` to `h2`.
//! - `diagrams`: promotes `pre > code.language-mermaid` into diagram containers.

/// Diagram block promotion.
pub mod diagrams;
/// Heading demotion.
pub mod headings;

pub use diagrams::DiagramPromoter;
pub use headings::HeadingNormalizer;

use crate::hast::HtmlNode;

/// A single pass over the HTML tree.
///
/// Passes hold no state between runs and never fail; elements a pass does not
/// match are left as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlPass {
    /// Rename `h1` to `h2`.
    NormalizeHeadings(HeadingNormalizer),
    /// Rename diagram `pre`/`code` pairs.
    PromoteDiagrams(DiagramPromoter),
}

impl HtmlPass {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            HtmlPass::NormalizeHeadings(_) => "normalize-headings",
            HtmlPass::PromoteDiagrams(_) => "promote-diagrams",
        }
    }

    /// Runs the pass, returning the number of rewritten elements.
    pub fn apply(&self, tree: &mut HtmlNode) -> usize {
        match self {
            HtmlPass::NormalizeHeadings(pass) => pass.apply(tree),
            HtmlPass::PromoteDiagrams(pass) => pass.apply(tree),
        }
    }
}

impl From<HeadingNormalizer> for HtmlPass {
    fn from(pass: HeadingNormalizer) -> Self {
        HtmlPass::NormalizeHeadings(pass)
    }
}

impl From<DiagramPromoter> for HtmlPass {
    fn from(pass: DiagramPromoter) -> Self {
        HtmlPass::PromoteDiagrams(pass)
    }
}

/// Runs `passes` in order over `tree`.
pub fn run_passes(passes: &[HtmlPass], tree: &mut HtmlNode) {
    for pass in passes {
        let rewritten = pass.apply(tree);
        if rewritten > 0 {
            log::debug!("{}: rewrote {} element(s)", pass.name(), rewritten);
        }
    }
}
