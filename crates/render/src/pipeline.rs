//! Pipeline driver: markdown source in, rendered post out.

use crate::hast::{Converted, HeadingEntry, from_mdast};
use crate::options::{DiagramMode, RenderOptions};
use crate::passes::{DiagramPromoter, HeadingNormalizer, HtmlPass, run_passes};
use crate::raw::{Shelf, demote_raw_headings};
use crate::serialize::{DefaultRenderer, TableWrapper, to_html};
use serde_json::Value as JsonValue;
use xlog_core::{DiagramFence, ParserPipeline, ReadingStats, XlogError, extract_frontmatter, plain_text, reading_stats};

/// A fully rendered post.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    /// Serialized HTML body.
    pub html: String,
    /// Headings in document order, for the table of contents.
    pub headings: Vec<HeadingEntry>,
    /// Frontmatter as a JSON object (empty when absent).
    pub frontmatter: JsonValue,
    /// Character count and reading time.
    pub reading: ReadingStats,
}

/// Ordered rendering passes built from [`RenderOptions`].
///
/// A pipeline holds no per-render state and can be shared across threads.
pub struct Pipeline {
    options: RenderOptions,
    parser: ParserPipeline,
    passes: Vec<HtmlPass>,
    fence: Option<DiagramFence>,
}

impl Pipeline {
    /// Builds the parser transforms and HTML passes for `options`.
    pub fn new(options: RenderOptions) -> Self {
        let mut parser = ParserPipeline::new(options.parse_options());
        let mut passes = Vec::new();
        let mut fence = None;

        if options.demote_headings {
            passes.push(HeadingNormalizer.into());
        }

        let mode = options.effective_diagram_mode();
        if mode != options.diagram.mode {
            log::debug!("raw HTML is disabled, diagram fences fall back to {:?} mode", mode);
        }
        match mode {
            DiagramMode::Fence => {
                let diagram_fence = options.diagram.fence();
                parser.add_ast_transform(diagram_fence.clone());
                fence = Some(diagram_fence);
            }
            DiagramMode::Element => passes.push(
                DiagramPromoter {
                    marker_classes: options.diagram.marker_classes(),
                    container_tag: options.diagram.container_tag.clone(),
                    block_tag: options.diagram.block_tag.clone(),
                }
                .into(),
            ),
            DiagramMode::Off => {}
        }

        Self {
            options,
            parser,
            passes,
            fence,
        }
    }

    /// Options this pipeline was built from.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// HTML passes in the order they run.
    pub fn passes(&self) -> &[HtmlPass] {
        &self.passes
    }

    /// Renders one markdown post.
    ///
    /// Only parser and frontmatter failures are reported. The rewrite passes
    /// cannot fail, and a failed raw heading sweep is logged and skipped.
    pub fn render(&self, source: &str) -> Result<RenderedPost, XlogError> {
        let root = self.parser.parse(source)?;
        let frontmatter = extract_frontmatter(&root)?;
        let reading = reading_stats(&plain_text(&root), self.options.reading.words_per_minute);

        let Converted { mut tree, headings } = from_mdast(&root, &self.options);
        run_passes(&self.passes, &mut tree);

        let sweep = self.options.demote_headings && tree.contains_raw();
        let shelf = match &self.fence {
            Some(fence) if sweep => Shelf::take(&mut tree, |html| fence.is_wrapper(html)),
            _ => Shelf::default(),
        };

        let mut html = match &self.options.table_wrapper {
            Some(class_name) => to_html(&tree, &TableWrapper::new(DefaultRenderer, class_name.as_str())),
            None => to_html(&tree, &DefaultRenderer),
        };
        if sweep && (shelf.is_empty() || shelf.remaining() > 0) {
            html = match demote_raw_headings(&html) {
                Ok(swept) => swept,
                Err(err) => {
                    log::warn!("raw heading sweep skipped: {}", err);
                    html
                }
            };
        }
        if !shelf.is_empty() {
            html = shelf.restore(html);
        }

        Ok(RenderedPost {
            html,
            headings,
            frontmatter,
            reading,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Renders `source` with a one-off pipeline.
pub fn render_markdown(source: &str, options: &RenderOptions) -> Result<RenderedPost, XlogError> {
    Pipeline::new(options.clone()).render(source)
}
