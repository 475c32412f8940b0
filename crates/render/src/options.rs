//! Rendering options for the post pipeline.

use serde::{Deserialize, Serialize};
use xlog_core::{DEFAULT_DIAGRAM_LANGUAGE, DEFAULT_WORDS_PER_MINUTE, DiagramFence, ParseOptions, XlogError};

/// Class of the `div` placed around rendered tables.
pub const DEFAULT_TABLE_WRAPPER_CLASS: &str = "table-wrapper";

/// How diagram code fences are turned into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DiagramMode {
    /// Rewrite fences to raw `<pre>` HTML on the markdown tree.
    #[default]
    Fence,
    /// Rename the `pre`/`code` pair on the HTML tree.
    Element,
    /// Leave diagram fences as ordinary code blocks.
    Off,
}

/// Diagram handling options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagramOptions {
    /// Which rewrite produces diagram markup.
    pub mode: DiagramMode,
    /// Fence languages treated as diagrams.
    pub languages: Vec<String>,
    /// Class on the raw `pre` emitted in fence mode.
    pub class_name: String,
    /// Tag the `pre` parent is renamed to in element mode.
    pub container_tag: String,
    /// Tag the `code` element is renamed to in element mode.
    pub block_tag: String,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            mode: DiagramMode::Fence,
            languages: vec![DEFAULT_DIAGRAM_LANGUAGE.to_string()],
            class_name: DEFAULT_DIAGRAM_LANGUAGE.to_string(),
            container_tag: DEFAULT_DIAGRAM_LANGUAGE.to_string(),
            block_tag: "div".to_string(),
        }
    }
}

impl DiagramOptions {
    /// Fence matcher for the markdown tree rewrite.
    pub fn fence(&self) -> DiagramFence {
        DiagramFence {
            languages: self.languages.clone(),
            class_name: self.class_name.clone(),
        }
    }

    /// Marker classes the HTML tree promoter looks for, one per language.
    pub fn marker_classes(&self) -> Vec<String> {
        self.languages
            .iter()
            .map(|lang| format!("language-{}", lang))
            .collect()
    }
}

/// Reading-time options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadingOptions {
    /// Reading speed used for the estimate.
    pub words_per_minute: u32,
}

impl Default for ReadingOptions {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Options controlling how a post is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Pass embedded HTML through untouched instead of escaping it.
    pub allow_raw_html: bool,
    /// Enable GitHub Flavored Markdown.
    pub gfm: bool,
    /// Enable `$` / `$$` math.
    pub math: bool,
    /// Demote content `h1` headings to `h2`.
    pub demote_headings: bool,
    /// Add slug `id` attributes to headings.
    pub heading_ids: bool,
    /// Wrap heading content in a link to the heading itself.
    pub heading_autolinks: bool,
    /// Add `loading="lazy"` to images.
    pub lazy_images: bool,
    /// Class of the table wrapper `div`; `None` renders tables bare.
    pub table_wrapper: Option<String>,
    /// Diagram handling.
    pub diagram: DiagramOptions,
    /// Reading-time estimation.
    pub reading: ReadingOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            allow_raw_html: true,
            gfm: true,
            math: false,
            demote_headings: true,
            heading_ids: true,
            heading_autolinks: false,
            lazy_images: false,
            table_wrapper: Some(DEFAULT_TABLE_WRAPPER_CLASS.to_string()),
            diagram: DiagramOptions::default(),
            reading: ReadingOptions::default(),
        }
    }
}

impl RenderOptions {
    /// Loads options from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, XlogError> {
        serde_json::from_str(json).map_err(|err| XlogError::Config(err.to_string()))
    }

    /// Parser options implied by these render options.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            gfm: self.gfm,
            math: self.math,
            raw_html: self.allow_raw_html,
            frontmatter: true,
        }
    }

    /// The diagram mode actually used.
    ///
    /// Fence mode emits raw HTML, so it falls back to element mode when raw
    /// HTML is disabled.
    pub fn effective_diagram_mode(&self) -> DiagramMode {
        match self.diagram.mode {
            DiagramMode::Fence if !self.allow_raw_html => DiagramMode::Element,
            mode => mode,
        }
    }
}
