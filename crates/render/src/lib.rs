#![deny(missing_docs)]
//! xLog render: HTML tree conversion, rewrite passes, serialization and batch rendering.

/// Parallel batch rendering.
pub mod batch;
/// HTML element tree and its traversal.
pub mod hast;
/// Serde-backed render configuration.
pub mod options;
/// Rewrite passes over the HTML tree.
pub mod passes;
/// The render pipeline driver.
pub mod pipeline;
/// Sweeps over serialized HTML.
pub mod raw;
/// HTML serialization.
pub mod serialize;

pub use batch::{BatchInput, BatchOptions, BatchOutput, BatchResult, BatchStats};
pub use hast::HeadingEntry;
pub use options::{DiagramMode, DiagramOptions, ReadingOptions, RenderOptions};
pub use passes::{DiagramPromoter, HeadingNormalizer, HtmlPass, run_passes};
pub use pipeline::{Pipeline, RenderedPost, render_markdown};
pub use serialize::{DefaultRenderer, HtmlRenderer, TableWrapper, to_html};
