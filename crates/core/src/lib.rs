#![deny(missing_docs)]
//! xLog core: markdown parsing, mdast rewriting, frontmatter, slugs and reading time.

/// Diagram fence rewriting on the markdown tree.
pub mod diagram;
/// Core error types.
pub mod error;
/// YAML frontmatter extraction.
pub mod frontmatter;
/// Markdown parsing utilities and extension hooks.
pub mod parse;
/// Character counting and reading-time estimation.
pub mod reading;
/// Slug generation utilities.
pub mod slug;
/// Generic mdast traversal.
pub mod visit;

pub use diagram::{DEFAULT_DIAGRAM_LANGUAGE, DiagramFence, rewrite_diagram_fences};
pub use error::{SourceLocation, XlogError};
pub use frontmatter::{FrontmatterError, extract_frontmatter};
pub use parse::{AstTransform, ParseOptions, ParserPipeline, parse_mdast, parse_mdast_with_options};
pub use reading::{DEFAULT_WORDS_PER_MINUTE, ReadingStats, reading_stats};
pub use slug::{Slugger, slugify};
pub use visit::{plain_text, visit_mut};
