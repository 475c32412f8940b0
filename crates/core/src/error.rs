use crate::frontmatter::FrontmatterError;
use thiserror::Error;

/// Position inside the markdown source, used when reporting parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while rendering a post.
///
/// Tree rewrite passes are total and never produce errors; everything here
/// originates in a collaborator (the markdown parser, the YAML frontmatter
/// parser, the streaming HTML rewriter) or in caller-supplied configuration.
#[derive(Debug, Error)]
pub enum XlogError {
    /// markdown-rs rejected the source document.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The post's YAML frontmatter could not be extracted.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// The streaming HTML rewriter failed on serialized output.
    #[error("Rewrite error: {0}")]
    Rewrite(String),
    /// Rendering options could not be loaded.
    #[error("Config error: {0}")]
    Config(String),
}

impl XlogError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}
