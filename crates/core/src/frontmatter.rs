use markdown::mdast::Node;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors emitted while reading a post's frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Reads the YAML frontmatter block recognized by the markdown parser.
///
/// Returns an empty object when the document has no frontmatter.
pub fn extract_frontmatter(root: &Node) -> Result<JsonValue, FrontmatterError> {
    let block = root.children().and_then(|children| {
        children.iter().find_map(|child| match child {
            Node::Yaml(yaml) => Some(yaml.value.as_str()),
            _ => None,
        })
    });

    match block {
        Some(block) => parse_yaml_block(block),
        None => Ok(empty()),
    }
}

fn empty() -> JsonValue {
    JsonValue::Object(Default::default())
}

fn parse_yaml_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(empty());
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    let value =
        serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))?;

    match value {
        JsonValue::Null => Ok(empty()),
        JsonValue::Object(_) => Ok(value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ParseOptions, parse_mdast};

    fn frontmatter(input: &str) -> Result<JsonValue, FrontmatterError> {
        let root = parse_mdast(input, &ParseOptions::default()).unwrap();
        extract_frontmatter(&root)
    }

    #[test]
    fn reads_post_metadata() {
        let value = frontmatter("---\ntitle: Hello\ntags:\n  - rust\n  - xlog\n---\n\n# Body").unwrap();
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["tags"][1], "xlog");
    }

    #[test]
    fn missing_block_is_empty_object() {
        let value = frontmatter("# Just a heading").unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn empty_block_is_empty_object() {
        let value = frontmatter("---\n---\nbody").unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn scalar_root_is_rejected() {
        let err = frontmatter("---\njust a string\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidRootType));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = frontmatter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)));
    }
}
