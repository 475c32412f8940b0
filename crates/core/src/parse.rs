//! Markdown parsing and mdast transform hooks.

use crate::{SourceLocation, XlogError};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs (tables, task lists, footnotes, ...).
    pub gfm: bool,
    /// Enable math constructs (`$inline$` and `$$block$$`).
    pub math: bool,
    /// Parse embedded HTML into `Html` nodes.
    pub raw_html: bool,
    /// Recognize a leading YAML frontmatter block.
    pub frontmatter: bool,
}

impl ParseOptions {
    /// Defaults used for xLog posts.
    pub const fn post() -> Self {
        Self {
            gfm: true,
            math: false,
            raw_html: true,
            frontmatter: true,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::post()
    }
}

/// Trait for mutating the parsed mdast before it is converted to HTML.
pub trait AstTransform: Send + Sync {
    /// Mutate the parsed markdown AST in place.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node) + Send + Sync,
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Parsing pipeline: markdown-rs followed by an ordered list of mdast transforms.
pub struct ParserPipeline {
    options: ParseOptions,
    ast_transforms: Vec<Box<dyn AstTransform>>,
}

impl ParserPipeline {
    /// Create a new pipeline from core parse options.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ast_transforms: Vec::new(),
        }
    }

    /// Add an AST transform. Transforms run in insertion order.
    pub fn add_ast_transform<T: AstTransform + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Parse markdown into mdast and run every transform over it.
    pub fn parse(&self, input: &str) -> Result<Node, XlogError> {
        let mut root = parse_mdast(input, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root);
        }
        Ok(root)
    }
}

/// Parse markdown into an mdast tree using core options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, XlogError> {
    parse_mdast_with_options(input, &options.to_markdown())
}

/// Parse markdown into an mdast tree using markdown-rs `ParseOptions`.
pub fn parse_mdast_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, XlogError> {
    markdown::to_mdast(input, options).map_err(|err| XlogError::Parse {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast::Text;

    #[test]
    fn parses_gfm_tables_by_default() {
        let root = parse_mdast("| a |\n|---|\n| 1 |\n", &ParseOptions::default()).unwrap();
        let children = root.children().unwrap();
        assert!(matches!(children[0], Node::Table(_)));
    }

    #[test]
    fn raw_html_disabled_keeps_markup_as_text() {
        let options = ParseOptions {
            raw_html: false,
            ..ParseOptions::default()
        };
        let root = parse_mdast("<b>hi</b>", &options).unwrap();
        let children = root.children().unwrap();
        match &children[0] {
            Node::Paragraph(p) => assert!(p.children.iter().all(|c| matches!(c, Node::Text(_)))),
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn pipeline_runs_transforms_in_order() {
        let mut pipeline = ParserPipeline::new(ParseOptions::default());
        pipeline.add_ast_transform(|root: &mut Node| {
            if let Some(children) = root.children_mut() {
                children.push(Node::Text(Text {
                    value: "first".into(),
                    position: None,
                }));
            }
        });
        pipeline.add_ast_transform(|root: &mut Node| {
            if let Some(children) = root.children_mut() {
                children.push(Node::Text(Text {
                    value: "second".into(),
                    position: None,
                }));
            }
        });
        let root = pipeline.parse("para").unwrap();
        let values: Vec<_> = root
            .children()
            .unwrap()
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec!["first", "second"]);
    }
}
