//! Conversion from markdown-rs mdast to the HTML element tree.

use super::{Element, HtmlNode};
use crate::options::RenderOptions;
use markdown::mdast::{self, AlignKind, Node};
use serde::Serialize;
use std::collections::HashMap;
use xlog_core::{Slugger, plain_text, slugify};

/// Heading metadata collected for the table of contents.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading depth in the source (1-6).
    pub depth: u8,
    /// Slugified identifier.
    pub slug: String,
    /// Visible heading text.
    pub text: String,
}

/// Result of converting a markdown tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    /// HTML tree rooted at an `HtmlNode::Root`.
    pub tree: HtmlNode,
    /// Headings in document order.
    pub headings: Vec<HeadingEntry>,
}

/// Converts an mdast tree into an HTML tree.
///
/// Footnote definitions that are referenced somewhere are gathered into a
/// trailing `section.footnotes`, ordered by first reference.
pub fn from_mdast(root: &Node, options: &RenderOptions) -> Converted {
    let mut converter = Converter::new(options);
    converter.collect_definitions(root);

    let mut children = Vec::new();
    converter.convert(root, &mut children, false);
    if let Some(section) = converter.footnote_section() {
        children.push(section);
    }

    Converted {
        tree: HtmlNode::root(children),
        headings: converter.headings,
    }
}

struct LinkDefinition {
    url: String,
    title: Option<String>,
}

struct Converter<'a> {
    options: &'a RenderOptions,
    slugger: Slugger,
    headings: Vec<HeadingEntry>,
    definitions: HashMap<String, LinkDefinition>,
    /// Footnote identifiers in order of first reference.
    footnote_order: Vec<String>,
    footnote_refs: HashMap<String, usize>,
    footnote_bodies: HashMap<String, Vec<HtmlNode>>,
}

impl<'a> Converter<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            slugger: Slugger::new(),
            headings: Vec::new(),
            definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnote_refs: HashMap::new(),
            footnote_bodies: HashMap::new(),
        }
    }

    fn collect_definitions(&mut self, node: &Node) {
        if let Node::Definition(def) = node {
            self.definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| LinkDefinition {
                    url: def.url.clone(),
                    title: def.title.clone(),
                });
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    fn convert_children(&mut self, nodes: &[Node], tight: bool) -> Vec<HtmlNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.convert(node, &mut out, tight);
        }
        out
    }

    fn wrap(&mut self, tag: &str, nodes: &[Node]) -> HtmlNode {
        Element::new(tag)
            .with_children(self.convert_children(nodes, false))
            .into()
    }

    /// Converts one node, appending the result to `out`.
    ///
    /// `tight` is set for the direct children of items in a tight list, whose
    /// paragraphs are unwrapped.
    fn convert(&mut self, node: &Node, out: &mut Vec<HtmlNode>, tight: bool) {
        match node {
            Node::Root(root) => out.extend(self.convert_children(&root.children, false)),
            Node::Paragraph(p) => {
                if tight {
                    out.extend(self.convert_children(&p.children, false));
                } else {
                    out.push(self.wrap("p", &p.children));
                }
            }
            Node::Heading(heading) => out.push(self.heading(node, heading)),
            Node::Text(text) => out.push(HtmlNode::text(text.value.clone())),
            Node::Emphasis(em) => out.push(self.wrap("em", &em.children)),
            Node::Strong(strong) => out.push(self.wrap("strong", &strong.children)),
            Node::Delete(del) => out.push(self.wrap("del", &del.children)),
            Node::InlineCode(code) => out.push(
                Element::new("code")
                    .with_children(vec![HtmlNode::text(code.value.clone())])
                    .into(),
            ),
            Node::Break(_) => out.push(Element::new("br").into()),
            Node::ThematicBreak(_) => out.push(Element::new("hr").into()),
            Node::Code(code) => out.push(code_block(code)),
            Node::Blockquote(quote) => out.push(self.wrap("blockquote", &quote.children)),
            Node::List(list) => out.push(self.list(list)),
            Node::ListItem(item) => out.push(self.list_item(item, false)),
            Node::Table(table) => out.push(self.table(table)),
            Node::TableRow(_) | Node::TableCell(_) => {}
            Node::Link(link) => {
                let mut a = Element::new("a").with_attr("href", link.url.clone());
                if let Some(title) = &link.title {
                    a = a.with_attr("title", title.clone());
                }
                out.push(a.with_children(self.convert_children(&link.children, false)).into());
            }
            Node::Image(img) => out.push(self.image(&img.url, &img.alt, img.title.as_deref())),
            Node::LinkReference(reference) => self.link_reference(reference, out),
            Node::ImageReference(reference) => {
                match self.definitions.get(&reference.identifier) {
                    Some(def) => {
                        let (url, title) = (def.url.clone(), def.title.clone());
                        out.push(self.image(&url, &reference.alt, title.as_deref()));
                    }
                    None => out.push(HtmlNode::text(format!("![{}]", reference.alt))),
                }
            }
            Node::Definition(_) => {}
            Node::Html(html) => {
                if self.options.allow_raw_html {
                    out.push(HtmlNode::Raw(html.value.clone()));
                } else {
                    log::debug!("raw HTML disabled, escaping: {}", html.value);
                    out.push(HtmlNode::text(html.value.clone()));
                }
            }
            Node::FootnoteReference(fnref) => out.push(self.footnote_reference(&fnref.identifier)),
            Node::FootnoteDefinition(def) => {
                let body = self.convert_children(&def.children, false);
                self.footnote_bodies
                    .entry(def.identifier.clone())
                    .or_insert(body);
            }
            Node::Math(math) => out.push(
                Element::new("pre")
                    .with_children(vec![
                        Element::new("code")
                            .with_class("language-math")
                            .with_class("math-display")
                            .with_children(vec![HtmlNode::text(math.value.clone())])
                            .into(),
                    ])
                    .into(),
            ),
            Node::InlineMath(math) => out.push(
                Element::new("code")
                    .with_class("language-math")
                    .with_class("math-inline")
                    .with_children(vec![HtmlNode::text(math.value.clone())])
                    .into(),
            ),
            Node::Yaml(_) | Node::Toml(_) => {}
            _ => {
                log::warn!("Unhandled markdown node type: {:?}", node);
            }
        }
    }

    fn heading(&mut self, node: &Node, heading: &mdast::Heading) -> HtmlNode {
        let text = plain_text(node).trim().to_string();
        let slug = self.slugger.slug(&text);
        self.headings.push(HeadingEntry {
            depth: heading.depth,
            slug: slug.clone(),
            text,
        });

        let mut children = self.convert_children(&heading.children, false);
        if self.options.heading_autolinks && !contains_link(&heading.children) {
            children = vec![
                Element::new("a")
                    .with_attr("href", format!("#{}", slug))
                    .with_children(children)
                    .into(),
            ];
        }

        let mut el = Element::new(format!("h{}", heading.depth));
        if self.options.heading_ids {
            el = el.with_attr("id", slug);
        }
        el.with_children(children).into()
    }

    fn list(&mut self, list: &mdast::List) -> HtmlNode {
        let loose = list.spread
            || list
                .children
                .iter()
                .any(|child| matches!(child, Node::ListItem(item) if item.spread));

        let mut el = Element::new(if list.ordered { "ol" } else { "ul" });
        if list.ordered
            && let Some(start) = list.start
            && start != 1
        {
            el = el.with_attr("start", start.to_string());
        }
        if list
            .children
            .iter()
            .any(|child| matches!(child, Node::ListItem(item) if item.checked.is_some()))
        {
            el.add_class("contains-task-list");
        }

        for child in &list.children {
            match child {
                Node::ListItem(item) => {
                    let li = self.list_item(item, !loose);
                    el.children.push(li);
                }
                other => self.convert(other, &mut el.children, false),
            }
        }
        el.into()
    }

    fn list_item(&mut self, item: &mdast::ListItem, tight: bool) -> HtmlNode {
        let mut li = Element::new("li");
        li.children = self.convert_children(&item.children, tight);

        if let Some(checked) = item.checked {
            li.add_class("task-list-item");
            let checkbox: HtmlNode = Element::new("input")
                .with_attr("type", "checkbox")
                .with_flag("checked", checked)
                .with_flag("disabled", true)
                .into();
            match li.children.first_mut() {
                Some(HtmlNode::Element(p)) if p.tag_name == "p" => p.children.insert(0, checkbox),
                _ => li.children.insert(0, checkbox),
            }
        }
        li.into()
    }

    fn table(&mut self, table: &mdast::Table) -> HtmlNode {
        let mut rows = table.children.iter().filter_map(|row| match row {
            Node::TableRow(row) => Some(row),
            _ => None,
        });

        let mut el = Element::new("table");
        if let Some(head) = rows.next() {
            let tr = self.table_row(head, "th", &table.align);
            el.children
                .push(Element::new("thead").with_children(vec![tr]).into());
        }

        let body: Vec<HtmlNode> = rows
            .map(|row| self.table_row(row, "td", &table.align))
            .collect();
        if !body.is_empty() {
            el.children
                .push(Element::new("tbody").with_children(body).into());
        }
        el.into()
    }

    fn table_row(&mut self, row: &mdast::TableRow, cell_tag: &str, align: &[AlignKind]) -> HtmlNode {
        let mut tr = Element::new("tr");
        for (i, cell) in row.children.iter().enumerate() {
            let Node::TableCell(cell) = cell else {
                continue;
            };
            let mut td = Element::new(cell_tag);
            let align = match align.get(i) {
                Some(AlignKind::Left) => Some("left"),
                Some(AlignKind::Right) => Some("right"),
                Some(AlignKind::Center) => Some("center"),
                Some(AlignKind::None) | None => None,
            };
            if let Some(align) = align {
                td = td.with_attr("align", align);
            }
            td.children = self.convert_children(&cell.children, false);
            tr.children.push(td.into());
        }
        tr.into()
    }

    fn image(&self, url: &str, alt: &str, title: Option<&str>) -> HtmlNode {
        let mut img = Element::new("img").with_attr("src", url).with_attr("alt", alt);
        if let Some(title) = title {
            img = img.with_attr("title", title);
        }
        if self.options.lazy_images {
            img = img.with_attr("loading", "lazy");
        }
        img.into()
    }

    fn link_reference(&mut self, reference: &mdast::LinkReference, out: &mut Vec<HtmlNode>) {
        let children = self.convert_children(&reference.children, false);
        match self.definitions.get(&reference.identifier) {
            Some(def) => {
                let mut a = Element::new("a").with_attr("href", def.url.clone());
                if let Some(title) = &def.title {
                    a = a.with_attr("title", title.clone());
                }
                out.push(a.with_children(children).into());
            }
            None => {
                out.push(HtmlNode::text("["));
                out.extend(children);
                out.push(HtmlNode::text("]"));
            }
        }
    }

    fn footnote_reference(&mut self, identifier: &str) -> HtmlNode {
        if !self.footnote_refs.contains_key(identifier) {
            self.footnote_order.push(identifier.to_string());
        }
        let count = self.footnote_refs.entry(identifier.to_string()).or_insert(0);
        *count += 1;
        let count = *count;

        let ordinal = self
            .footnote_order
            .iter()
            .position(|id| id == identifier)
            .map_or(1, |index| index + 1);
        let safe_id = footnote_id(identifier, ordinal);
        let ref_id = if count == 1 {
            format!("user-content-fnref-{}", safe_id)
        } else {
            format!("user-content-fnref-{}-{}", safe_id, count)
        };

        Element::new("sup")
            .with_children(vec![
                Element::new("a")
                    .with_attr("href", format!("#user-content-fn-{}", safe_id))
                    .with_attr("id", ref_id)
                    .with_flag("data-footnote-ref", true)
                    .with_attr("aria-describedby", "footnote-label")
                    .with_children(vec![HtmlNode::text(ordinal.to_string())])
                    .into(),
            ])
            .into()
    }

    fn footnote_section(&mut self) -> Option<HtmlNode> {
        let mut items = Vec::new();
        for (index, identifier) in self.footnote_order.iter().enumerate() {
            let Some(mut body) = self.footnote_bodies.remove(identifier) else {
                continue;
            };
            let safe_id = footnote_id(identifier, index + 1);
            let refs = self.footnote_refs.get(identifier).copied().unwrap_or(1);

            let mut backrefs = Vec::new();
            for n in 1..=refs {
                let target = if n == 1 {
                    format!("#user-content-fnref-{}", safe_id)
                } else {
                    format!("#user-content-fnref-{}-{}", safe_id, n)
                };
                backrefs.push(HtmlNode::text(" "));
                backrefs.push(
                    Element::new("a")
                        .with_attr("href", target)
                        .with_flag("data-footnote-backref", true)
                        .with_attr("aria-label", format!("Back to reference {}", n))
                        .with_class("data-footnote-backref")
                        .with_children(vec![HtmlNode::text("↩")])
                        .into(),
                );
            }
            match body.last_mut() {
                Some(HtmlNode::Element(p)) if p.tag_name == "p" => p.children.extend(backrefs),
                _ => body.extend(backrefs),
            }

            items.push(
                Element::new("li")
                    .with_attr("id", format!("user-content-fn-{}", safe_id))
                    .with_children(body)
                    .into(),
            );
        }

        if items.is_empty() {
            return None;
        }

        Some(
            Element::new("section")
                .with_class("footnotes")
                .with_flag("data-footnotes", true)
                .with_children(vec![
                    Element::new("h2")
                        .with_attr("id", "footnote-label")
                        .with_class("sr-only")
                        .with_children(vec![HtmlNode::text("Footnotes")])
                        .into(),
                    Element::new("ol").with_children(items).into(),
                ])
                .into(),
        )
    }
}

fn code_block(code: &mdast::Code) -> HtmlNode {
    let mut inner = Element::new("code");
    if let Some(lang) = &code.lang {
        inner.add_class(format!("language-{}", lang));
    }
    inner.children.push(HtmlNode::text(code.value.clone()));
    Element::new("pre").with_children(vec![inner.into()]).into()
}

fn footnote_id(identifier: &str, ordinal: usize) -> String {
    let slug = slugify(identifier);
    if slug.is_empty() {
        ordinal.to_string()
    } else {
        slug
    }
}

fn contains_link(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Link(_) | Node::LinkReference(_) => true,
        Node::Html(html) => {
            let lower = html.value.to_ascii_lowercase();
            lower.contains("<a ") || lower.contains("<a>")
        }
        other => other.children().is_some_and(|c| contains_link(c)),
    })
}
