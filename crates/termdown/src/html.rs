//! HTML parsing support.
//!
//! This module parses HTML strings with `scraper` and converts the result
//! into the document tree rendered by `termdown-core`.

use scraper::{ElementRef, Html, Node as ScraperNode};
use tracing::{debug, trace};

use crate::document::Document;
use termdown_core::Node;

/// Parse an HTML string into a [`Document`].
///
/// The returned root has the `<html>` element as its only child. Text that
/// is only whitespace is dropped, as are comments and doctypes. The first
/// `<title>` inside `<head>` supplies the document title and is left out of
/// the tree; a `<title>` anywhere else, such as an SVG caption, is content.
///
/// # Example
///
/// ```rust
/// use termdown::{parse_html, TermdownService};
///
/// let doc = parse_html("<title>Greeting</title><h1>Hello <em>World</em></h1>");
/// assert_eq!(doc.title.as_deref(), Some("Greeting"));
///
/// let service = TermdownService::new();
/// let text = service.render_document(&doc, 80);
/// assert!(text.contains("World"));
/// ```
pub fn parse_html(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let mut title = None;
    let content = scraper_to_node(parsed.root_element(), &mut title);
    debug!(bytes = html.len(), title = ?title, "parsed html document");
    Document::new(content, title)
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef, title: &mut Option<String>) -> Node {
    let mut node = Node::tagged(element.value().name());
    let in_head = element.value().name() == "head";
    for (name, value) in element.value().attrs() {
        node.set_attr(name, value);
    }

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                if !text.text.trim().is_empty() {
                    node.add_child(Node::text(&text.text));
                }
            }
            ScraperNode::Element(el) if in_head && el.name() == "title" => {
                if let (None, Some(title_element)) = (title.as_ref(), ElementRef::wrap(child)) {
                    let text: String = title_element.text().collect();
                    let text = text.trim();
                    if !text.is_empty() {
                        trace!(title = text, "found document title");
                        *title = Some(text.to_string());
                    }
                }
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element, title));
                }
            }
            _ => {}
        }
    }

    node
}
