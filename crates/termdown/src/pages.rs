//! Built-in pages shown when there is nothing else to render

use std::fmt::Display;

use crate::Document;
use termdown_core::{Node, NodeKind};

fn text_element(kind: NodeKind, text: &str) -> Node {
    Node::element(kind).with_child(Node::text(text))
}

/// Wrap block content in `html` and `body` elements
fn page(title: &str, blocks: Vec<Node>) -> Document {
    let body = blocks
        .into_iter()
        .fold(Node::tagged("body"), |body, block| body.with_child(block));
    let html = Node::tagged("html").with_child(body);
    Document::new(html, Some(title.to_string()))
}

/// List item made of a lead text, an inline code span and a tail text
fn usage_item(lead: &str, code: &str, tail: &str) -> Node {
    Node::element(NodeKind::ListItem)
        .with_child(Node::text(lead))
        .with_child(text_element(NodeKind::Code, code))
        .with_child(Node::text(tail))
}

/// Start page rendered when no input is given
pub fn default_page() -> Document {
    let usage = Node::element(NodeKind::UnorderedList)
        .with_child(usage_item("pass a file:", "termdown page.html", "to render it."))
        .with_child(usage_item("pipe markup into", "termdown -", "to read stdin."))
        .with_child(usage_item("use", "--width", "to override the terminal width."))
        .with_child(usage_item("use", "--config", "to load a theme from a TOML file."));

    page(
        "termdown",
        vec![
            Node::element(NodeKind::LineBreak),
            text_element(NodeKind::H1, "This is the default page"),
            Node::element(NodeKind::HorizontalRule),
            text_element(NodeKind::Paragraph, "What can I do here?"),
            usage,
            Node::element(NodeKind::HorizontalRule),
        ],
    )
}

/// Page describing a failure, with the same shape as a parsed document
pub fn error_page(err: &dyn Display) -> Document {
    page(
        "Error",
        vec![
            Node::element(NodeKind::LineBreak),
            text_element(NodeKind::H1, "There was an unexpected error"),
            Node::element(NodeKind::HorizontalRule),
            text_element(NodeKind::Div, &format!("Error: {err}")),
        ],
    )
}
