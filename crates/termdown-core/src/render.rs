//! Document tree rendering
//!
//! Walks the tree depth-first and produces one string with embedded escape
//! sequences. Block kinds start on a fresh line and end with a newline,
//! adjacent inline siblings are joined by a single space. Wrapping to a
//! width is left to the layout pass.

use tracing::{debug, trace};

use crate::node::{Node, NodeKind};
use crate::options::RenderOptions;
use crate::style::{self, Decoration, StyleResolver};

/// Numbering mode threaded through list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListCounter {
    /// Unordered list: items get the bullet glyph
    #[default]
    Bullet,
    /// Ordered list: the ordinal of the next item
    Ordinal(usize),
}

impl ListCounter {
    fn advance(self) -> Self {
        match self {
            ListCounter::Bullet => ListCounter::Bullet,
            ListCounter::Ordinal(n) => ListCounter::Ordinal(n.saturating_add(1)),
        }
    }
}

/// Render a document tree to styled, unwrapped text
pub fn render(node: &Node, resolver: &dyn StyleResolver, options: &RenderOptions) -> String {
    let renderer = Renderer { resolver, options };
    let state = renderer.render_node(node, RenderState::new(ListCounter::Bullet));
    debug!(bytes = state.out.len(), "rendered document tree");
    state.out
}

/// Output accumulated so far plus the list counter handed to the next sibling
struct RenderState {
    out: String,
    counter: ListCounter,
}

impl RenderState {
    fn new(counter: ListCounter) -> Self {
        Self {
            out: String::new(),
            counter,
        }
    }

    fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

struct Renderer<'a> {
    resolver: &'a dyn StyleResolver,
    options: &'a RenderOptions,
}

impl Renderer<'_> {
    fn render_node(&self, node: &Node, mut state: RenderState) -> RenderState {
        let kind = node.kind();
        if kind.is_block() {
            state.ensure_newline();
        }

        let incoming = state.counter;
        let scope = match kind {
            NodeKind::UnorderedList => ListCounter::Bullet,
            NodeKind::OrderedList => ListCounter::Ordinal(start_ordinal(node)),
            _ => incoming,
        };

        let (content, counter) = match node {
            Node::Text(text) => (text.clone(), scope),
            Node::Element(_) if kind.is_suppressed() => {
                trace!(tag = node.tag_name(), "skipping suppressed subtree");
                (String::new(), scope)
            }
            Node::Element(el) => self.render_children(&el.children, scope),
        };

        // A list's own numbering never leaks to its siblings
        state.counter = if kind.is_list() { incoming } else { counter };

        let fragment = self.format(node, content, state.counter);
        state.out.push_str(&fragment);

        if kind == NodeKind::ListItem {
            state.counter = state.counter.advance();
        } else if kind.is_block() {
            state.out.push('\n');
        }

        state
    }

    /// Render children into a fresh accumulator seeded with `counter` and
    /// return the joined text with the counter left by the last child
    fn render_children(&self, children: &[Node], counter: ListCounter) -> (String, ListCounter) {
        let state = children
            .iter()
            .enumerate()
            .fold(RenderState::new(counter), |state, (i, child)| {
                let before = state.out.len();
                let mut state = self.render_node(child, state);
                let produced = state.out.len() > before;
                let next_is_inline = children.get(i + 1).is_some_and(|next| !next.is_block());
                if produced && !child.is_block() && next_is_inline {
                    state.out.push(' ');
                }
                state
            });
        (state.out, state.counter)
    }

    fn format(&self, node: &Node, content: String, counter: ListCounter) -> String {
        let Node::Element(el) = node else {
            return self.decorate(node.tag_name(), content);
        };

        match el.kind {
            NodeKind::ListItem => {
                let indent = " ".repeat(self.options.list_indent);
                match counter {
                    ListCounter::Ordinal(n) => format!("{indent}{n}. {content}"),
                    ListCounter::Bullet => format!("{indent}{} {content}", self.options.bullet),
                }
            }
            NodeKind::UnorderedList | NodeKind::OrderedList => content,
            NodeKind::Anchor => match node.attr("href") {
                Some(href) => {
                    let link = self.decorate(NodeKind::Anchor.tag_name(), href.to_string());
                    format!("{content} {link}")
                }
                None => content,
            },
            NodeKind::Image => style::image_placeholder(node.attr("alt").unwrap_or_default()),
            NodeKind::Blockquote => {
                if content.trim().is_empty() {
                    return content;
                }
                match self.resolver.resolve(NodeKind::Blockquote.tag_name()) {
                    Some(decoration) => decoration.apply(&content),
                    None => Decoration::blockquote().apply(&content),
                }
            }
            NodeKind::Preformatted => {
                if content.is_empty() {
                    content
                } else {
                    style::preformatted(&content)
                }
            }
            NodeKind::HorizontalRule => style::faint(
                &self
                    .options
                    .hr_glyph
                    .to_string()
                    .repeat(self.options.hr_width),
            ),
            NodeKind::LineBreak => style::faint(" "),
            NodeKind::Style | NodeKind::Script | NodeKind::IFrame => String::new(),
            NodeKind::Input => style::input_field(
                node.attr("placeholder").unwrap_or_default(),
                self.options.input_width,
            ),
            _ => self.decorate(&el.tag, content),
        }
    }

    /// Wrap `content` with the decoration registered for `tag`, if any.
    /// Blank content is never decorated.
    fn decorate(&self, tag: &str, content: String) -> String {
        if content.trim().is_empty() {
            return content;
        }
        match self.resolver.resolve(tag) {
            Some(decoration) if !decoration.is_plain() => decoration.apply(&content),
            _ => content,
        }
    }
}

/// First ordinal of an ordered list, honouring a positive `start` attribute
fn start_ordinal(node: &Node) -> usize {
    node.attr("start")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;
    use crate::style::{NoStyles, Theme};

    fn plain(node: &Node) -> String {
        render(node, &NoStyles, &RenderOptions::default())
    }

    fn with_text(kind: NodeKind, text: &str) -> Node {
        Node::element(kind).with_child(Node::text(text))
    }

    fn list(kind: NodeKind, items: &[&str]) -> Node {
        items.iter().fold(Node::element(kind), |acc, item| {
            acc.with_child(with_text(NodeKind::ListItem, item))
        })
    }

    #[test]
    fn test_ordered_list() {
        let doc = Node::root(list(NodeKind::OrderedList, &["First", "Second"]));
        assert_eq!(plain(&doc), "  1. First\n  2. Second\n\n");
    }

    #[test]
    fn test_unordered_list() {
        let doc = list(NodeKind::UnorderedList, &["One", "Two"]);
        assert_eq!(plain(&doc), "  • One\n  • Two\n");
    }

    #[test]
    fn test_ordered_list_counts_every_item() {
        let items: Vec<String> = (1..=12).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let out = plain(&list(NodeKind::OrderedList, &refs));
        let ordinals: Vec<String> = out
            .lines()
            .map(|line| line.trim_start().split('.').next().unwrap_or("").to_string())
            .collect();
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(ordinals, expected);
    }

    #[test]
    fn test_ordered_list_start_attribute() {
        let mut ol = list(NodeKind::OrderedList, &["a", "b"]);
        ol.set_attr("start", "3");
        assert_eq!(plain(&ol), "  3. a\n  4. b\n");

        ol.set_attr("start", "zero");
        assert_eq!(plain(&ol), "  1. a\n  2. b\n");
    }

    #[test]
    fn test_ordered_list_start_at_max_does_not_overflow() {
        let mut ol = list(NodeKind::OrderedList, &["a", "b"]);
        ol.set_attr("start", &usize::MAX.to_string());
        let out = plain(&ol);
        assert_eq!(out, format!("  {max}. a\n  {max}. b\n", max = usize::MAX));
    }

    #[test]
    fn test_plain_decoration_leaves_content_alone() {
        let theme = Theme::empty().with("p", Decoration::new());
        let p = with_text(NodeKind::Paragraph, "text");
        assert_eq!(render(&p, &theme, &RenderOptions::default()), "text\n");
    }

    #[test]
    fn test_nested_list_keeps_outer_numbering() {
        let first = Node::element(NodeKind::ListItem)
            .with_child(Node::text("A"))
            .with_child(list(NodeKind::UnorderedList, &["x", "y"]));
        let ol = Node::element(NodeKind::OrderedList)
            .with_child(first)
            .with_child(with_text(NodeKind::ListItem, "B"));

        assert_eq!(plain(&ol), "  1. A\n  • x\n  • y\n  2. B\n");
    }

    #[test]
    fn test_sibling_lists_are_independent() {
        let div = Node::element(NodeKind::Div)
            .with_child(list(NodeKind::OrderedList, &["a", "b"]))
            .with_child(list(NodeKind::UnorderedList, &["c"]))
            .with_child(list(NodeKind::OrderedList, &["d"]));
        assert_eq!(plain(&div), "  1. a\n  2. b\n  • c\n  1. d\n\n");
    }

    #[test]
    fn test_inline_siblings_are_spaced() {
        let p = Node::element(NodeKind::Paragraph)
            .with_child(Node::text("Hello"))
            .with_child(with_text(NodeKind::Bold, "World"));
        assert_eq!(plain(&p), "Hello World\n");
    }

    #[test]
    fn test_empty_inline_sibling_adds_no_space() {
        let p = Node::element(NodeKind::Paragraph)
            .with_child(Node::element(NodeKind::Span))
            .with_child(Node::text("a"))
            .with_child(Node::element(NodeKind::Span))
            .with_child(Node::text("b"));
        assert_eq!(plain(&p), "a b\n");
    }

    #[test]
    fn test_blocks_start_on_new_lines() {
        let div = Node::element(NodeKind::Div)
            .with_child(with_text(NodeKind::Paragraph, "a"))
            .with_child(with_text(NodeKind::Paragraph, "b"));
        assert_eq!(plain(&div), "a\nb\n\n");
    }

    #[test]
    fn test_inline_then_block() {
        let div = Node::element(NodeKind::Div)
            .with_child(Node::text("lead"))
            .with_child(with_text(NodeKind::H2, "Heading"));
        assert_eq!(plain(&div), "lead\nHeading\n\n");
    }

    #[test]
    fn test_anchor_with_href() {
        let a = Node::element_with_attrs(NodeKind::Anchor, vec![("href", "https://x.io")])
            .with_child(Node::text("click"));

        assert_eq!(plain(&a), "click https://x.io");

        let styled = render(&a, &Theme::default(), &RenderOptions::default());
        assert!(styled.starts_with("click "));
        assert!(styled.contains('\x1b'));
        assert_eq!(strip_ansi(&styled), "click https://x.io");
    }

    #[test]
    fn test_anchor_without_href() {
        let a = with_text(NodeKind::Anchor, "click");
        assert_eq!(plain(&a), "click");
        assert_eq!(render(&a, &Theme::default(), &RenderOptions::default()), "click");
    }

    #[test]
    fn test_image_placeholder() {
        let img = Node::element_with_attrs(NodeKind::Image, vec![("alt", "A cat")])
            .with_child(Node::text("ignored"));
        let out = plain(&img);
        assert_eq!(strip_ansi(&out), "[Image: A cat]");
        assert!(out.contains('\x1b'));

        let bare = plain(&Node::element(NodeKind::Image));
        assert_eq!(strip_ansi(&bare), "[Image: ]");
    }

    #[test]
    fn test_suppressed_content_never_rendered() {
        for kind in [NodeKind::Style, NodeKind::Script, NodeKind::IFrame] {
            let inner = Node::element(NodeKind::Paragraph).with_child(Node::text("secret"));
            let doc = Node::element(NodeKind::Div)
                .with_child(Node::text("visible"))
                .with_child(Node::element(kind).with_child(Node::text("hidden")).with_child(inner));
            let out = plain(&doc);
            assert!(out.contains("visible"));
            assert!(!out.contains("hidden"), "{kind:?} leaked");
            assert!(!out.contains("secret"), "{kind:?} leaked");
        }
    }

    #[test]
    fn test_horizontal_rule() {
        let out = plain(&Node::element(NodeKind::HorizontalRule));
        assert_eq!(strip_ansi(&out), format!("{}\n", "─".repeat(50)));
    }

    #[test]
    fn test_line_break() {
        let p = Node::element(NodeKind::Paragraph)
            .with_child(Node::text("a"))
            .with_child(Node::element(NodeKind::LineBreak))
            .with_child(Node::text("b"));
        assert_eq!(strip_ansi(&plain(&p)), "a\n \nb\n");
    }

    #[test]
    fn test_preformatted_margin() {
        let pre = with_text(NodeKind::Preformatted, "let x = 1;\nlet y = 2;");
        assert_eq!(plain(&pre), "\n  let x = 1;\n  let y = 2;\n\n");
    }

    #[test]
    fn test_blockquote_falls_back_to_border() {
        let quote = Node::element(NodeKind::Blockquote)
            .with_child(with_text(NodeKind::Paragraph, "quoted"));
        assert_eq!(strip_ansi(&plain(&quote)), "  │ quoted\n\n");
    }

    #[test]
    fn test_blockquote_uses_resolver() {
        let theme = Theme::empty().with("blockquote", Decoration::new().prefix("> "));
        let quote = with_text(NodeKind::Blockquote, "quoted");
        assert_eq!(render(&quote, &theme, &RenderOptions::default()), "> quoted\n");
    }

    #[test]
    fn test_input_field() {
        let input = Node::element_with_attrs(NodeKind::Input, vec![("placeholder", "Search")])
            .with_child(Node::text("ignored"));
        let out = strip_ansi(&plain(&input)).into_owned();
        assert_eq!(out, format!("█Search{}", "█".repeat(10)));
    }

    #[test]
    fn test_decoration_by_tag_name() {
        let theme = Theme::empty()
            .with("h1", Decoration::new().prefix("# "))
            .with("article", Decoration::new().prefix("§ "))
            .with("#text", Decoration::new().suffix("!"));

        let h1 = with_text(NodeKind::H1, "Title");
        assert_eq!(render(&h1, &theme, &RenderOptions::default()), "# Title!\n");

        let article = Node::tagged("article").with_child(with_text(NodeKind::Paragraph, "body"));
        assert_eq!(
            render(&article, &theme, &RenderOptions::default()),
            "§ body!\n\n"
        );
    }

    #[test]
    fn test_blank_content_not_decorated() {
        let theme = Theme::empty().with("b", Decoration::new().bold().prefix("*"));
        let b = with_text(NodeKind::Bold, "   ");
        assert_eq!(render(&b, &theme, &RenderOptions::default()), "   ");
        assert_eq!(render(&Node::element(NodeKind::Bold), &theme, &RenderOptions::default()), "");
    }

    #[test]
    fn test_custom_options() {
        let options = RenderOptions {
            bullet: "-".to_string(),
            list_indent: 0,
            hr_glyph: '=',
            hr_width: 3,
            input_width: 2,
        };
        let ul = list(NodeKind::UnorderedList, &["x"]);
        assert_eq!(render(&ul, &NoStyles, &options), "- x\n");
        let hr = render(&Node::element(NodeKind::HorizontalRule), &NoStyles, &options);
        assert_eq!(strip_ansi(&hr), "===\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = Node::root(
            Node::element(NodeKind::Div)
                .with_child(with_text(NodeKind::H1, "Title"))
                .with_child(list(NodeKind::OrderedList, &["a", "b"]))
                .with_child(Node::element_with_attrs(NodeKind::Anchor, vec![("href", "/x")])),
        );
        let theme = Theme::default();
        let options = RenderOptions::default();
        assert_eq!(render(&doc, &theme, &options), render(&doc, &theme, &options));
    }

    #[test]
    fn test_empty_root() {
        let doc = Node::root(Node::element(NodeKind::Div));
        assert_eq!(plain(&doc), "\n\n");
    }
}
