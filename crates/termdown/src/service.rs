//! TermdownService - the main entry point for rendering documents.

use tracing::debug;

use crate::{Config, Document};
use termdown_core::{render, wrap, GapLimit, Node, RenderOptions, Theme};

/// Renders document trees with a theme and lays them out for a width.
///
/// Rendering never fails: unknown tags fall back to plain content and a
/// width of zero disables wrapping.
#[derive(Debug, Clone, Default)]
pub struct TermdownService {
    config: Config,
}

impl TermdownService {
    /// Create a service with the default theme and options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service from loaded configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Render a tree to styled text, without wrapping
    pub fn render(&self, node: &Node) -> String {
        render(node, &self.config.theme, &self.config.render)
    }

    /// Lay out rendered text for `width` columns
    pub fn wrap(&self, text: &str, width: usize) -> String {
        wrap(text, width, self.config.max_gap.get())
    }

    /// Render a tree and lay it out for `width` columns
    pub fn render_to_width(&self, node: &Node, width: usize) -> String {
        let raw = self.render(node);
        debug!(raw_bytes = raw.len(), width, "laying out rendered tree");
        self.wrap(&raw, width)
    }

    pub fn render_document(&self, document: &Document, width: usize) -> String {
        self.render_to_width(&document.root, width)
    }

    /// Parse HTML and render it for `width` columns
    #[cfg(feature = "html")]
    pub fn render_html(&self, html: &str, width: usize) -> String {
        let document = crate::parse_html(html);
        self.render_document(&document, width)
    }

    pub fn options(&self) -> &RenderOptions {
        &self.config.render
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.config.theme
    }

    pub fn gap_limit(&self) -> GapLimit {
        self.config.max_gap
    }

    pub fn set_gap_limit(&mut self, gaps: usize) -> &mut Self {
        self.config.max_gap = GapLimit::new(gaps);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termdown_core::{strip_ansi, Decoration, NodeKind};

    fn paragraph(text: &str) -> Node {
        Node::element(NodeKind::Paragraph).with_child(Node::text(text))
    }

    #[test]
    fn test_render_to_width_wraps() {
        let service = TermdownService::new();
        let doc = Node::root(paragraph("the quick brown fox jumps over the lazy dog"));
        let text = service.render_to_width(&doc, 10);
        assert!(text.lines().all(|line| strip_ansi(line).chars().count() <= 10));
        assert!(text.starts_with("the quick\nbrown fox"));
    }

    #[test]
    fn test_zero_width_keeps_raw_text() {
        let service = TermdownService::new();
        let doc = Node::root(paragraph("a b"));
        assert_eq!(service.render_to_width(&doc, 0), service.render(&doc));
    }

    #[test]
    fn test_gap_limit_applies() {
        let mut service = TermdownService::new();
        service.set_gap_limit(1);
        assert_eq!(service.gap_limit().get(), 1);
        assert_eq!(service.wrap("a\n\n\n\nb", 80), "a\n\nb");

        service.set_gap_limit(99);
        assert_eq!(service.gap_limit().get(), 10);
    }

    #[test]
    fn test_custom_theme() {
        let mut service = TermdownService::new();
        service
            .theme_mut()
            .insert("p", Decoration::new().prefix("¶ "));
        let text = service.render_to_width(&Node::root(paragraph("text")), 80);
        assert_eq!(text, "¶ text\n\n");
    }

    #[test]
    fn test_with_config() {
        let config = Config::from_toml_str("[settings]\nbullet = \"-\"\n").unwrap();
        let service = TermdownService::with_config(config);
        assert_eq!(service.options().bullet, "-");

        let ul = Node::element(NodeKind::UnorderedList)
            .with_child(Node::element(NodeKind::ListItem).with_child(Node::text("x")));
        assert_eq!(service.render(&ul), "  - x\n");
    }

    #[test]
    fn test_default_theme_styles_links() {
        let service = TermdownService::new();
        let a = Node::element_with_attrs(NodeKind::Anchor, vec![("href", "https://x.io")])
            .with_child(Node::text("click"));
        let text = service.render(&a);
        assert!(text.starts_with("click "));
        assert!(text.contains('\x1b'));
        assert_eq!(strip_ansi(&text), "click https://x.io");
    }
}
