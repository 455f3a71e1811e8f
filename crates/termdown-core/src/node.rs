//! Document tree consumed by the renderer.
//!
//! A parser (html5ever through `termdown`, or any other source) builds this
//! tree once per document. Node kinds are decided at construction time, so
//! the renderer only ever matches over the closed [`NodeKind`] enumeration.

use indexmap::IndexMap;

/// Node kinds understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Text leaf
    Text,
    /// Document root wrapper
    Root,

    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Paragraph,
    /// Generic block container (`div` and unknown sectioning tags)
    Div,
    UnorderedList,
    OrderedList,
    ListItem,
    Preformatted,
    Blockquote,
    LineBreak,
    HorizontalRule,

    /// Generic inline container (`span` and unknown tags)
    Span,
    Anchor,
    Bold,
    Strong,
    Italic,
    Emphasis,
    Code,
    Image,
    Input,

    Style,
    Script,
    IFrame,
}

/// Tags that are not in the table but still read as block containers
const SECTIONING_TAGS: &[&str] = &[
    "article", "section", "header", "footer", "aside", "figure", "figcaption", "main", "nav",
];

impl NodeKind {
    /// Map a canonical tag name to its kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.to_ascii_lowercase().as_str() {
            "h1" => NodeKind::H1,
            "h2" => NodeKind::H2,
            "h3" => NodeKind::H3,
            "h4" => NodeKind::H4,
            "h5" => NodeKind::H5,
            "h6" => NodeKind::H6,
            "p" => NodeKind::Paragraph,
            "div" => NodeKind::Div,
            "ul" => NodeKind::UnorderedList,
            "ol" => NodeKind::OrderedList,
            "li" => NodeKind::ListItem,
            "pre" => NodeKind::Preformatted,
            "blockquote" => NodeKind::Blockquote,
            "br" => NodeKind::LineBreak,
            "hr" => NodeKind::HorizontalRule,
            "span" => NodeKind::Span,
            "a" => NodeKind::Anchor,
            "b" => NodeKind::Bold,
            "strong" => NodeKind::Strong,
            "i" => NodeKind::Italic,
            "em" => NodeKind::Emphasis,
            "code" => NodeKind::Code,
            "img" => NodeKind::Image,
            "input" => NodeKind::Input,
            "style" => NodeKind::Style,
            "script" => NodeKind::Script,
            "iframe" => NodeKind::IFrame,
            _ => return None,
        };
        Some(kind)
    }

    /// Map any tag name to a kind, falling back to `Div` for sectioning
    /// tags and `Span` for everything else
    pub fn for_tag(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_else(|| {
            let lower = tag.to_ascii_lowercase();
            if SECTIONING_TAGS.contains(&lower.as_str()) {
                NodeKind::Div
            } else {
                NodeKind::Span
            }
        })
    }

    /// Canonical tag name, used as the style lookup key
    pub fn tag_name(self) -> &'static str {
        match self {
            NodeKind::Text => "#text",
            NodeKind::Root => "#document",
            NodeKind::H1 => "h1",
            NodeKind::H2 => "h2",
            NodeKind::H3 => "h3",
            NodeKind::H4 => "h4",
            NodeKind::H5 => "h5",
            NodeKind::H6 => "h6",
            NodeKind::Paragraph => "p",
            NodeKind::Div => "div",
            NodeKind::UnorderedList => "ul",
            NodeKind::OrderedList => "ol",
            NodeKind::ListItem => "li",
            NodeKind::Preformatted => "pre",
            NodeKind::Blockquote => "blockquote",
            NodeKind::LineBreak => "br",
            NodeKind::HorizontalRule => "hr",
            NodeKind::Span => "span",
            NodeKind::Anchor => "a",
            NodeKind::Bold => "b",
            NodeKind::Strong => "strong",
            NodeKind::Italic => "i",
            NodeKind::Emphasis => "em",
            NodeKind::Code => "code",
            NodeKind::Image => "img",
            NodeKind::Input => "input",
            NodeKind::Style => "style",
            NodeKind::Script => "script",
            NodeKind::IFrame => "iframe",
        }
    }

    /// Block-level kinds force a line break before and after their content
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::H1
                | NodeKind::H2
                | NodeKind::H3
                | NodeKind::H4
                | NodeKind::H5
                | NodeKind::H6
                | NodeKind::Paragraph
                | NodeKind::Div
                | NodeKind::UnorderedList
                | NodeKind::OrderedList
                | NodeKind::ListItem
                | NodeKind::Preformatted
                | NodeKind::Blockquote
                | NodeKind::LineBreak
                | NodeKind::HorizontalRule
        )
    }

    pub fn is_list(self) -> bool {
        matches!(self, NodeKind::UnorderedList | NodeKind::OrderedList)
    }

    /// Kinds whose subtree never reaches the output
    pub fn is_suppressed(self) -> bool {
        matches!(self, NodeKind::Style | NodeKind::Script | NodeKind::IFrame)
    }
}

/// An element node: kind, original tag name, attributes and owned children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: NodeKind,

    /// Tag name as written in the source (lowercase), e.g. `article` for a
    /// node whose kind fell back to `Div`
    pub tag: String,

    /// Attributes in source order
    pub attrs: IndexMap<String, String>,

    pub children: Vec<Node>,
}

/// A document tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text leaf holding raw inner text
    Text(String),
    Element(Element),
}

impl Node {
    /// Create a text leaf
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create an element of the given kind with its canonical tag name
    pub fn element(kind: NodeKind) -> Self {
        Node::Element(Element {
            kind,
            tag: kind.tag_name().to_string(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        })
    }

    /// Create an element with attributes
    pub fn element_with_attrs(kind: NodeKind, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(kind);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create an element from a tag name, resolving its kind with
    /// [`NodeKind::for_tag`] and keeping the tag for style lookups
    pub fn tagged(tag: &str) -> Self {
        Node::Element(Element {
            kind: NodeKind::for_tag(tag),
            tag: tag.to_ascii_lowercase(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        })
    }

    /// Wrap top-level content in the document root. The root always has
    /// exactly one child.
    pub fn root(content: Node) -> Self {
        let mut root = Self::element(NodeKind::Root);
        root.add_child(content);
        root
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Element(el) => el.kind,
        }
    }

    /// Tag name used for style lookups
    pub fn tag_name(&self) -> &str {
        match self {
            Node::Text(_) => NodeKind::Text.tag_name(),
            Node::Element(el) => &el.tag,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_block(&self) -> bool {
        self.kind().is_block()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) => el
                .attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
        }
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing an existing value. Ignored on text leaves.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Node::Element(el) = self {
            el.attrs.insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    /// Child nodes (always empty for text leaves)
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Element(el) => &el.children,
        }
    }

    /// Add a child node. Ignored on text leaves.
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(el) = self {
            el.children.push(child);
        }
    }

    /// Builder-style [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// All text content from this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }
}
