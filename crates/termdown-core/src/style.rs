//! Style resolution and text decoration.
//!
//! The renderer asks a [`StyleResolver`] for the [`Decoration`] registered
//! under a tag name and wraps the node's content with it. Absence means the
//! content passes through untouched.

use crossterm::style::{Attribute, ContentStyle};

use crate::ansi::display_width;
use indexmap::IndexMap;

pub use crossterm::style::Color;

const INPUT_GLYPH: &str = "█";
const INPUT_COLOR: Color = Color::Rgb {
    r: 0x24,
    g: 0x24,
    b: 0x24,
};

/// Maps a tag name to an optional decoration
pub trait StyleResolver {
    fn resolve(&self, tag: &str) -> Option<&Decoration>;
}

/// A resolver that never decorates anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStyles;

impl StyleResolver for NoStyles {
    fn resolve(&self, _tag: &str) -> Option<&Decoration> {
        None
    }
}

/// Line set used to draw borders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BorderType {
    #[default]
    Normal,
    Rounded,
    Thick,
    Double,
    /// Borders take up space but draw blanks
    Hidden,
}

struct BorderGlyphs {
    horizontal: &'static str,
    vertical: &'static str,
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
}

impl BorderType {
    /// Parse a border type name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(BorderType::Normal),
            "rounded" => Some(BorderType::Rounded),
            "thick" => Some(BorderType::Thick),
            "double" => Some(BorderType::Double),
            "hidden" => Some(BorderType::Hidden),
            _ => None,
        }
    }

    fn glyphs(self) -> BorderGlyphs {
        let [horizontal, vertical, top_left, top_right, bottom_left, bottom_right] = match self {
            BorderType::Normal => ["─", "│", "┌", "┐", "└", "┘"],
            BorderType::Rounded => ["─", "│", "╭", "╮", "╰", "╯"],
            BorderType::Thick => ["━", "┃", "┏", "┓", "┗", "┛"],
            BorderType::Double => ["═", "║", "╔", "╗", "╚", "╝"],
            BorderType::Hidden => [" "; 6],
        };
        BorderGlyphs {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }
}

/// Horizontal placement of lines inside a decorated block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Parse an alignment name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    /// Split `slack` columns into the space before and after a line
    fn split(self, slack: usize) -> (usize, usize) {
        match self {
            Align::Left => (0, slack),
            Align::Center => (slack / 2, slack - slack / 2),
            Align::Right => (slack, 0),
        }
    }
}

/// Affixes, box decoration and terminal styling applied around content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Colours and attributes, emitted as SGR escape sequences
    pub style: ContentStyle,

    pub prefix: String,
    pub suffix: String,

    pub border_left: bool,
    pub border_right: bool,
    pub border_top: bool,
    pub border_bottom: bool,
    pub border_type: BorderType,
    pub border_color: Option<Color>,

    pub align: Align,

    /// Columns between the border and the content
    pub padding_left: usize,
    pub padding_right: usize,
    /// Blank rows inside the border
    pub padding_top: usize,
    pub padding_bottom: usize,

    /// Columns outside the border
    pub margin_left: usize,
    pub margin_right: usize,
    /// Empty lines before the content
    pub margin_top: usize,
    /// Empty lines after the content
    pub margin_bottom: usize,
}

impl Decoration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.style.attributes.set(attribute);
        self
    }

    pub fn bold(self) -> Self {
        self.with_attribute(Attribute::Bold)
    }

    pub fn italic(self) -> Self {
        self.with_attribute(Attribute::Italic)
    }

    pub fn faint(self) -> Self {
        self.with_attribute(Attribute::Dim)
    }

    pub fn underline(self) -> Self {
        self.with_attribute(Attribute::Underlined)
    }

    pub fn strikethrough(self) -> Self {
        self.with_attribute(Attribute::CrossedOut)
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.style.foreground_color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background_color = Some(color);
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn border_left(mut self, color: Option<Color>) -> Self {
        self.border_left = true;
        self.border_color = color;
        self
    }

    /// Draw all four borders with the given line set
    pub fn border(mut self, border_type: BorderType, color: Option<Color>) -> Self {
        self.border_left = true;
        self.border_right = true;
        self.border_top = true;
        self.border_bottom = true;
        self.border_type = border_type;
        self.border_color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn padding_left(mut self, columns: usize) -> Self {
        self.padding_left = columns;
        self
    }

    pub fn margin_left(mut self, columns: usize) -> Self {
        self.margin_left = columns;
        self
    }

    pub fn margin_vertical(mut self, lines: usize) -> Self {
        self.margin_top = lines;
        self.margin_bottom = lines;
        self
    }

    /// Bordered, indented look used for quotations
    pub fn blockquote() -> Self {
        Self::new().border_left(None).padding_left(1).margin_left(2)
    }

    /// Whether this decoration changes anything at all
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Wrap `content` with this decoration.
    ///
    /// Every line is painted on its own so that each output line carries a
    /// complete set of escape codes. A single trailing newline of `content`
    /// stays outside the decoration.
    ///
    /// Lines are padded to a common width only when something needs it: a
    /// right or horizontal border, or centred and right alignment.
    pub fn apply(&self, content: &str) -> String {
        let text = format!("{}{}{}", self.prefix, content, self.suffix);
        let (body, trailing_newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text.as_str(), false),
        };
        let lines: Vec<&str> = body.split('\n').collect();

        let boxed =
            self.border_right || self.border_top || self.border_bottom || self.align != Align::Left;
        let inner = if boxed {
            lines.iter().map(|line| display_width(line)).max().unwrap_or(0)
        } else {
            0
        };

        let glyphs = self.border_type.glyphs();
        let left = self.left_gutter(glyphs.vertical);
        let right = self.right_gutter(glyphs.vertical);
        let blank_row = format!("{left}{}{right}", " ".repeat(inner));

        let mut rows = Vec::with_capacity(lines.len() + 4);
        if self.border_top {
            rows.push(self.edge(&glyphs, glyphs.top_left, glyphs.top_right, inner));
        }
        rows.extend(std::iter::repeat(blank_row.clone()).take(self.padding_top));
        for line in lines {
            let slack = if boxed { inner.saturating_sub(display_width(line)) } else { 0 };
            let (before, after) = self.align.split(slack);
            rows.push(format!(
                "{left}{}{}{}{right}",
                " ".repeat(before),
                self.paint(line),
                " ".repeat(after)
            ));
        }
        rows.extend(std::iter::repeat(blank_row).take(self.padding_bottom));
        if self.border_bottom {
            rows.push(self.edge(&glyphs, glyphs.bottom_left, glyphs.bottom_right, inner));
        }

        let mut out = String::with_capacity(text.len() + 16);
        out.push_str(&"\n".repeat(self.margin_top));
        out.push_str(&rows.join("\n"));
        out.push_str(&"\n".repeat(self.margin_bottom));
        if trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Apply only the colours and attributes, without affixes or box
    pub fn paint(&self, text: &str) -> String {
        paint_with(self.style, text)
    }

    fn paint_border(&self, glyph: &str) -> String {
        let mut border = ContentStyle::new();
        border.foreground_color = self.border_color;
        paint_with(border, glyph)
    }

    fn left_gutter(&self, vertical: &str) -> String {
        let mut gutter = " ".repeat(self.margin_left);
        if self.border_left {
            gutter.push_str(&self.paint_border(vertical));
        }
        gutter.push_str(&" ".repeat(self.padding_left));
        gutter
    }

    fn right_gutter(&self, vertical: &str) -> String {
        let mut gutter = " ".repeat(self.padding_right);
        if self.border_right {
            gutter.push_str(&self.paint_border(vertical));
        }
        gutter.push_str(&" ".repeat(self.margin_right));
        gutter
    }

    /// Top or bottom border row spanning padding and content
    fn edge(&self, glyphs: &BorderGlyphs, left: &str, right: &str, inner: usize) -> String {
        let span = self.padding_left + inner + self.padding_right;
        let mut line = String::new();
        if self.border_left {
            line.push_str(left);
        }
        line.push_str(&glyphs.horizontal.repeat(span));
        if self.border_right {
            line.push_str(right);
        }
        format!("{}{}", " ".repeat(self.margin_left), self.paint_border(&line))
    }
}

fn paint_with(style: ContentStyle, text: &str) -> String {
    if text.is_empty() || style == ContentStyle::default() {
        return text.to_string();
    }
    style.apply(text).to_string()
}

/// Placeholder text for images
pub(crate) fn image_placeholder(alt: &str) -> String {
    Decoration::new().italic().paint(&format!("[Image: {alt}]"))
}

/// Faint text, used for rules and line breaks
pub(crate) fn faint(text: &str) -> String {
    Decoration::new().faint().paint(text)
}

/// Margin around preformatted blocks
pub(crate) fn preformatted(content: &str) -> String {
    Decoration::new().margin_left(2).margin_vertical(1).apply(content)
}

/// Fake text field: a dark block, the placeholder on a dark background and
/// `width` more dark blocks
pub(crate) fn input_field(placeholder: &str, width: usize) -> String {
    let fill = Decoration::new().foreground(INPUT_COLOR);
    let field = Decoration::new().background(INPUT_COLOR).faint();
    format!(
        "{}{}{}",
        fill.paint(INPUT_GLYPH),
        field.paint(placeholder),
        fill.paint(&INPUT_GLYPH.repeat(width))
    )
}

/// Parse a colour value: `#rgb`, `#rrggbb` or an ANSI palette index
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => {
                let mut rgb = hex.chars().filter_map(|c| c.to_digit(16)).map(|d| d as u8 * 17);
                Some(Color::Rgb {
                    r: rgb.next()?,
                    g: rgb.next()?,
                    b: rgb.next()?,
                })
            }
            6 => Some(Color::Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => None,
        };
    }
    value.parse::<u8>().ok().map(Color::AnsiValue)
}

/// Ordered map of tag name to decoration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: IndexMap<String, Decoration>,
}

impl Theme {
    /// A theme with no decorations
    pub fn empty() -> Self {
        Self {
            styles: IndexMap::new(),
        }
    }

    /// Register `decoration` under `tag`, replacing any previous entry
    pub fn insert(&mut self, tag: &str, decoration: Decoration) -> &mut Self {
        self.styles.insert(tag.to_ascii_lowercase(), decoration);
        self
    }

    pub fn with(mut self, tag: &str, decoration: Decoration) -> Self {
        self.insert(tag, decoration);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&Decoration> {
        self.styles.get(tag)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for Theme {
    fn default() -> Self {
        let mut theme = Self::empty();
        theme.insert("h1", Decoration::new().bold().underline());
        for tag in ["h2", "h3", "h4", "h5", "h6", "b", "strong"] {
            theme.insert(tag, Decoration::new().bold());
        }
        for tag in ["i", "em"] {
            theme.insert(tag, Decoration::new().italic());
        }
        theme.insert(
            "code",
            Decoration::new()
                .foreground(Color::AnsiValue(229))
                .background(Color::AnsiValue(237)),
        );
        theme.insert("a", Decoration::new().foreground(Color::AnsiValue(32)).underline());
        theme.insert("blockquote", Decoration::blockquote());
        theme
    }
}

impl StyleResolver for Theme {
    fn resolve(&self, tag: &str) -> Option<&Decoration> {
        self.get(tag)
    }
}
