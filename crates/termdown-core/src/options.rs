//! Configuration options for rendering and layout

/// Maximum number of consecutive empty lines kept by the layout engine.
///
/// Always within `1..=10`; out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GapLimit(usize);

impl GapLimit {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;
    pub const DEFAULT: usize = 3;

    pub fn new(gaps: usize) -> Self {
        GapLimit(gaps.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for GapLimit {
    fn default() -> Self {
        GapLimit(Self::DEFAULT)
    }
}

impl From<usize> for GapLimit {
    fn from(gaps: usize) -> Self {
        GapLimit::new(gaps)
    }
}

/// Options for the tree renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Glyph printed before unordered list items
    pub bullet: String,

    /// Columns of indentation before a list item marker
    pub list_indent: usize,

    /// Glyph repeated to draw a horizontal rule
    pub hr_glyph: char,

    /// Number of glyphs in a horizontal rule
    pub hr_width: usize,

    /// Number of filler blocks after an input placeholder
    pub input_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bullet: "•".to_string(),
            list_indent: 2,
            hr_glyph: '─',
            hr_width: 50,
            input_width: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_limit_clamps() {
        assert_eq!(GapLimit::new(0).get(), 1);
        assert_eq!(GapLimit::new(3).get(), 3);
        assert_eq!(GapLimit::new(42).get(), 10);
        assert_eq!(GapLimit::default().get(), 3);
        assert_eq!(GapLimit::from(7), GapLimit::new(7));
    }
}
