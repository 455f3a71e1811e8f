//! Configuration loaded from TOML.
//!
//! ```toml
//! [settings]
//! max_gaps = 3
//! bullet = "•"
//! hr_width = 50
//!
//! [styles.h1]
//! bold = true
//! prefix = "# "
//! foreground = "#ff8800"
//! ```
//!
//! Entries under `[styles]` replace the built-in decoration of the tags they
//! name; every other tag keeps its default. Style keys may be written in
//! snake_case or kebab-case (`border_type` or `border-type`). Unknown keys are
//! skipped with a warning.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Result, TermdownError};
use termdown_core::{parse_color, Align, BorderType, Color, Decoration, GapLimit, RenderOptions, Theme};

/// Resolved configuration: theme, layout gap limit and renderer options
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub theme: Theme,
    pub max_gap: GapLimit,
    pub render: RenderOptions,
}

impl Config {
    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TermdownError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&source)
    }

    /// Parse configuration from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(source)?;
        file.resolve()
    }
}

/// Keys nobody reads, collected so they can be reported
type Extra = IndexMap<String, toml::Value>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    settings: Settings,
    styles: IndexMap<String, StyleEntry>,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    #[serde(alias = "max-gaps")]
    max_gaps: Option<usize>,
    bullet: Option<String>,
    #[serde(alias = "list-indent")]
    list_indent: Option<usize>,
    #[serde(alias = "hr-width")]
    hr_width: Option<usize>,
    #[serde(alias = "input-width")]
    input_width: Option<usize>,
    #[serde(flatten)]
    extra: Extra,
}

/// One `[styles.<tag>]` table
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleEntry {
    bold: bool,
    italic: bool,
    faint: bool,
    underline: bool,
    strikethrough: bool,
    foreground: Option<String>,
    background: Option<String>,
    prefix: String,
    #[serde(alias = "infix")]
    suffix: String,

    #[serde(alias = "border-left")]
    border_left: bool,
    #[serde(alias = "border-right")]
    border_right: bool,
    #[serde(alias = "border-top")]
    border_top: bool,
    #[serde(alias = "border-bottom")]
    border_bottom: bool,
    #[serde(alias = "border-type")]
    border_type: Option<String>,
    #[serde(alias = "border-color")]
    border_color: Option<String>,

    align: Option<String>,

    #[serde(alias = "padding-left")]
    padding_left: usize,
    #[serde(alias = "padding-right")]
    padding_right: usize,
    #[serde(alias = "padding-top")]
    padding_top: usize,
    #[serde(alias = "padding-bottom")]
    padding_bottom: usize,

    #[serde(alias = "margin-left")]
    margin_left: usize,
    #[serde(alias = "margin-right")]
    margin_right: usize,
    #[serde(alias = "margin-top")]
    margin_top: usize,
    #[serde(alias = "margin-bottom")]
    margin_bottom: usize,

    #[serde(flatten)]
    extra: Extra,
}

impl StyleEntry {
    fn has_side(&self) -> bool {
        self.border_left || self.border_right || self.border_top || self.border_bottom
    }
}

fn warn_unknown(section: &str, extra: &Extra) {
    for key in extra.keys() {
        warn!(section, key = %key, "unknown configuration key, ignored");
    }
}

impl ConfigFile {
    fn resolve(self) -> Result<Config> {
        let mut config = Config::default();
        warn_unknown("root", &self.extra);
        let settings = self.settings;
        warn_unknown("settings", &settings.extra);

        if let Some(gaps) = settings.max_gaps {
            config.max_gap = GapLimit::new(gaps);
            if config.max_gap.get() != gaps {
                warn!(requested = gaps, used = config.max_gap.get(), "max_gaps out of range, clamped");
            }
        }
        if let Some(bullet) = settings.bullet {
            if bullet.trim().is_empty() {
                return Err(TermdownError::InvalidInput("bullet must not be blank".to_string()));
            }
            config.render.bullet = bullet;
        }
        if let Some(indent) = settings.list_indent {
            config.render.list_indent = indent;
        }
        if let Some(width) = settings.hr_width {
            config.render.hr_width = width;
        }
        if let Some(width) = settings.input_width {
            config.render.input_width = width;
        }

        for (tag, entry) in self.styles {
            if tag.trim().is_empty() {
                return Err(TermdownError::InvalidInput("style entry with an empty tag name".to_string()));
            }
            warn_unknown(&format!("styles.{tag}"), &entry.extra);
            config.theme.insert(&tag, Decoration::try_from(entry)?);
        }

        debug!(styles = config.theme.len(), max_gap = config.max_gap.get(), "configuration resolved");
        Ok(config)
    }
}

fn color(value: &str) -> Result<Color> {
    parse_color(value).ok_or_else(|| TermdownError::InvalidColor(value.to_string()))
}

impl TryFrom<StyleEntry> for Decoration {
    type Error = TermdownError;

    fn try_from(entry: StyleEntry) -> Result<Self> {
        let mut decoration = Decoration::new()
            .prefix(&entry.prefix)
            .suffix(&entry.suffix)
            .padding_left(entry.padding_left)
            .margin_left(entry.margin_left);
        decoration.padding_right = entry.padding_right;
        decoration.padding_top = entry.padding_top;
        decoration.padding_bottom = entry.padding_bottom;
        decoration.margin_right = entry.margin_right;
        decoration.margin_top = entry.margin_top;
        decoration.margin_bottom = entry.margin_bottom;

        if entry.bold {
            decoration = decoration.bold();
        }
        if entry.italic {
            decoration = decoration.italic();
        }
        if entry.faint {
            decoration = decoration.faint();
        }
        if entry.underline {
            decoration = decoration.underline();
        }
        if entry.strikethrough {
            decoration = decoration.strikethrough();
        }

        if let Some(fg) = entry.foreground.as_deref() {
            decoration = decoration.foreground(color(fg)?);
        }
        if let Some(bg) = entry.background.as_deref() {
            decoration = decoration.background(color(bg)?);
        }
        if let Some(align) = entry.align.as_deref() {
            decoration.align = Align::from_name(align)
                .ok_or_else(|| TermdownError::InvalidInput(format!("unknown alignment `{align}`")))?;
        }

        let border_color = entry.border_color.as_deref().map(color).transpose()?;
        let border_type = entry
            .border_type
            .as_deref()
            .map(|name| {
                BorderType::from_name(name)
                    .ok_or_else(|| TermdownError::InvalidInput(format!("unknown border type `{name}`")))
            })
            .transpose()?;

        if entry.has_side() {
            decoration.border_left = entry.border_left;
            decoration.border_right = entry.border_right;
            decoration.border_top = entry.border_top;
            decoration.border_bottom = entry.border_bottom;
            decoration.border_type = border_type.unwrap_or_default();
            decoration.border_color = border_color;
        } else if let Some(border_type) = border_type {
            // a border type without sides draws the whole box
            decoration = decoration.border(border_type, border_color);
        } else if border_color.is_some() {
            decoration = decoration.border_left(border_color);
        }

        Ok(decoration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termdown_core::StyleResolver;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_gap.get(), 3);
    }

    #[test]
    fn test_settings() {
        let config = Config::from_toml_str(
            r#"
            [settings]
            max_gaps = 5
            bullet = "-"
            hr_width = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.max_gap.get(), 5);
        assert_eq!(config.render.bullet, "-");
        assert_eq!(config.render.hr_width, 20);
        assert_eq!(config.render.list_indent, 2);
    }

    #[test]
    fn test_max_gaps_is_clamped() {
        let config = Config::from_toml_str("[settings]\nmax_gaps = 40\n").unwrap();
        assert_eq!(config.max_gap.get(), 10);
        let config = Config::from_toml_str("[settings]\nmax_gaps = 0\n").unwrap();
        assert_eq!(config.max_gap.get(), 1);
    }

    #[test]
    fn test_styles_override_defaults() {
        let config = Config::from_toml_str(
            r##"
            [styles.h1]
            prefix = "# "
            foreground = "#ff8800"
            bold = true

            [styles.mark]
            background = "226"
            "##,
        )
        .unwrap();

        let h1 = config.theme.resolve("h1").unwrap();
        assert_eq!(h1.prefix, "# ");
        assert_eq!(
            h1.style.foreground_color,
            Some(Color::Rgb { r: 255, g: 136, b: 0 })
        );
        let mark = config.theme.resolve("mark").unwrap();
        assert_eq!(mark.style.background_color, Some(Color::AnsiValue(226)));

        // untouched defaults survive
        assert!(config.theme.resolve("strong").is_some());
        assert!(config.theme.resolve("blockquote").is_some());
    }

    #[test]
    fn test_infix_alias() {
        let config = Config::from_toml_str("[styles.li]\ninfix = \";\"\n").unwrap();
        assert_eq!(config.theme.resolve("li").unwrap().suffix, ";");
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let config = Config::from_toml_str(
            r##"
            [settings]
            sixel = true

            [styles.p]
            blink = true
            italic = true

            [browser]
            background = "#000"
            "##,
        )
        .unwrap();
        assert!(config.theme.resolve("p").is_some());
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let file: ConfigFile = toml::from_str(
            r##"
            [settings]
            sixel = true
            max-gaps = 4

            [styles.p]
            blink = true
            border-left = true

            [browser]
            background = "#000"
            "##,
        )
        .unwrap();
        assert_eq!(file.extra.keys().collect::<Vec<_>>(), ["browser"]);
        assert_eq!(file.settings.extra.keys().collect::<Vec<_>>(), ["sixel"]);
        assert_eq!(file.settings.max_gaps, Some(4));
        let p = &file.styles["p"];
        assert_eq!(p.extra.keys().collect::<Vec<_>>(), ["blink"]);
        assert!(p.border_left);
    }

    #[test]
    fn test_box_keys() {
        let config = Config::from_toml_str(
            r#"
            [styles.aside]
            border-right = true
            border_top = true
            border-type = "double"
            align = "center"
            padding-right = 2
            padding_top = 1
            padding-bottom = 3
            margin-right = 4
            "#,
        )
        .unwrap();
        let aside = config.theme.resolve("aside").unwrap();
        assert!(aside.border_right && aside.border_top);
        assert!(!aside.border_left && !aside.border_bottom);
        assert_eq!(aside.border_type, BorderType::Double);
        assert_eq!(aside.align, Align::Center);
        assert_eq!(
            (aside.padding_right, aside.padding_top, aside.padding_bottom, aside.margin_right),
            (2, 1, 3, 4)
        );
    }

    #[test]
    fn test_border_type_alone_draws_a_box() {
        let config = Config::from_toml_str("[styles.pre]\nborder_type = \"rounded\"\n").unwrap();
        let pre = config.theme.resolve("pre").unwrap();
        assert!(pre.border_left && pre.border_right && pre.border_top && pre.border_bottom);
        assert_eq!(pre.border_type, BorderType::Rounded);
    }

    #[test]
    fn test_unknown_border_type_and_align() {
        let err = Config::from_toml_str("[styles.pre]\nborder-type = \"dotted\"\n").unwrap_err();
        assert!(matches!(err, TermdownError::InvalidInput(ref msg) if msg.contains("dotted")));
        let err = Config::from_toml_str("[styles.pre]\nalign = \"justify\"\n").unwrap_err();
        assert!(matches!(err, TermdownError::InvalidInput(ref msg) if msg.contains("justify")));
    }

    #[test]
    fn test_border() {
        let config = Config::from_toml_str("[styles.aside]\nborder_color = \"#0f0\"\npadding_left = 1\n").unwrap();
        let aside = config.theme.resolve("aside").unwrap();
        assert!(aside.border_left);
        assert_eq!(aside.border_color, Some(Color::Rgb { r: 0, g: 255, b: 0 }));
    }

    #[test]
    fn test_invalid_color() {
        let err = Config::from_toml_str("[styles.h1]\nforeground = \"red\"\n").unwrap_err();
        assert!(matches!(err, TermdownError::InvalidColor(ref value) if value == "red"));
    }

    #[test]
    fn test_blank_bullet_is_rejected() {
        let err = Config::from_toml_str("[settings]\nbullet = \" \"\n").unwrap_err();
        assert!(matches!(err, TermdownError::InvalidInput(_)));
    }

    #[test]
    fn test_syntax_error() {
        let err = Config::from_toml_str("[settings\n").unwrap_err();
        assert!(matches!(err, TermdownError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here/termdown.toml").unwrap_err();
        assert!(matches!(err, TermdownError::Io { .. }));
        assert!(err.to_string().contains("termdown.toml"));
    }
}
