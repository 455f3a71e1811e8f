//! Terminal escape sequence handling.
//!
//! Rendered text carries styling as inline escape sequences. They occupy no
//! terminal columns, so every width measurement goes through [`strip_ansi`]
//! first. Recognised forms:
//! - CSI sequences: `ESC [` ... final byte (0x40-0x7E)
//! - OSC sequences: `ESC ]` ... BEL (0x07) or ST (`ESC \`)
//! - Two-character sequences: `ESC` + a byte in 0x40-0x5F

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

#[allow(clippy::expect_used)]
static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
        .expect("escape sequence pattern is valid")
});

/// Strip escape sequences from a string.
///
/// Returns `Cow::Borrowed` when the string contains no ESC byte.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.as_bytes().contains(&0x1B) {
        return Cow::Borrowed(s);
    }
    ANSI_ESCAPE.replace_all(s, "")
}

/// Number of terminal columns `s` occupies once escape sequences are removed.
pub fn display_width(s: &str) -> usize {
    strip_ansi(s).width()
}

/// True when `s` shows nothing but whitespace.
pub fn is_visually_blank(s: &str) -> bool {
    strip_ansi(s).trim().is_empty()
}

/// Remove trailing horizontal whitespace, including whitespace that only
/// precedes trailing escape sequences. The escape sequences are kept.
pub fn trim_end_visible(s: &str) -> Cow<'_, str> {
    const HORIZONTAL: [char; 3] = [' ', '\t', '\r'];
    if !s.as_bytes().contains(&0x1B) {
        return Cow::Borrowed(s.trim_end_matches(HORIZONTAL));
    }

    let escapes: Vec<_> = ANSI_ESCAPE.find_iter(s).collect();
    let mut remaining = escapes.as_slice();
    let mut end = s.len();
    let mut tail = Vec::new();
    loop {
        end = s[..end].trim_end_matches(HORIZONTAL).len();
        match remaining.split_last() {
            Some((last, rest)) if last.end() == end => {
                tail.push(last.as_str());
                end = last.start();
                remaining = rest;
            }
            _ => break,
        }
    }

    if tail.is_empty() {
        return Cow::Borrowed(&s[..end]);
    }
    let mut out = s[..end].to_string();
    out.extend(tail.into_iter().rev());
    Cow::Owned(out)
}
