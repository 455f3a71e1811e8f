//! Line layout for rendered text.
//!
//! Greedy word wrapping measured in display columns, so embedded escape
//! sequences travel with their word but never count towards the width.
//! Words are never split: a word wider than the line gets a line of its own.
//! Tokens that occupy no columns, such as a lone escape sequence, are glued
//! to the next word (or to the last one at the end of the text), so they
//! never take part in a line break.
//!
//! After wrapping, trailing whitespace is trimmed from every line and runs of
//! empty lines are capped at the configured gap limit.

use std::borrow::Cow;

use tracing::debug;

use crate::ansi::{display_width, is_visually_blank, trim_end_visible};
use crate::options::GapLimit;

const TAB_COLUMNS: usize = 4;

/// Wrap `text` to `max_width` columns and cap blank-line runs at `max_gap`
/// (clamped to `1..=10`).
///
/// A `max_width` of zero means no wrapping: the input is returned unchanged.
pub fn wrap(text: &str, max_width: usize, max_gap: usize) -> String {
    if max_width == 0 {
        return text.to_string();
    }
    let gap = GapLimit::new(max_gap);
    debug!(bytes = text.len(), max_width, max_gap = gap.get(), "wrapping text");

    let laid_out = lay_out(text, max_width);
    normalize_lines(&laid_out, gap)
}

/// A word and the whitespace that preceded it in the source
#[derive(Debug, Clone, PartialEq, Eq)]
struct Word<'a> {
    text: Cow<'a, str>,
    /// Display width of `text`
    width: usize,
    /// Newlines in the preceding whitespace
    breaks: usize,
    /// Leading columns of the line this word starts, if it starts one
    indent: usize,
}

/// Characters that separate words
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Columns of horizontal whitespace, with tabs counted as four
fn indent_columns(whitespace: &str) -> usize {
    whitespace
        .chars()
        .map(|c| match c {
            ' ' => 1,
            '\t' => TAB_COLUMNS,
            _ => 0,
        })
        .sum()
}

/// Split `text` into words, returning them with the number of newlines that
/// follow the last word
fn tokenize(text: &str) -> (Vec<Word<'_>>, usize) {
    let mut words: Vec<Word<'_>> = Vec::new();
    let mut pending: Option<Word<'_>> = None;
    let mut rest = text;

    let trailing_breaks = loop {
        let gap_len = rest.find(|c: char| !is_separator(c)).unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(gap_len);
        let breaks = gap.matches('\n').count();
        if tail.is_empty() {
            break breaks;
        }

        let word_len = tail.find(is_separator).unwrap_or(tail.len());
        let (word, remainder) = tail.split_at(word_len);
        rest = remainder;

        let starts_line = breaks > 0 || (words.is_empty() && pending.is_none());
        let indent = if starts_line {
            indent_columns(gap.rsplit('\n').next().unwrap_or_default())
        } else {
            0
        };
        let token = Word {
            text: Cow::Borrowed(word),
            width: display_width(word),
            breaks,
            indent,
        };

        let token = match pending.take() {
            Some(glued) => glue(glued, token),
            None => token,
        };
        if token.width == 0 {
            pending = Some(token);
        } else {
            words.push(token);
        }
    };

    if let Some(zero_width) = pending {
        match words.last_mut() {
            Some(last) if zero_width.breaks == 0 => last.text.to_mut().push_str(&zero_width.text),
            _ => words.push(zero_width),
        }
    }
    (words, trailing_breaks)
}

/// Join a zero-width token onto the word that follows it
fn glue<'a>(mut head: Word<'a>, next: Word<'a>) -> Word<'a> {
    head.text.to_mut().push_str(&next.text);
    head.width += next.width;
    if next.breaks > 0 {
        head.breaks += next.breaks;
        head.indent = next.indent;
    }
    head
}

/// Greedy line filling
fn lay_out(text: &str, max_width: usize) -> String {
    let (words, trailing_breaks) = tokenize(text);
    let mut out = String::with_capacity(text.len() + text.len() / max_width * 2);
    let mut line_width = 0;
    let mut hanging_indent = 0;

    for (i, word) in words.iter().enumerate() {
        if word.breaks > 0 || i == 0 {
            push_newlines(&mut out, word.breaks);
            hanging_indent = word.indent;
            line_width = start_line(&mut out, hanging_indent, word.width, max_width);
        } else if line_width > 0 && line_width + 1 + word.width > max_width {
            out.push('\n');
            line_width = start_line(&mut out, hanging_indent, word.width, max_width);
        } else if line_width > 0 {
            out.push(' ');
            line_width += 1;
        }

        out.push_str(&word.text);
        line_width += word.width;
    }

    push_newlines(&mut out, trailing_breaks);
    out
}

/// Emit the indentation for a fresh line, unless the first word would no
/// longer fit behind it. Returns the columns used.
fn start_line(out: &mut String, indent: usize, word_width: usize, max_width: usize) -> usize {
    if indent > 0 && indent + word_width <= max_width {
        out.push_str(&" ".repeat(indent));
        indent
    } else {
        0
    }
}

fn push_newlines(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\n').take(count));
}

/// Trim trailing whitespace from every line and cap runs of empty lines
fn normalize_lines(text: &str, max_gap: GapLimit) -> String {
    let mut lines = Vec::new();
    let mut empty_run = 0;

    for line in text.split('\n') {
        let line = trim_end_visible(line);
        if is_visually_blank(&line) {
            empty_run += 1;
            if empty_run > max_gap.get() {
                continue;
            }
        } else {
            empty_run = 0;
        }
        lines.push(line);
    }

    lines.join("\n")
}
