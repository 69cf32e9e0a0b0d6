//! Shared rendering utilities and helpers.
//!
//! Cursor positioning, width fitting and search-match highlighting used by
//! several components. Widths are counted in characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use catalog_console::ui::helpers::{highlight_ranges, truncate};
//!
//! assert_eq!(truncate("Classic Heather Gray Hoodie", 12), "Classic H...");
//! assert_eq!(highlight_ranges("Gray Hoodie", "hood"), vec![(5, 9)]);
//! ```

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Positions the cursor at a 1-indexed row and column.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn position_cursor(out: &mut impl Write, row: usize, col: usize) -> io::Result<()> {
    write!(out, "\u{1b}[{row};{col}H")
}

/// Number of characters in `text`.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if visual_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(visual_len(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Left padding that centers `len` characters in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Character ranges of case-insensitive, non-overlapping occurrences of `term`.
///
/// Returns nothing for an empty term, or when lowercasing would change the
/// character count (ranges would no longer line up with the original text).
#[must_use]
pub fn highlight_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    let (Some(haystack), Some(needle)) = (fold_case(text), fold_case(term)) else {
        return Vec::new();
    };
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

fn fold_case(text: &str) -> Option<Vec<char>> {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            let first = lower.next()?;
            lower.next().is_none().then_some(first)
        })
        .collect()
}

/// Writes `text` with the character `ranges` drawn in the accent colors.
///
/// Unhighlighted sections use `base_fg`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_highlighted_text(
    out: &mut impl Write,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base_fg: &str,
) -> io::Result<()> {
    write!(out, "{}", Theme::fg(base_fg))?;
    if ranges.is_empty() {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            write!(out, "{normal}")?;
        }

        let highlighted: String = chars[start..end].iter().collect();
        write!(
            out,
            "{}{}{highlighted}{}{}",
            Theme::fg(&theme.colors.accent_fg),
            Theme::bg(&theme.colors.accent_bg),
            Theme::reset(),
            Theme::fg(base_fg),
        )?;
        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        write!(out, "{remaining}")?;
    }
    Ok(())
}

/// Strips ANSI escape sequences. Used to inspect rendered output.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Café au lait", 20), "Café au lait");
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn fit_pads_short_text() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdefgh", 6), "abc...");
    }

    #[test]
    fn highlight_is_case_insensitive_and_non_overlapping() {
        assert_eq!(highlight_ranges("Aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert_eq!(highlight_ranges("Shirt", "SH"), vec![(0, 2)]);
        assert!(highlight_ranges("Shirt", "").is_empty());
        assert!(highlight_ranges("Sh", "shirt").is_empty());
    }

    #[test]
    fn highlighted_text_keeps_plain_content() {
        let theme = Theme::default();
        let mut out = Vec::new();
        render_highlighted_text(&mut out, "Blue Shirt", &[(5, 7)], &theme, &theme.colors.text_normal)
            .unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(strip_ansi(&rendered), "Blue Shirt");
        assert!(rendered.contains(&Theme::bg(&theme.colors.accent_bg)));
    }

    #[test]
    fn strip_ansi_removes_cursor_moves() {
        assert_eq!(strip_ansi("\u{1b}[3;1Hab\u{1b}[0mc"), "abc");
    }
}
