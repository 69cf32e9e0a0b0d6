//! Pagination widget and page summary.

use crate::ui::helpers::{center_padding, position_cursor, visual_len};
use crate::ui::projection::PageEntry;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;
use std::io::{self, Write};

#[derive(Clone, Copy)]
enum Style {
    Normal,
    Disabled,
    Active,
}

/// Renders the page buttons at `row` and the summary below them.
///
/// The button line is left blank when there is only one page. Returns
/// `row + 2`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_pagination(
    out: &mut impl Write,
    row: usize,
    pagination: &PaginationInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let widget = &pagination.widget;

    if !widget.is_empty() {
        let mut segments = vec![(
            "‹ Prev".to_string(),
            if widget.prev_enabled { Style::Normal } else { Style::Disabled },
        )];
        segments.extend(widget.entries.iter().map(|entry| match entry {
            PageEntry::Page { number, active: true } => (format!(" {number} "), Style::Active),
            PageEntry::Page { number, active: false } => (number.to_string(), Style::Normal),
            PageEntry::Ellipsis => ("…".to_string(), Style::Disabled),
        }));
        segments.push((
            "Next ›".to_string(),
            if widget.next_enabled { Style::Normal } else { Style::Disabled },
        ));

        let plain_len = segments.iter().map(|(text, _)| visual_len(text)).sum::<usize>() + segments.len() - 1;

        position_cursor(out, row, 1)?;
        write!(out, "{}", " ".repeat(center_padding(plain_len, cols)))?;
        for (i, (text, style)) in segments.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            match style {
                Style::Normal => write!(out, "{}{text}", Theme::fg(&theme.colors.text_normal))?,
                Style::Disabled => write!(out, "{}{}{text}", Theme::dim(), Theme::fg(&theme.colors.text_dim))?,
                Style::Active => write!(
                    out,
                    "{}{}{}{text}",
                    Theme::bold(),
                    Theme::fg(&theme.colors.accent_fg),
                    Theme::bg(&theme.colors.accent_bg)
                )?,
            }
            write!(out, "{}", Theme::reset())?;
        }
    }

    let summary_len = visual_len(&pagination.summary);
    position_cursor(out, row + 1, 1)?;
    write!(
        out,
        "{}{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(center_padding(summary_len, cols)),
        pagination.summary,
        Theme::reset()
    )?;

    Ok(row + 2)
}
