//! Search bar component renderer.
//!
//! A 3-line bordered box holding the search text as typed. While a typed term
//! is waiting out the debounce delay, a dim marker follows it.

use crate::ui::helpers::{position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;
use std::io::{self, Write};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PENDING_MARKER: &str = " ...";

/// Renders the search box starting at `row`.
///
/// Returns the next free row (`row + 3`).
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Search: shirt   │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_search_bar(
    out: &mut impl Write,
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(out, row, 1)?;
    write!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset())?;

    let marker = if search.pending { PENDING_MARKER } else { "" };
    let search_text = truncate(
        &format!(" Search: {}", search.query),
        inner_width.saturating_sub(marker.len()),
    );
    let padding = inner_width.saturating_sub(visual_len(&search_text) + marker.len());

    position_cursor(out, row + 1, 1)?;
    write!(
        out,
        "{margin}{border}│{}{search_text}{}{marker}{}{border}│{}",
        Theme::fg(&theme.colors.text_normal),
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(padding),
        Theme::reset()
    )?;

    position_cursor(out, row + 2, 1)?;
    write!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset())?;

    Ok(row + 3)
}
