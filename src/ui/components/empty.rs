//! Empty state component renderer.
//!
//! Shown in the table body when the current page has no rows: while the first
//! load is in flight, when the catalog is empty, or when a search matches
//! nothing.

use crate::ui::helpers::{center_padding, position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;
use std::io::{self, Write};

/// Renders the centered two-line message with the message at `row`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_empty_state(out: &mut impl Write, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> io::Result<()> {
    let message = truncate(&empty.message, cols);
    let msg_len = visual_len(&message);
    let msg_padding = center_padding(msg_len, cols);

    position_cursor(out, row, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.empty_state_fg))?;
    write!(out, "{}", " ".repeat(msg_padding))?;
    write!(out, "{message}")?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)))?;
    write!(out, "{}", Theme::reset())?;

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = visual_len(&subtitle);
    let sub_padding = center_padding(sub_len, cols);

    position_cursor(out, row + 1, 1)?;
    write!(out, "{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))?;
    write!(out, "{}", " ".repeat(sub_padding))?;
    write!(out, "{subtitle}")?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)))?;
    write!(out, "{}", Theme::reset())?;
    Ok(())
}
