//! Header component renderer.
//!
//! Renders the centered title with the filtered product count, and below it
//! the current date with a loading indicator while a request is in flight.

use crate::ui::helpers::{center_padding, position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

const LOADING_INDICATOR: &str = "  ·  Loading...";

/// Renders the title and date lines starting at `row`.
///
/// Returns the next free row (`row + 2`).
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_header(
    out: &mut impl Write,
    row: usize,
    header: &HeaderInfo,
    loading: bool,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let title = truncate(&header.title, cols);
    let title_len = visual_len(&title);
    let padding = center_padding(title_len, cols);

    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", Theme::bg(bg))?;
    }
    write!(out, "{}", " ".repeat(padding))?;
    write!(out, "{title}")?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + title_len)))?;
    write!(out, "{}", Theme::reset())?;

    let date_line = if loading {
        format!("{}{LOADING_INDICATOR}", header.date)
    } else {
        header.date.clone()
    };
    let date_line = truncate(&date_line, cols);
    let padding = center_padding(visual_len(&date_line), cols);

    position_cursor(out, row + 1, 1)?;
    write!(
        out,
        "{}{}{}{date_line}{}",
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        " ".repeat(padding),
        Theme::reset()
    )?;

    Ok(row + 2)
}
