//! Stats panel: one centered line of dataset-wide figures.

use crate::ui::helpers::{center_padding, position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatsInfo;
use std::io::{self, Write};

const SEPARATOR: &str = "   ";

/// Renders the stats line at `row`. Returns `row + 1`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_stats(out: &mut impl Write, row: usize, stats: &StatsInfo, theme: &Theme, cols: usize) -> io::Result<usize> {
    let cells = [
        ("Products ", stats.total_products.as_str(), &theme.colors.text_normal),
        ("Categories ", stats.categories.as_str(), &theme.colors.category_fg),
        ("Avg price ", stats.average_price.as_str(), &theme.colors.price_fg),
        ("Total value ", stats.total_value.as_str(), &theme.colors.price_fg),
    ];

    let plain_len = cells
        .iter()
        .map(|(label, value, _)| visual_len(label) + visual_len(value))
        .sum::<usize>()
        + SEPARATOR.len() * (cells.len() - 1);

    position_cursor(out, row, 1)?;
    write!(out, "{}", " ".repeat(center_padding(plain_len, cols)))?;
    for (i, (label, value, color)) in cells.iter().enumerate() {
        if i > 0 {
            write!(out, "{SEPARATOR}")?;
        }
        write!(
            out,
            "{}{label}{}{}{value}{}",
            Theme::fg(&theme.colors.text_dim),
            Theme::bold(),
            Theme::fg(color),
            Theme::reset()
        )?;
    }

    Ok(row + 1)
}
