//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at a given row and returns the
//! next free row. [`render_layout`] stacks them:
//!
//! ```text
//! [blank line]
//! [Header title]
//! [Date / loading]
//! [Border]
//! [Stats]
//! [Search Bar - 3 lines]
//! [Table Headers]
//! [Table Rows | Overlay | Empty state]
//! [Pagination widget]
//! [Page summary]
//! [Notification]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod overlay;
mod pagination;
mod search;
mod stats;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use std::io::{self, Write};

use empty::render_empty_state;
use footer::{render_footer, render_notification};
use header::render_header;
use overlay::render_overlay;
use pagination::render_pagination;
use search::render_search_bar;
use stats::render_stats;
use table::{render_table_headers, render_table_rows};

/// Lines below the table body: pagination (2), notification, border, footer.
const BOTTOM_ROWS: usize = 5;

/// Renders a horizontal border line at `row`. Returns `row + 1`.
fn render_border(out: &mut impl Write, row: usize, color: &str, cols: usize) -> io::Result<usize> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())?;
    Ok(row + 1)
}

/// Renders the full screen for a `rows` x `cols` terminal.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_layout(out: &mut impl Write, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> io::Result<()> {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(out, current_row, &vm.header, vm.loading, theme, cols)?;
    current_row = render_border(out, current_row, &theme.colors.border, cols)?;
    current_row = render_stats(out, current_row, &vm.stats, theme, cols)?;
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols)?;
    current_row = render_table_headers(out, current_row, &vm.table, theme, cols)?;

    let body_first = current_row;
    let body_last = rows.saturating_sub(BOTTOM_ROWS);

    if let Some(overlay) = &vm.overlay {
        render_overlay(out, body_first, body_last, overlay, theme, cols)?;
    } else if let Some(empty) = &vm.empty_state {
        let middle = body_first + body_last.saturating_sub(body_first) / 2;
        render_empty_state(out, middle.max(body_first), empty, theme, cols)?;
    } else {
        render_table_rows(out, body_first, &vm.table, theme, cols)?;
    }

    let pagination_row = body_last + 1;
    render_pagination(out, pagination_row, &vm.pagination, theme, cols)?;

    let notification_row = rows.saturating_sub(2);
    if let Some(notification) = &vm.notification {
        render_notification(out, notification_row, notification, theme, cols)?;
    }
    render_border(out, notification_row + 1, &theme.colors.border, cols)?;
    render_footer(out, rows, &vm.footer, theme, cols)?;

    Ok(())
}
