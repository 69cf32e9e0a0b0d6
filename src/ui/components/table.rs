//! Table component renderer.
//!
//! Renders the current page as a table: ID, TITLE, PRICE, CATEGORY, then
//! DESCRIPTION on wide terminals, then IMAGE. Title matches of the applied
//! search term are highlighted; the sortable headers carry a direction arrow.
//! A page taller than the screen is drawn as a window with a status line.

use crate::app::pipeline::SortDirection;
use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::projection::DisplayRow;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TableInfo;
use std::io::{self, Write};

const ID_WIDTH: usize = 5;
const TITLE_WIDTH: usize = 32;
const PRICE_WIDTH: usize = 10;
const CATEGORY_WIDTH: usize = 14;
const DESCRIPTION_WIDTH: usize = 30;
/// Narrowest IMAGE column left once DESCRIPTION is shown.
const MIN_IMAGE_WIDTH: usize = 24;
/// ID to CATEGORY, separators included.
const FIXED_WIDTH: usize = ID_WIDTH + TITLE_WIDTH + PRICE_WIDTH + CATEGORY_WIDTH + 4;

const fn shows_description(cols: usize) -> bool {
    cols >= FIXED_WIDTH + DESCRIPTION_WIDTH + 1 + MIN_IMAGE_WIDTH
}

const fn image_width(cols: usize) -> usize {
    if shows_description(cols) {
        cols - FIXED_WIDTH - DESCRIPTION_WIDTH - 1
    } else {
        cols.saturating_sub(FIXED_WIDTH)
    }
}

const fn sort_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "",
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

/// Renders the column headers at `row`. Returns `row + 1`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_table_headers(out: &mut impl Write, row: usize, table: &TableInfo, theme: &Theme, cols: usize) -> io::Result<usize> {
    let title = format!("TITLE{}", sort_arrow(table.title_sort));
    let price = format!("PRICE{}", sort_arrow(table.price_sort));

    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    write!(
        out,
        "{} {} {} {} ",
        fit("ID", ID_WIDTH),
        fit(&title, TITLE_WIDTH),
        fit(&price, PRICE_WIDTH),
        fit("CATEGORY", CATEGORY_WIDTH),
    )?;
    if shows_description(cols) {
        write!(out, "{} ", fit("DESCRIPTION", DESCRIPTION_WIDTH))?;
    }
    write!(out, "{}{}", fit("IMAGE", image_width(cols)), Theme::reset())?;
    Ok(row + 1)
}

/// Renders the visible rows starting at `row`, followed by the scroll status
/// when part of the page is off screen. Returns the next free row.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_table_rows(out: &mut impl Write, row: usize, table: &TableInfo, theme: &Theme, cols: usize) -> io::Result<usize> {
    let mut current_row = row;
    for item in table.visible_rows() {
        current_row = render_table_row(out, current_row, item, &table.highlight, theme, cols)?;
    }

    if let Some(status) = table.scroll_status() {
        position_cursor(out, current_row, 1)?;
        write!(out, "{}{}{}", Theme::fg(&theme.colors.text_dim), fit(&status, cols), Theme::reset())?;
        current_row += 1;
    }
    Ok(current_row)
}

fn render_table_row(
    out: &mut impl Write,
    row: usize,
    item: &DisplayRow,
    highlight: &str,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    position_cursor(out, row, 1)?;

    write!(out, "{}{} ", Theme::fg(&theme.colors.text_dim), fit(&item.id.to_string(), ID_WIDTH))?;

    let title = fit(&item.title, TITLE_WIDTH);
    let ranges = helpers::highlight_ranges(&title, highlight);
    helpers::render_highlighted_text(out, &title, &ranges, theme, &theme.colors.text_normal)?;

    write!(
        out,
        " {}{} {}{} {}",
        Theme::fg(&theme.colors.price_fg),
        fit(&item.price, PRICE_WIDTH),
        Theme::fg(&theme.colors.category_fg),
        fit(&item.category, CATEGORY_WIDTH),
        Theme::fg(&theme.colors.text_dim),
    )?;
    if shows_description(cols) {
        let description: String = item
            .description
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        write!(out, "{} ", fit(&description, DESCRIPTION_WIDTH))?;
    }
    write!(out, "{}", fit(&item.image_url, image_width(cols)))?;

    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn row(id: i64) -> DisplayRow {
        DisplayRow {
            id,
            title: format!("Item {id}"),
            price: "$5".to_string(),
            category: "Misc".to_string(),
            image_url: "https://img.example/1.png".to_string(),
            description: format!("About item {id}\nsecond line"),
        }
    }

    fn table(count: i64, first_visible: usize, visible: usize) -> TableInfo {
        TableInfo {
            rows: (1..=count).map(row).collect(),
            first_visible,
            visible,
            highlight: String::new(),
            title_sort: SortDirection::None,
            price_sort: SortDirection::None,
        }
    }

    fn draw(table: &TableInfo, cols: usize) -> (String, usize) {
        let mut out = Vec::new();
        let next = render_table_rows(&mut out, 10, table, &Theme::default(), cols).unwrap();
        (strip_ansi(&String::from_utf8(out).unwrap()), next)
    }

    #[test]
    fn windowed_page_shows_status_line() {
        let (screen, next) = draw(&table(10, 2, 8), 100);
        assert!(!screen.contains("Item 2 "));
        assert!(screen.contains("Item 3"));
        assert!(screen.contains("Item 10"));
        assert!(screen.contains("Rows 3-10 of 10"));
        assert_eq!(next, 19);
    }

    #[test]
    fn description_column_only_on_wide_terminals() {
        let (narrow, _) = draw(&table(2, 0, 2), 100);
        assert!(!narrow.contains("About item 1"));

        let (wide, next) = draw(&table(2, 0, 2), 140);
        assert!(wide.contains("About item 1 second line"));
        assert!(!wide.contains("Rows"));
        assert_eq!(next, 12);
    }
}
