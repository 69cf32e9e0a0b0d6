//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Output goes to any [`Write`], which keeps rendering testable.
//!
//! # Example
//!
//! ```rust
//! use catalog_console::app::AppState;
//! use catalog_console::ui::{helpers::strip_ansi, render, Theme};
//! use chrono::NaiveDate;
//!
//! let state = AppState::new(Theme::default());
//! let mut screen = Vec::new();
//! render(&mut screen, &state, 24, 100, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())?;
//! assert!(strip_ansi(&String::from_utf8_lossy(&screen)).contains("Product Catalog (0)"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::app::AppState;
use crate::ui::components;
use chrono::NaiveDate;
use std::io::{self, Write};

const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Clears the screen and draws the console for a `rows` x `cols` terminal.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render(out: &mut impl Write, state: &AppState, rows: usize, cols: usize, today: NaiveDate) -> io::Result<()> {
    let viewmodel = state.compute_viewmodel(rows, cols, today);

    write!(out, "{CLEAR_SCREEN}")?;
    components::render_layout(out, &viewmodel, &state.theme, cols, rows)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event};
    use crate::domain::{Category, Product};
    use crate::ui::helpers::strip_ansi;
    use crate::ui::Theme;
    use crate::worker::TransportResponse;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn screen(state: &AppState) -> String {
        let mut out = Vec::new();
        render(&mut out, state, 30, 110, today()).unwrap();
        strip_ansi(&String::from_utf8(out).unwrap())
    }

    fn loaded(count: i64) -> AppState {
        let mut state = AppState::new(Theme::default());
        let products = (1..=count)
            .map(|id| Product {
                id,
                title: format!("Shirt {id}"),
                price: 20.0,
                description: "Cotton".to_string(),
                category: Some(Category {
                    id: 1,
                    name: "Clothes".to_string(),
                }),
                images: vec![format!("https://img/{id}.png")],
            })
            .collect();
        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductsLoaded { products }),
        )
        .unwrap();
        state
    }

    #[test]
    fn renders_table_and_pagination() {
        let text = screen(&loaded(25));
        assert!(text.contains("Product Catalog (25)"));
        assert!(text.contains("Wednesday, May 1, 2024"));
        assert!(text.contains("Shirt 10"));
        assert!(!text.contains("Shirt 11"));
        assert!(text.contains("Page 1 of 3 · 10 per page"));
        assert!(text.contains("Next ›"));
        assert!(text.contains("✓ Products loaded: 25 products"));
    }

    #[test]
    fn small_terminal_scrolls_to_every_row_of_page() {
        let mut state = loaded(10);
        let draw = |state: &AppState| {
            let mut out = Vec::new();
            // 24-line terminal minus the prompt line.
            render(&mut out, state, 23, 100, today()).unwrap();
            strip_ansi(&String::from_utf8(out).unwrap())
        };

        let text = draw(&state);
        assert!(text.contains("Shirt 8"));
        assert!(!text.contains("Shirt 10"));
        assert!(text.contains("Rows 1-8 of 10"));

        handle_event(&mut state, &Event::ScrollDown).unwrap();
        let text = draw(&state);
        assert!(text.contains("Shirt 10"));
        assert!(text.contains("Rows 3-10 of 10"));
        assert!(text.contains("Page 1 of 1 · 10 per page"));
    }

    #[test]
    fn sort_arrow_marks_active_column() {
        let mut state = loaded(2);
        handle_event(&mut state, &Event::SortBy(crate::app::pipeline::SortColumn::Price)).unwrap();
        let text = screen(&state);
        assert!(text.contains("PRICE ▲"));
        assert!(!text.contains("TITLE ▲"));
    }

    #[test]
    fn detail_overlay_replaces_rows() {
        let mut state = loaded(3);
        handle_event(&mut state, &Event::ViewProduct(2)).unwrap();
        let text = screen(&state);
        assert!(text.contains("Product #2"));
        assert!(text.contains("Clothes (id 1)"));
        assert!(!text.contains("Shirt 3"));
    }

    #[test]
    fn empty_state_while_loading() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::Load).unwrap();
        let text = screen(&state);
        assert!(text.contains("Loading products..."));
        assert!(text.contains("Loading..."));
    }
}
