//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` via `AppState::compute_viewmodel()`
//! and consumed by the renderer. They hold display-ready strings only; every
//! formatting decision has already been made.
//!
//! # Example
//!
//! ```rust
//! use catalog_console::app::AppState;
//! use catalog_console::ui::Theme;
//! use chrono::NaiveDate;
//!
//! let state = AppState::new(Theme::default());
//! let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let vm = state.compute_viewmodel(24, 100, today);
//! assert_eq!(vm.header.title, " Product Catalog (0) ");
//! assert!(vm.empty_state.is_some());
//! ```

use crate::app::notification::Notification;
use crate::app::pipeline::SortDirection;
use crate::ui::projection::{DetailView, DisplayRow, PaginationView};

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub stats: StatsInfo,
    pub search_bar: SearchBarInfo,
    pub table: TableInfo,
    pub pagination: PaginationInfo,

    /// Detail view, form or delete confirmation drawn over the table.
    pub overlay: Option<Overlay>,

    pub notification: Option<Notification>,

    /// A remote call is in flight.
    pub loading: bool,

    /// Shown instead of the table when there are no rows.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// Title bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title with the filtered item count.
    pub title: String,
    /// Current date, long form.
    pub date: String,
}

/// Stats panel values, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsInfo {
    pub total_products: String,
    pub categories: String,
    pub average_price: String,
    pub total_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed, before normalization.
    pub query: String,
    /// Typed text not yet applied.
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    /// Every row of the current page.
    pub rows: Vec<DisplayRow>,
    /// Index of the first row drawn.
    pub first_visible: usize,
    /// Number of rows drawn. Less than `rows.len()` when the page is taller
    /// than the screen.
    pub visible: usize,
    /// Applied search term, used to highlight title matches.
    pub highlight: String,
    pub title_sort: SortDirection,
    pub price_sort: SortDirection,
}

impl TableInfo {
    /// Rows that fit on screen.
    #[must_use]
    pub fn visible_rows(&self) -> &[DisplayRow] {
        let first = self.first_visible.min(self.rows.len());
        let last = (first + self.visible).min(self.rows.len());
        &self.rows[first..last]
    }

    /// `Rows 3-10 of 10`, or `None` when the whole page is on screen.
    #[must_use]
    pub fn scroll_status(&self) -> Option<String> {
        let shown = self.visible_rows().len();
        (shown < self.rows.len()).then(|| {
            format!(
                "Rows {}-{} of {} · 'down' / 'up' to scroll",
                self.first_visible + 1,
                self.first_visible + shown,
                self.rows.len()
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub widget: PaginationView,
    /// `Page x of y · n per page`
    pub summary: String,
}

/// Views drawn over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Detail(DetailView),
    Form(FormView),
    ConfirmDelete(ConfirmView),
}

/// Create or edit form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub heading: String,
    /// `(label, value)` pairs in display order.
    pub fields: Vec<(String, String)>,
}

/// Delete confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub id: i64,
    pub title: String,
}

/// Message shown when there are no rows to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Command hints for the bottom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
