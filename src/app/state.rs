//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the console. It owns the
//! [`CollectionPipeline`] (dataset and derived view), the [`RecordEditor`]
//! selection, the open view, the search debouncer, the in-flight request count
//! and the current notification. View models are computed on demand from a
//! state snapshot.
//!
//! # Example
//!
//! ```rust
//! use catalog_console::app::AppState;
//! use catalog_console::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! assert!(!state.is_loading());
//! assert_eq!(state.pipeline.total_pages(), 0);
//! ```

use super::debounce::SearchDebouncer;
use super::editor::RecordEditor;
use super::modes::ViewMode;
use super::notification::Notification;
use super::pipeline::{CollectionPipeline, SortColumn};
use crate::domain::Product;
use crate::format::format_number;
use crate::ui::projection::{project_detail, project_page};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ConfirmView, EmptyState, FooterInfo, FormView, HeaderInfo, Overlay, PaginationInfo,
    SearchBarInfo, StatsInfo, TableInfo, UIViewModel,
};
use chrono::NaiveDate;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Lines taken by everything except table rows.
const CHROME_ROWS: usize = 14;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dataset, filtered view, sort and pagination.
    pub pipeline: CollectionPipeline,

    /// Product the detail, edit and delete views refer to.
    pub editor: RecordEditor,

    /// View open above the table.
    pub view_mode: ViewMode,

    /// Product awaiting delete confirmation. Stacks over any view.
    pub pending_delete: Option<i64>,

    /// Holds typed search text until the debounce delay passes.
    pub debouncer: SearchDebouncer,

    /// Search text as last typed, shown in the search bar.
    pub search_input: String,

    /// First page row shown when the page is taller than the screen.
    pub scroll: usize,

    /// Transport requests posted but not yet answered.
    pub in_flight: usize,

    /// Toast shown until the next user command.
    pub notification: Option<Notification>,

    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state with the default page size and debounce delay.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_settings(
            theme,
            CollectionPipeline::default().pagination().page_size,
            super::debounce::DEFAULT_SEARCH_DEBOUNCE,
        )
    }

    #[must_use]
    pub fn with_settings(theme: Theme, page_size: NonZeroUsize, search_debounce: Duration) -> Self {
        Self {
            pipeline: CollectionPipeline::new(page_size),
            editor: RecordEditor::default(),
            view_mode: ViewMode::Table,
            pending_delete: None,
            debouncer: SearchDebouncer::new(search_debounce),
            search_input: String::new(),
            scroll: 0,
            in_flight: 0,
            notification: None,
            theme,
        }
    }

    /// Whether a transport request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// The selected product, if it is still in the filtered view.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.editor
            .selected()
            .and_then(|id| self.pipeline.find_in_view(id))
    }

    pub fn notify(&mut self, notification: Notification) {
        tracing::debug!(
            kind = ?notification.kind,
            title = %notification.title,
            message = %notification.message,
            "notification"
        );
        self.notification = Some(notification);
    }

    /// Closes the detail view or form, returning to the table.
    pub fn close_views(&mut self) {
        self.view_mode = ViewMode::Table;
    }

    /// Computes a renderable view model for a `rows` x `cols` terminal.
    ///
    /// `today` feeds the header date line.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize, today: NaiveDate) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows = rows, cols = cols).entered();

        let pagination = self.pipeline.pagination();
        let page = project_page(
            self.pipeline.current_page_slice(),
            pagination.page_index,
            self.pipeline.total_pages(),
        );
        let (first_visible, visible) =
            Self::visible_window(page.rows.len(), Self::calculate_available_rows(rows), self.scroll);

        let sort = self.pipeline.sort_spec();
        let empty_state = page.rows.is_empty().then(|| self.compute_empty_state());

        UIViewModel {
            header: self.compute_header(today),
            stats: self.compute_stats(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                pending: self.debouncer.is_pending(),
            },
            table: TableInfo {
                rows: page.rows,
                first_visible,
                visible,
                highlight: self.pipeline.search_term().to_string(),
                title_sort: sort.direction(SortColumn::Title),
                price_sort: sort.direction(SortColumn::Price),
            },
            pagination: PaginationInfo {
                widget: page.pagination,
                summary: format!(
                    "Page {} of {} · {} per page",
                    pagination.page_index,
                    self.pipeline.total_pages().max(1),
                    pagination.page_size
                ),
            },
            overlay: self.compute_overlay(),
            notification: self.notification.clone(),
            loading: self.is_loading(),
            empty_state,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self, today: NaiveDate) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Product Catalog ({}) ", self.pipeline.filtered().len()),
            date: today.format("%A, %B %-d, %Y").to_string(),
        }
    }

    fn compute_stats(&self) -> StatsInfo {
        let stats = self.pipeline.stats();
        let money = |value: f64| format!("${}", format_number(value));

        StatsInfo {
            total_products: stats.total_count.to_string(),
            categories: stats.distinct_category_count.to_string(),
            average_price: stats.average_price.map_or_else(|| "-".to_string(), money),
            total_value: if stats.total_count == 0 {
                "-".to_string()
            } else {
                money(stats.total_value)
            },
        }
    }

    fn compute_overlay(&self) -> Option<Overlay> {
        if let Some(id) = self.pending_delete {
            let title = self
                .pipeline
                .dataset()
                .iter()
                .find(|p| p.id == id)
                .map_or_else(|| format!("#{id}"), |p| p.title.clone());
            return Some(Overlay::ConfirmDelete(ConfirmView { id, title }));
        }

        match &self.view_mode {
            ViewMode::Table => None,
            ViewMode::Detail => self
                .selected_product()
                .map(|product| Overlay::Detail(project_detail(product))),
            ViewMode::Edit(form) | ViewMode::Create(form) => {
                let heading = form
                    .id
                    .map_or_else(|| "New product".to_string(), |id| format!("Edit product #{id}"));
                let fields = form
                    .fields()
                    .iter()
                    .map(|(field, value)| (field.label().to_string(), (*value).to_string()))
                    .collect();
                Some(Overlay::Form(FormView { heading, fields }))
            }
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.pipeline.dataset().is_empty() {
            if self.is_loading() {
                EmptyState {
                    message: "Loading products...".to_string(),
                    subtitle: "Fetching the catalog".to_string(),
                }
            } else {
                EmptyState {
                    message: "No products".to_string(),
                    subtitle: "Type 'reload' to fetch the catalog or 'new' to add one".to_string(),
                }
            }
        } else {
            EmptyState {
                message: format!("No products match \"{}\"", self.pipeline.search_term()),
                subtitle: "Type 'search' with no term to clear the filter".to_string(),
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.pending_delete.is_some() {
            "yes: delete  no: cancel"
        } else {
            match self.view_mode {
                ViewMode::Table => {
                    "search <t>  type <t>  sort title|price  page <n>  next  prev  down  up  size <n>  view <id>  new  export  reload  quit"
                }
                ViewMode::Detail => "edit  delete  close  quit",
                ViewMode::Edit(_) | ViewMode::Create(_) => {
                    "set <field> <value>  save  close  (fields: title price description category images)"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    const fn calculate_available_rows(total_rows: usize) -> usize {
        total_rows.saturating_sub(CHROME_ROWS)
    }

    /// First row and row count drawn for a page of `len` rows.
    ///
    /// A page taller than `capacity` gives up one line to the scroll status.
    fn visible_window(len: usize, capacity: usize, scroll: usize) -> (usize, usize) {
        if len <= capacity {
            return (0, len);
        }
        let slots = capacity.saturating_sub(1).max(1);
        (scroll.min(len - slots), slots)
    }
}
