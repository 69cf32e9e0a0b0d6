//! The collection pipeline: dataset, filtered view, sort spec and pagination.
//!
//! [`CollectionPipeline`] owns the authoritative product list fetched from the
//! remote API (the *dataset*) and a derived *filtered view* computed by applying
//! the current search term and, when active, the sort comparator. The table and
//! pagination widget read nothing else.
//!
//! # Invariants
//!
//! - The filtered view only ever contains products present in the dataset.
//! - At most one sort column is active.
//! - `1 <= page_index <= max(1, total_pages)`. Page requests outside that range
//!   are ignored rather than clamped.
//!
//! Every mutation returns a [`ViewChange`] describing which derived pieces moved,
//! so callers can decide what to redraw.
//!
//! # Example
//!
//! ```rust
//! use catalog_console::app::pipeline::{CollectionPipeline, SortColumn};
//! use catalog_console::Product;
//!
//! let mut pipeline = CollectionPipeline::default();
//! pipeline.load(vec![
//!     Product { id: 1, title: "Apple".into(), price: 10.0, description: String::new(), category: None, images: vec![] },
//!     Product { id: 2, title: "banana".into(), price: 5.0, description: String::new(), category: None, images: vec![] },
//! ]);
//!
//! pipeline.sort_by(SortColumn::Price);
//! let ids: Vec<i64> = pipeline.filtered().iter().map(|p| p.id).collect();
//! assert_eq!(ids, vec![2, 1]);
//! ```

use crate::domain::Product;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Title,
    Price,
}

impl SortColumn {
    /// Parses a column name as typed by the user (`title` or `price`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Price => a.price.total_cmp(&b.price),
        }
    }
}

/// Direction of a column as shown by its sort indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

/// The active sort, if any.
///
/// Holding a single optional `(column, direction)` pair makes "two columns
/// sorted at once" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    active: Option<(SortColumn, SortDirection)>,
}

impl SortSpec {
    /// Direction currently applied to `column`; `None` for the inactive column.
    #[must_use]
    pub fn direction(&self, column: SortColumn) -> SortDirection {
        match self.active {
            Some((active, direction)) if active == column => direction,
            _ => SortDirection::None,
        }
    }

    /// The active column and its direction.
    #[must_use]
    pub const fn active(&self) -> Option<(SortColumn, SortDirection)> {
        self.active
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advances `column` through none/desc → asc → desc → asc and clears the other column.
    fn toggle(&mut self, column: SortColumn) -> SortDirection {
        let next = match self.direction(column) {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::None | SortDirection::Descending => SortDirection::Ascending,
        };
        self.active = Some((column, next));
        next
    }

    fn apply(&self, products: &mut [Product]) {
        let Some((column, direction)) = self.active else {
            return;
        };
        products.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            match direction {
                SortDirection::Descending => ordering.reverse(),
                SortDirection::Ascending | SortDirection::None => ordering,
            }
        });
    }
}

/// Current page and page size. `page_index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: NonZeroUsize,
}

/// Which derived state a pipeline mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewChange {
    /// The filtered view's contents or order changed.
    pub view: bool,
    /// Dataset-wide statistics changed.
    pub stats: bool,
    /// Page index or page count changed.
    pub pagination: bool,
}

impl ViewChange {
    /// Nothing changed.
    pub const NONE: Self = Self {
        view: false,
        stats: false,
        pagination: false,
    };

    /// Everything changed.
    pub const ALL: Self = Self {
        view: true,
        stats: true,
        pagination: true,
    };

    /// Whether anything needs redrawing.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.view || self.stats || self.pagination
    }
}

/// Dataset-wide aggregate figures for the stats panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub total_count: usize,
    pub distinct_category_count: usize,
    /// `None` for an empty dataset.
    pub average_price: Option<f64>,
    pub total_value: f64,
}

/// Holds the dataset and its filtered/sorted/paginated view.
#[derive(Debug, Clone)]
pub struct CollectionPipeline {
    dataset: Vec<Product>,
    filtered: Vec<Product>,
    search_term: String,
    sort: SortSpec,
    pagination: PaginationState,
}

impl Default for CollectionPipeline {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl CollectionPipeline {
    /// Creates an empty pipeline showing `page_size` products per page.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            dataset: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            sort: SortSpec::default(),
            pagination: PaginationState {
                page_index: 1,
                page_size,
            },
        }
    }

    /// Replaces the dataset wholesale and starts a fresh view.
    ///
    /// The filtered view becomes a full copy of `records`; the search term and
    /// sort spec are reset and the first page is shown.
    pub fn load(&mut self, records: Vec<Product>) -> ViewChange {
        let _span = tracing::debug_span!("pipeline_load", count = records.len()).entered();

        self.filtered.clone_from(&records);
        self.dataset = records;
        self.search_term.clear();
        self.sort = SortSpec::default();
        self.pagination.page_index = 1;

        ViewChange::ALL
    }

    /// Prepends a newly created product.
    ///
    /// The filtered view is rebuilt by re-running the search predicate over the
    /// dataset. The sort is not re-applied, so with an empty search the new
    /// product shows up first.
    pub fn insert(&mut self, record: Product) -> ViewChange {
        let _span = tracing::debug_span!("pipeline_insert", id = record.id).entered();

        let pages_before = self.total_pages();
        let visible = self.matches_search(&record);

        self.dataset.insert(0, record);
        self.filtered = self.filter_dataset();

        ViewChange {
            view: visible || self.sort.is_active(),
            stats: true,
            pagination: pages_before != self.total_pages(),
        }
    }

    /// Replaces the product with `id` in place.
    ///
    /// The filtered view is updated in place as well; when a sort is active it is
    /// re-sorted so the edited row lands where its new title or price puts it.
    /// Unknown ids change nothing.
    pub fn replace(&mut self, id: i64, record: Product) -> ViewChange {
        let _span = tracing::debug_span!("pipeline_replace", id = id).entered();

        let Some(slot) = self.dataset.iter_mut().find(|p| p.id == id) else {
            tracing::debug!("replace target not in dataset");
            return ViewChange::NONE;
        };
        slot.clone_from(&record);

        let in_view = if let Some(slot) = self.filtered.iter_mut().find(|p| p.id == id) {
            *slot = record;
            true
        } else {
            false
        };

        if in_view {
            self.sort.apply(&mut self.filtered);
        }

        ViewChange {
            view: in_view,
            stats: true,
            pagination: false,
        }
    }

    /// Removes the product with `id` from the dataset and the filtered view.
    ///
    /// Remaining products keep their relative order. If the current page no
    /// longer exists the page index moves back to the last page.
    pub fn remove(&mut self, id: i64) -> ViewChange {
        let _span = tracing::debug_span!("pipeline_remove", id = id).entered();

        let pages_before = self.total_pages();
        let page_before = self.pagination.page_index;

        let dataset_len = self.dataset.len();
        self.dataset.retain(|p| p.id != id);
        let filtered_len = self.filtered.len();
        self.filtered.retain(|p| p.id != id);

        let last_page = self.total_pages().max(1);
        if self.pagination.page_index > last_page {
            self.pagination.page_index = last_page;
        }

        ViewChange {
            view: filtered_len != self.filtered.len(),
            stats: dataset_len != self.dataset.len(),
            pagination: pages_before != self.total_pages()
                || page_before != self.pagination.page_index,
        }
    }

    /// Filters the dataset by a case-insensitive title substring.
    ///
    /// The term is trimmed and lowercased; an empty term shows everything. An
    /// active sort is re-applied to the new view. Always returns to page 1.
    pub fn search(&mut self, term: &str) -> ViewChange {
        let _span = tracing::debug_span!("pipeline_search", term_len = term.len()).entered();

        self.search_term = term.trim().to_lowercase();
        self.filtered = self.filter_dataset();
        self.sort.apply(&mut self.filtered);
        self.pagination.page_index = 1;

        tracing::debug!(filtered_count = self.filtered.len(), "search applied");

        ViewChange {
            view: true,
            stats: false,
            pagination: true,
        }
    }

    /// Toggles the sort on `column` and sorts the filtered view in place.
    ///
    /// The first activation of a column sorts ascending; each further call flips
    /// the direction. The other column's indicator is cleared. The page index is
    /// kept.
    pub fn sort_by(&mut self, column: SortColumn) -> ViewChange {
        let direction = self.sort.toggle(column);
        let _span = tracing::debug_span!("pipeline_sort", column = ?column, direction = ?direction).entered();

        self.sort.apply(&mut self.filtered);

        ViewChange {
            view: true,
            stats: false,
            pagination: false,
        }
    }

    /// Sets the number of products per page and returns to page 1.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) -> ViewChange {
        tracing::debug!(page_size = page_size.get(), "page size changed");

        self.pagination.page_size = page_size;
        self.pagination.page_index = 1;

        ViewChange {
            view: true,
            stats: false,
            pagination: true,
        }
    }

    /// Moves to `page` if it exists; otherwise does nothing.
    ///
    /// Out-of-range requests (zero, negative, past the last page) are expected
    /// from stale pagination controls and are ignored without an error.
    pub fn go_to_page(&mut self, page: i64) -> ViewChange {
        let total = self.total_pages();
        let Some(page) = usize::try_from(page).ok().filter(|p| (1..=total).contains(p)) else {
            tracing::debug!(requested = page, total_pages = total, "ignoring out-of-range page");
            return ViewChange::NONE;
        };

        if page == self.pagination.page_index {
            return ViewChange::NONE;
        }
        self.pagination.page_index = page;

        ViewChange {
            view: true,
            stats: false,
            pagination: true,
        }
    }

    /// The products on the current page. Shorter than the page size on the last
    /// page and empty when nothing matches.
    #[must_use]
    pub fn current_page_slice(&self) -> &[Product] {
        let size = self.pagination.page_size.get();
        let start = (self.pagination.page_index - 1).saturating_mul(size);
        let start = start.min(self.filtered.len());
        let end = start.saturating_add(size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    /// Number of pages in the filtered view; `0` when it is empty.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.pagination.page_size.get())
    }

    /// Aggregates over the whole dataset, regardless of the current search.
    ///
    /// Categories are counted by id; products without a category are skipped.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let distinct_category_count = self
            .dataset
            .iter()
            .filter_map(Product::category_id)
            .collect::<HashSet<_>>()
            .len();

        let total_value: f64 = self.dataset.iter().map(|p| p.price).sum();

        #[allow(clippy::cast_precision_loss)]
        let average_price =
            (!self.dataset.is_empty()).then(|| total_value / self.dataset.len() as f64);

        Stats {
            total_count: self.dataset.len(),
            distinct_category_count,
            average_price,
            total_value,
        }
    }

    /// Looks a product up in the filtered view.
    #[must_use]
    pub fn find_in_view(&self, id: i64) -> Option<&Product> {
        self.filtered.iter().find(|p| p.id == id)
    }

    /// Whether the dataset still holds a product with `id`.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.dataset.iter().any(|p| p.id == id)
    }

    #[must_use]
    pub fn dataset(&self) -> &[Product] {
        &self.dataset
    }

    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// The normalized (trimmed, lowercased) search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub const fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    #[must_use]
    pub const fn pagination(&self) -> PaginationState {
        self.pagination
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.search_term.is_empty() || product.title.to_lowercase().contains(&self.search_term)
    }

    fn filter_dataset(&self) -> Vec<Product> {
        self.dataset
            .iter()
            .filter(|p| self.matches_search(p))
            .cloned()
            .collect()
    }
}
