//! Pure projection of pipeline output into display records.
//!
//! Nothing here knows about terminals or colors. The functions take the current
//! page slice and pagination numbers and return plain data that the components
//! draw.

use crate::domain::Product;
use crate::format::{
    clean_image_url, escape_html, format_price, primary_image, NOT_AVAILABLE, NO_DESCRIPTION,
};

/// Pages shown around the current one, not counting the first/last shortcuts.
const PAGE_WINDOW: usize = 4;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: i64,
    /// HTML-escaped title.
    pub title: String,
    /// `$` followed by the raw price.
    pub price: String,
    /// Category name or `N/A`.
    pub category: String,
    /// Cleaned first image or the placeholder.
    pub image_url: String,
    /// Raw description or `No description`.
    pub description: String,
}

/// An entry of the pagination widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page { number: usize, active: bool },
    Ellipsis,
}

/// Pagination widget descriptor. Empty when there is at most one page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub entries: Vec<PageEntry>,
}

impl PaginationView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rows and pagination for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<DisplayRow>,
    pub pagination: PaginationView,
}

/// Everything the detail view shows for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub category: String,
    pub category_id: String,
    pub description: String,
    pub main_image: String,
    /// Every image, cleaned; empty entries dropped.
    pub thumbnails: Vec<String>,
}

#[must_use]
pub fn project_row(product: &Product) -> DisplayRow {
    DisplayRow {
        id: product.id,
        title: escape_html(&product.title),
        price: format_price(product.price),
        category: product.category_name().unwrap_or(NOT_AVAILABLE).to_string(),
        image_url: primary_image(&product.images),
        description: description_or_placeholder(&product.description),
    }
}

/// Projects the current page slice and its pagination widget.
///
/// ```
/// use catalog_console::ui::projection::{project_page, PageEntry};
///
/// let view = project_page(&[], 2, 3);
/// let pages: Vec<usize> = view
///     .pagination
///     .entries
///     .iter()
///     .filter_map(|e| match e {
///         PageEntry::Page { number, .. } => Some(*number),
///         PageEntry::Ellipsis => None,
///     })
///     .collect();
/// assert_eq!(pages, vec![1, 2, 3]);
/// ```
#[must_use]
pub fn project_page(slice: &[Product], page_index: usize, total_pages: usize) -> PageView {
    PageView {
        rows: slice.iter().map(project_row).collect(),
        pagination: pagination_descriptor(page_index, total_pages),
    }
}

/// Builds the pagination widget around `current`.
///
/// Up to five consecutive pages are shown. The first and last page are always
/// reachable, with an ellipsis standing in for any gap.
#[must_use]
pub fn pagination_descriptor(current: usize, total: usize) -> PaginationView {
    if total <= 1 {
        return PaginationView::default();
    }

    let mut start = current.saturating_sub(2).max(1);
    let end = (start + PAGE_WINDOW).min(total);
    if end - start < PAGE_WINDOW {
        start = end.saturating_sub(PAGE_WINDOW).max(1);
    }

    let mut entries = Vec::with_capacity(PAGE_WINDOW + 5);

    if start > 1 {
        entries.push(PageEntry::Page {
            number: 1,
            active: false,
        });
        if start > 2 {
            entries.push(PageEntry::Ellipsis);
        }
    }

    entries.extend((start..=end).map(|number| PageEntry::Page {
        number,
        active: number == current,
    }));

    if end < total {
        if end < total - 1 {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Page {
            number: total,
            active: false,
        });
    }

    PaginationView {
        prev_enabled: current > 1,
        next_enabled: current < total,
        entries,
    }
}

#[must_use]
pub fn project_detail(product: &Product) -> DetailView {
    DetailView {
        id: product.id,
        title: product.title.clone(),
        price: format_price(product.price),
        category: product.category_name().unwrap_or(NOT_AVAILABLE).to_string(),
        category_id: product
            .category_id()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |id| id.to_string()),
        description: description_or_placeholder(&product.description),
        main_image: primary_image(&product.images),
        thumbnails: product
            .images
            .iter()
            .filter_map(|url| clean_image_url(url))
            .collect(),
    }
}

fn description_or_placeholder(description: &str) -> String {
    if description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        description.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::format::PLACEHOLDER_IMAGE;

    fn entries(current: usize, total: usize) -> String {
        pagination_descriptor(current, total)
            .entries
            .iter()
            .map(|entry| match entry {
                PageEntry::Page { number, active: true } => format!("[{number}]"),
                PageEntry::Page { number, active: false } => number.to_string(),
                PageEntry::Ellipsis => "..".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn single_page_has_no_widget() {
        assert!(pagination_descriptor(1, 1).is_empty());
        assert!(pagination_descriptor(1, 0).is_empty());
    }

    #[test]
    fn three_pages_show_all() {
        assert_eq!(entries(2, 3), "1 [2] 3");
        let view = pagination_descriptor(2, 3);
        assert!(view.prev_enabled && view.next_enabled);
    }

    #[test]
    fn window_slides_with_ellipses() {
        assert_eq!(entries(1, 10), "[1] 2 3 4 5 .. 10");
        assert_eq!(entries(5, 10), "1 .. 3 4 [5] 6 7 .. 10");
        assert_eq!(entries(10, 10), "1 .. 6 7 8 9 [10]");
    }

    #[test]
    fn adjacent_edges_skip_ellipsis() {
        assert_eq!(entries(6, 6), "1 2 3 4 5 [6]");
        assert_eq!(entries(3, 6), "1 2 [3] 4 5 6");
    }

    #[test]
    fn edges_disable_prev_and_next() {
        let first = pagination_descriptor(1, 4);
        assert!(!first.prev_enabled && first.next_enabled);
        let last = pagination_descriptor(4, 4);
        assert!(last.prev_enabled && !last.next_enabled);
    }

    #[test]
    fn row_uses_placeholders() {
        let product = Product {
            id: 3,
            title: "Tom & Jerry <DVD>".to_string(),
            price: 19.5,
            description: String::new(),
            category: None,
            images: vec![r#"[""]"#.to_string()],
        };
        let row = project_row(&product);
        assert_eq!(row.title, "Tom &amp; Jerry &lt;DVD&gt;");
        assert_eq!(row.price, "$19.5");
        assert_eq!(row.category, "N/A");
        assert_eq!(row.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(row.description, "No description");
    }

    #[test]
    fn detail_lists_cleaned_thumbnails() {
        let product = Product {
            id: 8,
            title: "Sneakers".to_string(),
            price: 80.0,
            description: "Running shoes".to_string(),
            category: Some(Category {
                id: 4,
                name: String::new(),
            }),
            images: vec![
                r#"["https://img/1.png""#.to_string(),
                String::new(),
                "https://img/2.png\"]".to_string(),
            ],
        };
        let detail = project_detail(&product);
        assert_eq!(detail.category, "N/A");
        assert_eq!(detail.category_id, "4");
        assert_eq!(detail.main_image, "https://img/1.png");
        assert_eq!(detail.thumbnails, vec!["https://img/1.png", "https://img/2.png"]);
    }
}
