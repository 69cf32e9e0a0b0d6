//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. Events come from three
//! sources: console commands typed by the user, the clock (`Tick`, which drives
//! the search debouncer) and the outcomes of side effects the runtime executed
//! (`TransportResponse`, `ExportWritten`, `ExportFailed`).
//!
//! # Flow
//!
//! ```text
//! command line ─► Event ─► handle_event ─► (render?, Vec<Action>)
//!                              ▲                        │
//!                              └── TransportResponse ◄──┘ worker thread
//! ```
//!
//! Every user command clears the current notification before it runs, so a
//! toast stays up exactly until the next thing the user does.
//!
//! # Example
//!
//! ```rust
//! use catalog_console::app::{handle_event, Action, AppState, Event};
//! use catalog_console::ui::Theme;
//! use catalog_console::worker::TransportRequest;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Load)?;
//! assert!(render);
//! assert!(state.is_loading());
//! assert_eq!(actions, vec![Action::PostToWorker(TransportRequest::FetchAll)]);
//! # Ok::<(), catalog_console::CatalogError>(())
//! ```

use super::editor::{from_edit_form, EditForm, FormField};
use super::modes::ViewMode;
use super::notification::Notification;
use super::pipeline::SortColumn;
use crate::app::{Action, AppState};
use crate::domain::{CatalogError, Result};
use crate::export::export_page;
use crate::worker::{TransportRequest, TransportResponse};
use chrono::NaiveDate;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

/// Rows moved by one scroll command.
const SCROLL_STEP: usize = 5;

/// Events triggered by console commands, the clock or side-effect outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Fetches the whole catalog, replacing the dataset.
    Load,

    /// Applies a search term immediately.
    Search(String),

    /// Records typed search text; applied once the debounce delay passes.
    SearchInput {
        term: String,
        at: Instant,
    },

    /// Clock tick. Applies a debounced search term that is due.
    Tick {
        now: Instant,
    },

    /// Toggles the sort on a column.
    SortBy(SortColumn),

    /// Changes the page size. Zero is rejected.
    SetPageSize(usize),

    /// Jumps to a 1-based page. Out-of-range pages are ignored.
    GoToPage(i64),
    NextPage,
    PrevPage,

    /// Moves the table window within a page taller than the screen.
    ScrollDown,
    ScrollUp,

    /// Opens the detail view for a product in the current view.
    ViewProduct(i64),

    /// Opens the edit form for `id`, or for the selected product.
    EditProduct(Option<i64>),

    /// Opens an empty create form.
    OpenCreate,

    /// Overwrites one field of the open form.
    SetField {
        field: FormField,
        value: String,
    },

    /// Validates the open form and sends it to the API.
    SubmitForm,

    /// Asks for confirmation before deleting `id`, or the selected product.
    RequestDelete(Option<i64>),

    /// Confirms the pending delete.
    ConfirmDelete,

    /// Dismisses the delete prompt, or else closes the open view.
    Cancel,

    /// Exports the current page as CSV, dated `date`.
    Export {
        date: NaiveDate,
    },

    /// The runtime wrote an export file.
    ExportWritten {
        path: PathBuf,
        count: usize,
    },

    /// The runtime failed to write an export file.
    ExportFailed {
        message: String,
    },

    Quit,

    /// Wraps a response from the transport worker.
    TransportResponse(TransportResponse),
}

impl Event {
    /// Whether the event comes directly from the user.
    ///
    /// User commands dismiss the current notification.
    #[must_use]
    pub const fn is_user_command(&self) -> bool {
        !matches!(
            self,
            Self::Tick { .. }
                | Self::TransportResponse(_)
                | Self::ExportWritten { .. }
                | Self::ExportFailed { .. }
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the screen needs redrawing.
///
/// # Errors
///
/// Only unexpected internal failures are returned. Validation and transport
/// failures become notifications on the state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let mut dismissed = false;
    if event.is_user_command() {
        dismissed = state.notification.take().is_some();
    }

    let (render, actions) = match event {
        Event::Load => {
            tracing::debug!("fetching catalog");
            state.in_flight += 1;
            (true, vec![Action::PostToWorker(TransportRequest::FetchAll)])
        }
        Event::Search(term) => {
            state.debouncer.cancel();
            state.search_input.clone_from(term);
            state.pipeline.search(term);
            state.scroll = 0;
            (true, vec![])
        }
        Event::SearchInput { term, at } => {
            state.search_input.clone_from(term);
            state.debouncer.submit(term.clone(), *at);
            (true, vec![])
        }
        Event::Tick { now } => match state.debouncer.take_due(*now) {
            Some(term) => {
                tracing::trace!(term = %term, "debounced search due");
                state.pipeline.search(&term);
                state.scroll = 0;
                (true, vec![])
            }
            None => (false, vec![]),
        },
        Event::SortBy(column) => {
            state.pipeline.sort_by(*column);
            state.scroll = 0;
            (true, vec![])
        }
        Event::SetPageSize(size) => {
            if let Some(size) = NonZeroUsize::new(*size) {
                state.pipeline.set_page_size(size);
                state.scroll = 0;
            } else {
                state.notify(Notification::error(
                    "Invalid page size",
                    "Page size must be at least 1",
                ));
            }
            (true, vec![])
        }
        Event::GoToPage(page) => (turn_page(state, *page), vec![]),
        Event::NextPage | Event::PrevPage => {
            let current = i64::try_from(state.pipeline.pagination().page_index).unwrap_or(i64::MAX);
            let target = if matches!(event, Event::NextPage) {
                current.saturating_add(1)
            } else {
                current - 1
            };
            (turn_page(state, target), vec![])
        }
        Event::ScrollDown => {
            let last_row = state.pipeline.current_page_slice().len().saturating_sub(1);
            let scroll = (state.scroll + SCROLL_STEP).min(last_row);
            let moved = scroll != state.scroll;
            state.scroll = scroll;
            (moved || dismissed, vec![])
        }
        Event::ScrollUp => {
            let moved = state.scroll > 0;
            state.scroll = state.scroll.saturating_sub(SCROLL_STEP);
            (moved || dismissed, vec![])
        }
        Event::ViewProduct(id) => match state.editor.select(&state.pipeline, *id) {
            Ok(product) => {
                tracing::debug!(id = product.id, title = %product.title, "opening detail view");
                state.view_mode = ViewMode::Detail;
                (true, vec![])
            }
            Err(e) => {
                tracing::debug!(error = %e, "view ignored");
                (dismissed, vec![])
            }
        },
        Event::EditProduct(id) => {
            let Some(id) = id.or_else(|| state.editor.selected()) else {
                tracing::debug!("no product selected to edit");
                return Ok((dismissed, vec![]));
            };
            match state.editor.begin_edit(&state.pipeline, id) {
                Ok(form) => {
                    state.view_mode = ViewMode::Edit(form);
                    (true, vec![])
                }
                Err(e) => {
                    tracing::debug!(error = %e, "edit ignored");
                    (dismissed, vec![])
                }
            }
        }
        Event::OpenCreate => {
            state.view_mode = ViewMode::Create(EditForm::blank());
            (true, vec![])
        }
        Event::SetField { field, value } => match state.view_mode.form_mut() {
            Some(form) => {
                form.set(*field, value);
                (true, vec![])
            }
            None => {
                tracing::debug!(field = ?field, "no form open, ignoring field");
                (dismissed, vec![])
            }
        },
        Event::SubmitForm => submit_form(state, dismissed)?,
        Event::RequestDelete(id) => {
            let Some(id) = id.or_else(|| state.editor.selected()) else {
                tracing::debug!("no product selected to delete");
                return Ok((dismissed, vec![]));
            };
            if state.pipeline.contains(id) {
                state.pending_delete = Some(id);
                (true, vec![])
            } else {
                tracing::debug!(id = id, "delete ignored, unknown product");
                (dismissed, vec![])
            }
        }
        Event::ConfirmDelete => match state.pending_delete {
            Some(id) => {
                tracing::debug!(id = id, "delete confirmed");
                state.in_flight += 1;
                (true, vec![Action::PostToWorker(TransportRequest::Delete { id })])
            }
            None => (dismissed, vec![]),
        },
        Event::Cancel => {
            if state.pending_delete.take().is_some() {
                (true, vec![])
            } else if state.view_mode == ViewMode::Table {
                (dismissed, vec![])
            } else {
                state.close_views();
                (true, vec![])
            }
        }
        Event::Export { date } => {
            let page = state.pipeline.pagination().page_index;
            match export_page(state.pipeline.current_page_slice(), page, *date) {
                Ok(Some(export)) => {
                    tracing::debug!(filename = %export.filename, count = export.count, "exporting page");
                    (dismissed, vec![Action::Export(export)])
                }
                Ok(None) => {
                    state.notify(Notification::warning("No data to export", "The current page is empty"));
                    (true, vec![])
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to render csv");
                    state.notify(Notification::error("Export failed", e.to_string()));
                    (true, vec![])
                }
            }
        }
        Event::ExportWritten { path, count } => {
            state.notify(Notification::success(
                format!("Exported {count} products"),
                path.display().to_string(),
            ));
            (true, vec![])
        }
        Event::ExportFailed { message } => {
            tracing::error!(error = %message, "export failed");
            state.notify(Notification::error("Export failed", message.clone()));
            (true, vec![])
        }
        Event::Quit => (false, vec![Action::Quit]),
        Event::TransportResponse(response) => {
            state.in_flight = state.in_flight.saturating_sub(1);
            handle_transport_response(state, response);
            (true, vec![])
        }
    };

    Ok((render, actions))
}

fn submit_form(state: &mut AppState, dismissed: bool) -> Result<(bool, Vec<Action>)> {
    let Some(form) = state.view_mode.form() else {
        tracing::debug!("no form open, ignoring save");
        return Ok((dismissed, vec![]));
    };

    let id = form.id;
    let draft = match from_edit_form(form) {
        Ok(draft) => draft,
        Err(CatalogError::Validation(message)) => {
            state.notify(Notification::error("Invalid product", message));
            return Ok((true, vec![]));
        }
        Err(e) => return Err(e),
    };

    let request = match id {
        Some(id) => TransportRequest::Update { id, draft },
        None => TransportRequest::Create { draft },
    };
    tracing::debug!(operation = ?request.operation(), "submitting form");

    state.in_flight += 1;
    Ok((true, vec![Action::PostToWorker(request)]))
}

fn turn_page(state: &mut AppState, page: i64) -> bool {
    let changed = state.pipeline.go_to_page(page).any();
    if changed {
        state.scroll = 0;
    }
    changed
}

fn handle_transport_response(state: &mut AppState, response: &TransportResponse) {
    match response {
        TransportResponse::ProductsLoaded { products } => {
            tracing::info!(count = products.len(), "catalog loaded");
            state.pipeline.load(products.clone());
            state.search_input.clear();
            state.scroll = 0;
            state.debouncer.cancel();
            if state.editor.forget_if_removed(&state.pipeline) && state.view_mode == ViewMode::Detail {
                state.close_views();
            }
            state.notify(Notification::success(
                "Products loaded",
                format!("{} products", products.len()),
            ));
        }
        TransportResponse::ProductCreated { product } => {
            tracing::info!(id = product.id, "product created");
            state.pipeline.insert(product.clone());
            if matches!(state.view_mode, ViewMode::Create(_)) {
                state.close_views();
            }
            state.notify(Notification::success("Product created", product.title.clone()));
        }
        TransportResponse::ProductUpdated { id, product } => {
            tracing::info!(id = id, "product updated");
            state.pipeline.replace(*id, product.clone());
            if state.view_mode.form().is_some_and(|form| form.id == Some(*id)) {
                state.close_views();
            }
            state.notify(Notification::success("Product updated", product.title.clone()));
        }
        TransportResponse::ProductDeleted { id } => {
            tracing::info!(id = id, "product deleted");
            state.pipeline.remove(*id);
            if state.pending_delete == Some(*id) {
                state.pending_delete = None;
            }
            if state.editor.forget_if_removed(&state.pipeline)
                && matches!(state.view_mode, ViewMode::Detail | ViewMode::Edit(_))
            {
                state.close_views();
            }
            state.notify(Notification::success("Product deleted", format!("Product #{id} removed")));
        }
        TransportResponse::Error { operation, message } => {
            tracing::error!(operation = ?operation, error = %message, "transport request failed");
            if *operation == crate::worker::TransportOperation::Delete {
                state.pending_delete = None;
            }
            state.notify(Notification::error(
                format!("Failed to {}", operation.describe()),
                message.clone(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notification::NotificationKind;
    use crate::domain::{Category, Product, ProductDraft};
    use crate::ui::Theme;
    use crate::worker::TransportOperation;
    use std::time::Duration;

    fn product(id: i64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: String::new(),
            category: Some(Category {
                id: 1,
                name: "Clothes".to_string(),
            }),
            images: vec![],
        }
    }

    fn loaded(products: Vec<Product>) -> AppState {
        let mut state = AppState::new(Theme::default());
        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductsLoaded { products }),
        )
        .unwrap();
        state
    }

    fn catalog(count: i64) -> Vec<Product> {
        (1..=count).map(|id| product(id, &format!("Item {id}"), id as f64)).collect()
    }

    #[test]
    fn load_tracks_in_flight_request() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::Load).unwrap();
        assert_eq!(state.in_flight, 1);

        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductsLoaded {
                products: catalog(3),
            }),
        )
        .unwrap();
        assert!(!state.is_loading());
        assert_eq!(state.pipeline.dataset().len(), 3);
        assert_eq!(state.notification.as_ref().unwrap().kind, NotificationKind::Success);
    }

    #[test]
    fn user_command_dismisses_notification() {
        let mut state = loaded(catalog(3));
        assert!(state.notification.is_some());

        handle_event(&mut state, &Event::SortBy(SortColumn::Price)).unwrap();
        assert!(state.notification.is_none());
    }

    #[test]
    fn tick_does_not_dismiss_notification() {
        let mut state = loaded(catalog(3));
        let (render, _) = handle_event(&mut state, &Event::Tick { now: Instant::now() }).unwrap();
        assert!(!render);
        assert!(state.notification.is_some());
    }

    #[test]
    fn debounced_search_applies_on_tick() {
        let mut state = loaded(catalog(12));
        let start = Instant::now();

        handle_event(
            &mut state,
            &Event::SearchInput {
                term: "Item 1".to_string(),
                at: start,
            },
        )
        .unwrap();
        assert_eq!(state.pipeline.filtered().len(), 12);
        assert_eq!(state.search_input, "Item 1");

        let (render, _) = handle_event(
            &mut state,
            &Event::Tick {
                now: start + Duration::from_millis(10),
            },
        )
        .unwrap();
        assert!(!render);

        let (render, _) = handle_event(
            &mut state,
            &Event::Tick {
                now: start + Duration::from_millis(300),
            },
        )
        .unwrap();
        assert!(render);
        assert_eq!(state.pipeline.filtered().len(), 4);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut state = loaded(catalog(3));
        handle_event(&mut state, &Event::SetPageSize(0)).unwrap();
        assert_eq!(state.pipeline.pagination().page_size.get(), 10);
        assert_eq!(state.notification.unwrap().title, "Invalid page size");
    }

    #[test]
    fn paging_stops_at_edges() {
        let mut state = loaded(catalog(25));

        let (render, _) = handle_event(&mut state, &Event::PrevPage).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::NextPage).unwrap();
        handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(state.pipeline.pagination().page_index, 3);

        let (render, _) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!render);
        assert_eq!(state.pipeline.pagination().page_index, 3);
    }

    #[test]
    fn view_then_edit_selected_product() {
        let mut state = loaded(catalog(3));
        handle_event(&mut state, &Event::ViewProduct(2)).unwrap();
        assert_eq!(state.view_mode, ViewMode::Detail);

        handle_event(&mut state, &Event::EditProduct(None)).unwrap();
        let form = state.view_mode.form().unwrap();
        assert_eq!(form.id, Some(2));
        assert_eq!(form.title, "Item 2");
    }

    #[test]
    fn viewing_unknown_product_changes_nothing() {
        let mut state = loaded(catalog(3));
        state.notification = None;
        let (render, _) = handle_event(&mut state, &Event::ViewProduct(99)).unwrap();
        assert!(!render);
        assert_eq!(state.view_mode, ViewMode::Table);
    }

    #[test]
    fn invalid_form_keeps_form_open() {
        let mut state = loaded(catalog(1));
        handle_event(&mut state, &Event::OpenCreate).unwrap();
        handle_event(
            &mut state,
            &Event::SetField {
                field: FormField::Price,
                value: "cheap".to_string(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        assert!(actions.is_empty());
        assert!(matches!(state.view_mode, ViewMode::Create(_)));
        assert_eq!(state.notification.unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn create_round_trip() {
        let mut state = loaded(catalog(2));
        handle_event(&mut state, &Event::OpenCreate).unwrap();
        for (field, value) in [(FormField::Title, "Lamp"), (FormField::Price, "25")] {
            handle_event(
                &mut state,
                &Event::SetField {
                    field,
                    value: value.to_string(),
                },
            )
            .unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        let expected = ProductDraft {
            title: "Lamp".to_string(),
            price: 25.0,
            description: String::new(),
            category_id: 1,
            images: vec![],
        };
        assert_eq!(
            actions,
            vec![Action::PostToWorker(TransportRequest::Create {
                draft: expected.clone()
            })]
        );

        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductCreated {
                product: Product::from_draft(3, &expected),
            }),
        )
        .unwrap();
        assert_eq!(state.view_mode, ViewMode::Table);
        assert_eq!(state.pipeline.filtered()[0].title, "Lamp");
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = loaded(catalog(3));
        handle_event(&mut state, &Event::ViewProduct(3)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::RequestDelete(None)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.pending_delete, Some(3));

        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert_eq!(actions, vec![Action::PostToWorker(TransportRequest::Delete { id: 3 })]);

        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductDeleted { id: 3 }),
        )
        .unwrap();
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.view_mode, ViewMode::Table);
        assert_eq!(state.editor.selected(), None);
        assert!(!state.pipeline.contains(3));
    }

    #[test]
    fn deleting_product_being_edited_closes_form() {
        let mut state = loaded(catalog(3));
        handle_event(&mut state, &Event::EditProduct(Some(2))).unwrap();
        assert!(matches!(state.view_mode, ViewMode::Edit(_)));

        handle_event(&mut state, &Event::RequestDelete(None)).unwrap();
        assert_eq!(state.pending_delete, Some(2));
        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert_eq!(actions, vec![Action::PostToWorker(TransportRequest::Delete { id: 2 })]);

        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductDeleted { id: 2 }),
        )
        .unwrap();
        assert_eq!(state.view_mode, ViewMode::Table);
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.editor.selected(), None);
    }

    #[test]
    fn deleting_other_product_keeps_form_open() {
        let mut state = loaded(catalog(3));
        handle_event(&mut state, &Event::EditProduct(Some(2))).unwrap();

        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::ProductDeleted { id: 3 }),
        )
        .unwrap();
        assert_eq!(state.view_mode.form().and_then(|form| form.id), Some(2));
    }

    #[test]
    fn scrolling_is_bounded_by_page() {
        let mut state = loaded(catalog(10));
        handle_event(&mut state, &Event::ScrollDown).unwrap();
        assert_eq!(state.scroll, SCROLL_STEP);
        handle_event(&mut state, &Event::ScrollDown).unwrap();
        assert_eq!(state.scroll, 9);

        let (render, _) = handle_event(&mut state, &Event::ScrollDown).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::ScrollUp).unwrap();
        handle_event(&mut state, &Event::ScrollUp).unwrap();
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn page_change_resets_scroll() {
        let mut state = loaded(catalog(25));
        handle_event(&mut state, &Event::ScrollDown).unwrap();
        handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(state.scroll, 0);

        handle_event(&mut state, &Event::ScrollDown).unwrap();
        handle_event(&mut state, &Event::SortBy(SortColumn::Title)).unwrap();
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn cancel_closes_prompt_before_view() {
        let mut state = loaded(catalog(3));
        handle_event(&mut state, &Event::ViewProduct(1)).unwrap();
        handle_event(&mut state, &Event::RequestDelete(Some(1))).unwrap();

        handle_event(&mut state, &Event::Cancel).unwrap();
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.view_mode, ViewMode::Detail);

        handle_event(&mut state, &Event::Cancel).unwrap();
        assert_eq!(state.view_mode, ViewMode::Table);
    }

    #[test]
    fn transport_error_becomes_notification() {
        let mut state = loaded(catalog(1));
        state.in_flight = 1;
        handle_event(
            &mut state,
            &Event::TransportResponse(TransportResponse::Error {
                operation: TransportOperation::Update,
                message: "503 Service Unavailable".to_string(),
            }),
        )
        .unwrap();

        let notification = state.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.title, "Failed to update product");
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn export_of_empty_page_warns() {
        let mut state = AppState::new(Theme::default());
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Export { date }).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.notification.unwrap().title, "No data to export");
    }

    #[test]
    fn export_emits_current_page() {
        let mut state = loaded(catalog(15));
        handle_event(&mut state, &Event::NextPage).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Export { date }).unwrap();
        let [Action::Export(export)] = actions.as_slice() else {
            panic!("expected one export action");
        };
        assert_eq!(export.count, 5);
        assert_eq!(export.filename, "products_page_2_2024-01-02.csv");
    }
}
