//! Application layer coordinating state, events, and actions.
//!
//! Sits between the console runtime (main.rs) and the domain, transport and
//! worker layers:
//!
//! ```text
//! Command → Event → Event Handler → State Mutations → Actions → Side Effects
//!                        ↑                                  ↓
//!                        └──────── Transport Responses ─────┘
//! ```
//!
//! # Modules
//!
//! - [`pipeline`]: Dataset, search filter, sort and pagination
//! - [`editor`]: Selection tracking and form conversion
//! - [`debounce`]: Delayed application of typed search text
//! - [`command`]: Parsing of typed console commands into events
//! - [`handler`]: Event processing and state transitions
//! - [`actions`]: Side effect commands emitted by the handler
//! - [`modes`]: Which view is open above the table
//! - [`notification`]: Toasts shown after commands
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod command;
pub mod debounce;
pub mod editor;
pub mod handler;
pub mod modes;
pub mod notification;
pub mod pipeline;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::ViewMode;
pub use state::AppState;
