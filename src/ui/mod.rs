//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled terminal output through composable
//! rendering components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`projection`]: Pure mapping of products to display rows and page widgets
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, fitting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod projection;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{EmptyState, FooterInfo, HeaderInfo, Overlay, SearchBarInfo, UIViewModel};
