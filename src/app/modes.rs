//! View mode state for the console.
//!
//! The table is always the base layer. At most one of the detail view, the
//! edit form or the create form is open on top of it; the delete confirmation
//! is tracked separately on `AppState` because it stacks over any of them.

use crate::app::editor::EditForm;

/// Which view is open above the product table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Just the table.
    #[default]
    Table,

    /// Read-only details of the selected product.
    Detail,

    /// Editing the selected product.
    Edit(EditForm),

    /// Filling in a new product.
    Create(EditForm),
}

impl ViewMode {
    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&EditForm> {
        match self {
            Self::Edit(form) | Self::Create(form) => Some(form),
            Self::Table | Self::Detail => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        match self {
            Self::Edit(form) | Self::Create(form) => Some(form),
            Self::Table | Self::Detail => None,
        }
    }
}
