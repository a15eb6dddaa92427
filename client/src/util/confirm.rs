//! Delete confirmation flow.
//!
//! A delete starts as a pending [`ConfirmDelete`]; only
//! [`ConfirmDelete::resolve`] with [`ConfirmChoice::Confirm`] yields the
//! [`DeleteIntent`] the page turns into a request.

#[cfg(test)]
#[path = "confirm_test.rs"]
mod confirm_test;

use models::{Id, ResourceKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDelete {
    pub kind: ResourceKind,
    pub id: Id,
    /// Human label of the row, e.g. its title.
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmChoice {
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteIntent {
    pub kind: ResourceKind,
    pub id: Id,
}

impl ConfirmDelete {
    #[must_use]
    pub fn new(kind: ResourceKind, id: Id, label: impl Into<String>) -> Self {
        Self { kind, id, label: label.into() }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Delete {}", self.kind.singular())
    }

    #[must_use]
    pub fn message(&self) -> String {
        format!("\"{}\" will be permanently deleted. This cannot be undone.", self.label)
    }

    #[must_use]
    pub fn resolve(self, choice: ConfirmChoice) -> Option<DeleteIntent> {
        match choice {
            ConfirmChoice::Confirm => Some(DeleteIntent { kind: self.kind, id: self.id }),
            ConfirmChoice::Cancel => None,
        }
    }
}
