//! State of one admin resource screen: fetched rows, table query, and the
//! dialog currently open.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use models::table::{self, TablePage};
use models::{Action, Capabilities, FormMode, Id, ResourceKind, Row, TableQuery, UploadPolicy};

use crate::util::confirm::ConfirmDelete;

/// Which modal the resource page shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AdminDialog {
    #[default]
    Closed,
    Form { mode: FormMode, id: Option<Id> },
    Delete(ConfirmDelete),
    Upload { id: Id, label: String },
}

/// Row actions the current user may perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowActions {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
    pub upload: bool,
}

impl RowActions {
    /// Uploads count as an update and only exist for kinds with a file slot.
    #[must_use]
    pub fn for_kind(caps: &Capabilities, kind: ResourceKind) -> Self {
        let edit = caps.can_manage(kind, Action::Update);
        Self {
            create: caps.can_manage(kind, Action::Create),
            edit,
            delete: caps.can_manage(kind, Action::Delete),
            upload: edit && UploadPolicy::for_kind(kind).is_some(),
        }
    }
}

/// Column offered as a dropdown filter for `kind`, if any.
#[must_use]
pub fn filter_column(kind: ResourceKind) -> Option<usize> {
    match kind {
        ResourceKind::Users => Some(3),
        ResourceKind::Formations => Some(2),
        ResourceKind::Payments => Some(4),
        _ => None,
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResourceState {
    pub kind: Option<ResourceKind>,
    pub rows: Vec<Row>,
    pub loading: bool,
    pub error: Option<String>,
    pub query: TableQuery,
    pub dialog: AdminDialog,
}

impl ResourceState {
    /// Start loading `kind`. Switching to another kind resets the table query.
    pub fn begin_load(&mut self, kind: ResourceKind) {
        if self.kind != Some(kind) {
            self.rows.clear();
            self.query = TableQuery::default();
            self.dialog = AdminDialog::Closed;
        }
        self.kind = Some(kind);
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.loading = false;
    }

    /// Keep the previous rows and record the failure.
    pub fn fail_load(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    #[must_use]
    pub fn page(&self) -> TablePage {
        table::apply(&self.rows, &self.query)
    }

    #[must_use]
    pub fn row(&self, id: Id) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Label shown in confirmations: the row's name or title, else its id.
    #[must_use]
    pub fn row_label(&self, id: Id) -> String {
        self.row(id)
            .and_then(|row| row.values.get("title").or_else(|| row.values.get("name")))
            .filter(|label| !label.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub fn open_create(&mut self) {
        self.dialog = AdminDialog::Form { mode: FormMode::Create, id: None };
    }

    pub fn open_edit(&mut self, id: Id) {
        self.dialog = AdminDialog::Form { mode: FormMode::Edit, id: Some(id) };
    }

    pub fn open_delete(&mut self, id: Id) {
        if let Some(kind) = self.kind {
            self.dialog = AdminDialog::Delete(ConfirmDelete::new(kind, id, self.row_label(id)));
        }
    }

    pub fn open_upload(&mut self, id: Id) {
        self.dialog = AdminDialog::Upload { id, label: self.row_label(id) };
    }

    pub fn close_dialog(&mut self) {
        self.dialog = AdminDialog::Closed;
    }
}
