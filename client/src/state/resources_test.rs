use super::*;
use models::FormValues;

fn row(id: Id, title: &str) -> Row {
    let mut values = FormValues::new();
    values.insert("title".to_owned(), title.to_owned());
    Row { id, cells: vec![id.to_string(), title.to_owned()], search_text: title.to_lowercase(), values }
}

#[test]
fn switching_kind_resets_query_and_rows() {
    let mut state = ResourceState::default();
    state.begin_load(ResourceKind::Formations);
    state.finish_load(vec![row(1, "Rust")]);
    state.query.set_search("rust");

    state.begin_load(ResourceKind::Lessons);
    assert!(state.rows.is_empty());
    assert_eq!(state.query, TableQuery::default());
    assert!(state.loading);
}

#[test]
fn reloading_same_kind_keeps_query() {
    let mut state = ResourceState::default();
    state.begin_load(ResourceKind::Formations);
    state.finish_load(vec![row(1, "Rust")]);
    state.query.set_search("rust");
    state.begin_load(ResourceKind::Formations);
    assert_eq!(state.query.search, "rust");
    assert_eq!(state.rows.len(), 1);
}

#[test]
fn failed_load_keeps_previous_rows() {
    let mut state = ResourceState::default();
    state.begin_load(ResourceKind::Formations);
    state.finish_load(vec![row(1, "Rust")]);
    state.begin_load(ResourceKind::Formations);
    state.fail_load("boom".to_owned());
    assert!(!state.loading);
    assert_eq!(state.rows.len(), 1);
    assert_eq!(state.error.as_deref(), Some("boom"));
}

#[test]
fn page_applies_query() {
    let mut state = ResourceState::default();
    state.begin_load(ResourceKind::Formations);
    state.finish_load(vec![row(1, "Rust"), row(2, "SQL")]);
    state.query.set_search("sq");
    let page = state.page();
    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0].id, 2);
}

#[test]
fn open_delete_captures_row_label() {
    let mut state = ResourceState::default();
    state.begin_load(ResourceKind::Formations);
    state.finish_load(vec![row(3, "Rust")]);
    state.open_delete(3);
    assert_eq!(
        state.dialog,
        AdminDialog::Delete(ConfirmDelete::new(ResourceKind::Formations, 3, "Rust"))
    );
    state.close_dialog();
    assert_eq!(state.dialog, AdminDialog::Closed);
}

#[test]
fn row_label_falls_back_to_id() {
    let state = ResourceState::default();
    assert_eq!(state.row_label(42), "#42");
}

#[test]
fn edit_dialog_carries_id() {
    let mut state = ResourceState::default();
    state.open_edit(5);
    assert_eq!(state.dialog, AdminDialog::Form { mode: FormMode::Edit, id: Some(5) });
    state.open_create();
    assert_eq!(state.dialog, AdminDialog::Form { mode: FormMode::Create, id: None });
}

#[test]
fn filter_columns_point_at_categorical_cells() {
    for kind in [ResourceKind::Users, ResourceKind::Formations, ResourceKind::Payments] {
        let column = filter_column(kind).expect("filter column");
        let header = kind.columns()[column];
        assert!(["Role", "Level", "Status"].contains(&header), "{header}");
    }
    assert_eq!(filter_column(ResourceKind::Lessons), None);
}

#[test]
fn row_actions_follow_permissions() {
    let caps = Capabilities::from_slugs(["formations.view", "formations.update"]);
    let actions = RowActions::for_kind(&caps, ResourceKind::Formations);
    assert_eq!(actions, RowActions { create: false, edit: true, delete: false, upload: true });

    let caps = Capabilities::from_slugs(["roles.*"]);
    let actions = RowActions::for_kind(&caps, ResourceKind::Roles);
    assert!(actions.create && actions.edit && actions.delete);
    assert!(!actions.upload, "roles have no file slot");
}
