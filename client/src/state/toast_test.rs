use super::*;

#[test]
fn push_appends_and_dismiss_removes() {
    let mut state = ToastState::default();
    let first = state.push(ToastKind::Error, "Could not save");
    let second = state.push(ToastKind::Success, "Saved");
    assert_eq!(state.items.len(), 2);

    state.dismiss(first);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, second);
    assert_eq!(state.items[0].message, "Saved");
}

#[test]
fn dismissing_unknown_id_is_noop() {
    let mut state = ToastState::default();
    state.push(ToastKind::Info, "hello");
    state.dismiss(Uuid::nil());
    assert_eq!(state.items.len(), 1);
}

#[test]
fn queue_keeps_only_most_recent() {
    let mut state = ToastState::default();
    for n in 0..MAX_TOASTS + 2 {
        state.push(ToastKind::Info, format!("toast {n}"));
    }
    assert_eq!(state.items.len(), MAX_TOASTS);
    assert_eq!(state.items[0].message, "toast 2");
}

#[test]
fn kind_maps_to_modifier_class() {
    assert_eq!(ToastKind::Error.css_class(), "toast toast--error");
    assert_eq!(ToastKind::Info.css_class(), "toast");
}
