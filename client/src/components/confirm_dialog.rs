//! Destructive-action confirmation modal.

use leptos::prelude::*;

use crate::util::confirm::{ConfirmChoice, ConfirmDelete, DeleteIntent};

/// Resolves `pending` through [`ConfirmDelete::resolve`]: cancelling runs
/// `on_close` and nothing else, confirming hands the intent to `on_confirm`.
#[component]
pub fn ConfirmDialog(
    pending: ConfirmDelete,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<DeleteIntent>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = pending.title();
    let message = pending.message();
    let pending = StoredValue::new(pending);

    let choose = move |choice: ConfirmChoice| {
        match pending.get_value().resolve(choice) {
            Some(intent) => on_confirm.run(intent),
            None => on_close.run(()),
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| choose(ConfirmChoice::Cancel)>
            <div class="dialog dialog--confirm" role="alertdialog" on:click=move |ev| ev.stop_propagation()>
                <h2 class="dialog__title">{title}</h2>
                <p class="dialog__message">{message}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| choose(ConfirmChoice::Cancel)>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--danger"
                        disabled=move || busy.get()
                        on:click=move |_| choose(ConfirmChoice::Confirm)
                    >
                        {move || if busy.get() { "Deleting…" } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
