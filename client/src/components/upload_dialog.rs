//! Image/PDF upload modal for formations and lessons.
//!
//! The selected file is checked against its [`UploadPolicy`] on change and
//! again before sending; a refused file never leaves the browser.

use leptos::prelude::*;
use models::upload::format_bytes;
use models::{Id, ResourceKind, UploadPolicy};

#[cfg(feature = "hydrate")]
use crate::components::toast_host::{notify, notify_error};
#[cfg(feature = "hydrate")]
use crate::state::toast::{ToastKind, ToastState};

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn checked_file(input: &web_sys::HtmlInputElement, policy: UploadPolicy) -> Result<web_sys::File, String> {
    let file = input
        .files()
        .and_then(|files| files.get(0))
        .ok_or_else(|| "Choose a file first.".to_owned())?;
    policy
        .check(&file.name(), &file.type_(), file.size() as u64)
        .map_err(|err| err.to_string())?;
    Ok(file)
}

#[component]
pub fn UploadDialog(
    kind: ResourceKind,
    id: Id,
    label: String,
    policy: UploadPolicy,
    on_uploaded: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let hint = format!("Accepted: {} · max {}", policy.allowed_mime.join(", "), format_bytes(policy.max_bytes));

    let on_change = move |_: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        if let Some(input) = input_ref.get() {
            error.set(checked_file(&input, policy).err());
        }
    };

    let on_send = move |_: leptos::ev::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(input) = input_ref.get() else { return };
            let file = match checked_file(&input, policy) {
                Ok(file) => file,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            let toasts = expect_context::<RwSignal<ToastState>>();
            busy.set(true);
            leptos::task::spawn_local(async move {
                let result = crate::net::api::upload_file(kind, id, policy, file).await;
                busy.set(false);
                match result {
                    Ok(()) => {
                        notify(toasts, ToastKind::Success, "File uploaded.");
                        on_uploaded.run(());
                    }
                    Err(err) => {
                        leptos::logging::warn!("upload for {} {id} failed: {err}", kind.singular());
                        error.set(Some(err.user_message()));
                        notify_error(toasts, err.user_message());
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (kind, id);
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--upload" on:click=move |ev| ev.stop_propagation()>
                <h2 class="dialog__title">{format!("Upload {} for {label}", policy.field)}</h2>
                <label class="dialog__label">
                    "File"
                    <input
                        class="dialog__input"
                        type="file"
                        accept=policy.accept()
                        node_ref=input_ref
                        on:change=on_change
                    />
                </label>
                <p class="dialog__hint">{hint}</p>
                {move || error.get().map(|message| view! { <p class="dialog__error">{message}</p> })}
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || busy.get() || error.get().is_some()
                        on:click=on_send
                    >
                        {move || if busy.get() { "Uploading…" } else { "Upload" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
