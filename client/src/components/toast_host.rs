//! Toast stack rendered once at the app root.

use leptos::prelude::*;

use crate::state::toast::{TOAST_TTL_MS, ToastKind, ToastState};

/// Push a toast and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let mut id = None;
    toasts.update(|state| id = Some(state.push(kind, message)));

    #[cfg(feature = "hydrate")]
    if let Some(id) = id {
        gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
            toasts.update(|state| state.dismiss(id));
        })
        .forget();
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (id, TOAST_TTL_MS);
}

/// Shorthand for the common failed-request case.
pub fn notify_error(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    notify(toasts, ToastKind::Error, message);
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.css_class()>
                                <span class="toast__message">{toast.message}</span>
                                <button
                                    class="toast__close"
                                    title="Dismiss"
                                    on:click=move |_| toasts.update(|state| state.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
