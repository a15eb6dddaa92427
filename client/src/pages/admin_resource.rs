//! Admin CRUD screen for one resource kind, picked by the `:resource` segment.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rows are fetched once per kind and filtered client-side by the data
//! table. Every successful mutation refetches the list so the table never
//! shows optimistic state.
//!
//! ERROR HANDLING
//! ==============
//! Load and mutation failures surface as toasts. Form failures additionally
//! land inline on the dialog; a `422` maps onto the offending fields.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use models::validation::schema_for;
use models::{FormMode, ResourceKind, UploadPolicy};
use serde_json::Value;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::data_table::DataTable;
use crate::components::form_dialog::FormDialog;
use crate::components::nav_bar::NavBar;
use crate::components::upload_dialog::UploadDialog;
use crate::state::auth::AuthState;
use crate::state::resources::{AdminDialog, ResourceState, RowActions};
use crate::state::toast::ToastState;
use crate::util::auth::{admin_access, install_access_redirect};
use crate::util::confirm::DeleteIntent;
use crate::util::form::FormState;

/// Fetch rows for `kind` into `state`.
fn load_rows(state: RwSignal<ResourceState>, toasts: RwSignal<ToastState>, kind: ResourceKind) {
    state.update(|s| s.begin_load(kind));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_rows(kind).await;
        // The user may have switched kinds while this was in flight.
        if state.with_untracked(|s| s.kind) != Some(kind) {
            return;
        }
        match result {
            Ok(rows) => state.update(|s| s.finish_load(rows)),
            Err(err) => {
                leptos::logging::warn!("loading {} failed: {err}", kind.segment());
                state.update(|s| s.fail_load(err.user_message()));
                crate::components::toast_host::notify_error(toasts, err.user_message());
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = toasts;
}

#[component]
pub fn AdminResourcePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_access_redirect(auth, admin_access, use_navigate());

    let params = use_params_map();
    let kind = Memo::new(move |_| params.with(|p| p.get("resource").and_then(|s| ResourceKind::from_segment(&s))));

    let state = RwSignal::new(ResourceState::default());
    let form = RwSignal::new(FormState::default());
    let deleting = RwSignal::new(false);

    Effect::new(move || {
        if auth.with(|a| a.loading) {
            return;
        }
        if let Some(kind) = kind.get() {
            load_rows(state, toasts, kind);
        }
    });

    let actions = Memo::new(move |_| {
        kind.get()
            .map(|kind| RowActions::for_kind(&auth.get().capabilities(), kind))
            .unwrap_or_default()
    });

    let close = Callback::new(move |()| state.update(ResourceState::close_dialog));

    let submit_form = Callback::new(move |payload: Value| {
        let Some(kind) = kind.get_untracked() else { return };
        let AdminDialog::Form { mode, id } = state.with_untracked(|s| s.dialog.clone()) else { return };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match (mode, id) {
                (FormMode::Edit, Some(id)) => crate::net::api::update_resource(kind, id, payload).await,
                _ => crate::net::api::create_resource(kind, payload).await,
            };
            match result {
                Ok(()) => {
                    form.update(FormState::finish_submit);
                    state.update(ResourceState::close_dialog);
                    let verb = if mode == FormMode::Edit { "updated" } else { "created" };
                    crate::components::toast_host::notify(
                        toasts,
                        crate::state::toast::ToastKind::Success,
                        format!("{} {verb}.", capitalize(kind.singular())),
                    );
                    load_rows(state, toasts, kind);
                }
                Err(err) => {
                    leptos::logging::warn!("saving {} failed: {err}", kind.singular());
                    form.update(|f| f.fail(&err));
                    crate::components::toast_host::notify_error(toasts, err.user_message());
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (mode, id, payload);
    });

    let confirm_delete = Callback::new(move |intent: DeleteIntent| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::delete_resource(intent.kind, intent.id).await;
            deleting.set(false);
            state.update(ResourceState::close_dialog);
            match result {
                Ok(()) => {
                    crate::components::toast_host::notify(
                        toasts,
                        crate::state::toast::ToastKind::Success,
                        format!("{} deleted.", capitalize(intent.kind.singular())),
                    );
                    load_rows(state, toasts, intent.kind);
                }
                Err(err) => {
                    leptos::logging::warn!("deleting {} {} failed: {err}", intent.kind.singular(), intent.id);
                    crate::components::toast_host::notify_error(toasts, err.user_message());
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = intent;
    });

    let uploaded = Callback::new(move |()| {
        state.update(ResourceState::close_dialog);
        if let Some(kind) = kind.get_untracked() {
            load_rows(state, toasts, kind);
        }
    });

    let open_create = move |_: leptos::ev::MouseEvent| state.update(ResourceState::open_create);

    // Rebuilt only when the dialog itself changes, so table updates never
    // reset a half-filled form.
    let current_dialog = Memo::new(move |_| state.with(|s| s.dialog.clone()));

    let dialog = move || {
        let kind = kind.get()?;
        match current_dialog.get() {
            AdminDialog::Closed => None,
            AdminDialog::Form { mode, id } => {
                let values = id.and_then(|id| state.with_untracked(|s| s.row(id).map(|row| row.values.clone())));
                form.set(FormState::with_values(values.unwrap_or_default()));
                let title = match mode {
                    FormMode::Create => format!("New {}", kind.singular()),
                    FormMode::Edit => format!("Edit {}", kind.singular()),
                };
                Some(
                    view! {
                        <FormDialog
                            title
                            schema=schema_for(kind, mode)
                            form
                            on_submit=submit_form
                            on_cancel=close
                        />
                    }
                    .into_any(),
                )
            }
            AdminDialog::Delete(pending) => Some(
                view! {
                    <ConfirmDialog
                        pending
                        busy=deleting
                        on_confirm=confirm_delete
                        on_close=close
                    />
                }
                .into_any(),
            ),
            AdminDialog::Upload { id, label } => UploadPolicy::for_kind(kind).map(|policy| {
                view! {
                    <UploadDialog kind id label policy on_uploaded=uploaded on_close=close/>
                }
                .into_any()
            }),
        }
    };

    view! {
        <NavBar/>
        <main class="page page--admin-resource">
            {move || match kind.get() {
                None => view! { <p class="empty-state">"Unknown resource."</p> }.into_any(),
                Some(kind) => view! {
                    <div class="page__header">
                        <h1>{kind.title()}</h1>
                        <Show when=move || actions.get().create>
                            <button class="btn btn--primary" on:click=open_create>
                                {format!("New {}", kind.singular())}
                            </button>
                        </Show>
                    </div>
                    {move || state.get().error.map(|message| view! { <p class="page__error">{message}</p> })}
                    <DataTable kind state actions=actions.get()/>
                }
                .into_any(),
            }}
            {dialog}
        </main>
    }
}

#[cfg(feature = "hydrate")]
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
