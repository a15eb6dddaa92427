//! Email + password sign-in page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use models::validation::login_schema;

use crate::state::auth::AuthState;
use crate::util::auth::home_route;
use crate::util::form::FormState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let form = RwSignal::new(FormState::default());
    let navigate = use_navigate();

    // Already signed in: go straight to the landing page.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if let Some(user) = auth.get().user {
            navigate_home(home_route(&user), leptos_router::NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut payload = None;
        form.update(|state| payload = state.begin_submit(&login_schema()));
        if payload.is_none() {
            return;
        }
        let (email, password) = form.with_untracked(|state| (state.value("email"), state.value("password")));

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(email.trim(), &password).await {
                    Ok(user) => {
                        form.update(FormState::finish_submit);
                        let target = home_route(&user);
                        auth.update(|state| state.user = Some(user));
                        navigate(target, leptos_router::NavigateOptions::default());
                    }
                    Err(err) => {
                        leptos::logging::warn!("login failed: {err}");
                        form.update(|state| state.fail(&err));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (email, password, &navigate);
    };

    let field_error = move |field: &'static str| {
        move || form.get().error(field).map(|message| view! { <span class="login-error">{message}</span> })
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Academy"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="username"
                        prop:value=move || form.get().value("email")
                        on:input=move |ev| form.update(|state| state.set("email", event_target_value(&ev)))
                    />
                    {field_error("email")}
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || form.get().value("password")
                        on:input=move |ev| form.update(|state| state.set("password", event_target_value(&ev)))
                    />
                    {field_error("password")}
                    <button class="login-button" type="submit" disabled=move || form.get().submitting>
                        {move || if form.get().submitting { "Signing in…" } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || form.get().message.is_some()>
                    <p class="login-message">{move || form.get().message.unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
