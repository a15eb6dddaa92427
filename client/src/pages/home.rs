//! Root route: sends each user to their landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::home_route;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if state.loading {
            return;
        }
        let target = state.user.as_ref().map_or("/login", home_route);
        navigate(target, NavigateOptions::default());
    });

    view! { <p class="empty-state">"Loading…"</p> }
}
