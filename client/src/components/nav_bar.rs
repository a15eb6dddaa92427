//! Top navigation: section links filtered by capability, and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(|state| state.user = None);
            navigate("/login", leptos_router::NavigateOptions::default());
        });
    };

    let links = move || {
        let state = auth.get();
        let caps = state.capabilities();
        let mut links = Vec::new();
        if caps.can_access_admin() {
            links.push(("/admin".to_owned(), "Dashboard".to_owned()));
            links.extend(
                caps.visible_kinds()
                    .into_iter()
                    .map(|kind| (format!("/admin/{}", kind.segment()), kind.title().to_owned())),
            );
        }
        if state.user.as_ref().is_some_and(|user| user.is_student()) {
            links.push(("/student".to_owned(), "My learning".to_owned()));
        }
        links
    };

    view! {
        <header class="nav-bar">
            <a class="nav-bar__brand" href="/">"Academy"</a>
            <nav class="nav-bar__links">
                {move || {
                    links()
                        .into_iter()
                        .map(|(href, label)| view! { <a class="nav-bar__link" href=href>{label}</a> })
                        .collect::<Vec<_>>()
                }}
            </nav>
            <span class="nav-bar__user">{move || auth.get().display_name()}</span>
            <button class="btn nav-bar__logout" on:click=on_logout>
                "Log out"
            </button>
        </header>
    }
}
