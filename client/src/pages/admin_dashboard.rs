//! Admin overview: headline counts and monthly revenue.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use models::stats::AdminStats;

use crate::components::nav_bar::NavBar;
use crate::components::stat_card::{BarChart, StatGrid};
use crate::state::auth::AuthState;
use crate::util::auth::{admin_access, install_access_redirect};

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_access_redirect(auth, admin_access, use_navigate());

    let stats = RwSignal::new(None::<AdminStats>);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_admin_stats().await {
            Ok(loaded) => stats.set(Some(loaded)),
            Err(err) => {
                leptos::logging::warn!("admin stats failed: {err}");
                error.set(Some(err.user_message()));
            }
        }
    });

    view! {
        <NavBar/>
        <main class="page page--admin-dashboard">
            <h1>"Dashboard"</h1>
            {move || error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            {move || match stats.get() {
                None => view! { <p class="empty-state">"Loading…"</p> }.into_any(),
                Some(stats) => {
                    let cards = stats.cards();
                    view! {
                        <StatGrid cards/>
                        <BarChart title="Revenue per month" series=stats.monthly_revenue/>
                    }
                        .into_any()
                }
            }}
        </main>
    }
}
