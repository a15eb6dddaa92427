//! Student landing page: progress, certifications and upcoming sessions.

use exam::ModeKind;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use models::stats::StudentDashboard;

use crate::components::nav_bar::NavBar;
use crate::components::stat_card::StatGrid;
use crate::state::auth::AuthState;
use crate::state::exam::exam_route;
use crate::util::auth::{install_access_redirect, student_access};

#[component]
pub fn StudentPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_access_redirect(auth, student_access, use_navigate());

    let dashboard = RwSignal::new(None::<StudentDashboard>);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_student_dashboard().await {
            Ok(loaded) => dashboard.set(Some(loaded)),
            Err(err) => {
                leptos::logging::warn!("student dashboard failed: {err}");
                error.set(Some(err.user_message()));
            }
        }
    });

    view! {
        <NavBar/>
        <main class="page page--student">
            <h1>{move || format!("Welcome, {}", auth.get().display_name())}</h1>
            {move || error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            {move || dashboard.get().map(|dashboard| view! { <StudentSections dashboard/> })}
        </main>
    }
}

#[component]
fn StudentSections(dashboard: StudentDashboard) -> impl IntoView {
    let cards = dashboard.cards();

    let formations = dashboard
        .formations
        .into_iter()
        .map(|formation| {
            let percent = formation.progress_percent();
            let progress = format!("{}/{} lessons", formation.completed_lessons, formation.total_lessons);
            let next = formation.next_lesson_id.map(|id| {
                view! { <a class="btn btn--primary" href=format!("/student/lessons/{id}")>"Continue"</a> }
            });
            view! {
                <li class="formation-card">
                    <h3>{formation.title}</h3>
                    <div class="progress">
                        <div class="progress__bar" style=format!("width: {percent}%")></div>
                    </div>
                    <span class="formation-card__meta">{format!("{percent}% · {progress}")}</span>
                    {next}
                </li>
            }
        })
        .collect::<Vec<_>>();

    let certifications = dashboard
        .certifications
        .into_iter()
        .map(|cert| {
            let best = cert
                .best_score
                .map_or_else(|| "Not attempted".to_owned(), |score| format!("Best: {score:.0}%"));
            let status = if cert.passed { "cert-card cert-card--passed" } else { "cert-card" };
            view! {
                <li class=status>
                    <h3>{cert.title}</h3>
                    <span class="cert-card__meta">{format!("{best} · {} attempts", cert.attempts)}</span>
                    <div class="cert-card__actions">
                        <a class="btn" href=exam_route(cert.certification_id, ModeKind::Learning)>
                            {ModeKind::Learning.label()}
                        </a>
                        <a class="btn btn--primary" href=exam_route(cert.certification_id, ModeKind::Strict)>
                            {ModeKind::Strict.label()}
                        </a>
                    </div>
                </li>
            }
        })
        .collect::<Vec<_>>();

    let sessions = dashboard
        .upcoming_sessions
        .into_iter()
        .map(|session| {
            let seats = format!("{}/{} enrolled", session.enrolled_count, session.capacity);
            view! {
                <li class="session-row">
                    <strong>{session.title}</strong>
                    <span>{format!("{} → {}", session.start_date, session.end_date)}</span>
                    <span>{seats}</span>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <StatGrid cards/>
        <section class="student-section">
            <h2>"My formations"</h2>
            {if formations.is_empty() {
                view! { <p class="empty-state">"You are not enrolled in any formation yet."</p> }.into_any()
            } else {
                view! { <ul class="formation-list">{formations}</ul> }.into_any()
            }}
        </section>
        <section class="student-section">
            <h2>"Certifications"</h2>
            <ul class="cert-list">{certifications}</ul>
        </section>
        <section class="student-section">
            <h2>"Upcoming sessions"</h2>
            <ul class="session-list">{sessions}</ul>
        </section>
    }
}
