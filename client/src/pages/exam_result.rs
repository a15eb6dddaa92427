//! Result view for the exam that just finished.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::NavBar;
use crate::state::auth::AuthState;
use crate::state::exam::ExamState;
use crate::util::auth::{install_access_redirect, signed_in_access};

#[component]
pub fn ExamResultPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let exam_state = expect_context::<RwSignal<ExamState>>();
    install_access_redirect(auth, signed_in_access, use_navigate());

    view! {
        <NavBar/>
        <main class="page page--exam-result">
            {move || match exam_state.get().last {
                None => view! {
                    <p class="empty-state">"No exam result to show."</p>
                    <a class="btn" href="/student">"Back to my learning"</a>
                }
                .into_any(),
                Some(finished) => {
                    let outcome = &finished.outcome;
                    let class = if outcome.passed() { "result-card result-card--passed" } else { "result-card result-card--failed" };
                    let (correct, total) = outcome.counts();
                    let review = finished
                        .review()
                        .into_iter()
                        .map(|line| {
                            let row_class = if line.correct { "review-row review-row--correct" } else { "review-row" };
                            view! {
                                <li class=row_class>
                                    <span>{format!("Question {}", line.number)}</span>
                                    <span>{line.verdict}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>();
                    view! {
                        <section class=class>
                            <h1>{format!("{} result", finished.mode.label())}</h1>
                            <p class="result-card__headline">{outcome.headline()}</p>
                            <p class="result-card__score">{format!("{:.0}%", outcome.percent())}</p>
                            <p class="result-card__counts">{format!("{correct} of {total} questions correct")}</p>
                        </section>
                        <ul class="review-list">{review}</ul>
                        <div class="page__actions">
                            <a class="btn btn--primary" href=finished.retake_route()>"Try again"</a>
                            <a class="btn" href="/student">"Back to my learning"</a>
                        </div>
                    }
                    .into_any()
                }
            }}
        </main>
    }
}
