//! Lesson reader: markdown body plus the attached PDF, if any.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use models::{Id, Lesson};

use crate::components::nav_bar::NavBar;
use crate::state::auth::AuthState;
use crate::util::auth::{install_access_redirect, signed_in_access};
use crate::util::markdown::render_markdown;

#[component]
pub fn LessonPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_access_redirect(auth, signed_in_access, use_navigate());

    let params = use_params_map();
    let lesson_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|raw| raw.parse::<Id>().ok())));
    let lesson = RwSignal::new(None::<Lesson>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let Some(id) = lesson_id.get() else {
            error.set(Some("Unknown lesson.".to_owned()));
            return;
        };
        lesson.set(None);
        error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_lesson(id).await {
                Ok(loaded) => lesson.set(Some(loaded)),
                Err(err) => {
                    leptos::logging::warn!("lesson {id} failed: {err}");
                    error.set(Some(err.user_message()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    view! {
        <NavBar/>
        <main class="page page--lesson">
            <a class="page__back" href="/student">"← Back to my learning"</a>
            {move || error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            {move || {
                lesson
                    .get()
                    .map(|lesson| {
                        let body = render_markdown(&lesson.content);
                        let minutes = (lesson.duration_minutes > 0)
                            .then(|| view! { <span class="lesson__meta">{format!("{} min", lesson.duration_minutes)}</span> });
                        let pdf = lesson.resource_url.map(|url| {
                            view! {
                                <a class="btn lesson__resource" href=url target="_blank" rel="noopener">
                                    "Download PDF"
                                </a>
                            }
                        });
                        view! {
                            <article class="lesson">
                                <h1>{lesson.title}</h1>
                                {minutes}
                                <div class="lesson__body" inner_html=body></div>
                                {pdf}
                            </article>
                        }
                    })
            }}
        </main>
    }
}
