//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_host::ToastHost;
use crate::pages::{
    admin_dashboard::AdminDashboardPage, admin_resource::AdminResourcePage, exam::ExamPage,
    exam_result::ExamResultPage, home::HomePage, lesson::LessonPage, login::LoginPage, student::StudentPage,
};
use crate::state::{auth::AuthState, exam::ExamState, toast::ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts, loads the signed-in user once, and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    let toasts = RwSignal::new(ToastState::default());
    let exam = RwSignal::new(ExamState::default());

    provide_context(auth);
    provide_context(toasts);
    provide_context(exam);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await.ok();
        auth.set(AuthState { user, loading: false });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/academy.css"/>
        <Title text="Academy"/>

        <Router>
            <Routes fallback=|| view! { <p class="empty-state">"Page not found."</p> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("admin") view=AdminDashboardPage/>
                <Route path=(StaticSegment("admin"), ParamSegment("resource")) view=AdminResourcePage/>
                <Route path=StaticSegment("student") view=StudentPage/>
                <Route path=(StaticSegment("student"), StaticSegment("lessons"), ParamSegment("id")) view=LessonPage/>
                <Route path=(StaticSegment("exam"), StaticSegment("result")) view=ExamResultPage/>
                <Route path=(StaticSegment("exam"), ParamSegment("certification"), ParamSegment("mode")) view=ExamPage/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}
