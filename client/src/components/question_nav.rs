//! Numbered question grid showing answered, flagged and current state.

use exam::{ExamSession, QuestionStatus};
use leptos::prelude::*;

fn status_class(status: &QuestionStatus) -> String {
    let mut class = String::from("question-nav__item");
    if status.answered {
        class.push_str(" question-nav__item--answered");
    }
    if status.flagged {
        class.push_str(" question-nav__item--flagged");
    }
    if status.current {
        class.push_str(" question-nav__item--current");
    }
    class
}

#[component]
pub fn QuestionNav(session: RwSignal<Option<ExamSession>>, on_jump: Callback<usize>) -> impl IntoView {
    view! {
        <nav class="question-nav" aria-label="Questions">
            {move || {
                session
                    .with(|s| s.as_ref().map(ExamSession::statuses).unwrap_or_default())
                    .into_iter()
                    .map(|status| {
                        let index = status.index;
                        view! {
                            <button class=status_class(&status) on:click=move |_| on_jump.run(index)>
                                {index + 1}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </nav>
    }
}
