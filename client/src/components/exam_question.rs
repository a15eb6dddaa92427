//! Current exam question with its answer options.
//!
//! Answer styling comes from [`ExamSession::mark_for`]: strict mode only ever
//! shows the pick, learning mode reveals correct and incorrect options once
//! an answer is chosen.

use exam::{AnswerId, ExamSession};
use leptos::prelude::*;

#[component]
pub fn ExamQuestion(session: RwSignal<Option<ExamSession>>, on_select: Callback<AnswerId>) -> impl IntoView {
    view! {
        {move || {
            session
                .with(|current| {
                    current.as_ref().map(|s| {
                        let question = s.current_question().clone();
                        let heading = format!("Question {} of {}", s.current_index() + 1, s.len());
                        let locked = !s.is_in_progress();
                        let feedback = s.feedback();
                        let answers = question
                            .answers
                            .iter()
                            .map(|answer| {
                                let id = answer.id;
                                let class = s.mark_for(id).css_class();
                                view! {
                                    <li>
                                        <button
                                            class=class
                                            disabled=locked
                                            on:click=move |_| on_select.run(id)
                                        >
                                            {answer.text.clone()}
                                        </button>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>();
                        let verdict = feedback.map(|fb| {
                            let (class, text) = if fb.is_correct {
                                ("exam-feedback exam-feedback--correct", "Correct.")
                            } else {
                                ("exam-feedback exam-feedback--incorrect", "Incorrect.")
                            };
                            view! {
                                <div class=class>
                                    <strong>{text}</strong>
                                    {question.explanation.clone().map(|text| view! { <p>{text}</p> })}
                                </div>
                            }
                        });

                        view! {
                            <section class="exam-question">
                                <p class="exam-question__counter">{heading}</p>
                                <h2 class="exam-question__text">{question.text.clone()}</h2>
                                <ul class="exam-question__answers">{answers}</ul>
                                {verdict}
                            </section>
                        }
                    })
                })
        }}
    }
}
