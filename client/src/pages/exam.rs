//! Exam runner for `/exam/:certification/:mode`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns one [`ExamSession`] and is the only place its effects are
//! executed: answer saves, the final submission, and the local result in
//! learning mode. The state machine itself lives in the `exam` crate.
//!
//! DESIGN
//! ======
//! A single one-second loop drives the strict countdown and drains the
//! answer outbox. Saves that fail are retried by the outbox's backoff, not
//! here. The loop stops when the page unmounts or the exam completes.
//!
//! ERROR HANDLING
//! ==============
//! A failed submission keeps the completed session and offers a retry with
//! the same answer map. Rejected transitions (e.g. input after completion)
//! are logged and dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use exam::Effect as ExamEffect;
use exam::{CompletionPrompt, ExamOutcome, ExamSession, ModeKind, SubmitPayload, format_clock};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use models::Id;

use crate::components::exam_question::ExamQuestion;
use crate::components::nav_bar::NavBar;
use crate::components::question_nav::QuestionNav;
#[cfg(feature = "hydrate")]
use crate::components::toast_host::notify_error;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::exam::advance;
use crate::state::exam::{ExamState, FinishedExam, parse_exam_params};
use crate::state::toast::ToastState;
use crate::util::auth::{install_access_redirect, student_access};

/// Signals shared by every effect handler of one exam page.
#[derive(Clone, Copy)]
struct ExamCtx {
    certification_id: Id,
    mode: ModeKind,
    session: RwSignal<Option<ExamSession>>,
    toasts: RwSignal<ToastState>,
    exam_state: RwSignal<ExamState>,
    submitting: RwSignal<bool>,
    submit_failed: RwSignal<bool>,
    finished: RwSignal<bool>,
}

impl ExamCtx {
    /// Run a session method that may emit an effect, then execute the effect.
    fn step<F>(self, action: F)
    where
        F: FnOnce(&mut ExamSession) -> Result<Option<ExamEffect>, exam::ExamError>,
    {
        let mut emitted = None;
        self.session.update(|slot| {
            if let Some(session) = slot.as_mut() {
                match action(session) {
                    Ok(effect) => emitted = effect,
                    Err(err) => leptos::logging::warn!("exam input ignored: {err}"),
                }
            }
        });
        if let Some(effect) = emitted {
            self.apply(effect);
        }
    }

    fn apply(self, effect: ExamEffect) {
        match effect {
            ExamEffect::SaveAnswer(save) => self.send_save(save),
            ExamEffect::Submit(payload) => self.submit(payload),
            ExamEffect::ShowLocalResult(result) => self.finish(ExamOutcome::Local(result)),
        }
    }

    fn send_save(self, save: exam::PendingSave) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            self.deliver(save).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = save;
    }

    /// Send one save and report the outcome back to the outbox.
    #[cfg(feature = "hydrate")]
    async fn deliver(self, save: exam::PendingSave) {
        let result = crate::net::api::save_answer(&save).await;
        let (question_id, answer_id) = (save.question_id, save.answer_id);
        self.session.try_update(|slot| {
            let Some(session) = slot.as_mut() else { return };
            match &result {
                Ok(()) => session.acknowledge_save(question_id, answer_id),
                Err(err) => {
                    leptos::logging::warn!(
                        "saving answer {answer_id} for question {question_id} failed (attempt {}): {err}",
                        save.attempts
                    );
                    session.retry_save_later(question_id, answer_id, crate::util::clock::now_ms());
                }
            }
        });
    }

    fn submit(self, payload: SubmitPayload) {
        if self.submitting.get_untracked() {
            return;
        }
        self.submitting.set(true);
        self.submit_failed.set(false);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::submit_exam(&payload).await {
                Ok(graded) => {
                    self.submitting.try_set(false);
                    self.session.try_update(|slot| {
                        if let Some(session) = slot.as_mut() {
                            session.mark_submitted();
                        }
                    });
                    self.finish(ExamOutcome::Graded(graded));
                }
                Err(err) => {
                    leptos::logging::warn!("submitting exam session {} failed: {err}", payload.session_id);
                    self.submitting.try_set(false);
                    self.submit_failed.try_set(true);
                    notify_error(self.toasts, format!("Submission failed: {}", err.user_message()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = payload;
    }

    /// Resend the completed answer map after a failed submission.
    fn retry_submit(self) {
        if let Some(payload) = self.session.with_untracked(|slot| slot.as_ref().and_then(ExamSession::submit_payload)) {
            self.submit(payload);
        }
    }

    fn finish(self, outcome: ExamOutcome) {
        self.exam_state.update(|state| {
            state.last = Some(FinishedExam { certification_id: self.certification_id, mode: self.mode, outcome });
        });
        self.finished.try_set(true);
    }

    /// One loop iteration: advance the clock, then fire saves that are due.
    /// Each save runs on its own task so a slow request never stalls the clock.
    #[cfg(feature = "hydrate")]
    fn tick(self) {
        let mut effect = None;
        let mut due = Vec::new();
        self.session.try_update(|slot| {
            if let Some(session) = slot.as_mut() {
                (effect, due) = advance(session, crate::util::clock::now_ms());
            }
        });
        if let Some(effect) = effect {
            self.apply(effect);
        }
        for save in due {
            self.send_save(save);
        }
    }

    #[cfg(feature = "hydrate")]
    fn in_progress(self) -> bool {
        self.session.with_untracked(|slot| slot.as_ref().is_some_and(ExamSession::is_in_progress))
    }
}

#[component]
pub fn ExamPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_access_redirect(auth, student_access, navigate.clone());

    let params = use_params_map();
    let parsed = params.with_untracked(|p| {
        parse_exam_params(p.get("certification").as_deref(), p.get("mode").as_deref())
    });
    let (certification_id, mode) = match parsed {
        Ok(parsed) => parsed,
        Err(message) => {
            return view! {
                <NavBar/>
                <main class="page page--exam">
                    <p class="page__error">{message}</p>
                    <a class="btn" href="/student">"Back"</a>
                </main>
            }
            .into_any();
        }
    };

    let ctx = ExamCtx {
        certification_id,
        mode,
        session: RwSignal::new(None),
        toasts: expect_context::<RwSignal<ToastState>>(),
        exam_state: expect_context::<RwSignal<ExamState>>(),
        submitting: RwSignal::new(false),
        submit_failed: RwSignal::new(false),
        finished: RwSignal::new(false),
    };
    let load_error = RwSignal::new(None::<String>);
    let prompt = RwSignal::new(None::<CompletionPrompt>);

    Effect::new(move || {
        if ctx.finished.get() {
            navigate("/exam/result", NavigateOptions::default());
        }
    });

    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let loaded = match mode {
            ModeKind::Learning => crate::net::api::fetch_practice_set(certification_id).await.and_then(|set| {
                let exam_mode = exam::ExamMode::learning_from(&set);
                ExamSession::new(set.questions, exam_mode).map_err(|e| models::ApiError::Decode(e.to_string()))
            }),
            ModeKind::Strict => crate::net::api::start_exam_session(certification_id).await.and_then(|started| {
                let exam_mode = exam::ExamMode::strict_from(&started);
                ExamSession::new(started.questions, exam_mode).map_err(|e| models::ApiError::Decode(e.to_string()))
            }),
        };
        let session = match loaded {
            Ok(session) => session,
            Err(err) => {
                leptos::logging::warn!("loading {mode} exam for certification {certification_id} failed: {err}");
                load_error.try_set(Some(err.user_message()));
                return;
            }
        };
        if !alive.load(Ordering::Relaxed) {
            return;
        }
        ctx.session.set(Some(session));

        loop {
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
            if !alive.load(Ordering::Relaxed) || !ctx.in_progress() {
                break;
            }
            ctx.tick();
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = alive;

    let on_select = Callback::new(move |answer_id| ctx.step(|s| s.select_answer(answer_id)));
    let on_jump = Callback::new(move |index| ctx.step(|s| s.jump(index).map(|()| None)));
    let go_prev = move |_: leptos::ev::MouseEvent| ctx.step(|s| s.prev().map(|_| None));
    let go_next = move |_: leptos::ev::MouseEvent| ctx.step(|s| s.next().map(|_| None));
    let toggle_flag = move |_: leptos::ev::MouseEvent| ctx.step(|s| s.toggle_flag().map(|_| None));
    let ask_complete = move |_: leptos::ev::MouseEvent| {
        prompt.set(ctx.session.with_untracked(|slot| slot.as_ref().map(ExamSession::request_complete)));
    };
    let confirm_complete = move |_: leptos::ev::MouseEvent| {
        prompt.set(None);
        ctx.step(|s| s.complete().map(Some));
    };

    let with_session = move |f: fn(&ExamSession) -> String| {
        move || ctx.session.with(|slot| slot.as_ref().map(f).unwrap_or_default())
    };

    let clock = move || {
        ctx.session.with(|slot| {
            slot.as_ref().and_then(|s| {
                let remaining = s.remaining_secs()?;
                let class = if s.is_running_low() { "exam-clock exam-clock--low" } else { "exam-clock" };
                Some(view! { <span class=class>{format_clock(remaining)}</span> })
            })
        })
    };

    let unsaved = move || {
        let count = ctx.session.with(|slot| slot.as_ref().map_or(0, ExamSession::unsaved_count));
        (count > 0).then(|| {
            let noun = if count == 1 { "answer" } else { "answers" };
            view! { <span class="exam-unsaved">{format!("Saving {count} {noun}…")}</span> }
        })
    };

    view! {
        <NavBar/>
        <main class="page page--exam">
            <header class="exam-header">
                <h1>{format!("{} · certification #{certification_id}", mode.label())}</h1>
                {clock}
                {unsaved}
            </header>
            {move || load_error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            <Show
                when=move || ctx.session.with(Option::is_some)
                fallback=move || {
                    view! {
                        <Show when=move || load_error.get().is_none()>
                            <p class="empty-state">"Loading questions…"</p>
                        </Show>
                    }
                }
            >
                <div class="exam-layout">
                    <QuestionNav session=ctx.session on_jump/>
                    <div class="exam-main">
                        <ExamQuestion session=ctx.session on_select/>
                        <div class="exam-controls">
                            <button class="btn" on:click=go_prev>"Previous"</button>
                            <button class="btn" on:click=toggle_flag>
                                {with_session(|s| {
                                    let flagged = s.is_flagged(s.current_question().id);
                                    if flagged { "Unflag".to_owned() } else { "Flag for review".to_owned() }
                                })}
                            </button>
                            <button class="btn" on:click=go_next>"Next"</button>
                            <button
                                class="btn btn--primary"
                                disabled=move || !ctx.session.with(|slot| slot.as_ref().is_some_and(ExamSession::is_in_progress))
                                on:click=ask_complete
                            >
                                "Finish"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || ctx.submitting.get()>
                <p class="exam-status">"Submitting answers…"</p>
            </Show>
            <Show when=move || ctx.submit_failed.get()>
                <div class="exam-status exam-status--error">
                    <p>"Your answers are kept. Check your connection and try again."</p>
                    <button class="btn btn--primary" on:click=move |_| ctx.retry_submit()>
                        "Retry submission"
                    </button>
                </div>
            </Show>

            {move || {
                prompt
                    .get()
                    .map(|summary| {
                        view! {
                            <div class="dialog-backdrop" on:click=move |_| prompt.set(None)>
                                <div class="dialog dialog--confirm" on:click=move |ev| ev.stop_propagation()>
                                    <h2 class="dialog__title">"Finish exam?"</h2>
                                    <p class="dialog__message">{summary.message()}</p>
                                    <div class="dialog__actions">
                                        <button class="btn" on:click=move |_| prompt.set(None)>
                                            "Keep working"
                                        </button>
                                        <button class="btn btn--primary" on:click=confirm_complete>
                                            "Finish"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    })
            }}
        </main>
    }
    .into_any()
}
