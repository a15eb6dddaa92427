//! `academy-cli exam take`: an interactive exam in the terminal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the same [`ExamSession`] state machine as the browser exam page.
//! Input lines, a one-second ticker and finished answer saves are
//! multiplexed with `tokio::select!`. Saves run on a `JoinSet`, so the clock
//! keeps ticking while the backend is slow; each tick also resends saves
//! whose retry time has come.
//!
//! ERROR HANDLING
//! ==============
//! A failed answer save is rescheduled through the session outbox and never
//! interrupts the exam. A failed submission keeps the completed session
//! around so `finish` can resend the same payload.

#[cfg(test)]
#[path = "take_test.rs"]
mod take_test;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use exam::{
    CompletionPrompt, Effect, ExamMode, ExamOutcome, ExamSession, GradedResult, ModeKind, PendingSave, PracticeSet,
    StartedSession, SubmitPayload,
};
use models::Id;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::render::{is_confirmation, render_outcome, render_question, render_status};
use crate::{CliContext, CliError, api_request};

const HELP: &str = "\
  1..9       pick an answer
  n / p      next / previous question
  g <num>    go to question <num>
  f          flag or unflag for review
  s          show progress
  finish     finish the exam
  q          quit without finishing";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExamInput {
    /// Zero-based answer position on the current question.
    Pick(usize),
    Next,
    Prev,
    /// Zero-based question index.
    Jump(usize),
    Flag,
    Status,
    Finish,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> ExamInput {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("").to_ascii_lowercase();
    let arg = words.next();

    match (command.as_str(), arg) {
        ("" | "s" | "status", None) => ExamInput::Status,
        ("n" | "next", None) => ExamInput::Next,
        ("p" | "prev", None) => ExamInput::Prev,
        ("f" | "flag", None) => ExamInput::Flag,
        ("finish" | "done", None) => ExamInput::Finish,
        ("h" | "help" | "?", None) => ExamInput::Help,
        ("q" | "quit", None) => ExamInput::Quit,
        ("g" | "go" | "goto", Some(number)) => match number.parse::<usize>() {
            Ok(n) if n > 0 => ExamInput::Jump(n - 1),
            _ => ExamInput::Unknown(line.to_owned()),
        },
        (number, None) => match number.parse::<usize>() {
            Ok(n) if n > 0 => ExamInput::Pick(n - 1),
            _ => ExamInput::Unknown(line.to_owned()),
        },
        _ => ExamInput::Unknown(line.to_owned()),
    }
}

/// What the driver does after one input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Redraw,
    Status,
    Perform(Effect),
    ConfirmFinish(CompletionPrompt),
    Help,
    Quit,
    Invalid(String),
}

/// Apply `input` to an in-progress session.
///
/// # Errors
///
/// Propagates [`exam::ExamError`] from the session, which only happens when
/// the session is no longer in progress.
pub fn apply_input(session: &mut ExamSession, input: ExamInput) -> Result<Step, exam::ExamError> {
    let step = match input {
        ExamInput::Pick(position) => {
            let Some(answer_id) = session.current_question().answers.get(position).map(|a| a.id) else {
                return Ok(Step::Invalid(format!("There is no answer {}.", position + 1)));
            };
            match session.select_answer(answer_id)? {
                Some(effect) => Step::Perform(effect),
                None => Step::Redraw,
            }
        }
        ExamInput::Next => {
            if session.next()? { Step::Redraw } else { Step::Invalid("Already on the last question.".into()) }
        }
        ExamInput::Prev => {
            if session.prev()? { Step::Redraw } else { Step::Invalid("Already on the first question.".into()) }
        }
        ExamInput::Jump(index) => {
            if index >= session.len() {
                return Ok(Step::Invalid(format!("There is no question {}.", index + 1)));
            }
            session.jump(index)?;
            Step::Redraw
        }
        ExamInput::Flag => {
            session.toggle_flag()?;
            Step::Redraw
        }
        ExamInput::Status => Step::Status,
        ExamInput::Finish => Step::ConfirmFinish(session.request_complete()),
        ExamInput::Help => Step::Help,
        ExamInput::Quit => Step::Quit,
        ExamInput::Unknown(line) => Step::Invalid(format!("Unknown command `{line}`; type `help`.")),
    };
    Ok(step)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

// =============================================================================
// NETWORK
// =============================================================================

async fn start(cli: &CliContext, certification_id: Id, mode: ModeKind) -> Result<ExamSession, CliError> {
    let base = format!("/api/v1/student/certifications/{certification_id}");
    let session = match mode {
        ModeKind::Strict => {
            let path = format!("{base}/sessions");
            let (status, body) = api_request(cli, reqwest::Method::POST, &path, Some(serde_json::json!({}))).await?;
            let started: StartedSession = models::decode_response(status, &body)?;
            let mode = ExamMode::strict_from(&started);
            ExamSession::new(started.questions, mode)?
        }
        ModeKind::Learning => {
            let path = format!("{base}/practice");
            let (status, body) = api_request(cli, reqwest::Method::GET, &path, None).await?;
            let set: PracticeSet = models::decode_response(status, &body)?;
            let mode = ExamMode::learning_from(&set);
            ExamSession::new(set.questions, mode)?
        }
    };
    Ok(session)
}

/// Send one answer save; the caller reports the outcome to the outbox.
async fn send_save(cli: &CliContext, save: &PendingSave) -> Result<(), CliError> {
    let path = format!("/api/v1/student/exam-sessions/{}/answers", save.session_id);
    let body = serde_json::to_value(save.body())?;
    let (status, body) = api_request(cli, reqwest::Method::POST, &path, Some(body)).await?;
    models::decode_response::<Value>(status, &body)?;
    Ok(())
}

async fn submit(cli: &CliContext, payload: &SubmitPayload) -> Result<GradedResult, CliError> {
    let path = format!("/api/v1/student/exam-sessions/{}/submit", payload.session_id);
    let body = serde_json::to_value(payload)?;
    let (status, body) = api_request(cli, reqwest::Method::POST, &path, Some(body)).await?;
    Ok(models::decode_response(status, &body)?)
}

// =============================================================================
// DRIVER
// =============================================================================

type SaveOutcome = (PendingSave, Result<(), CliError>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Done,
}

fn redraw(session: &ExamSession) {
    print!("{}", render_question(session));
    println!("{}", render_status(session));
}

/// Session plus the answer saves currently on the wire. Saves run as
/// detached tasks so a slow backend never holds up the clock or the prompt.
struct Driver<'a> {
    cli: &'a CliContext,
    session: ExamSession,
    saves: JoinSet<SaveOutcome>,
    confirming: bool,
}

impl<'a> Driver<'a> {
    fn new(cli: &'a CliContext, session: ExamSession) -> Self {
        Self { cli, session, saves: JoinSet::new(), confirming: false }
    }

    fn spawn_save(&mut self, save: PendingSave) {
        let cli = self.cli.clone();
        self.saves.spawn(async move {
            let result = send_save(&cli, &save).await;
            (save, result)
        });
    }

    fn on_saved(&mut self, save: &PendingSave, result: Result<(), CliError>) {
        match result {
            Ok(()) => self.session.acknowledge_save(save.question_id, save.answer_id),
            Err(err) => {
                tracing::warn!(question_id = save.question_id, attempts = save.attempts, error = %err, "answer save failed");
                self.session.retry_save_later(save.question_id, save.answer_id, now_ms());
            }
        }
    }

    async fn on_tick(&mut self) -> Flow {
        let mut flow = Flow::Continue;
        if let Some(effect) = self.session.tick() {
            // An open finish prompt is moot once the clock has submitted.
            self.confirming = false;
            println!("\nTime is up.");
            flow = self.perform_and_show(effect).await;
        }
        for save in self.session.take_due_saves(now_ms()) {
            self.spawn_save(save);
        }
        flow
    }

    async fn on_line(&mut self, line: &str) -> Result<Flow, CliError> {
        if self.confirming {
            self.confirming = false;
            if !is_confirmation(line) {
                println!("Continuing.");
                return Ok(Flow::Continue);
            }
            if !self.session.is_in_progress() {
                return Ok(self.retry_submit().await);
            }
            let effect = self.session.complete()?;
            return Ok(self.perform_and_show(effect).await);
        }

        if !self.session.is_in_progress() {
            // Completed but the submission has not gone through yet.
            return Ok(match parse_input(line) {
                ExamInput::Finish => self.retry_submit().await,
                ExamInput::Quit => Flow::Done,
                _ => {
                    println!("The exam is finished. Type `finish` to retry the submission or `q` to leave.");
                    Flow::Continue
                }
            });
        }

        match apply_input(&mut self.session, parse_input(line))? {
            Step::Redraw => redraw(&self.session),
            Step::Status => println!("{}", render_status(&self.session)),
            Step::Perform(effect) => {
                redraw(&self.session);
                return Ok(self.perform_and_show(effect).await);
            }
            Step::ConfirmFinish(prompt) => {
                println!("{}. Finish now? [y/N]", prompt.message());
                self.confirming = true;
            }
            Step::Help => println!("{HELP}"),
            Step::Quit => {
                if self.session.unsaved_count() > 0 {
                    println!("{} answers were not saved yet.", self.session.unsaved_count());
                }
                return Ok(Flow::Done);
            }
            Step::Invalid(message) => println!("{message}"),
        }
        Ok(Flow::Continue)
    }

    async fn retry_submit(&mut self) -> Flow {
        match self.session.submit_payload() {
            Some(payload) => self.perform_and_show(Effect::Submit(payload)).await,
            None => Flow::Continue,
        }
    }

    /// Carry out `effect`; `Some` once there is a result to show.
    async fn perform(&mut self, effect: Effect) -> Option<ExamOutcome> {
        match effect {
            Effect::SaveAnswer(save) => {
                self.spawn_save(save);
                None
            }
            Effect::Submit(payload) => {
                println!("Submitting…");
                match submit(self.cli, &payload).await {
                    Ok(result) => {
                        self.session.mark_submitted();
                        Some(ExamOutcome::Graded(result))
                    }
                    Err(err) => {
                        tracing::warn!(session_id = payload.session_id, error = %err, "exam submission failed");
                        println!("Submission failed: {err}\nType `finish` to retry or `q` to leave.");
                        None
                    }
                }
            }
            Effect::ShowLocalResult(result) => Some(ExamOutcome::Local(result)),
        }
    }

    async fn perform_and_show(&mut self, effect: Effect) -> Flow {
        match self.perform(effect).await {
            Some(outcome) => {
                print!("{}", render_outcome(&outcome));
                Flow::Done
            }
            None => Flow::Continue,
        }
    }
}

pub async fn run(cli: &CliContext, certification_id: Id, mode: ModeKind) -> Result<(), CliError> {
    let session = start(cli, certification_id, mode).await?;
    println!("{} · {} questions · type `help` for commands", mode.label(), session.len());
    redraw(&session);
    let mut driver = Driver::new(cli, session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        let flow = tokio::select! {
            _ = ticker.tick() => driver.on_tick().await,
            Some(joined) = driver.saves.join_next(), if !driver.saves.is_empty() => {
                match joined {
                    Ok((save, result)) => driver.on_saved(&save, result),
                    Err(err) => tracing::warn!(error = %err, "answer save task failed"),
                }
                Flow::Continue
            }
            line = lines.next_line() => match line? {
                Some(line) => driver.on_line(&line).await?,
                None => {
                    tracing::debug!("stdin closed");
                    Flow::Done
                }
            },
        };
        if flow == Flow::Done {
            return Ok(());
        }
    }
}
