//! The exam-taking state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both the browser exam page and `academy-cli exam take` own one
//! [`ExamSession`] and feed it user input plus one-second ticks. The session
//! never performs I/O itself; transitions that need the network return an
//! [`Effect`] for the caller to carry out.
//!
//! DESIGN
//! ======
//! Phases are `InProgress -> Completed`, with no way back. The shared core
//! (cursor, answers, flags) is identical for both modes. Mode-specific state
//! lives in a private tagged union:
//! - strict: countdown plus answer-save outbox; completion yields `Submit`.
//! - learning: a feedback-visibility flag; completion yields a local score.
//!
//! ERROR HANDLING
//! ==============
//! Input after completion returns [`ExamError::NotInProgress`]. Ticks after
//! completion are silently ignored so a late timer callback cannot submit
//! twice.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::ExamError;
use crate::feedback::{AnswerMark, Feedback, answer_mark, feedback_for};
use crate::mode::{ExamMode, ModeKind};
use crate::outbox::{AnswerOutbox, PendingSave};
use crate::question::{AnswerId, Question, QuestionId};
use crate::score::{LocalResult, score};
use crate::timer::{Countdown, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Completed,
}

/// Work the caller must perform after a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Strict: POST this answer to the save endpoint.
    SaveAnswer(PendingSave),
    /// Strict: POST the full answer map for grading.
    Submit(SubmitPayload),
    /// Learning: navigate to the result view with this local score.
    ShowLocalResult(LocalResult),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitPayload {
    #[serde(skip)]
    pub session_id: u64,
    pub answers: BTreeMap<QuestionId, AnswerId>,
}

/// Counts shown in the "finish exam?" confirmation dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub answered: usize,
    pub unanswered: usize,
    pub flagged: usize,
}

impl CompletionPrompt {
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = format!("{} answered, {} unanswered", self.answered, self.unanswered);
        if self.flagged > 0 {
            message.push_str(&format!(", {} flagged for review", self.flagged));
        }
        message
    }
}

/// One cell of the question navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionStatus {
    pub index: usize,
    pub question_id: QuestionId,
    pub answered: bool,
    pub flagged: bool,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum ModeState {
    Strict { session_id: u64, countdown: Countdown, outbox: AnswerOutbox },
    Learning { pass_mark: u8, feedback_visible: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExamSession {
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<QuestionId, AnswerId>,
    flagged: BTreeSet<QuestionId>,
    phase: Phase,
    mode: ModeState,
}

impl ExamSession {
    pub fn new(questions: Vec<Question>, mode: ExamMode) -> Result<Self, ExamError> {
        if questions.is_empty() {
            return Err(ExamError::EmptyQuestionSet);
        }
        let mode = match mode {
            ExamMode::Strict { session_id, duration_secs } => ModeState::Strict {
                session_id,
                countdown: Countdown::new(duration_secs),
                outbox: AnswerOutbox::new(session_id),
            },
            ExamMode::Learning { pass_mark } => ModeState::Learning { pass_mark, feedback_visible: false },
        };
        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            flagged: BTreeSet::new(),
            phase: Phase::InProgress,
            mode,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<AnswerId> {
        self.answers.get(&self.current_question().id).copied()
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, AnswerId> {
        &self.answers
    }

    #[must_use]
    pub fn is_flagged(&self, question_id: QuestionId) -> bool {
        self.flagged.contains(&question_id)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.phase == Phase::InProgress
    }

    #[must_use]
    pub fn mode_kind(&self) -> ModeKind {
        match self.mode {
            ModeState::Strict { .. } => ModeKind::Strict,
            ModeState::Learning { .. } => ModeKind::Learning,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Option<u64> {
        match self.mode {
            ModeState::Strict { session_id, .. } => Some(session_id),
            ModeState::Learning { .. } => None,
        }
    }

    /// Seconds left on the strict-mode clock.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u64> {
        match &self.mode {
            ModeState::Strict { countdown, .. } => Some(countdown.remaining()),
            ModeState::Learning { .. } => None,
        }
    }

    #[must_use]
    pub fn is_running_low(&self) -> bool {
        matches!(&self.mode, ModeState::Strict { countdown, .. } if countdown.is_running_low())
    }

    /// Answer saves not yet acknowledged by the server.
    #[must_use]
    pub fn unsaved_count(&self) -> usize {
        match &self.mode {
            ModeState::Strict { outbox, .. } => outbox.len(),
            ModeState::Learning { .. } => 0,
        }
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<QuestionStatus> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionStatus {
                index,
                question_id: question.id,
                answered: self.answers.contains_key(&question.id),
                flagged: self.flagged.contains(&question.id),
                current: index == self.current,
            })
            .collect()
    }

    /// Revealed correctness for the current question, learning mode only.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        match self.mode {
            ModeState::Learning { feedback_visible: true, .. } => {
                let selected = self.selected_answer()?;
                Some(feedback_for(self.current_question(), selected))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn mark_for(&self, answer_id: AnswerId) -> AnswerMark {
        answer_mark(answer_id, self.selected_answer(), self.feedback().as_ref())
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Record `answer_id` for the current question, replacing any prior pick.
    pub fn select_answer(&mut self, answer_id: AnswerId) -> Result<Option<Effect>, ExamError> {
        self.ensure_in_progress()?;
        let question = self.current_question();
        let question_id = question.id;
        if question.answer(answer_id).is_none() {
            return Err(ExamError::UnknownAnswer { question_id, answer_id });
        }
        self.answers.insert(question_id, answer_id);

        match &mut self.mode {
            ModeState::Strict { outbox, .. } => Ok(Some(Effect::SaveAnswer(outbox.enqueue(question_id, answer_id)))),
            ModeState::Learning { feedback_visible, .. } => {
                *feedback_visible = true;
                Ok(None)
            }
        }
    }

    /// Move forward; `false` when already on the last question.
    pub fn next(&mut self) -> Result<bool, ExamError> {
        self.ensure_in_progress()?;
        if self.current + 1 >= self.questions.len() {
            return Ok(false);
        }
        self.move_to(self.current + 1);
        Ok(true)
    }

    /// Move back; `false` when already on the first question.
    pub fn prev(&mut self) -> Result<bool, ExamError> {
        self.ensure_in_progress()?;
        if self.current == 0 {
            return Ok(false);
        }
        self.move_to(self.current - 1);
        Ok(true)
    }

    pub fn jump(&mut self, index: usize) -> Result<(), ExamError> {
        self.ensure_in_progress()?;
        if index >= self.questions.len() {
            return Err(ExamError::IndexOutOfRange { index, len: self.questions.len() });
        }
        self.move_to(index);
        Ok(())
    }

    /// Toggle the review flag on the current question; returns the new state.
    pub fn toggle_flag(&mut self) -> Result<bool, ExamError> {
        self.ensure_in_progress()?;
        let question_id = self.current_question().id;
        if self.flagged.remove(&question_id) {
            Ok(false)
        } else {
            self.flagged.insert(question_id);
            Ok(true)
        }
    }

    /// One-second timer tick. Strict mode only; returns `Submit` on the tick
    /// that reaches zero and `None` otherwise, including every tick after
    /// completion.
    pub fn tick(&mut self) -> Option<Effect> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let ModeState::Strict { countdown, .. } = &mut self.mode else {
            return None;
        };
        match countdown.tick() {
            TickOutcome::Expired => self.complete().ok(),
            TickOutcome::Running(_) | TickOutcome::Stopped => None,
        }
    }

    #[must_use]
    pub fn request_complete(&self) -> CompletionPrompt {
        let answered = self.questions.iter().filter(|q| self.answers.contains_key(&q.id)).count();
        CompletionPrompt {
            answered,
            unanswered: self.questions.len() - answered,
            flagged: self.flagged.len(),
        }
    }

    /// Finish the exam. Strict mode stops the clock and returns the full
    /// answer map for submission; learning mode scores locally.
    pub fn complete(&mut self) -> Result<Effect, ExamError> {
        self.ensure_in_progress()?;
        self.phase = Phase::Completed;
        match &mut self.mode {
            ModeState::Strict { session_id, countdown, .. } => {
                countdown.stop();
                Ok(Effect::Submit(SubmitPayload { session_id: *session_id, answers: self.answers.clone() }))
            }
            ModeState::Learning { pass_mark, .. } => {
                Ok(Effect::ShowLocalResult(score(&self.questions, &self.answers, *pass_mark)))
            }
        }
    }

    /// Payload to resend when a strict submission failed.
    #[must_use]
    pub fn submit_payload(&self) -> Option<SubmitPayload> {
        match (&self.mode, self.phase) {
            (ModeState::Strict { session_id, .. }, Phase::Completed) => {
                Some(SubmitPayload { session_id: *session_id, answers: self.answers.clone() })
            }
            _ => None,
        }
    }

    /// The server accepted the submission; pending saves are moot.
    pub fn mark_submitted(&mut self) {
        if let ModeState::Strict { outbox, .. } = &mut self.mode {
            outbox.clear();
        }
    }

    // =========================================================================
    // OUTBOX
    // =========================================================================

    /// Failed saves whose retry time has come. Empty once completed, since
    /// the submission carries every answer.
    pub fn take_due_saves(&mut self, now_ms: u64) -> Vec<PendingSave> {
        if self.phase != Phase::InProgress {
            return Vec::new();
        }
        match &mut self.mode {
            ModeState::Strict { outbox, .. } => outbox.take_due(now_ms),
            ModeState::Learning { .. } => Vec::new(),
        }
    }

    pub fn acknowledge_save(&mut self, question_id: QuestionId, answer_id: AnswerId) {
        if let ModeState::Strict { outbox, .. } = &mut self.mode {
            outbox.acknowledge(question_id, answer_id);
        }
    }

    pub fn retry_save_later(&mut self, question_id: QuestionId, answer_id: AnswerId, now_ms: u64) {
        if let ModeState::Strict { outbox, .. } = &mut self.mode {
            outbox.retry_later(question_id, answer_id, now_ms);
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn ensure_in_progress(&self) -> Result<(), ExamError> {
        if self.phase == Phase::InProgress { Ok(()) } else { Err(ExamError::NotInProgress) }
    }

    fn move_to(&mut self, index: usize) {
        self.current = index;
        let answered = self.answers.contains_key(&self.questions[index].id);
        if let ModeState::Learning { feedback_visible, .. } = &mut self.mode {
            *feedback_visible = answered;
        }
    }
}
