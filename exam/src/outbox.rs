//! At-least-once delivery of strict-mode answer saves.
//!
//! DESIGN
//! ======
//! Each selected answer is saved to the server as soon as it is picked. A
//! failed save is kept and retried with exponential backoff instead of being
//! dropped. Only the latest answer per question is kept: picking a new
//! answer supersedes a pending one. Entries handed out for sending are
//! marked in flight until the driver reports the outcome.
//!
//! TRADE-OFFS
//! ==========
//! A superseded save may still be in flight and land after the newer one.
//! The final submission carries the full answer map and is authoritative, so
//! the outbox is cleared once submission succeeds.

#[cfg(test)]
#[path = "outbox_test.rs"]
mod outbox_test;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::question::{AnswerId, QuestionId};

pub const INITIAL_BACKOFF_MS: u64 = 1000;
pub const MAX_BACKOFF_MS: u64 = 10_000;

/// One answer waiting to be acknowledged by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSave {
    pub session_id: u64,
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
    /// Send attempts so far, including the one in flight.
    pub attempts: u32,
    /// Earliest time (ms) the next attempt may start.
    pub next_attempt_ms: u64,
    backoff_ms: u64,
    in_flight: bool,
}

impl PendingSave {
    /// JSON body for the save-answer endpoint.
    #[must_use]
    pub fn body(&self) -> SaveAnswerBody {
        SaveAnswerBody { question_id: self.question_id, answer_id: self.answer_id }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SaveAnswerBody {
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutbox {
    session_id: u64,
    entries: BTreeMap<QuestionId, PendingSave>,
}

impl AnswerOutbox {
    #[must_use]
    pub fn new(session_id: u64) -> Self {
        Self { session_id, entries: BTreeMap::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn pending(&self, question_id: QuestionId) -> Option<&PendingSave> {
        self.entries.get(&question_id)
    }

    /// Record a freshly selected answer and hand it out for immediate sending.
    pub fn enqueue(&mut self, question_id: QuestionId, answer_id: AnswerId) -> PendingSave {
        let entry = PendingSave {
            session_id: self.session_id,
            question_id,
            answer_id,
            attempts: 1,
            next_attempt_ms: 0,
            backoff_ms: INITIAL_BACKOFF_MS,
            in_flight: true,
        };
        self.entries.insert(question_id, entry.clone());
        entry
    }

    /// Entries whose retry time has come, marked in flight.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<PendingSave> {
        self.entries
            .values_mut()
            .filter(|entry| !entry.in_flight && entry.next_attempt_ms <= now_ms)
            .map(|entry| {
                entry.in_flight = true;
                entry.attempts += 1;
                entry.clone()
            })
            .collect()
    }

    /// The server stored `answer_id` for `question_id`. Removes the entry
    /// unless it has since been superseded by another answer.
    pub fn acknowledge(&mut self, question_id: QuestionId, answer_id: AnswerId) {
        if self
            .entries
            .get(&question_id)
            .is_some_and(|entry| entry.answer_id == answer_id)
        {
            self.entries.remove(&question_id);
        }
    }

    /// Sending `answer_id` failed; schedule a retry with doubled backoff.
    /// A failure of a superseded answer leaves the newer entry untouched.
    pub fn retry_later(&mut self, question_id: QuestionId, answer_id: AnswerId, now_ms: u64) {
        let Some(entry) = self.entries.get_mut(&question_id) else {
            return;
        };
        if entry.answer_id != answer_id {
            return;
        }
        entry.in_flight = false;
        entry.next_attempt_ms = now_ms.saturating_add(entry.backoff_ms);
        entry.backoff_ms = (entry.backoff_ms * 2).min(MAX_BACKOFF_MS);
    }

    /// Drop everything; used once the final submission has been accepted.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
