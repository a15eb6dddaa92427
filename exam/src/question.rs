//! Question payloads as downloaded from the backend.
//!
//! Strict-mode payloads omit `is_correct`; practice payloads include it,
//! which is what lets learning mode reveal correctness without a round-trip.

use serde::{Deserialize, Serialize};

pub type QuestionId = u64;
pub type AnswerId = u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
    /// Present only in practice payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answers: Vec<Answer>,
    /// Shown after the answer is revealed in learning mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn correct_answer_ids(&self) -> Vec<AnswerId> {
        self.answers
            .iter()
            .filter(|a| a.is_correct == Some(true))
            .map(|a| a.id)
            .collect()
    }

    /// `true` when `answer_id` is flagged correct in the payload.
    #[must_use]
    pub fn is_correct(&self, answer_id: AnswerId) -> bool {
        self.answer(answer_id).is_some_and(|a| a.is_correct == Some(true))
    }
}

/// Response to starting a strict exam session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartedSession {
    pub session_id: u64,
    pub duration_minutes: u32,
    pub questions: Vec<Question>,
}

/// Response to requesting a practice set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PracticeSet {
    pub certification_id: u64,
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u8,
    pub questions: Vec<Question>,
}

fn default_pass_mark() -> u8 {
    70
}
