//! What the result view renders after either kind of completion.

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;

use serde::{Deserialize, Serialize};

use crate::question::{AnswerId, QuestionId};
use crate::score::LocalResult;

/// Per-question review line returned by the grading endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question_id: QuestionId,
    #[serde(default)]
    pub selected_answer_id: Option<AnswerId>,
    #[serde(default)]
    pub correct_answer_id: Option<AnswerId>,
    pub is_correct: bool,
}

/// Server-graded strict-mode result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradedResult {
    pub score: f64,
    pub passed: bool,
    pub correct_answers: usize,
    pub total_questions: usize,
    #[serde(default)]
    pub review: Vec<ReviewItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExamOutcome {
    Graded(GradedResult),
    Local(LocalResult),
}

impl ExamOutcome {
    #[must_use]
    pub fn percent(&self) -> f64 {
        match self {
            Self::Graded(result) => result.score,
            Self::Local(result) => result.percent,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        match self {
            Self::Graded(result) => result.passed,
            Self::Local(result) => result.passed,
        }
    }

    /// `(correct, total)` counts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        match self {
            Self::Graded(result) => (result.correct_answers, result.total_questions),
            Self::Local(result) => (result.correct, result.total),
        }
    }

    /// One-line summary, e.g. `"Passed: 3/5 correct (60%)"`.
    #[must_use]
    pub fn headline(&self) -> String {
        let verdict = if self.passed() { "Passed" } else { "Failed" };
        let (correct, total) = self.counts();
        format!("{verdict}: {correct}/{total} correct ({:.0}%)", self.percent())
    }
}
