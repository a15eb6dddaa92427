//! Local scoring for learning-mode runs.
//!
//! Learning results are computed from the correctness flags embedded in the
//! practice payload and are not verified by the server.

#[cfg(test)]
#[path = "score_test.rs"]
mod score_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::question::{AnswerId, Question, QuestionId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub selected: Option<AnswerId>,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalResult {
    pub correct: usize,
    pub total: usize,
    pub percent: f64,
    pub passed: bool,
    pub per_question: Vec<QuestionOutcome>,
}

/// Score `answers` against `questions`. Unanswered questions count as wrong.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score(questions: &[Question], answers: &BTreeMap<QuestionId, AnswerId>, pass_mark: u8) -> LocalResult {
    let per_question: Vec<QuestionOutcome> = questions
        .iter()
        .map(|question| {
            let selected = answers.get(&question.id).copied();
            QuestionOutcome {
                question_id: question.id,
                selected,
                correct: selected.is_some_and(|id| question.is_correct(id)),
            }
        })
        .collect();

    let total = per_question.len();
    let correct = per_question.iter().filter(|o| o.correct).count();
    let percent = if total == 0 { 0.0 } else { (correct * 100) as f64 / total as f64 };

    LocalResult { correct, total, percent, passed: percent >= f64::from(pass_mark), per_question }
}
