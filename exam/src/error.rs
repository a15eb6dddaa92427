//! Errors raised by invalid exam transitions.

use crate::question::{AnswerId, QuestionId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExamError {
    /// An exam needs at least one question.
    #[error("exam has no questions")]
    EmptyQuestionSet,

    /// The exam was already completed; further input is ignored.
    #[error("exam is no longer in progress")]
    NotInProgress,

    /// The answer does not belong to the current question.
    #[error("answer {answer_id} is not an option of question {question_id}")]
    UnknownAnswer { question_id: QuestionId, answer_id: AnswerId },

    /// Jump target outside `0..len`.
    #[error("question index {index} out of range (exam has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The route or flag named a mode that does not exist.
    #[error("unknown exam mode: {0}")]
    UnknownMode(String),
}
