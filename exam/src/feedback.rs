//! Learning-mode correctness feedback.
//!
//! Practice payloads embed `is_correct` on every answer, so feedback is
//! computed locally the moment an answer is picked.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use crate::question::{AnswerId, Question, QuestionId};

/// Revealed correctness for one answered question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub question_id: QuestionId,
    pub selected: AnswerId,
    pub correct_answer_ids: Vec<AnswerId>,
    pub is_correct: bool,
}

/// How an answer option is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnswerMark {
    #[default]
    Neutral,
    /// Picked, correctness hidden (strict mode or feedback not shown).
    Selected,
    Correct,
    Incorrect,
}

impl AnswerMark {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "exam-answer",
            Self::Selected => "exam-answer exam-answer--selected",
            Self::Correct => "exam-answer exam-answer--correct",
            Self::Incorrect => "exam-answer exam-answer--incorrect",
        }
    }
}

#[must_use]
pub fn feedback_for(question: &Question, selected: AnswerId) -> Feedback {
    Feedback {
        question_id: question.id,
        selected,
        correct_answer_ids: question.correct_answer_ids(),
        is_correct: question.is_correct(selected),
    }
}

/// Mark for `answer_id` given the current selection and, when visible,
/// the revealed feedback. Correct answers are highlighted even when the
/// student picked another one.
#[must_use]
pub fn answer_mark(answer_id: AnswerId, selected: Option<AnswerId>, feedback: Option<&Feedback>) -> AnswerMark {
    match feedback {
        Some(feedback) => {
            if feedback.correct_answer_ids.contains(&answer_id) {
                AnswerMark::Correct
            } else if feedback.selected == answer_id {
                AnswerMark::Incorrect
            } else {
                AnswerMark::Neutral
            }
        }
        None if selected == Some(answer_id) => AnswerMark::Selected,
        None => AnswerMark::Neutral,
    }
}
