//! Hand-off between the exam page and the result page.
//!
//! The running [`exam::ExamSession`] is owned by the exam page itself; once
//! it completes, the outcome is stored here so `/exam/result` can render it
//! after navigation.

#[cfg(test)]
#[path = "exam_test.rs"]
mod exam_test;

use exam::{Effect, ExamOutcome, ExamSession, ModeKind, PendingSave};
use models::Id;

#[derive(Clone, Debug, PartialEq)]
pub struct FinishedExam {
    pub certification_id: Id,
    pub mode: ModeKind,
    pub outcome: ExamOutcome,
}

impl FinishedExam {
    /// Route that starts another attempt in the same mode.
    #[must_use]
    pub fn retake_route(&self) -> String {
        exam_route(self.certification_id, self.mode)
    }
}

/// One row of the per-question review on the result page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewLine {
    /// 1-based question number.
    pub number: usize,
    pub correct: bool,
    pub verdict: &'static str,
}

impl FinishedExam {
    #[must_use]
    pub fn review(&self) -> Vec<ReviewLine> {
        let verdict = |answered: bool, correct: bool| match (answered, correct) {
            (_, true) => "Correct",
            (false, false) => "Not answered",
            (true, false) => "Incorrect",
        };
        let lines: Vec<(bool, bool)> = match &self.outcome {
            ExamOutcome::Graded(graded) => graded
                .review
                .iter()
                .map(|item| (item.selected_answer_id.is_some(), item.is_correct))
                .collect(),
            ExamOutcome::Local(local) => local
                .per_question
                .iter()
                .map(|outcome| (outcome.selected.is_some(), outcome.correct))
                .collect(),
        };
        lines
            .into_iter()
            .enumerate()
            .map(|(index, (answered, correct))| ReviewLine {
                number: index + 1,
                correct,
                verdict: verdict(answered, correct),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExamState {
    pub last: Option<FinishedExam>,
}

#[must_use]
pub fn exam_route(certification_id: Id, mode: ModeKind) -> String {
    format!("/exam/{certification_id}/{mode}")
}

/// Parse the `:certification` and `:mode` route params.
///
/// # Errors
///
/// Returns a user-facing message for a missing or malformed param.
pub fn parse_exam_params(certification: Option<&str>, mode: Option<&str>) -> Result<(Id, ModeKind), String> {
    let certification_id = certification
        .and_then(|raw| raw.parse::<Id>().ok())
        .ok_or_else(|| "Unknown certification.".to_owned())?;
    let mode = mode
        .unwrap_or_default()
        .parse::<ModeKind>()
        .map_err(|e| e.to_string())?;
    Ok((certification_id, mode))
}

/// One second of exam time: advance the clock and hand out the saves due for
/// another attempt. Saves still in flight are not handed out again, so the
/// caller can fire each returned save without waiting on earlier ones.
pub fn advance(session: &mut ExamSession, now_ms: u64) -> (Option<Effect>, Vec<PendingSave>) {
    let effect = session.tick();
    (effect, session.take_due_saves(now_ms))
}
