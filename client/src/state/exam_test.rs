use super::*;
use exam::{Answer, ExamMode, GradedResult, LocalResult, Question, QuestionOutcome, ReviewItem};

#[test]
fn exam_route_uses_mode_slug() {
    assert_eq!(exam_route(3, ModeKind::Strict), "/exam/3/strict");
    assert_eq!(exam_route(3, ModeKind::Learning), "/exam/3/learning");
}

#[test]
fn parse_exam_params_accepts_aliases() {
    assert_eq!(parse_exam_params(Some("8"), Some("practice")), Ok((8, ModeKind::Learning)));
    assert_eq!(parse_exam_params(Some("8"), Some("strict")), Ok((8, ModeKind::Strict)));
}

#[test]
fn parse_exam_params_rejects_bad_input() {
    assert!(parse_exam_params(Some("abc"), Some("strict")).is_err());
    assert!(parse_exam_params(None, Some("strict")).is_err());
    assert_eq!(
        parse_exam_params(Some("1"), Some("timed")).unwrap_err(),
        "unknown exam mode: timed"
    );
}

#[test]
fn finished_exam_retake_route() {
    let finished = FinishedExam {
        certification_id: 5,
        mode: ModeKind::Learning,
        outcome: ExamOutcome::Local(LocalResult {
            correct: 1,
            total: 2,
            percent: 50.0,
            passed: false,
            per_question: Vec::new(),
        }),
    };
    assert_eq!(finished.retake_route(), "/exam/5/learning");
}

#[test]
fn review_lines_distinguish_unanswered_from_wrong() {
    let finished = FinishedExam {
        certification_id: 1,
        mode: ModeKind::Learning,
        outcome: ExamOutcome::Local(LocalResult {
            correct: 1,
            total: 3,
            percent: 33.3,
            passed: false,
            per_question: vec![
                QuestionOutcome { question_id: 10, selected: Some(100), correct: true },
                QuestionOutcome { question_id: 11, selected: Some(111), correct: false },
                QuestionOutcome { question_id: 12, selected: None, correct: false },
            ],
        }),
    };
    let verdicts: Vec<_> = finished.review().into_iter().map(|line| (line.number, line.verdict)).collect();
    assert_eq!(verdicts, vec![(1, "Correct"), (2, "Incorrect"), (3, "Not answered")]);
}

#[test]
fn review_lines_from_graded_result() {
    let finished = FinishedExam {
        certification_id: 1,
        mode: ModeKind::Strict,
        outcome: ExamOutcome::Graded(GradedResult {
            score: 50.0,
            passed: false,
            correct_answers: 1,
            total_questions: 2,
            review: vec![
                ReviewItem { question_id: 1, selected_answer_id: Some(2), correct_answer_id: Some(2), is_correct: true },
                ReviewItem { question_id: 2, selected_answer_id: None, correct_answer_id: Some(5), is_correct: false },
            ],
        }),
    };
    let review = finished.review();
    assert_eq!(review.len(), 2);
    assert!(review[0].correct);
    assert_eq!(review[1].verdict, "Not answered");
}

fn timed_session(duration_secs: u64) -> ExamSession {
    let questions = (1..=2)
        .map(|id| Question {
            id,
            text: format!("Question {id}"),
            answers: vec![
                Answer { id: id * 10 + 1, text: "a".into(), is_correct: None },
                Answer { id: id * 10 + 2, text: "b".into(), is_correct: None },
            ],
            explanation: None,
        })
        .collect();
    ExamSession::new(questions, ExamMode::Strict { session_id: 4, duration_secs }).unwrap()
}

#[test]
fn clock_advances_while_a_save_is_unacknowledged() {
    let mut session = timed_session(3);
    let Ok(Some(Effect::SaveAnswer(save))) = session.select_answer(11) else {
        panic!("strict pick should emit a save");
    };

    let (effect, due) = advance(&mut session, 1_000);
    assert!(effect.is_none());
    assert!(due.is_empty(), "in-flight save handed out twice");
    assert_eq!(session.remaining_secs(), Some(2));

    let (effect, due) = advance(&mut session, 2_000);
    assert!(effect.is_none());
    assert!(due.is_empty());
    assert_eq!(session.remaining_secs(), Some(1));
    assert_eq!(session.unsaved_count(), 1);

    session.retry_save_later(save.question_id, save.answer_id, 2_000);
    let (effect, due) = advance(&mut session, u64::MAX);
    assert!(matches!(effect, Some(Effect::Submit(_))));
    assert!(due.is_empty(), "completed sessions hand out no saves");
}

#[test]
fn failed_save_comes_back_once_its_backoff_passes() {
    let mut session = timed_session(60);
    let Ok(Some(Effect::SaveAnswer(save))) = session.select_answer(12) else {
        panic!("strict pick should emit a save");
    };
    session.retry_save_later(save.question_id, save.answer_id, 1_000);

    assert!(advance(&mut session, 1_000).1.is_empty());
    let (_, due) = advance(&mut session, u64::MAX);
    assert_eq!(due.iter().map(|s| (s.question_id, s.answer_id)).collect::<Vec<_>>(), vec![(1, 12)]);
    assert!(advance(&mut session, u64::MAX).1.is_empty());
}
