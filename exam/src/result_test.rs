use super::*;

#[test]
fn graded_result_decodes_without_review() {
    let body = r#"{"score": 80.0, "passed": true, "correct_answers": 8, "total_questions": 10}"#;
    let result: GradedResult = serde_json::from_str(body).expect("decode");
    assert!(result.passed);
    assert!(result.review.is_empty());
    assert_eq!(ExamOutcome::Graded(result).headline(), "Passed: 8/10 correct (80%)");
}

#[test]
fn graded_result_decodes_review_lines() {
    let body = r#"{
        "score": 50, "passed": false, "correct_answers": 1, "total_questions": 2,
        "review": [
            {"question_id": 1, "selected_answer_id": 3, "correct_answer_id": 3, "is_correct": true},
            {"question_id": 2, "is_correct": false}
        ]
    }"#;
    let result: GradedResult = serde_json::from_str(body).expect("decode");
    assert_eq!(result.review.len(), 2);
    assert_eq!(result.review[1].selected_answer_id, None);
}

#[test]
fn local_outcome_headline() {
    let local = LocalResult { correct: 3, total: 5, percent: 60.0, passed: false, per_question: Vec::new() };
    let outcome = ExamOutcome::Local(local);
    assert!(!outcome.passed());
    assert_eq!(outcome.counts(), (3, 5));
    assert_eq!(outcome.headline(), "Failed: 3/5 correct (60%)");
}
