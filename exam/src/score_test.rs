use super::*;
use crate::question::Answer;

/// Five questions; answer `10 * id + 1` is correct, `10 * id + 2` is not.
fn fixture() -> Vec<Question> {
    (1..=5)
        .map(|id| Question {
            id,
            text: format!("Question {id}"),
            answers: vec![
                Answer { id: id * 10 + 1, text: "right".into(), is_correct: Some(true) },
                Answer { id: id * 10 + 2, text: "wrong".into(), is_correct: Some(false) },
            ],
            explanation: None,
        })
        .collect()
}

#[test]
fn three_of_five_is_sixty_percent() {
    let answers = BTreeMap::from([(1, 11), (2, 21), (3, 31), (4, 42), (5, 52)]);
    let result = score(&fixture(), &answers, 70);
    assert_eq!(result.correct, 3);
    assert_eq!(result.total, 5);
    assert!((result.percent - 60.0).abs() < f64::EPSILON);
    assert!(!result.passed);
}

#[test]
fn pass_mark_is_inclusive() {
    let answers = BTreeMap::from([(1, 11), (2, 21), (3, 31), (4, 42), (5, 52)]);
    assert!(score(&fixture(), &answers, 60).passed);
}

#[test]
fn unanswered_questions_count_as_wrong() {
    let answers = BTreeMap::from([(1, 11)]);
    let result = score(&fixture(), &answers, 70);
    assert_eq!(result.correct, 1);
    assert!((result.percent - 20.0).abs() < f64::EPSILON);
    assert_eq!(result.per_question[1].selected, None);
    assert!(!result.per_question[1].correct);
}

#[test]
fn all_correct_passes() {
    let answers = (1..=5).map(|id| (id, id * 10 + 1)).collect();
    let result = score(&fixture(), &answers, 100);
    assert!((result.percent - 100.0).abs() < f64::EPSILON);
    assert!(result.passed);
}

#[test]
fn empty_set_scores_zero() {
    let result = score(&[], &BTreeMap::new(), 0);
    assert_eq!(result.total, 0);
    assert!(result.percent.abs() < f64::EPSILON);
}
