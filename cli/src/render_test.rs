use super::*;
use exam::{Answer, ExamMode, Question};
use models::{FormValues, Row};
use serde_json::json;

fn row(id: Id, cells: &[&str]) -> Row {
    let cells: Vec<String> = cells.iter().map(|c| (*c).to_owned()).collect();
    let search_text = cells.join(" ").to_lowercase();
    Row { id, cells, search_text, values: FormValues::new() }
}

fn practice(explanation: Option<&str>) -> ExamSession {
    let question = Question {
        id: 1,
        text: "Which keyword declares a constant?".into(),
        answers: vec![
            Answer { id: 11, text: "const".into(), is_correct: Some(true) },
            Answer { id: 12, text: "let".into(), is_correct: Some(false) },
        ],
        explanation: explanation.map(str::to_owned),
    };
    ExamSession::new(vec![question.clone(), Question { id: 2, ..question }], ExamMode::Learning { pass_mark: 70 })
        .expect("session")
}

// =============================================================
// Tables
// =============================================================

#[test]
fn table_pads_columns_to_widest_cell() {
    let page = TablePage {
        rows: vec![row(1, &["1", "Rust basics"]), row(22, &["22", "Go"])],
        total: 2,
        page: 1,
        page_count: 1,
    };
    let out = render_table(&["ID", "Title"], &page);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ID  Title");
    assert_eq!(lines[1], "--  -----------");
    assert_eq!(lines[2], "1   Rust basics");
    assert_eq!(lines[3], "22  Go");
    assert_eq!(lines[4], "Page 1 of 1 · 2 rows");
}

#[test]
fn empty_table_says_so_and_reports_one_page() {
    let page = TablePage { rows: Vec::new(), total: 0, page: 1, page_count: 0 };
    let out = render_table(&["ID", "Name"], &page);
    assert!(out.contains("(no rows)"));
    assert!(out.ends_with("Page 1 of 1 · 0 rows\n"));
}

// =============================================================
// Dashboards
// =============================================================

#[test]
fn cards_align_labels_and_append_hints() {
    let cards = vec![
        StatCard { label: "Users", value: "12".into(), hint: Some("9 students".into()) },
        StatCard { label: "Formations", value: "3".into(), hint: None },
    ];
    assert_eq!(render_cards(&cards), "Users       12  (9 students)\nFormations  3\n");
}

#[test]
fn bars_scale_to_largest_month() {
    let months = vec![
        MonthlyAmount { month: "Jan".into(), amount: 50.0 },
        MonthlyAmount { month: "Feb".into(), amount: 100.0 },
    ];
    let out = render_bars(&months);
    let jan = out.lines().find(|l| l.starts_with("Jan")).expect("jan line");
    let feb = out.lines().find(|l| l.starts_with("Feb")).expect("feb line");
    assert_eq!(jan.matches('#').count(), 20);
    assert_eq!(feb.matches('#').count(), 40);
    assert!(feb.ends_with("100.00"));
}

#[test]
fn no_months_renders_no_chart() {
    assert!(render_bars(&[]).is_empty());
}

// =============================================================
// Exam
// =============================================================

#[test]
fn question_lists_numbered_answers() {
    let session = practice(None);
    let out = render_question(&session);
    assert!(out.contains("Question 1/2"));
    assert!(out.contains("  [ ] 1. const"));
    assert!(out.contains("  [ ] 2. let"));
    assert!(!out.contains("Correct"));
}

#[test]
fn learning_feedback_marks_answers_and_shows_explanation() {
    let mut session = practice(Some("`const` values are inlined."));
    session.select_answer(12).unwrap();
    let out = render_question(&session);
    assert!(out.contains("[+] 1. const"));
    assert!(out.contains("[x] 2. let"));
    assert!(out.contains("Incorrect."));
    assert!(out.contains("`const` values are inlined."));
}

#[test]
fn status_marks_answered_flagged_and_current() {
    let mut session = practice(None);
    session.select_answer(11).unwrap();
    session.next().unwrap();
    session.toggle_flag().unwrap();
    assert_eq!(render_status(&session), "1* <2!>");
}

#[test]
fn strict_status_shows_clock_and_backlog() {
    let question = practice(None).current_question().clone();
    let mut session =
        ExamSession::new(vec![question], ExamMode::Strict { session_id: 7, duration_secs: 600 }).expect("session");
    session.select_answer(11).unwrap();
    let out = render_status(&session);
    assert!(out.contains("10:00 left"));
    assert!(out.contains("1 unsaved"));
}

// =============================================================
// Prompts
// =============================================================

#[test]
fn label_prefers_name_then_title_then_email() {
    assert_eq!(label_of(&json!({"data": {"name": "Ada", "email": "a@x"}}), 3), "Ada");
    assert_eq!(label_of(&json!({"title": "Rust basics"}), 3), "Rust basics");
    assert_eq!(label_of(&json!({"email": "a@x"}), 3), "a@x");
    assert_eq!(label_of(&json!({"id": 3}), 3), "#3");
}

#[test]
fn only_yes_confirms() {
    assert!(is_confirmation("y\n"));
    assert!(is_confirmation(" YES "));
    assert!(!is_confirmation("\n"));
    assert!(!is_confirmation("no"));
    assert!(!is_confirmation("yep"));
}
