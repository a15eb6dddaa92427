//! Plain-text rendering for terminal output.
//!
//! Everything here returns a `String` so formatting stays testable without
//! capturing stdout.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use exam::{AnswerMark, ExamOutcome, ExamSession, format_clock};
use models::stats::{MonthlyAmount, StatCard, bar_heights, format_amount};
use models::{Id, TablePage};
use serde_json::Value;

const BAR_WIDTH: f64 = 40.0;

/// Fixed-width table with a header rule and a pager footer.
pub fn render_table(columns: &[&str], page: &TablePage) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &page.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &widths, columns.iter().copied());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &widths, rule.iter().map(String::as_str));

    if page.rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &page.rows {
        push_line(&mut out, &widths, row.cells.iter().map(String::as_str));
    }
    let _ = writeln!(out, "Page {} of {} · {} rows", page.page, page.page_count.max(1), page.total);
    out
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

pub fn render_cards(cards: &[StatCard]) -> String {
    let width = cards.iter().map(|c| c.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for card in cards {
        let _ = write!(out, "{:<width$}  {}", card.label, card.value);
        if let Some(hint) = &card.hint {
            let _ = write!(out, "  ({hint})");
        }
        out.push('\n');
    }
    out
}

/// Horizontal bar chart of monthly revenue.
pub fn render_bars(months: &[MonthlyAmount]) -> String {
    if months.is_empty() {
        return String::new();
    }
    let amounts: Vec<f64> = months.iter().map(|m| m.amount).collect();
    let width = months.iter().map(|m| m.month.len()).max().unwrap_or(0);
    let mut out = String::from("\nRevenue per month\n");
    for (month, height) in months.iter().zip(bar_heights(&amounts)) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cells = (height / 100.0 * BAR_WIDTH).round() as usize;
        let _ = writeln!(out, "{:<width$}  {:<40}  {}", month.month, "#".repeat(cells), format_amount(month.amount));
    }
    out
}

fn answer_marker(mark: AnswerMark) -> &'static str {
    match mark {
        AnswerMark::Neutral => " ",
        AnswerMark::Selected => "*",
        AnswerMark::Correct => "+",
        AnswerMark::Incorrect => "x",
    }
}

/// The current question with numbered answers and, in learning mode, the
/// revealed verdict.
pub fn render_question(session: &ExamSession) -> String {
    let question = session.current_question();
    let mut out = String::new();

    let flag = if session.is_flagged(question.id) { " [flagged]" } else { "" };
    let _ = writeln!(out, "\nQuestion {}/{}{flag}", session.current_index() + 1, session.len());
    let _ = writeln!(out, "{}", question.text);
    for (i, answer) in question.answers.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}. {}", answer_marker(session.mark_for(answer.id)), i + 1, answer.text);
    }

    if let Some(feedback) = session.feedback() {
        out.push_str(if feedback.is_correct { "Correct!\n" } else { "Incorrect.\n" });
        if let Some(explanation) = &question.explanation {
            let _ = writeln!(out, "{explanation}");
        }
    }
    out
}

/// Navigator line plus clock and save backlog, e.g. `1* 2 3! | 12:04 left`.
pub fn render_status(session: &ExamSession) -> String {
    let cells: Vec<String> = session
        .statuses()
        .iter()
        .map(|status| {
            let mut cell = (status.index + 1).to_string();
            if status.answered {
                cell.push('*');
            }
            if status.flagged {
                cell.push('!');
            }
            if status.current {
                cell = format!("<{cell}>");
            }
            cell
        })
        .collect();

    let mut out = cells.join(" ");
    if let Some(secs) = session.remaining_secs() {
        let _ = write!(out, " | {} left", format_clock(secs));
        if session.is_running_low() {
            out.push_str(" (hurry)");
        }
    }
    let unsaved = session.unsaved_count();
    if unsaved > 0 {
        let _ = write!(out, " | {unsaved} unsaved");
    }
    out
}

pub fn render_outcome(outcome: &ExamOutcome) -> String {
    format!("\n{}\n", outcome.headline())
}

/// Best human label for a fetched record: `name`, `title`, `email`, or the id.
pub fn label_of(value: &Value, id: Id) -> String {
    let record = value.get("data").unwrap_or(value);
    ["name", "title", "email"]
        .iter()
        .find_map(|key| record.get(key).and_then(Value::as_str))
        .map_or_else(|| format!("#{id}"), str::to_owned)
}

/// `y`/`yes` in any case; everything else declines.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
