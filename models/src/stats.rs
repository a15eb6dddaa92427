//! Dashboard statistics computed by the backend.
//!
//! The client never aggregates on its own; it only shapes these payloads
//! into stat cards and chart bars.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use serde::{Deserialize, Serialize};

use crate::entities::{Id, Session};

/// Revenue for one calendar month (`month` is `YYYY-MM`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: f64,
}

/// Payload of `/api/v1/admin/stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub total_formations: u64,
    #[serde(default)]
    pub active_sessions: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub pending_payments: u64,
    #[serde(default)]
    pub monthly_revenue: Vec<MonthlyAmount>,
}

/// A formation the student is enrolled in, with lesson progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrolledFormation {
    pub formation_id: Id,
    pub title: String,
    #[serde(default)]
    pub completed_lessons: u32,
    #[serde(default)]
    pub total_lessons: u32,
    /// First lesson not yet completed, for the "continue" link.
    #[serde(default)]
    pub next_lesson_id: Option<Id>,
}

impl EnrolledFormation {
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.completed_lessons, self.total_lessons)
    }
}

/// A certification available to the student and their best attempt so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CertificationProgress {
    pub certification_id: Id,
    pub title: String,
    #[serde(default)]
    pub best_score: Option<f64>,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub attempts: u32,
}

/// Payload of `/api/v1/student/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDashboard {
    #[serde(default)]
    pub formations: Vec<EnrolledFormation>,
    #[serde(default)]
    pub certifications: Vec<CertificationProgress>,
    #[serde(default)]
    pub upcoming_sessions: Vec<Session>,
}

/// One tile on a dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<String>,
}

impl AdminStats {
    #[must_use]
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                label: "Users",
                value: self.total_users.to_string(),
                hint: Some(format!("{} students", self.total_students)),
            },
            StatCard { label: "Formations", value: self.total_formations.to_string(), hint: None },
            StatCard { label: "Active sessions", value: self.active_sessions.to_string(), hint: None },
            StatCard {
                label: "Revenue",
                value: format_amount(self.total_revenue),
                hint: (self.pending_payments > 0).then(|| format!("{} pending payments", self.pending_payments)),
            },
        ]
    }
}

impl StudentDashboard {
    #[must_use]
    pub fn cards(&self) -> Vec<StatCard> {
        let passed = self.certifications.iter().filter(|c| c.passed).count();
        let (done, total) = self
            .formations
            .iter()
            .fold((0, 0), |(d, t), f| (d + f.completed_lessons, t + f.total_lessons));
        vec![
            StatCard { label: "Formations", value: self.formations.len().to_string(), hint: None },
            StatCard {
                label: "Overall progress",
                value: format!("{}%", progress_percent(done, total)),
                hint: Some(format!("{done} of {total} lessons")),
            },
            StatCard {
                label: "Certifications passed",
                value: format!("{passed}/{}", self.certifications.len()),
                hint: None,
            },
            StatCard { label: "Upcoming sessions", value: self.upcoming_sessions.len().to_string(), hint: None },
        ]
    }
}

/// Integer completion percentage, rounded down; `0` when `total` is zero.
#[must_use]
pub fn progress_percent(done: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = u64::from(done.min(total)) * 100 / u64::from(total);
    u32::try_from(pct).unwrap_or(100)
}

/// Bar heights as a percentage of the largest value, for simple CSS charts.
#[must_use]
pub fn bar_heights(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v.max(0.0) / max) * 100.0).collect()
}

/// Format a currency amount with thousands separators and two decimals.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}
