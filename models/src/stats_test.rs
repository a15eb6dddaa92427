use super::*;

#[test]
fn progress_percent_rounds_down_and_handles_empty() {
    assert_eq!(progress_percent(0, 0), 0);
    assert_eq!(progress_percent(1, 3), 33);
    assert_eq!(progress_percent(3, 3), 100);
    assert_eq!(progress_percent(5, 3), 100);
}

#[test]
fn bar_heights_normalise_to_max() {
    assert_eq!(bar_heights(&[50.0, 100.0, 25.0]), vec![50.0, 100.0, 25.0]);
    assert_eq!(bar_heights(&[0.0, 0.0]), vec![0.0, 0.0]);
    assert!(bar_heights(&[]).is_empty());
}

#[test]
fn format_amount_groups_thousands() {
    assert_eq!(format_amount(0.0), "0.00");
    assert_eq!(format_amount(999.5), "999.50");
    assert_eq!(format_amount(1234.5), "1,234.50");
    assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
    assert_eq!(format_amount(-42.0), "-42.00");
}

#[test]
fn admin_stats_cards_show_pending_hint_only_when_needed() {
    let mut stats = AdminStats {
        total_users: 120,
        total_students: 100,
        total_formations: 8,
        active_sessions: 3,
        total_revenue: 15_250.0,
        pending_payments: 0,
        monthly_revenue: vec![],
    };
    let cards = stats.cards();
    assert_eq!(cards[0].hint.as_deref(), Some("100 students"));
    assert_eq!(cards[3].value, "15,250.00");
    assert_eq!(cards[3].hint, None);

    stats.pending_payments = 4;
    assert_eq!(stats.cards()[3].hint.as_deref(), Some("4 pending payments"));
}

#[test]
fn student_dashboard_cards_aggregate_progress() {
    let dashboard: StudentDashboard = serde_json::from_value(serde_json::json!({
        "formations": [
            { "formation_id": 1, "title": "Rust", "completed_lessons": 3, "total_lessons": 4 },
            { "formation_id": 2, "title": "SQL", "completed_lessons": 1, "total_lessons": 6 }
        ],
        "certifications": [
            { "certification_id": 1, "title": "Rust cert", "best_score": 80.0, "passed": true },
            { "certification_id": 2, "title": "SQL cert" }
        ]
    }))
    .expect("dashboard");

    assert_eq!(dashboard.formations[0].progress_percent(), 75);
    let cards = dashboard.cards();
    assert_eq!(cards[1].value, "40%");
    assert_eq!(cards[1].hint.as_deref(), Some("4 of 10 lessons"));
    assert_eq!(cards[2].value, "1/2");
    assert_eq!(cards[3].value, "0");
}
