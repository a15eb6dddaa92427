use super::*;

fn form(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// =============================================================
// Required fields
// =============================================================

#[test]
fn empty_required_name_fails_with_inline_message() {
    let schema = schema_for(ResourceKind::Roles, FormMode::Create);
    let errors = validate(&schema, &form(&[("name", "")])).expect_err("name is required");
    assert_eq!(errors.first("name"), Some("Name is required."));
    assert_eq!(errors.len(), 1);
}

#[test]
fn whitespace_only_counts_as_empty() {
    let schema = schema_for(ResourceKind::Permissions, FormMode::Create);
    let errors = validate(&schema, &form(&[("name", "   ")])).expect_err("blank name");
    assert_eq!(errors.first("name"), Some("Name is required."));
}

#[test]
fn optional_empty_fields_are_skipped() {
    let schema = schema_for(ResourceKind::Permissions, FormMode::Create);
    assert_eq!(validate(&schema, &form(&[("name", "formations.create")])), Ok(()));
}

// =============================================================
// Rule checks
// =============================================================

#[test]
fn user_email_must_be_well_formed() {
    let schema = schema_for(ResourceKind::Users, FormMode::Edit);
    for bad in ["amina", "amina@", "@example.com", "amina@example", "a b@example.com"] {
        let errors = validate(&schema, &form(&[("name", "A"), ("email", bad), ("role", "student")]))
            .expect_err("invalid email");
        assert_eq!(errors.first("email"), Some("Email must be a valid email address."), "for {bad:?}");
    }
    assert_eq!(
        validate(&schema, &form(&[("name", "A"), ("email", "amina@example.com"), ("role", "student")])),
        Ok(())
    );
}

#[test]
fn user_password_required_only_on_create() {
    let values = form(&[("name", "A"), ("email", "a@example.com"), ("role", "admin")]);
    let create = schema_for(ResourceKind::Users, FormMode::Create);
    let errors = validate(&create, &values).expect_err("password required on create");
    assert_eq!(errors.first("password"), Some("Password is required."));

    let edit = schema_for(ResourceKind::Users, FormMode::Edit);
    assert_eq!(validate(&edit, &values), Ok(()));
}

#[test]
fn short_password_is_rejected() {
    let schema = schema_for(ResourceKind::Users, FormMode::Create);
    let values = form(&[("name", "A"), ("email", "a@example.com"), ("role", "admin"), ("password", "short")]);
    let errors = validate(&schema, &values).expect_err("short password");
    assert_eq!(errors.first("password"), Some("Password must be at least 8 characters."));
}

#[test]
fn payment_amount_must_be_positive() {
    let schema = schema_for(ResourceKind::Payments, FormMode::Create);
    let base = [("student_id", "3"), ("session_id", "4"), ("status", "pending"), ("method", "card")];

    let mut values = form(&base);
    values.insert("amount".to_owned(), "0".to_owned());
    let errors = validate(&schema, &values).expect_err("zero amount");
    assert_eq!(errors.first("amount"), Some("Amount must be greater than zero."));

    values.insert("amount".to_owned(), "abc".to_owned());
    let errors = validate(&schema, &values).expect_err("non numeric amount");
    assert_eq!(errors.first("amount"), Some("Amount must be a number."));

    values.insert("amount".to_owned(), "120.50".to_owned());
    assert_eq!(validate(&schema, &values), Ok(()));
}

#[test]
fn payment_status_must_be_known_slug() {
    let schema = schema_for(ResourceKind::Payments, FormMode::Create);
    let values = form(&[
        ("student_id", "3"),
        ("session_id", "4"),
        ("amount", "10"),
        ("status", "lost"),
        ("method", "card"),
    ]);
    let errors = validate(&schema, &values).expect_err("unknown status");
    assert_eq!(
        errors.first("status"),
        Some("Status must be one of: pending, completed, failed, refunded.")
    );
}

#[test]
fn certification_pass_mark_range_and_integer() {
    let schema = schema_for(ResourceKind::Certifications, FormMode::Create);
    let mut values = form(&[("formation_id", "1"), ("title", "Final"), ("duration_minutes", "45")]);

    values.insert("pass_mark".to_owned(), "101".to_owned());
    let errors = validate(&schema, &values).expect_err("out of range");
    assert_eq!(errors.first("pass_mark"), Some("Pass mark (%) must be between 0 and 100."));

    values.insert("pass_mark".to_owned(), "70.5".to_owned());
    let errors = validate(&schema, &values).expect_err("not an integer");
    assert_eq!(errors.first("pass_mark"), Some("Pass mark (%) must be a whole number."));

    values.insert("pass_mark".to_owned(), "70".to_owned());
    assert_eq!(validate(&schema, &values), Ok(()));
}

#[test]
fn session_end_date_cannot_precede_start() {
    let schema = schema_for(ResourceKind::Sessions, FormMode::Create);
    let values = form(&[
        ("formation_id", "2"),
        ("title", "Autumn"),
        ("start_date", "2026-10-01"),
        ("end_date", "2026-09-30"),
        ("capacity", "25"),
    ]);
    let errors = validate(&schema, &values).expect_err("end before start");
    assert_eq!(errors.first("end_date"), Some("End date cannot be before start date."));
}

#[test]
fn session_dates_must_be_iso() {
    let schema = schema_for(ResourceKind::Sessions, FormMode::Create);
    let values = form(&[
        ("formation_id", "2"),
        ("title", "Autumn"),
        ("start_date", "01/10/2026"),
        ("end_date", "2026-02-30"),
        ("capacity", "25"),
    ]);
    let errors = validate(&schema, &values).expect_err("bad dates");
    assert_eq!(errors.first("start_date"), Some("Start date must be a date (YYYY-MM-DD)."));
    assert_eq!(errors.first("end_date"), Some("End date must be a date (YYYY-MM-DD)."));
}

#[test]
fn role_permission_ids_must_be_numeric() {
    let schema = schema_for(ResourceKind::Roles, FormMode::Create);
    let errors = validate(&schema, &form(&[("name", "Editor"), ("permission_ids", "1, two")]))
        .expect_err("bad id list");
    assert_eq!(
        errors.first("permission_ids"),
        Some("Permission ids must be a comma-separated list of ids.")
    );
}

// =============================================================
// FieldErrors
// =============================================================

#[test]
fn field_errors_deserialize_from_server_shape() {
    let errors: FieldErrors = serde_json::from_value(serde_json::json!({
        "email": ["The email has already been taken.", "Second message"],
        "name": ["The name field is required."]
    }))
    .expect("errors");
    assert_eq!(errors.first("email"), Some("The email has already been taken."));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.summary(), "The email has already been taken. The name field is required.");
}

// =============================================================
// Payload conversion
// =============================================================

#[test]
fn payload_converts_types_per_input_kind() {
    let schema = schema_for(ResourceKind::Formations, FormMode::Create);
    let values = form(&[
        ("title", " Rust 101 "),
        ("description", ""),
        ("price", "49.90"),
        ("level", "beginner"),
        ("is_published", "true"),
        ("ignored", "x"),
    ]);
    let payload = to_payload(&schema, &values);
    assert_eq!(
        payload,
        serde_json::json!({
            "title": "Rust 101",
            "description": null,
            "price": 49.9,
            "level": "beginner",
            "is_published": true
        })
    );
}

#[test]
fn payload_sends_integer_ids_and_id_lists() {
    let schema = schema_for(ResourceKind::Roles, FormMode::Edit);
    let payload = to_payload(&schema, &form(&[("name", "Editor"), ("permission_ids", "3, 5,8")]));
    assert_eq!(payload, serde_json::json!({ "name": "Editor", "permission_ids": [3, 5, 8] }));

    let schema = schema_for(ResourceKind::Modules, FormMode::Create);
    let payload = to_payload(&schema, &form(&[("formation_id", "4"), ("title", "Intro"), ("position", "2")]));
    assert_eq!(payload["formation_id"], serde_json::json!(4));
    assert_eq!(payload["position"], serde_json::json!(2));
}

#[test]
fn payload_omits_blank_password_on_edit() {
    let schema = schema_for(ResourceKind::Users, FormMode::Edit);
    let payload = to_payload(
        &schema,
        &form(&[("name", "A"), ("email", "a@example.com"), ("role", "admin"), ("password", "")]),
    );
    assert!(payload.get("password").is_none());
    assert_eq!(payload["is_active"], serde_json::json!(false));
}

#[test]
fn login_requires_email_and_password() {
    let schema = login_schema();
    let errors = validate(&schema, &form(&[("email", "not-an-email")])).expect_err("invalid");
    assert!(errors.first("email").is_some());
    assert!(errors.first("password").is_some());
    assert!(validate(&schema, &form(&[("email", "a@example.com"), ("password", "secret")])).is_ok());
}
