use super::*;
use models::validation::schema_for;
use models::{FormMode, ResourceKind};

fn values(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn role_schema() -> FormSchema {
    schema_for(ResourceKind::Roles, FormMode::Create)
}

// =============================================================================
// CLIENT-SIDE VALIDATION
// =============================================================================

#[test]
fn empty_required_name_yields_no_payload_and_inline_error() {
    let mut form = FormState::with_values(values(&[("name", "  ")]));
    assert_eq!(form.begin_submit(&role_schema()), None);
    assert!(!form.submitting);
    assert_eq!(form.error("name").as_deref(), Some("Name is required."));
}

#[test]
fn valid_form_yields_payload_and_sets_submitting() {
    let mut form = FormState::with_values(values(&[("name", "Editors"), ("permission_ids", "1, 2")]));
    let payload = form.begin_submit(&role_schema()).expect("payload");
    assert!(form.submitting);
    assert!(form.errors.is_empty());
    assert_eq!(payload, serde_json::json!({ "name": "Editors", "permission_ids": [1, 2] }));
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut form = FormState::with_values(values(&[("name", "Editors")]));
    assert!(form.begin_submit(&role_schema()).is_some());
    assert!(form.begin_submit(&role_schema()).is_none());
    form.finish_submit();
    assert!(form.begin_submit(&role_schema()).is_some());
}

#[test]
fn fixing_the_field_clears_previous_errors() {
    let mut form = FormState::default();
    assert!(form.begin_submit(&role_schema()).is_none());
    form.set("name", "Editors".to_owned());
    assert!(form.begin_submit(&role_schema()).is_some());
    assert_eq!(form.error("name"), None);
}

// =============================================================================
// SERVER ERRORS
// =============================================================================

#[test]
fn server_validation_errors_map_onto_fields() {
    let mut form = FormState::with_values(values(&[("name", "Editors")]));
    form.begin_submit(&role_schema());
    let mut errors = FieldErrors::default();
    errors.insert("name", "The name has already been taken.");
    form.fail(&ApiError::Validation(errors));
    assert!(!form.submitting);
    assert_eq!(form.error("name").as_deref(), Some("The name has already been taken."));
    assert_eq!(form.message, None);
}

#[test]
fn other_failures_become_form_message() {
    let mut form = FormState::with_values(values(&[("name", "Editors")]));
    form.begin_submit(&role_schema());
    form.fail(&ApiError::Http { status: 500, message: "Server exploded".to_owned() });
    assert!(!form.submitting);
    assert_eq!(form.message.as_deref(), Some("Server exploded"));
    assert_eq!(form.value("name"), "Editors");
}
