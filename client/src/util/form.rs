//! Form dialog state: raw values, inline errors, and the submitting flag.
//!
//! DESIGN
//! ======
//! [`FormState::begin_submit`] is the only way to obtain a request payload.
//! It validates first, so a form with an invalid field never produces a
//! payload and the network call is never issued. Server `422` errors flow
//! back through [`FormState::fail`] onto the same fields.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use models::validation::{to_payload, validate};
use models::{ApiError, FieldErrors, FormSchema, FormValues};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub submitting: bool,
    /// Non-field failure shown above the actions.
    pub message: Option<String>,
}

impl FormState {
    #[must_use]
    pub fn with_values(values: FormValues) -> Self {
        Self { values, ..Self::default() }
    }

    #[must_use]
    pub fn value(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.first(field).map(str::to_owned)
    }

    pub fn set(&mut self, field: &str, value: String) {
        self.values.insert(field.to_owned(), value);
    }

    /// Validate and, only if every field passes, mark the form submitting
    /// and return the JSON payload. Returns `None` while a submit is already
    /// in flight.
    pub fn begin_submit(&mut self, schema: &FormSchema) -> Option<Value> {
        if self.submitting {
            return None;
        }
        self.message = None;
        match validate(schema, &self.values) {
            Ok(()) => {
                self.errors = FieldErrors::default();
                self.submitting = true;
                Some(to_payload(schema, &self.values))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Map server field errors onto the form.
    pub fn apply_server_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
        self.submitting = false;
    }

    /// Record a failed request. Field errors go inline; anything else
    /// becomes the form-level message.
    pub fn fail(&mut self, error: &ApiError) {
        match error.field_errors() {
            Some(errors) => self.apply_server_errors(errors.clone()),
            None => {
                self.message = Some(error.user_message());
                self.submitting = false;
            }
        }
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}
