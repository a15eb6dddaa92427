//! Decoding of backend response bodies.
//!
//! The backend is not uniform. A single resource may come back as
//! `{ success, message, data }`, as the bare object, or (for lists) keyed by
//! collection name as in `{ users: [...] }`, sometimes wrapped in a paginator
//! (`{ data: { data: [...] } }`). Failures use `{ message }` and, for `422`,
//! `{ errors: { field: [messages] } }`. These helpers take the raw status and
//! body so both the `gloo-net` and `reqwest` clients share one decoder.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entities::{
    Certification, Formation, Lesson, Module, Payment, Permission, ResourceKind, Role, Session, Tabular, User,
};
use crate::error::ApiError;
use crate::table::Row;
use crate::validation::FieldErrors;

/// Decode a single-object response.
///
/// # Errors
///
/// Returns an [`ApiError`] classifying non-2xx statuses, `success: false`
/// envelopes, and bodies that do not match `T`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value = parse_success_body(status, body)?;
    let data = unwrap_envelope(value)?;
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a collection response keyed by `key`, enveloped, paginated, or bare.
///
/// # Errors
///
/// Returns an [`ApiError`] for failed statuses or when no list can be found.
pub fn decode_collection<T: DeserializeOwned>(status: u16, body: &str, key: &str) -> Result<Vec<T>, ApiError> {
    let value = parse_success_body(status, body)?;
    let data = unwrap_envelope(value)?;
    let list = find_list(data, key).ok_or_else(|| ApiError::Decode(format!("no `{key}` list in response")))?;
    serde_json::from_value(list).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a list response for `kind` straight into table rows.
///
/// # Errors
///
/// Same as [`decode_collection`].
pub fn decode_rows(kind: ResourceKind, status: u16, body: &str) -> Result<Vec<Row>, ApiError> {
    fn rows<T: Tabular + DeserializeOwned>(status: u16, body: &str, key: &str) -> Result<Vec<Row>, ApiError> {
        Ok(decode_collection::<T>(status, body, key)?.iter().map(Tabular::to_row).collect())
    }

    let key = kind.segment();
    match kind {
        ResourceKind::Users => rows::<User>(status, body, key),
        ResourceKind::Formations => rows::<Formation>(status, body, key),
        ResourceKind::Modules => rows::<Module>(status, body, key),
        ResourceKind::Lessons => rows::<Lesson>(status, body, key),
        ResourceKind::Certifications => rows::<Certification>(status, body, key),
        ResourceKind::Sessions => rows::<Session>(status, body, key),
        ResourceKind::Payments => rows::<Payment>(status, body, key),
        ResourceKind::Roles => rows::<Role>(status, body, key),
        ResourceKind::Permissions => rows::<Permission>(status, body, key),
    }
}

/// Map a non-success status and body to an [`ApiError`].
#[must_use]
pub fn error_from_status(status: u16, body: &str) -> ApiError {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned);

    match status {
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound,
        422 => match value
            .get("errors")
            .cloned()
            .and_then(|errors| serde_json::from_value::<FieldErrors>(errors).ok())
        {
            Some(errors) if !errors.is_empty() => ApiError::Validation(errors),
            _ => ApiError::Http { status, message: message.unwrap_or_else(|| default_message(status)) },
        },
        _ => ApiError::Http { status, message: message.unwrap_or_else(|| default_message(status)) },
    }
}

fn default_message(status: u16) -> String {
    format!("request failed with status {status}")
}

fn parse_success_body(status: u16, body: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        return Err(error_from_status(status, body));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn unwrap_envelope(value: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };
    let Some(success) = map.get("success").and_then(Value::as_bool) else {
        return Ok(Value::Object(map));
    };
    if !success {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request was rejected")
            .to_owned();
        return Err(ApiError::Rejected { message });
    }
    Ok(map.remove("data").unwrap_or(Value::Null))
}

fn find_list(value: Value, key: &str) -> Option<Value> {
    match value {
        Value::Array(_) => Some(value),
        Value::Object(mut map) => {
            if let Some(list) = map.remove(key) {
                return find_list(list, key);
            }
            map.remove("data").and_then(|inner| find_list(inner, key))
        }
        _ => None,
    }
}
