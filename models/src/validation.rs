//! Form schemas and client-side validation for admin dialogs.
//!
//! DESIGN
//! ======
//! Each resource form is described by a [`FormSchema`]: an ordered list of
//! fields with their input kind and rules. [`validate`] runs before any
//! request is built, so a form that fails here never reaches the network.
//! Server-side `422` responses come back as [`FieldErrors`] with the same
//! field names, so both sources render through one inline-error path.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;
use time::macros::format_description;

use crate::entities::{PaymentStatus, ResourceKind};

/// Raw form input keyed by field name.
pub type FormValues = BTreeMap<String, String>;

// =============================================================================
// FIELD ERRORS
// =============================================================================

/// Field-level error messages, as produced locally or returned by the server
/// in `{ "errors": { "field": ["message", ...] } }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// First message for `field`, which is what the form renders inline.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|messages| messages.first()).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().filter(|messages| !messages.is_empty()).count()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Flatten to one message per field, for toast summaries.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .values()
            .filter_map(|messages| messages.first())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// SCHEMA
// =============================================================================

/// Whether a dialog creates a new resource or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// How a field is rendered and how its raw string is converted to JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TextArea,
    Email,
    Password,
    Number,
    Date,
    Checkbox,
    Select(&'static [&'static str]),
    /// Comma-separated list of numeric ids, sent as a JSON array.
    IdList,
}

/// A single validation rule. All rules except `Required` skip empty values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    PositiveNumber,
    NonNegativeNumber,
    Integer,
    Range(f64, f64),
    OneOf(&'static [&'static str]),
    Date,
    /// Date must not be earlier than the named sibling field.
    NotBefore(&'static str),
    IdList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub rules: Vec<Rule>,
}

impl Field {
    fn new(name: &'static str, label: &'static str, input: InputKind, rules: Vec<Rule>) -> Self {
        Self { name, label, input, rules }
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormSchema {
    pub fields: Vec<Field>,
}

impl FormSchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

pub const LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];
pub const USER_ROLES: &[&str] = &["admin", "teacher", "student"];
pub const PAYMENT_METHODS: &[&str] = &["card", "transfer", "cash"];

/// Schema for the create/edit dialog of `kind`.
#[must_use]
pub fn schema_for(kind: ResourceKind, mode: FormMode) -> FormSchema {
    use InputKind as I;
    use Rule as R;

    let fields = match kind {
        ResourceKind::Users => {
            let mut password_rules = vec![R::MinLength(8)];
            if mode == FormMode::Create {
                password_rules.insert(0, R::Required);
            }
            vec![
                Field::new("name", "Name", I::Text, vec![R::Required, R::MaxLength(255)]),
                Field::new("email", "Email", I::Email, vec![R::Required, R::Email]),
                Field::new("role", "Role", I::Select(USER_ROLES), vec![R::Required, R::OneOf(USER_ROLES)]),
                Field::new("password", "Password", I::Password, password_rules),
                Field::new("is_active", "Active", I::Checkbox, vec![]),
            ]
        }
        ResourceKind::Formations => vec![
            Field::new("title", "Title", I::Text, vec![R::Required, R::MaxLength(255)]),
            Field::new("description", "Description", I::TextArea, vec![R::MaxLength(5000)]),
            Field::new("price", "Price", I::Number, vec![R::Required, R::NonNegativeNumber]),
            Field::new("level", "Level", I::Select(LEVELS), vec![R::Required, R::OneOf(LEVELS)]),
            Field::new("is_published", "Published", I::Checkbox, vec![]),
        ],
        ResourceKind::Modules => vec![
            Field::new("formation_id", "Formation", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
            Field::new("title", "Title", I::Text, vec![R::Required, R::MaxLength(255)]),
            Field::new("description", "Description", I::TextArea, vec![R::MaxLength(5000)]),
            Field::new("position", "Position", I::Number, vec![R::Integer, R::NonNegativeNumber]),
        ],
        ResourceKind::Lessons => vec![
            Field::new("module_id", "Module", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
            Field::new("title", "Title", I::Text, vec![R::Required, R::MaxLength(255)]),
            Field::new("content", "Content", I::TextArea, vec![]),
            Field::new("duration_minutes", "Duration (minutes)", I::Number, vec![R::Integer, R::NonNegativeNumber]),
            Field::new("position", "Position", I::Number, vec![R::Integer, R::NonNegativeNumber]),
        ],
        ResourceKind::Certifications => vec![
            Field::new("formation_id", "Formation", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
            Field::new("title", "Title", I::Text, vec![R::Required, R::MaxLength(255)]),
            Field::new("description", "Description", I::TextArea, vec![R::MaxLength(5000)]),
            Field::new("pass_mark", "Pass mark (%)", I::Number, vec![R::Required, R::Integer, R::Range(0.0, 100.0)]),
            Field::new(
                "duration_minutes",
                "Duration (minutes)",
                I::Number,
                vec![R::Required, R::Integer, R::PositiveNumber],
            ),
        ],
        ResourceKind::Sessions => vec![
            Field::new("formation_id", "Formation", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
            Field::new("title", "Title", I::Text, vec![R::Required, R::MaxLength(255)]),
            Field::new("start_date", "Start date", I::Date, vec![R::Required, R::Date]),
            Field::new("end_date", "End date", I::Date, vec![R::Required, R::Date, R::NotBefore("start_date")]),
            Field::new("capacity", "Capacity", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
        ],
        ResourceKind::Payments => vec![
            Field::new("student_id", "Student", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
            Field::new("session_id", "Session", I::Number, vec![R::Required, R::Integer, R::PositiveNumber]),
            Field::new("amount", "Amount", I::Number, vec![R::Required, R::PositiveNumber]),
            Field::new(
                "status",
                "Status",
                I::Select(PaymentStatus::SLUGS),
                vec![R::Required, R::OneOf(PaymentStatus::SLUGS)],
            ),
            Field::new(
                "method",
                "Method",
                I::Select(PAYMENT_METHODS),
                vec![R::Required, R::OneOf(PAYMENT_METHODS)],
            ),
        ],
        ResourceKind::Roles => vec![
            Field::new("name", "Name", I::Text, vec![R::Required, R::MinLength(2), R::MaxLength(100)]),
            Field::new("permission_ids", "Permission ids", I::IdList, vec![R::IdList]),
        ],
        ResourceKind::Permissions => vec![
            Field::new("name", "Name", I::Text, vec![R::Required, R::MaxLength(100)]),
            Field::new("description", "Description", I::TextArea, vec![R::MaxLength(500)]),
        ],
    };
    FormSchema { fields }
}

/// Sign-in form. Password length is left to the backend.
#[must_use]
pub fn login_schema() -> FormSchema {
    FormSchema {
        fields: vec![
            Field::new("email", "Email", InputKind::Email, vec![Rule::Required, Rule::Email]),
            Field::new("password", "Password", InputKind::Password, vec![Rule::Required]),
        ],
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate `values` against `schema`, collecting the first failure per field.
///
/// # Errors
///
/// Returns the field errors when at least one field fails.
pub fn validate(schema: &FormSchema, values: &FormValues) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in &schema.fields {
        let raw = value_of(values, field.name);
        if let Some(message) = check_field(schema, field, raw, values) {
            errors.insert(field.name, message);
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn value_of<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).map_or("", |value| value.trim())
}

fn check_field(schema: &FormSchema, field: &Field, raw: &str, values: &FormValues) -> Option<String> {
    let label = field.label;
    if raw.is_empty() {
        return field
            .is_required()
            .then(|| format!("{label} is required."));
    }

    for rule in &field.rules {
        let failure = match *rule {
            Rule::Required => None,
            Rule::MinLength(min) => {
                (raw.chars().count() < min).then(|| format!("{label} must be at least {min} characters."))
            }
            Rule::MaxLength(max) => {
                (raw.chars().count() > max).then(|| format!("{label} must be at most {max} characters."))
            }
            Rule::Email => (!is_email(raw)).then(|| format!("{label} must be a valid email address.")),
            Rule::PositiveNumber => match raw.parse::<f64>() {
                Ok(n) if n > 0.0 => None,
                Ok(_) => Some(format!("{label} must be greater than zero.")),
                Err(_) => Some(format!("{label} must be a number.")),
            },
            Rule::NonNegativeNumber => match raw.parse::<f64>() {
                Ok(n) if n >= 0.0 => None,
                Ok(_) => Some(format!("{label} cannot be negative.")),
                Err(_) => Some(format!("{label} must be a number.")),
            },
            Rule::Integer => raw
                .parse::<i64>()
                .is_err()
                .then(|| format!("{label} must be a whole number.")),
            Rule::Range(min, max) => match raw.parse::<f64>() {
                Ok(n) if (min..=max).contains(&n) => None,
                _ => Some(format!("{label} must be between {min} and {max}.")),
            },
            Rule::OneOf(options) => (!options.contains(&raw)).then(|| format!("{label} must be one of: {}.", options.join(", "))),
            Rule::Date => parse_date(raw)
                .is_none()
                .then(|| format!("{label} must be a date (YYYY-MM-DD).")),
            Rule::NotBefore(other) => {
                let other_label = schema.field(other).map_or(other, |f| f.label);
                match (parse_date(raw), parse_date(value_of(values, other))) {
                    (Some(date), Some(other_date)) if date < other_date => {
                        Some(format!("{label} cannot be before {}.", other_label.to_lowercase()))
                    }
                    _ => None,
                }
            }
            Rule::IdList => parse_id_list(raw)
                .is_none()
                .then(|| format!("{label} must be a comma-separated list of ids.")),
        };
        if failure.is_some() {
            return failure;
        }
    }
    None
}

fn is_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Parse an ISO `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_id_list(raw: &str) -> Option<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Convert validated raw input into the JSON body the backend expects.
///
/// Empty optional fields become `null`, numbers become JSON numbers,
/// checkboxes become booleans. Fields not in the schema are dropped.
#[must_use]
pub fn to_payload(schema: &FormSchema, values: &FormValues) -> Value {
    let mut body = Map::new();
    for field in &schema.fields {
        let raw = value_of(values, field.name);
        let value = match field.input {
            InputKind::Checkbox => Value::Bool(matches!(raw, "true" | "on" | "1")),
            _ if raw.is_empty() => Value::Null,
            InputKind::Number if field.rules.contains(&Rule::Integer) => {
                raw.parse::<i64>().map_or(Value::Null, Value::from)
            }
            InputKind::Number => raw.parse::<f64>().map_or(Value::Null, Value::from),
            InputKind::IdList => parse_id_list(raw).map_or(Value::Null, Value::from),
            _ => Value::String(raw.to_owned()),
        };
        // An untouched password on edit means "keep the current one".
        if field.input == InputKind::Password && value.is_null() {
            continue;
        }
        body.insert(field.name.to_owned(), value);
    }
    Value::Object(body)
}
