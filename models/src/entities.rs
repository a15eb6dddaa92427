//! REST resources managed by the admin area and consumed by student views.
//!
//! DESIGN
//! ======
//! Fields mirror the backend JSON one-to-one. Uniqueness, referential
//! integrity and amount checks are enforced by the backend; these types only
//! carry data plus a few derived views used for rendering.

#[cfg(test)]
#[path = "entities_test.rs"]
mod entities_test;

use serde::{Deserialize, Serialize};

use crate::table::Row;
use crate::validation::FormValues;

/// Server-assigned resource identifier.
pub type Id = u64;

fn default_true() -> bool {
    true
}

fn default_pass_mark() -> u8 {
    70
}

// =============================================================================
// USERS & ACCESS
// =============================================================================

/// A platform account (admin, teacher or student).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Role slug (`admin`, `teacher`, `student`).
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The signed-in user as returned by `/api/v1/auth/me`, with the permission
/// slugs granted through their role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AuthUser {
    #[must_use]
    pub fn is_student(&self) -> bool {
        self.user.role == "student"
    }
}

/// A named set of permissions assignable to users.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// A single capability, identified by a dotted slug such as `formations.create`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// CATALOG
// =============================================================================

/// A course/training program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// An ordered chapter of a formation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: Id,
    pub formation_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: u32,
}

/// A single lesson inside a module. `content` is markdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Id,
    pub module_id: Id,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub position: u32,
    /// Attached PDF resource, if one was uploaded.
    #[serde(default)]
    pub resource_url: Option<String>,
}

/// A certification exam attached to a formation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: Id,
    pub formation_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minimum percentage required to pass.
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u8,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub question_count: u32,
}

// =============================================================================
// SESSIONS & PAYMENTS
// =============================================================================

/// A scheduled offering of a formation with capacity and dates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Id,
    pub formation_id: Id,
    pub title: String,
    /// ISO date (`YYYY-MM-DD`).
    pub start_date: String,
    /// ISO date (`YYYY-MM-DD`).
    pub end_date: String,
    pub capacity: u32,
    #[serde(default)]
    pub enrolled_count: u32,
}

impl Session {
    #[must_use]
    pub fn remaining_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled_count)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.remaining_seats() == 0
    }
}

/// Settlement state of a payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Completed, Self::Failed, Self::Refunded];
    pub const SLUGS: &'static [&'static str] = &["pending", "completed", "failed", "refunded"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

/// A student's payment for a session seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Id,
    pub student_id: Id,
    pub session_id: Id,
    pub amount: f64,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub paid_at: Option<String>,
}

// =============================================================================
// RESOURCE KINDS
// =============================================================================

/// Administrable REST collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Users,
    Formations,
    Modules,
    Lessons,
    Certifications,
    Sessions,
    Payments,
    Roles,
    Permissions,
}

impl ResourceKind {
    pub const ALL: [Self; 9] = [
        Self::Users,
        Self::Formations,
        Self::Modules,
        Self::Lessons,
        Self::Certifications,
        Self::Sessions,
        Self::Payments,
        Self::Roles,
        Self::Permissions,
    ];

    /// Path segment under `/api/v1/admin/` and the key of keyed list bodies.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Formations => "formations",
            Self::Modules => "modules",
            Self::Lessons => "lessons",
            Self::Certifications => "certifications",
            Self::Sessions => "sessions",
            Self::Payments => "payments",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
        }
    }

    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment() == segment)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Formations => "Formations",
            Self::Modules => "Modules",
            Self::Lessons => "Lessons",
            Self::Certifications => "Certifications",
            Self::Sessions => "Sessions",
            Self::Payments => "Payments",
            Self::Roles => "Roles",
            Self::Permissions => "Permissions",
        }
    }

    /// Singular noun used in dialog titles ("Create formation").
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Formations => "formation",
            Self::Modules => "module",
            Self::Lessons => "lesson",
            Self::Certifications => "certification",
            Self::Sessions => "session",
            Self::Payments => "payment",
            Self::Roles => "role",
            Self::Permissions => "permission",
        }
    }

    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Users => &["ID", "Name", "Email", "Role", "Active"],
            Self::Formations => &["ID", "Title", "Level", "Price", "Published"],
            Self::Modules => &["ID", "Formation", "Title", "Position"],
            Self::Lessons => &["ID", "Module", "Title", "Duration", "Position"],
            Self::Certifications => &["ID", "Formation", "Title", "Pass mark", "Questions"],
            Self::Sessions => &["ID", "Formation", "Title", "Start", "End", "Seats"],
            Self::Payments => &["ID", "Student", "Session", "Amount", "Status", "Method"],
            Self::Roles => &["ID", "Name", "Permissions"],
            Self::Permissions => &["ID", "Name", "Description"],
        }
    }
}

// =============================================================================
// TABLE ROWS
// =============================================================================

/// Conversion of a resource into a generic data-table row.
pub trait Tabular {
    const KIND: ResourceKind;

    fn id(&self) -> Id;

    /// Display cells, one per entry in [`ResourceKind::columns`].
    fn cells(&self) -> Vec<String>;

    /// Current field values used to prefill the edit dialog.
    fn form_values(&self) -> FormValues;

    fn to_row(&self) -> Row {
        let cells = self.cells();
        let search_text = cells.join(" ").to_lowercase();
        Row { id: self.id(), cells, search_text, values: self.form_values() }
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes".to_owned() } else { "No".to_owned() }
}

fn values<const N: usize>(pairs: [(&str, String); N]) -> FormValues {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

impl Tabular for User {
    const KIND: ResourceKind = ResourceKind::Users;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            yes_no(self.is_active),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("role", self.role.clone()),
            ("is_active", self.is_active.to_string()),
        ])
    }
}

impl Tabular for Formation {
    const KIND: ResourceKind = ResourceKind::Formations;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.level.clone(),
            format!("{:.2}", self.price),
            yes_no(self.is_published),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("price", format!("{:.2}", self.price)),
            ("level", self.level.clone()),
            ("is_published", self.is_published.to_string()),
        ])
    }
}

impl Tabular for Module {
    const KIND: ResourceKind = ResourceKind::Modules;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.formation_id.to_string(),
            self.title.clone(),
            self.position.to_string(),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("formation_id", self.formation_id.to_string()),
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("position", self.position.to_string()),
        ])
    }
}

impl Tabular for Lesson {
    const KIND: ResourceKind = ResourceKind::Lessons;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.module_id.to_string(),
            self.title.clone(),
            format!("{} min", self.duration_minutes),
            self.position.to_string(),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("module_id", self.module_id.to_string()),
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("duration_minutes", self.duration_minutes.to_string()),
            ("position", self.position.to_string()),
        ])
    }
}

impl Tabular for Certification {
    const KIND: ResourceKind = ResourceKind::Certifications;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.formation_id.to_string(),
            self.title.clone(),
            format!("{}%", self.pass_mark),
            self.question_count.to_string(),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("formation_id", self.formation_id.to_string()),
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("pass_mark", self.pass_mark.to_string()),
            ("duration_minutes", self.duration_minutes.to_string()),
        ])
    }
}

impl Tabular for Session {
    const KIND: ResourceKind = ResourceKind::Sessions;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.formation_id.to_string(),
            self.title.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            format!("{}/{}", self.enrolled_count, self.capacity),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("formation_id", self.formation_id.to_string()),
            ("title", self.title.clone()),
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("capacity", self.capacity.to_string()),
        ])
    }
}

impl Tabular for Payment {
    const KIND: ResourceKind = ResourceKind::Payments;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.student_id.to_string(),
            self.session_id.to_string(),
            format!("{:.2}", self.amount),
            self.status.as_str().to_owned(),
            self.method.clone(),
        ]
    }

    fn form_values(&self) -> FormValues {
        values([
            ("student_id", self.student_id.to_string()),
            ("session_id", self.session_id.to_string()),
            ("amount", format!("{:.2}", self.amount)),
            ("status", self.status.as_str().to_owned()),
            ("method", self.method.clone()),
        ])
    }
}

impl Tabular for Role {
    const KIND: ResourceKind = ResourceKind::Roles;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        let names: Vec<&str> = self.permissions.iter().map(|p| p.name.as_str()).collect();
        vec![self.id.to_string(), self.name.clone(), names.join(", ")]
    }

    fn form_values(&self) -> FormValues {
        let ids: Vec<String> = self.permissions.iter().map(|p| p.id.to_string()).collect();
        values([("name", self.name.clone()), ("permission_ids", ids.join(", "))])
    }
}

impl Tabular for Permission {
    const KIND: ResourceKind = ResourceKind::Permissions;

    fn id(&self) -> Id {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.description.clone()]
    }

    fn form_values(&self) -> FormValues {
        values([("name", self.name.clone()), ("description", self.description.clone())])
    }
}
