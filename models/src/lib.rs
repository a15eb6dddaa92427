//! Shared REST resource model for the academy frontends.
//!
//! This crate owns everything the browser client and the terminal client
//! agree on about the backend: resource shapes, response envelopes, error
//! classification, form schemas, upload limits, and the client-side table
//! query. It performs no I/O so both the WASM build and native tools can use
//! it directly.

pub mod entities;
pub mod envelope;
pub mod error;
pub mod permission;
pub mod stats;
pub mod table;
pub mod upload;
pub mod validation;

pub use entities::{
    AuthUser, Certification, Formation, Id, Lesson, Module, Payment, PaymentStatus, Permission, ResourceKind, Role,
    Session, Tabular, User,
};
pub use envelope::{decode_collection, decode_response, decode_rows};
pub use error::ApiError;
pub use permission::{Action, Capabilities};
pub use table::{Row, TablePage, TableQuery};
pub use upload::{UploadError, UploadPolicy};
pub use validation::{FieldErrors, FormMode, FormSchema, FormValues};
