//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (guards, fetching, mutations)
//! and delegates rendering details to `components`.

pub mod admin_dashboard;
pub mod admin_resource;
pub mod exam;
pub mod exam_result;
pub mod home;
pub mod lesson;
pub mod login;
pub mod student;
