//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `toast`, `exam`, `resources`) so
//! components depend on small focused models. The first three are provided
//! as `RwSignal` contexts by `app::App`; `resources` is owned by the admin
//! resource page.

pub mod auth;
pub mod exam;
pub mod resources;
pub mod toast;
