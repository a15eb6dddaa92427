//! Networking: REST calls to the `/api/v1` backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every endpoint the pages use. Wire types live in the shared
//! `models` and `exam` crates.

pub mod api;
