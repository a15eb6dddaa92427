//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate decision logic and browser concerns from page and
//! component rendering so they can be unit-tested without a DOM.

pub mod auth;
pub mod clock;
pub mod confirm;
pub mod form;
pub mod markdown;
