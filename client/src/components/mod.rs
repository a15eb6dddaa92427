//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render tables, dialogs, dashboards and exam widgets while
//! reading/writing shared state from Leptos context providers. Requests are
//! issued by pages; components report user intent through callbacks.

pub mod confirm_dialog;
pub mod data_table;
pub mod exam_question;
pub mod form_dialog;
pub mod nav_bar;
pub mod question_nav;
pub mod stat_card;
pub mod toast_host;
pub mod upload_dialog;
