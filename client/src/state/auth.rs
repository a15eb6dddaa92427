//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects, role-based landing pages and capability checks.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use models::{AuthUser, Capabilities};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl AuthState {
    /// Capabilities of the signed-in user; empty when signed out.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.user.as_ref().map(Capabilities::for_user).unwrap_or_default()
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map_or_else(|| "—".to_owned(), |u| u.user.name.clone())
    }
}
