//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior: signed-out
//! users go to `/login`, users on the wrong side of the admin/student split
//! go to their own landing page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use models::AuthUser;

use crate::state::auth::AuthState;

/// Outcome of a route guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// `/auth/me` has not answered yet.
    Pending,
    Allowed,
    Redirect(&'static str),
}

/// Landing page for a signed-in user.
#[must_use]
pub fn home_route(user: &AuthUser) -> &'static str {
    if user.is_student() { "/student" } else { "/admin" }
}

#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Any signed-in user.
#[must_use]
pub fn signed_in_access(state: &AuthState) -> Access {
    if state.loading {
        return Access::Pending;
    }
    if state.user.is_some() { Access::Allowed } else { Access::Redirect("/login") }
}

/// Users holding `admin.access`.
#[must_use]
pub fn admin_access(state: &AuthState) -> Access {
    match signed_in_access(state) {
        Access::Allowed if !state.capabilities().can_access_admin() => Access::Redirect("/student"),
        other => other,
    }
}

/// Students only; staff are sent back to the admin area.
#[must_use]
pub fn student_access(state: &AuthState) -> Access {
    match (signed_in_access(state), state.user.as_ref()) {
        (Access::Allowed, Some(user)) if !user.is_student() => Access::Redirect("/admin"),
        (other, _) => other,
    }
}

/// Navigate away whenever `check` asks for a redirect.
pub fn install_access_redirect<F>(auth: RwSignal<AuthState>, check: fn(&AuthState) -> Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Access::Redirect(path) = check(&auth.get()) {
            navigate(path, NavigateOptions::default());
        }
    });
}
