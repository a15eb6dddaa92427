use super::*;
use models::User;

fn user(role: &str, permissions: &[&str]) -> AuthUser {
    AuthUser {
        user: User {
            id: 1,
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role: role.to_owned(),
            is_active: true,
            created_at: None,
        },
        permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
    }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.display_name(), "—");
}

// =============================================================
// Capabilities
// =============================================================

#[test]
fn signed_out_user_has_no_capabilities() {
    assert!(!AuthState::default().capabilities().can_access_admin());
}

#[test]
fn capabilities_follow_user_permissions() {
    let state = AuthState { user: Some(user("teacher", &["admin.access", "lessons.*"])), loading: false };
    let caps = state.capabilities();
    assert!(caps.can_access_admin());
    assert!(caps.can("lessons.delete"));
    assert!(!caps.can("users.delete"));
    assert_eq!(state.display_name(), "Alice");
}

#[test]
fn admin_role_grants_everything() {
    let state = AuthState { user: Some(user("admin", &[])), loading: false };
    assert!(state.capabilities().can("payments.update"));
}
