use super::*;
use models::User;

fn state_with(role: &str, permissions: &[&str]) -> AuthState {
    AuthState {
        user: Some(AuthUser {
            user: User {
                id: 1,
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                role: role.to_owned(),
                is_active: true,
                created_at: None,
            },
            permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
        }),
        loading: false,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
    assert_eq!(admin_access(&state), Access::Pending);
    assert_eq!(student_access(&state), Access::Pending);
}

#[test]
fn home_route_depends_on_role() {
    let student = state_with("student", &[]);
    let admin = state_with("admin", &[]);
    assert_eq!(home_route(student.user.as_ref().expect("user")), "/student");
    assert_eq!(home_route(admin.user.as_ref().expect("user")), "/admin");
}

#[test]
fn admin_area_requires_admin_access() {
    assert_eq!(admin_access(&state_with("admin", &[])), Access::Allowed);
    assert_eq!(admin_access(&state_with("teacher", &["admin.access"])), Access::Allowed);
    assert_eq!(admin_access(&state_with("student", &[])), Access::Redirect("/student"));
    assert_eq!(admin_access(&AuthState::default()), Access::Redirect("/login"));
}

#[test]
fn student_area_sends_staff_to_admin() {
    assert_eq!(student_access(&state_with("student", &[])), Access::Allowed);
    assert_eq!(student_access(&state_with("teacher", &[])), Access::Redirect("/admin"));
}
