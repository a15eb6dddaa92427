use super::*;
use crate::entities::{Permission, User};

fn auth_user(role: &str, permissions: &[&str]) -> AuthUser {
    AuthUser {
        user: User {
            id: 1,
            name: "Test".to_owned(),
            email: "t@example.com".to_owned(),
            role: role.to_owned(),
            is_active: true,
            created_at: None,
        },
        permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
    }
}

#[test]
fn direct_grant_allows_only_that_slug() {
    let caps = Capabilities::from_slugs(["formations.create"]);
    assert!(caps.can("formations.create"));
    assert!(!caps.can("formations.delete"));
    assert!(caps.can_manage(ResourceKind::Formations, Action::Create));
}

#[test]
fn prefix_wildcard_covers_all_actions_of_a_resource() {
    let caps = Capabilities::from_slugs(["payments.*"]);
    assert!(caps.can_manage(ResourceKind::Payments, Action::Delete));
    assert!(!caps.can_manage(ResourceKind::Users, Action::View));
}

#[test]
fn admin_role_gets_everything() {
    let caps = Capabilities::for_user(&auth_user("admin", &[]));
    assert!(caps.can_access_admin());
    assert_eq!(caps.visible_kinds(), ResourceKind::ALL.to_vec());
}

#[test]
fn student_gets_listed_permissions_only() {
    let caps = Capabilities::for_user(&auth_user("student", &["sessions.view"]));
    assert!(!caps.can_access_admin());
    assert_eq!(caps.visible_kinds(), vec![ResourceKind::Sessions]);
}

#[test]
fn from_role_uses_permission_names() {
    let role = Role {
        id: 2,
        name: "Teacher".to_owned(),
        permissions: vec![Permission { id: 1, name: "lessons.update".to_owned(), description: String::new() }],
    };
    let caps = Capabilities::from_role(&role);
    assert!(caps.can_manage(ResourceKind::Lessons, Action::Update));
    assert!(!caps.can_manage(ResourceKind::Lessons, Action::Delete));
}

#[test]
fn empty_capabilities_deny_everything() {
    let caps = Capabilities::default();
    assert!(!caps.can(ADMIN_ACCESS));
    assert!(caps.visible_kinds().is_empty());
}
