//! Boolean capability lookups used to hide actions the user cannot perform.
//!
//! The backend remains the authority; these checks only keep the UI honest.

#[cfg(test)]
#[path = "permission_test.rs"]
mod permission_test;

use std::collections::BTreeSet;

use crate::entities::{AuthUser, ResourceKind, Role};

/// Grants access to the admin area as a whole.
pub const ADMIN_ACCESS: &str = "admin.access";

const WILDCARD: &str = "*";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Set of permission slugs granted to the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    grants: BTreeSet<String>,
}

impl Capabilities {
    pub fn from_slugs<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { grants: slugs.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        Self::from_slugs(role.permissions.iter().map(|p| p.name.clone()))
    }

    /// Capabilities of the signed-in user. Admins get everything.
    #[must_use]
    pub fn for_user(user: &AuthUser) -> Self {
        if user.user.role == "admin" {
            return Self::from_slugs([WILDCARD]);
        }
        Self::from_slugs(user.permissions.iter().cloned())
    }

    /// `true` if `slug` is granted directly, by `*`, or by `<prefix>.*`.
    #[must_use]
    pub fn can(&self, slug: &str) -> bool {
        if self.grants.contains(WILDCARD) || self.grants.contains(slug) {
            return true;
        }
        slug.split_once('.')
            .is_some_and(|(prefix, _)| self.grants.contains(&format!("{prefix}.*")))
    }

    #[must_use]
    pub fn can_manage(&self, kind: ResourceKind, action: Action) -> bool {
        self.can(&format!("{}.{}", kind.segment(), action.as_str()))
    }

    #[must_use]
    pub fn can_access_admin(&self) -> bool {
        self.can(ADMIN_ACCESS)
    }

    /// Resource kinds the user may at least view, in menu order.
    #[must_use]
    pub fn visible_kinds(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|kind| self.can_manage(*kind, Action::View))
            .collect()
    }
}
