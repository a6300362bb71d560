//! Session users and administered accounts.

use serde::{Deserialize, Serialize};

use crate::types::role::Role;

/// The authenticated user as cached by the session store.
///
/// Derived entirely from the authentication API and never authoritative.
/// The login response omits `role`; the follow-up `GET /user` fills it in,
/// and a session is only considered established once it is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque id assigned by the auth provider.
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl User {
    /// Whether this user may reach the admin-only pages.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// An account as listed by the user-management endpoints.
///
/// The role is the only field this UI may change, besides deleting the
/// account outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<String>,
}
