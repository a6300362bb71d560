//! Navigation guards.
//!
//! Two guards compose by AND: "authenticated" redirects to the login page
//! when no session is present, and "admin" sends non-admin users back to
//! the property page. Each navigation attempt inspects the session store
//! exactly once - there is no polling.

use tracing::warn;

use casita_azul_client::SessionStore;

/// The navigable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    /// Property administration (the original `/admin` page).
    Properties,
    /// User management - admin role required.
    ManageUsers,
    /// Agent management - admin role required.
    ManageAgents,
}

impl Route {
    /// Whether this route requires an authenticated session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Whether this route additionally requires the admin role.
    #[must_use]
    pub const fn requires_admin(&self) -> bool {
        matches!(self, Self::ManageUsers | Self::ManageAgents)
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigation may proceed.
    Allow,
    /// Navigation is denied; go here instead.
    Redirect(Route),
}

/// Run the guard chain for one navigation attempt.
#[must_use]
pub fn check_route(session: &SessionStore, route: Route) -> GuardDecision {
    if route.requires_auth() && !session.is_logged_in() {
        return GuardDecision::Redirect(Route::Login);
    }

    if route.requires_admin() {
        let is_admin = session.current_user().is_some_and(|user| user.is_admin());
        if !is_admin {
            warn!(?route, "access denied: admin role required");
            return GuardDecision::Redirect(Route::Properties);
        }
    }

    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use casita_azul_client::{ApiClient, ApiConfig, MemoryStorage, PersistedSession};
    use casita_azul_core::{Role, User};
    use url::Url;

    fn store_with(user: Option<User>) -> SessionStore {
        let config = ApiConfig {
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            authorized_origins: vec![],
            session_file: None,
        };
        let api = ApiClient::new(&config).unwrap();
        let storage = match user {
            Some(user) => MemoryStorage::with_session(PersistedSession {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                user: Some(user),
            }),
            None => MemoryStorage::new(),
        };
        SessionStore::new(api, Box::new(storage))
    }

    fn user(role: Option<Role>) -> User {
        User {
            id: "u-1".to_string(),
            email: "staff@casita-azul.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_anonymous_redirected_to_login() {
        let session = store_with(None);
        assert_eq!(
            check_route(&session, Route::Dashboard),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            check_route(&session, Route::ManageUsers),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(check_route(&session, Route::Login), GuardDecision::Allow);
    }

    #[test]
    fn test_non_admin_denied_admin_pages() {
        let session = store_with(Some(user(Some(Role::User))));
        assert_eq!(check_route(&session, Route::Dashboard), GuardDecision::Allow);
        assert_eq!(check_route(&session, Route::Properties), GuardDecision::Allow);
        assert_eq!(
            check_route(&session, Route::ManageUsers),
            GuardDecision::Redirect(Route::Properties)
        );
        assert_eq!(
            check_route(&session, Route::ManageAgents),
            GuardDecision::Redirect(Route::Properties)
        );
    }

    #[test]
    fn test_missing_role_is_not_admin() {
        let session = store_with(Some(user(None)));
        assert_eq!(
            check_route(&session, Route::ManageUsers),
            GuardDecision::Redirect(Route::Properties)
        );
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        let session = store_with(Some(user(Some(Role::Admin))));
        for route in [
            Route::Login,
            Route::Dashboard,
            Route::Properties,
            Route::ManageUsers,
            Route::ManageAgents,
        ] {
            assert_eq!(check_route(&session, route), GuardDecision::Allow);
        }
    }
}
