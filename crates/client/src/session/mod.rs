//! Client-side session: tokens, current user, persistence.

pub mod storage;

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{instrument, warn};

use casita_azul_core::User;

use crate::error::ApiError;
use crate::http::ApiClient;
use storage::{PersistedSession, SessionStorage};

/// Response of `POST /login`.
///
/// The embedded user lacks a role; the session store follows up with
/// `GET /user` before the login counts as complete.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    #[allow(dead_code)]
    user: User,
}

/// Response of `POST /refresh`. A new refresh token is optional.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// The client-side session store.
///
/// Owns the refresh token, the persisted session record, and the
/// observable current-user stream. The access token lives in the
/// [`ApiClient`]'s shared cell so the request authorizer can read it.
///
/// Cheap to clone; all clones share state. Components receive a clone by
/// construction instead of reaching for ambient globals.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    api: ApiClient,
    storage: Box<dyn SessionStorage>,
    refresh_token: RwLock<Option<SecretString>>,
    current_user: watch::Sender<Option<User>>,
}

impl SessionStore {
    /// Create a session store, restoring any persisted session.
    ///
    /// A corrupt or unreadable record is treated as logged-out.
    #[must_use]
    pub fn new(api: ApiClient, storage: Box<dyn SessionStorage>) -> Self {
        let restored = match storage.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "failed to restore persisted session");
                None
            }
        };

        let (initial_user, refresh_token) = match &restored {
            Some(record) => {
                api.set_access_token(Some(SecretString::from(record.access_token.clone())));
                (
                    record.user.clone(),
                    Some(SecretString::from(record.refresh_token.clone())),
                )
            }
            None => (None, None),
        };

        let (current_user, _) = watch::channel(initial_user);

        Self {
            inner: Arc::new(SessionStoreInner {
                api,
                storage,
                refresh_token: RwLock::new(refresh_token),
                current_user,
            }),
        }
    }

    /// Log in and establish a session.
    ///
    /// Persists both tokens, then fetches the full user record (including
    /// the role) before resolving. If that follow-up fetch fails, all
    /// local session state is cleared and the login fails: a token without
    /// a known role is not a usable session.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] from either request.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response: AuthResponse = self
            .inner
            .api
            .post("/login", &Credentials { email, password })
            .await?;

        self.inner
            .api
            .set_access_token(Some(SecretString::from(response.access_token)));
        self.set_refresh_token(Some(SecretString::from(response.refresh_token)));

        match self.fetch_user().await {
            Ok(user) => {
                self.publish_user(Some(user.clone()));
                self.persist();
                Ok(user)
            }
            Err(e) => {
                self.clear_local();
                Err(e)
            }
        }
    }

    /// Register a new account. Does not establish a session.
    ///
    /// # Errors
    ///
    /// Returns the API's error when registration is rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, email: &str, password: &str) -> Result<serde_json::Value, ApiError> {
        self.inner
            .api
            .post("/register", &Credentials { email, password })
            .await
    }

    /// End the session.
    ///
    /// The remote invalidation call is best-effort: local state is cleared
    /// even when it fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let result: Result<serde_json::Value, ApiError> =
            self.inner.api.post("/logout", &serde_json::json!({})).await;
        if let Err(e) = result {
            warn!(error = %e, "remote logout failed, clearing local session anyway");
        }
        self.clear_local();
    }

    /// Exchange the refresh token for a new access token and re-fetch the
    /// user. Any failure clears all local session state.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when no refresh token is held, or
    /// the underlying error from either request.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<User, ApiError> {
        let Some(refresh_token) = self.refresh_token() else {
            self.clear_local();
            return Err(ApiError::Unauthorized);
        };

        let exchanged: Result<RefreshResponse, ApiError> = self
            .inner
            .api
            .post(
                "/refresh",
                &RefreshRequest {
                    refresh_token: refresh_token.expose_secret(),
                },
            )
            .await;

        let response = match exchanged {
            Ok(response) => response,
            Err(e) => {
                self.clear_local();
                return Err(e);
            }
        };

        self.inner
            .api
            .set_access_token(Some(SecretString::from(response.access_token)));
        if let Some(new_refresh) = response.refresh_token {
            self.set_refresh_token(Some(SecretString::from(new_refresh)));
        }

        match self.fetch_user().await {
            Ok(user) => {
                self.publish_user(Some(user.clone()));
                self.persist();
                Ok(user)
            }
            Err(e) => {
                self.clear_local();
                Err(e)
            }
        }
    }

    /// Fetch the full user record for the current token.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`].
    pub async fn fetch_user(&self) -> Result<User, ApiError> {
        self.inner.api.get("/user").await
    }

    /// Current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<SecretString> {
        self.inner.api.access_token()
    }

    /// True iff both a token and a cached user are present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.inner.api.has_access_token() && self.current_user().is_some()
    }

    /// Latest known user, or `None` when logged out.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.current_user.borrow().clone()
    }

    /// Subscribe to user changes. The receiver replays the latest value on
    /// subscription, so a new observer sees the current state immediately.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.inner.current_user.subscribe()
    }

    /// Drop all local session state: tokens, cached user, persisted record.
    pub fn clear_local(&self) {
        self.inner.api.set_access_token(None);
        self.set_refresh_token(None);
        self.publish_user(None);
        if let Err(e) = self.inner.storage.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
    }

    fn refresh_token(&self) -> Option<SecretString> {
        self.inner
            .refresh_token
            .read()
            .ok()
            .and_then(|slot| slot.clone())
    }

    fn set_refresh_token(&self, token: Option<SecretString>) {
        if let Ok(mut slot) = self.inner.refresh_token.write() {
            *slot = token;
        }
    }

    fn publish_user(&self, user: Option<User>) {
        self.inner.current_user.send_replace(user);
    }

    /// Write the current session to storage. Persistence failures are
    /// logged, not fatal: the in-memory session stays usable.
    fn persist(&self) {
        let (Some(access), Some(refresh)) = (self.access_token(), self.refresh_token()) else {
            return;
        };
        let record = PersistedSession {
            access_token: access.expose_secret().to_string(),
            refresh_token: refresh.expose_secret().to_string(),
            user: self.current_user(),
        };
        if let Err(e) = self.inner.storage.store(&record) {
            warn!(error = %e, "failed to persist session");
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use storage::MemoryStorage;
    use url::Url;

    fn api() -> ApiClient {
        // Nothing in these tests sends a request; port 9 is the discard
        // service and would refuse connections if anything did.
        let config = ApiConfig {
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            authorized_origins: vec!["http://127.0.0.1:9".to_string()],
            session_file: None,
        };
        ApiClient::new(&config).unwrap()
    }

    fn persisted() -> PersistedSession {
        PersistedSession {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            user: Some(User {
                id: "u-1".to_string(),
                email: "staff@casita-azul.com".to_string(),
                role: Some(casita_azul_core::Role::Admin),
            }),
        }
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let store = SessionStore::new(api(), Box::new(MemoryStorage::new()));
        assert!(!store.is_logged_in());
        assert!(store.current_user().is_none());
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_restores_persisted_session() {
        let storage = MemoryStorage::with_session(persisted());
        let store = SessionStore::new(api(), Box::new(storage));
        assert!(store.is_logged_in());
        assert_eq!(
            store.current_user().map(|u| u.email),
            Some("staff@casita-azul.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_logout_clears_local_state_despite_remote_failure() {
        let storage = MemoryStorage::with_session(persisted());
        let store = SessionStore::new(api(), Box::new(storage));
        assert!(store.is_logged_in());

        // The POST to the unreachable API fails; local state clears anyway.
        store.logout().await;
        assert!(!store.is_logged_in());
        assert!(store.access_token().is_none());
        assert!(store.current_user().is_none());
    }

    #[tokio::test]
    async fn test_refresh_without_token_clears_and_fails() {
        let store = SessionStore::new(api(), Box::new(MemoryStorage::new()));
        let result = store.refresh().await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_subscribe_replays_current_user() {
        let storage = MemoryStorage::with_session(persisted());
        let store = SessionStore::new(api(), Box::new(storage));
        let receiver = store.subscribe();
        assert!(receiver.borrow().is_some());
    }

    #[test]
    fn test_token_without_user_is_not_logged_in() {
        let storage = MemoryStorage::with_session(PersistedSession {
            user: None,
            ..persisted()
        });
        let store = SessionStore::new(api(), Box::new(storage));
        assert!(store.access_token().is_some());
        assert!(!store.is_logged_in());
    }
}
