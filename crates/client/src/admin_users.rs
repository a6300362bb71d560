//! User-account administration (admin-only endpoints).

use serde::Serialize;
use tracing::instrument;

use casita_azul_core::{AdminUser, Role};

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Serialize)]
struct UpdateRoleRequest {
    role: Role,
}

/// Typed wrapper over the `/admin/users` endpoints.
///
/// Every call requires an admin session; the backend answers 403 otherwise.
#[derive(Debug, Clone)]
pub struct AdminUserClient {
    api: ApiClient,
}

impl AdminUserClient {
    /// Create a user-administration client over a shared transport.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all user accounts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for non-admin sessions.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.api.get("/admin/users").await
    }

    /// Create a user account with an initial role.
    ///
    /// # Errors
    ///
    /// Returns the API's error when creation is rejected.
    #[instrument(skip(self, password), fields(email = %email, role = %role))]
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AdminUser, ApiError> {
        self.api
            .post(
                "/admin/users",
                &CreateUserRequest {
                    email,
                    password,
                    role,
                },
            )
            .await
    }

    /// Change a user's role - the only mutable field from this UI.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn update_role(&self, user_id: &str, role: Role) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .api
            .put(&format!("/admin/users/{user_id}/role"), &UpdateRoleRequest { role })
            .await?;
        Ok(())
    }

    /// Delete a user account permanently.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/admin/users/{user_id}")).await
    }
}
