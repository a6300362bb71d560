//! User account management page (admin only).

use tracing::{info, instrument};

use casita_azul_client::AdminUserClient;
use casita_azul_core::{AdminUser, Role};

use crate::error::PageError;
use crate::forms::NewUserForm;

/// The manage-users page.
///
/// Mutations keep the local list in step without a full reload: a created
/// account is appended, a role change patches the affected row, a deletion
/// filters the row out.
pub struct ManageUsersPage {
    client: AdminUserClient,
    users: Vec<AdminUser>,
    form: NewUserForm,
}

impl ManageUsersPage {
    /// Create the page controller. Call [`load`](Self::load) next.
    #[must_use]
    pub fn new(client: AdminUserClient) -> Self {
        Self {
            client,
            users: Vec::new(),
            form: NewUserForm::default(),
        }
    }

    /// Load the account list.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Api(Unauthorized)` for non-admin sessions.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), PageError> {
        self.users = self.client.get_all().await?;
        Ok(())
    }

    #[must_use]
    pub fn users(&self) -> &[AdminUser] {
        &self.users
    }

    /// The new-account form, defaulting to the `user` role.
    pub fn form_mut(&mut self) -> &mut NewUserForm {
        &mut self.form
    }

    /// Validate the form and create the account, appending the new row.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` without sending anything when the
    /// form is invalid, or the creation request's error.
    #[instrument(skip(self), fields(email = %self.form.email))]
    pub async fn create(&mut self) -> Result<(), PageError> {
        self.form.validate()?;
        let created = self
            .client
            .create(&self.form.email, &self.form.password, self.form.role)
            .await?;
        info!(id = %created.id, "user account created");
        self.users.push(created);
        self.form = NewUserForm::default();
        Ok(())
    }

    /// Change one account's role, patching the local row on success.
    ///
    /// # Errors
    ///
    /// Returns the request's error; the local row is untouched on failure.
    #[instrument(skip(self))]
    pub async fn update_role(&mut self, user_id: &str, role: Role) -> Result<(), PageError> {
        self.client.update_role(user_id, role).await?;
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.role = Some(role);
        }
        Ok(())
    }

    /// Delete an account, filtering the local row on success.
    ///
    /// # Errors
    ///
    /// Returns the request's error; the local row is untouched on failure.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, user_id: &str) -> Result<(), PageError> {
        self.client.delete(user_id).await?;
        self.users.retain(|u| u.id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casita_azul_client::{ApiClient, ApiConfig};
    use url::Url;

    fn page() -> ManageUsersPage {
        let config = ApiConfig {
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            authorized_origins: vec![],
            session_file: None,
        };
        ManageUsersPage::new(AdminUserClient::new(ApiClient::new(&config).unwrap()))
    }

    #[test]
    fn test_form_defaults_to_user_role() {
        let mut page = page();
        assert_eq!(page.form_mut().role, Role::User);
    }

    #[tokio::test]
    async fn test_create_validates_before_sending() {
        let mut page = page();
        page.form_mut().email = "not-an-email".to_string();
        page.form_mut().password = "123".to_string();

        // Invalid form fails locally; the client points at an unreachable
        // port, so a sent request would surface as an Api/Http error.
        let result = page.create().await;
        assert!(matches!(result, Err(PageError::Validation(_))));
        assert!(page.users().is_empty());
    }
}
