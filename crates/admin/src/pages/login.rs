//! Login page: sign-in and account-request modes sharing one screen.

use tracing::{info, instrument};

use casita_azul_client::SessionStore;
use casita_azul_core::User;

use crate::error::PageError;
use crate::forms::{LoginForm, RegisterForm};

/// Which form the screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    Register,
}

/// The login screen.
pub struct LoginPage {
    session: SessionStore,
    mode: LoginMode,
    login_form: LoginForm,
    register_form: RegisterForm,
    /// Set after a successful registration, shown on the sign-in form.
    notice: Option<String>,
}

impl LoginPage {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            mode: LoginMode::SignIn,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            notice: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &LoginMode {
        &self.mode
    }

    /// Flip between the sign-in and registration forms.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::Register,
            LoginMode::Register => LoginMode::SignIn,
        };
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login_form
    }

    pub fn register_form_mut(&mut self) -> &mut RegisterForm {
        &mut self.register_form
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Validate the sign-in form and establish a session.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` without sending anything when the
    /// form is invalid, or the authentication error.
    #[instrument(skip(self), fields(email = %self.login_form.email))]
    pub async fn submit_login(&mut self) -> Result<User, PageError> {
        self.login_form.validate()?;
        let user = self
            .session
            .login(&self.login_form.email, &self.login_form.password)
            .await?;
        info!(email = %user.email, "signed in");
        self.login_form.password.clear();
        self.notice = None;
        Ok(user)
    }

    /// Validate the registration form and create the account.
    ///
    /// Registration never signs the account in: new accounts start without
    /// a role and wait for an administrator to grant one, so the screen
    /// flips back to sign-in with a notice instead.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` without sending anything when the
    /// form is invalid, or the registration error.
    #[instrument(skip(self), fields(email = %self.register_form.email))]
    pub async fn submit_register(&mut self) -> Result<(), PageError> {
        self.register_form.validate()?;
        self.session
            .register(&self.register_form.email, &self.register_form.password)
            .await?;
        info!(email = %self.register_form.email, "account requested");

        self.register_form = RegisterForm::default();
        self.mode = LoginMode::SignIn;
        self.notice = Some(
            "Account created. An administrator must grant access before you can sign in."
                .to_string(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casita_azul_client::{ApiClient, ApiConfig, MemoryStorage};
    use url::Url;

    fn page() -> LoginPage {
        let config = ApiConfig {
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            authorized_origins: vec![],
            session_file: None,
        };
        let api = ApiClient::new(&config).unwrap();
        LoginPage::new(SessionStore::new(api, Box::new(MemoryStorage::new())))
    }

    #[test]
    fn test_mode_toggles() {
        let mut page = page();
        assert_eq!(*page.mode(), LoginMode::SignIn);
        page.toggle_mode();
        assert_eq!(*page.mode(), LoginMode::Register);
        page.toggle_mode();
        assert_eq!(*page.mode(), LoginMode::SignIn);
    }

    #[tokio::test]
    async fn test_login_validates_before_sending() {
        let mut page = page();
        page.login_form_mut().email = "bad".to_string();
        page.login_form_mut().password = "123".to_string();

        let result = page.submit_login().await;
        assert!(matches!(result, Err(PageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_requires_matching_passwords() {
        let mut page = page();
        page.toggle_mode();
        {
            let form = page.register_form_mut();
            form.email = "staff@casita-azul.com".to_string();
            form.password = "secret-password".to_string();
            form.confirm_password = "different".to_string();
        }

        let result = page.submit_register().await;
        assert!(matches!(result, Err(PageError::Validation(_))));
        // A failed submission stays on the registration form.
        assert_eq!(*page.mode(), LoginMode::Register);
    }
}
