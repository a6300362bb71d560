//! Command implementations and the shared command context.

use std::io::{BufRead, Write as _};

use thiserror::Error;

use casita_azul_admin::{GuardDecision, PageError, Route, check_route};
use casita_azul_client::{
    AdminUserClient, AgentClient, ApiClient, ApiConfig, ApiError, ConfigError, DashboardClient,
    FileStorage, MemoryStorage, PropertyClient, SessionStore,
};

pub mod agents;
pub mod auth;
pub mod dashboard;
pub mod properties;
pub mod users;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Not signed in. Run `casita auth login` first")]
    NotSignedIn,

    #[error("This command requires the admin role")]
    AdminRequired,

    #[error("Could not read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not read the password: {0}")]
    PasswordInput(std::io::Error),
}

/// Shared state behind every command: one transport, one session.
pub struct Context {
    api: ApiClient,
    session: SessionStore,
}

impl Context {
    /// Build the context from the environment. Any persisted session is
    /// restored by the store's constructor.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid.
    pub fn load() -> Result<Self, CliError> {
        let config = ApiConfig::from_env()?;
        let api = ApiClient::new(&config)?;

        let storage: Box<dyn casita_azul_client::SessionStorage> = match &config.session_file {
            Some(path) => Box::new(FileStorage::new(path.clone())),
            None => Box::new(MemoryStorage::new()),
        };
        let session = SessionStore::new(api.clone(), storage);

        Ok(Self { api, session })
    }

    pub(crate) const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) fn properties(&self) -> PropertyClient {
        PropertyClient::new(self.api.clone())
    }

    pub(crate) fn agents(&self) -> AgentClient {
        AgentClient::new(self.api.clone())
    }

    pub(crate) fn admin_users(&self) -> AdminUserClient {
        AdminUserClient::new(self.api.clone())
    }

    pub(crate) fn dashboard(&self) -> DashboardClient {
        DashboardClient::new(self.api.clone())
    }

    /// Run the navigation guard for the given page before its command.
    pub(crate) fn guard(&self, route: Route) -> Result<(), CliError> {
        match check_route(&self.session, route) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect(Route::Login) => Err(CliError::NotSignedIn),
            GuardDecision::Redirect(_) => Err(CliError::AdminRequired),
        }
    }
}

/// Use the given password or prompt for one on the terminal.
pub(crate) fn password_or_prompt(password: Option<String>) -> Result<String, CliError> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush().map_err(CliError::PasswordInput)?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(CliError::PasswordInput)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
