//! Agent roster management page.

use tracing::{info, instrument};

use casita_azul_client::AgentClient;
use casita_azul_core::{Agent, AgentId};

use crate::error::PageError;
use crate::forms::AgentForm;

/// Current mode of the agent page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AgentMode {
    #[default]
    Viewing,
    Adding(AgentForm),
    Editing(AgentId, AgentForm),
}

/// The manage-agents page.
///
/// Writes go through a form and reload the roster on success; deletion
/// filters the local list instead of reloading.
pub struct ManageAgentsPage {
    client: AgentClient,
    agents: Vec<Agent>,
    mode: AgentMode,
}

impl ManageAgentsPage {
    /// Create the page controller. Call [`load`](Self::load) next.
    #[must_use]
    pub const fn new(client: AgentClient) -> Self {
        Self {
            client,
            agents: Vec::new(),
            mode: AgentMode::Viewing,
        }
    }

    /// Load the roster.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), PageError> {
        self.agents = self.client.get_all().await?;
        Ok(())
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub const fn mode(&self) -> &AgentMode {
        &self.mode
    }

    /// Mutable access to the active form, if any.
    pub fn form_mut(&mut self) -> Option<&mut AgentForm> {
        match &mut self.mode {
            AgentMode::Viewing => None,
            AgentMode::Adding(form) | AgentMode::Editing(_, form) => Some(form),
        }
    }

    /// Open a blank add form.
    pub fn begin_add(&mut self) {
        self.mode = AgentMode::Adding(AgentForm::default());
    }

    /// Open an edit form pre-filled from the listed agent.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` when the id is not in the roster.
    pub fn begin_edit(&mut self, id: AgentId) -> Result<(), PageError> {
        let agent = self
            .agents
            .iter()
            .find(|a| a.id == Some(id))
            .ok_or_else(|| {
                PageError::Validation(vec![format!("agent {id} is not in the loaded roster")])
            })?;
        self.mode = AgentMode::Editing(
            id,
            AgentForm {
                nombre: agent.nombre.clone(),
                email: agent.email.clone(),
                telefono: agent.telefono.clone().unwrap_or_default(),
            },
        );
        Ok(())
    }

    /// Discard the form without any request.
    pub fn cancel(&mut self) {
        self.mode = AgentMode::Viewing;
    }

    /// Validate the form, create or update the agent, and reload.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` without sending anything when the
    /// form is invalid, or the write request's error.
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> Result<(), PageError> {
        let (id, form) = match &self.mode {
            AgentMode::Viewing => {
                return Err(PageError::Validation(vec![
                    "no agent form is open".to_string(),
                ]));
            }
            AgentMode::Adding(form) => (None, form),
            AgentMode::Editing(id, form) => (Some(*id), form),
        };

        form.validate()?;
        let telefono = form.telefono.trim();
        let agent = Agent {
            id,
            nombre: form.nombre.trim().to_string(),
            email: form.email.trim().to_string(),
            telefono: (!telefono.is_empty()).then(|| telefono.to_string()),
        };

        match id {
            None => {
                let created = self.client.create(&agent).await?;
                info!(id = %created.id, "agent created");
            }
            Some(id) => self.client.update(id, &agent).await?,
        }

        self.mode = AgentMode::Viewing;
        self.load().await
    }

    /// Delete an agent, filtering the local roster on success.
    ///
    /// # Errors
    ///
    /// Returns the request's error; the roster is untouched on failure.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: AgentId) -> Result<(), PageError> {
        self.client.delete(id).await?;
        self.agents.retain(|a| a.id != Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casita_azul_client::{ApiClient, ApiConfig};
    use url::Url;

    fn page() -> ManageAgentsPage {
        let config = ApiConfig {
            base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
            authorized_origins: vec![],
            session_file: None,
        };
        ManageAgentsPage::new(AgentClient::new(ApiClient::new(&config).unwrap()))
    }

    #[test]
    fn test_begin_edit_prefills_form() {
        let mut page = page();
        page.agents = vec![Agent {
            id: Some(AgentId::new(4)),
            nombre: "Laura Méndez".to_string(),
            email: "laura@casita-azul.com".to_string(),
            telefono: None,
        }];

        page.begin_edit(AgentId::new(4)).unwrap();
        let AgentMode::Editing(id, form) = page.mode() else {
            panic!("expected edit mode");
        };
        assert_eq!(*id, AgentId::new(4));
        assert_eq!(form.nombre, "Laura Méndez");
        assert_eq!(form.telefono, "");
    }

    #[test]
    fn test_begin_edit_unknown_id_fails() {
        let mut page = page();
        let result = page.begin_edit(AgentId::new(99));
        assert!(matches!(result, Err(PageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_validates_before_sending() {
        let mut page = page();
        page.begin_add();
        // Blank form fails locally before any request goes out.
        let result = page.save().await;
        assert!(matches!(result, Err(PageError::Validation(_))));
    }
}
