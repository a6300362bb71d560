//! Agent record operations.

use serde::Deserialize;
use tracing::instrument;

use casita_azul_core::{Agent, AgentId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Response of `POST /agentes`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedAgent {
    pub id: AgentId,
    pub status: String,
}

/// Typed wrapper over the `/agentes` endpoints.
#[derive(Debug, Clone)]
pub struct AgentClient {
    api: ApiClient,
}

impl AgentClient {
    /// Create an agent client over a shared transport.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all agents.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Agent>, ApiError> {
        self.api.get("/agentes").await
    }

    /// Create a new agent, returning the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the payload.
    #[instrument(skip(self, agent), fields(nombre = %agent.nombre))]
    pub async fn create(&self, agent: &Agent) -> Result<CreatedAgent, ApiError> {
        self.api.post("/agentes", agent).await
    }

    /// Update an existing agent.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self, agent), fields(nombre = %agent.nombre))]
    pub async fn update(&self, id: AgentId, agent: &Agent) -> Result<(), ApiError> {
        let _: serde_json::Value = self.api.put(&format!("/agentes/{id}"), agent).await?;
        Ok(())
    }

    /// Delete an agent.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AgentId) -> Result<(), ApiError> {
        self.api.delete(&format!("/agentes/{id}")).await
    }
}
