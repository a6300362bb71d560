//! Agent records, managed independently of properties.

use serde::{Deserialize, Serialize};

use crate::types::id::AgentId;

/// A capturing agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Absent when creating a new agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AgentId>,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
}
