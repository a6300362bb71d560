//! Shared newtype wrappers.

pub mod email;
pub mod id;
pub mod role;

pub use email::{Email, EmailError};
pub use id::{AgentId, CatalogItemId, ImageId, PropertyId};
pub use role::{ParseRoleError, Role};
