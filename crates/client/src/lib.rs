//! Casita Azul Client - typed access to the listing REST API.
//!
//! This crate wraps the Casita Azul backend (base path `/api`) in typed
//! resource clients and owns the client-side session:
//!
//! - [`ApiClient`] - shared HTTP transport; attaches the bearer token to
//!   requests targeting the configured API origins and maps error statuses
//!   onto [`ApiError`]
//! - [`SessionStore`] - login/refresh/logout, token persistence, and the
//!   observable current-user stream
//! - [`PropertyClient`], [`AgentClient`], [`AdminUserClient`],
//!   [`DashboardClient`] - 1:1 CRUD wrappers over the REST endpoints
//!
//! No client performs retries, caching, or pagination; each call maps to
//! exactly one HTTP request and surfaces the raw outcome to its caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin_users;
pub mod agents;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod properties;
pub mod session;

pub use admin_users::AdminUserClient;
pub use agents::{AgentClient, CreatedAgent};
pub use config::{ApiConfig, ConfigError};
pub use dashboard::DashboardClient;
pub use error::ApiError;
pub use http::ApiClient;
pub use properties::{CreatedProperty, ImageFile, PropertyClient};
pub use session::{
    SessionStore,
    storage::{FileStorage, MemoryStorage, PersistedSession, SessionStorage, StorageError},
};
