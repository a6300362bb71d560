//! Dashboard read endpoints.

use tracing::instrument;

use casita_azul_core::{DashboardStats, RecentActivity};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Typed wrapper over the `/dashboard` endpoints. Read-only.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    api: ApiClient,
}

impl DashboardClient {
    /// Create a dashboard client over a shared transport.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Aggregated listing statistics.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.api.get("/dashboard/stats").await
    }

    /// Most recently created or updated listings.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn recent_activity(&self) -> Result<Vec<RecentActivity>, ApiError> {
        self.api.get("/dashboard/recent-activity").await
    }
}
