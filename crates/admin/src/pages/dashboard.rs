//! Dashboard page: aggregated statistics plus the recent-activity feed.

use tracing::instrument;

use casita_azul_client::DashboardClient;
use casita_azul_core::{DashboardStats, RecentActivity};

use crate::error::PageError;
use crate::format;

/// The read-only dashboard.
///
/// Both endpoints load concurrently; the page is either fully loaded or
/// not loaded at all.
pub struct DashboardPage {
    client: DashboardClient,
    stats: DashboardStats,
    recent: Vec<RecentActivity>,
    loaded: bool,
}

impl DashboardPage {
    /// Create the page controller. Call [`load`](Self::load) next.
    #[must_use]
    pub const fn new(client: DashboardClient) -> Self {
        Self {
            client,
            stats: DashboardStats {
                total_propiedades: 0,
                propiedades_publicadas: 0,
                total_visitas: 0,
                propiedad_mas_visitada: None,
                por_tipo_negocio: Vec::new(),
                por_tipo_propiedad: Vec::new(),
                por_estado_publicacion: Vec::new(),
                top_ciudades: Vec::new(),
                top_agentes: Vec::new(),
                precios: None,
                propiedades_nuevas_semana: 0,
                imagenes: None,
            },
            recent: Vec::new(),
            loaded: false,
        }
    }

    /// Fetch statistics and recent activity concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error; a partial load never
    /// marks the page as loaded.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), PageError> {
        let (stats, recent) =
            tokio::try_join!(self.client.stats(), self.client.recent_activity())?;
        self.stats = stats;
        self.recent = recent;
        self.loaded = true;
        Ok(())
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    #[must_use]
    pub fn recent_activity(&self) -> &[RecentActivity] {
        &self.recent
    }

    /// Share of listings currently published, one decimal.
    #[must_use]
    pub fn published_percentage(&self) -> f64 {
        format::percentage(self.stats.propiedades_publicadas, self.stats.total_propiedades)
    }

    /// Share of listings that have at least one image, one decimal.
    /// Zero until the coverage section is loaded.
    #[must_use]
    pub fn image_coverage_percentage(&self) -> f64 {
        self.stats.imagenes.map_or(0.0, |cov| {
            format::percentage(cov.con_imagenes, cov.con_imagenes + cov.sin_imagenes)
        })
    }

    /// Average sale price formatted as currency, or `"N/A"` when the price
    /// section is missing.
    #[must_use]
    pub fn average_sale_price(&self) -> String {
        self.stats
            .precios
            .as_ref()
            .map_or_else(|| "N/A".to_string(), |p| format::currency(p.precio_promedio_venta))
    }

    /// Average rental price formatted as currency, or `"N/A"`.
    #[must_use]
    pub fn average_rental_price(&self) -> String {
        self.stats
            .precios
            .as_ref()
            .map_or_else(|| "N/A".to_string(), |p| format::currency(p.precio_promedio_alquiler))
    }

    /// Recent-activity rows with their dates formatted for display.
    #[must_use]
    pub fn recent_rows(&self) -> Vec<ActivityRow<'_>> {
        self.recent
            .iter()
            .map(|entry| ActivityRow {
                titulo: &entry.titulo,
                fecha: format::date(&entry.created_at),
                captado_por: entry.captado_por.as_deref().unwrap_or("N/A"),
                estado: &entry.estado,
            })
            .collect()
    }
}

/// A display-ready recent-activity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow<'a> {
    pub titulo: &'a str,
    pub fecha: String,
    pub captado_por: &'a str,
    pub estado: &'a str,
}
