//! Dashboard statistics and recent-activity feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::PropertyId;

/// Aggregated listing statistics from `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardStats {
    pub total_propiedades: i64,
    pub propiedades_publicadas: i64,
    pub total_visitas: i64,
    pub propiedad_mas_visitada: Option<MostVisited>,
    pub por_tipo_negocio: Vec<CountByName>,
    pub por_tipo_propiedad: Vec<CountByName>,
    pub por_estado_publicacion: Vec<CountByName>,
    pub top_ciudades: Vec<CityCount>,
    pub top_agentes: Vec<AgentCaptureCount>,
    pub precios: Option<PriceStats>,
    pub propiedades_nuevas_semana: i64,
    pub imagenes: Option<ImageCoverage>,
}

/// The single most-visited listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostVisited {
    pub id: PropertyId,
    pub titulo: String,
    pub visitas: i64,
    #[serde(default)]
    pub direccion: Option<String>,
}

/// Count bucketed by a catalog name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountByName {
    pub nombre: String,
    pub cantidad: i64,
}

/// Listing count per city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub ciudad: String,
    pub estado: String,
    pub cantidad: i64,
}

/// Listings captured per agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCaptureCount {
    pub nombre: String,
    pub email: String,
    pub propiedades_captadas: i64,
}

/// Sale and rental price aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PriceStats {
    pub precio_promedio_venta: Decimal,
    pub precio_promedio_alquiler: Decimal,
    pub precio_min_venta: Decimal,
    pub precio_max_venta: Decimal,
    pub precio_min_alquiler: Decimal,
    pub precio_max_alquiler: Decimal,
}

/// How many listings have at least one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageCoverage {
    pub con_imagenes: i64,
    pub sin_imagenes: i64,
}

/// One row of `GET /dashboard/recent-activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: PropertyId,
    pub titulo: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub captado_por: Option<String>,
    pub estado: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_tolerate_missing_sections() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total_propiedades": 12}"#).unwrap();
        assert_eq!(stats.total_propiedades, 12);
        assert!(stats.precios.is_none());
        assert!(stats.por_tipo_negocio.is_empty());
    }
}
