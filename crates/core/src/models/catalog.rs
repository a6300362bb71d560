//! Catalog reference data.
//!
//! Catalogs are immutable lookup tables (cities, zones, currencies, business
//! types, ...) fetched in bulk as one map keyed by catalog name and rendered
//! as select options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::id::CatalogItemId;

/// One entry of a catalog.
///
/// Agent-backed catalogs (`agentes`) additionally carry contact fields;
/// everything else is `id` + `nombre`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

impl CatalogItem {
    /// Convenience constructor for the common `id` + `nombre` case.
    #[must_use]
    pub fn new(id: i32, nombre: impl Into<String>) -> Self {
        Self {
            id: CatalogItemId::new(id),
            nombre: nombre.into(),
            email: None,
            telefono: None,
        }
    }
}

/// Well-known catalog names returned by `GET /catalogos`.
pub mod names {
    pub const AGENTES: &str = "agentes";
    pub const AGENTES_EXTERNOS: &str = "agentes_externos";
    pub const CIUDADES: &str = "ciudades";
    pub const ESTADOS: &str = "estados";
    pub const ESTADOS_FISICOS: &str = "estados_fisicos";
    pub const ESTADOS_PUBLICACION: &str = "estados_publicacion";
    pub const FRECUENCIAS_ALQUILER: &str = "frecuencias_alquiler";
    pub const MONEDAS: &str = "monedas";
    pub const TIPOS_NEGOCIO: &str = "tipos_negocio";
    pub const TIPOS_PROPIEDAD: &str = "tipos_propiedad";
    pub const ZONAS: &str = "zonas";
}

/// The full catalog map, keyed by catalog name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CatalogSet(pub BTreeMap<String, Vec<CatalogItem>>);

impl CatalogSet {
    /// Items of one catalog, empty when the catalog is missing.
    #[must_use]
    pub fn items(&self, catalog: &str) -> &[CatalogItem] {
        self.0.get(catalog).map_or(&[], Vec::as_slice)
    }

    /// Display name for a catalog item id.
    ///
    /// Mirrors what the list views render: `N/A` when nothing is selected
    /// and `ID <n> ?` when the id no longer resolves.
    #[must_use]
    pub fn display_name(&self, catalog: &str, id: Option<CatalogItemId>) -> String {
        let Some(id) = id else {
            return "N/A".to_string();
        };
        self.items(catalog)
            .iter()
            .find(|item| item.id == id)
            .map_or_else(|| format!("ID {id} ?"), |item| item.nombre.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatalogSet {
        let mut map = BTreeMap::new();
        map.insert(
            names::CIUDADES.to_string(),
            vec![CatalogItem::new(1, "Monterrey"), CatalogItem::new(2, "Saltillo")],
        );
        CatalogSet(map)
    }

    #[test]
    fn test_display_name_resolves() {
        let catalogs = sample();
        assert_eq!(
            catalogs.display_name(names::CIUDADES, Some(CatalogItemId::new(2))),
            "Saltillo"
        );
    }

    #[test]
    fn test_display_name_fallbacks() {
        let catalogs = sample();
        assert_eq!(catalogs.display_name(names::CIUDADES, None), "N/A");
        assert_eq!(
            catalogs.display_name(names::CIUDADES, Some(CatalogItemId::new(99))),
            "ID 99 ?"
        );
        assert_eq!(
            catalogs.display_name(names::ZONAS, Some(CatalogItemId::new(1))),
            "ID 1 ?"
        );
    }

    #[test]
    fn test_deserializes_as_bare_map() {
        let catalogs: CatalogSet = serde_json::from_str(
            r#"{"monedas": [{"id": 1, "nombre": "USD"}], "zonas": []}"#,
        )
        .unwrap();
        assert_eq!(catalogs.items(names::MONEDAS).len(), 1);
        assert!(catalogs.items(names::ZONAS).is_empty());
    }
}
