//! Property listing and image models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{AgentId, CatalogItemId, ImageId, PropertyId};

/// An image attached to a property listing.
///
/// Owned by exactly one property. At most one image per property carries
/// `es_principal` (the cover photo); the backend enforces this and the
/// client mirrors it when promoting an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: ImageId,
    pub url: String,
    pub nombre_archivo: String,
    pub es_principal: bool,
    #[serde(default)]
    pub orden: i32,
}

/// A property listing with the full column set of the `propiedades` table.
///
/// `id` is absent when creating; every other optional column round-trips as
/// an explicit `null`. Timestamps stay as the API's ISO-8601 strings - the
/// client never does date arithmetic on them, only display formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PropertyId>,
    pub titulo: String,
    pub descripcion: Option<String>,

    // Pricing
    pub precio: Option<Decimal>,
    pub precio_alquiler: Option<Decimal>,
    pub valor_administracion: Option<Decimal>,

    // Rooms and layout
    pub habitaciones: Option<i32>,
    pub alcobas: Option<i32>,
    pub banos: Option<i32>,
    pub banos_medios: Option<i32>,
    pub estacionamientos: Option<i32>,
    pub anio_construccion: Option<i32>,
    pub piso: Option<String>,

    // Areas (square meters)
    pub m2_terreno: Option<Decimal>,
    pub m2_construccion: Option<Decimal>,
    pub m2_privada: Option<Decimal>,

    // Location
    pub direccion: Option<String>,
    pub codigo_postal: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    // Publication metadata
    pub visitas: Option<i64>,
    pub registro_publico: Option<String>,
    pub convenio_url: Option<String>,
    pub convenio_validado: bool,
    pub fecha_validacion: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,

    // Catalog foreign keys
    pub tipo_negocio_id: Option<CatalogItemId>,
    pub tipo_propiedad_id: Option<CatalogItemId>,
    pub estado_publicacion_id: Option<CatalogItemId>,
    pub moneda_id: Option<CatalogItemId>,
    pub frecuencia_alquiler_id: Option<CatalogItemId>,
    pub estado_fisico_id: Option<CatalogItemId>,
    pub estado_id: Option<CatalogItemId>,
    pub ciudad_id: Option<CatalogItemId>,
    pub zona_id: Option<CatalogItemId>,

    // People foreign keys
    pub captado_por_agente_id: Option<AgentId>,
    pub agente_id: Option<AgentId>,
    pub agente_externo_id: Option<CatalogItemId>,
    pub validado_por_usuario_id: Option<i64>,

    pub imagenes: Vec<PropertyImage>,
}

impl Property {
    /// URL of the cover photo, falling back to the first image.
    #[must_use]
    pub fn principal_image_url(&self) -> Option<&str> {
        self.imagenes
            .iter()
            .find(|img| img.es_principal)
            .or_else(|| self.imagenes.first())
            .map(|img| img.url.as_str())
    }

    /// True when exactly one image is flagged principal, or there are no
    /// images at all.
    #[must_use]
    pub fn has_single_principal(&self) -> bool {
        let count = self.imagenes.iter().filter(|i| i.es_principal).count();
        self.imagenes.is_empty() || count == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: i32, principal: bool) -> PropertyImage {
        PropertyImage {
            id: ImageId::new(id),
            url: format!("https://cdn.example.com/{id}.jpg"),
            nombre_archivo: format!("{id}.jpg"),
            es_principal: principal,
            orden: id,
        }
    }

    #[test]
    fn test_optional_columns_serialize_as_null() {
        let property = Property {
            titulo: "Casa Azul 1".to_string(),
            ..Property::default()
        };
        let value = serde_json::to_value(&property).unwrap();
        // `id` is omitted on create, relational columns are explicit null.
        assert!(value.get("id").is_none());
        assert!(value.get("ciudad_id").unwrap().is_null());
        assert!(value.get("descripcion").unwrap().is_null());
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        let property: Property =
            serde_json::from_str(r#"{"id": 9, "titulo": "Loft centro"}"#).unwrap();
        assert_eq!(property.id, Some(PropertyId::new(9)));
        assert!(property.imagenes.is_empty());
        assert!(!property.convenio_validado);
    }

    #[test]
    fn test_principal_image_falls_back_to_first() {
        let mut property = Property::default();
        property.imagenes = vec![image(1, false), image(2, false)];
        assert_eq!(
            property.principal_image_url(),
            Some("https://cdn.example.com/1.jpg")
        );

        property.imagenes = vec![image(1, false), image(2, true)];
        assert_eq!(
            property.principal_image_url(),
            Some("https://cdn.example.com/2.jpg")
        );
    }
}
