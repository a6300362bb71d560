//! Property listing operations: CRUD, catalogs, and image management.

use serde::Deserialize;
use tracing::instrument;

use casita_azul_core::{CatalogSet, ImageId, Property, PropertyId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Response of `POST /propiedades`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProperty {
    pub id: PropertyId,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct PropertiesResponse {
    #[serde(default)]
    properties: Vec<Property>,
}

/// A staged image file to upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Stage an image from raw bytes.
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Typed wrapper over the `/propiedades` and `/catalogos` endpoints.
///
/// Each method maps to exactly one HTTP request. Deleting a property is a
/// logical delete (the backend keeps the row); deleting an image is a hard
/// delete.
#[derive(Debug, Clone)]
pub struct PropertyClient {
    api: ApiClient,
}

impl PropertyClient {
    /// Create a property client over a shared transport.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all active (not logically deleted) properties.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Property>, ApiError> {
        let response: PropertiesResponse = self.api.get("/propiedades").await?;
        Ok(response.properties)
    }

    /// Fetch one property by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown or deleted ids.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: PropertyId) -> Result<Property, ApiError> {
        self.api.get(&format!("/propiedades/{id}")).await
    }

    /// Create a property, returning the new id.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the payload.
    #[instrument(skip(self, property), fields(titulo = %property.titulo))]
    pub async fn add(&self, property: &Property) -> Result<CreatedProperty, ApiError> {
        self.api.post("/propiedades", property).await
    }

    /// Full-replace update of an existing property.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` when the property has no id.
    #[instrument(skip(self, property), fields(id = ?property.id))]
    pub async fn update(&self, property: &Property) -> Result<(), ApiError> {
        let id = property
            .id
            .ok_or_else(|| ApiError::InvalidRequest("cannot update a property without an id".to_string()))?;
        let _: serde_json::Value = self.api.put(&format!("/propiedades/{id}"), property).await?;
        Ok(())
    }

    /// Logically delete a property. The row survives and the listing
    /// simply stops appearing in subsequent `get_all` results.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PropertyId) -> Result<(), ApiError> {
        self.api.delete(&format!("/propiedades/{id}")).await
    }

    /// Fetch the full catalog map in one request.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn get_catalogs(&self) -> Result<CatalogSet, ApiError> {
        self.api.get("/catalogos").await
    }

    /// Upload one image for a property.
    ///
    /// Sent as multipart form data: the file itself plus `es_principal` as
    /// the strings `"true"`/`"false"`, matching what the backend parses.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload fails; other uploads of the same
    /// batch are unaffected.
    #[instrument(skip(self, file), fields(filename = %file.filename, size = file.bytes.len()))]
    pub async fn upload_image(
        &self,
        property_id: PropertyId,
        file: ImageFile,
        es_principal: bool,
    ) -> Result<serde_json::Value, ApiError> {
        let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("es_principal", es_principal.to_string());

        self.api
            .post_multipart(&format!("/propiedades/{property_id}/imagenes"), form)
            .await
    }

    /// Hard-delete one image.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn delete_image(
        &self,
        property_id: PropertyId,
        image_id: ImageId,
    ) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/propiedades/{property_id}/imagenes/{image_id}"))
            .await
    }

    /// Promote one image to principal. The backend clears the flag on the
    /// property's other images.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    #[instrument(skip(self))]
    pub async fn set_principal_image(
        &self,
        property_id: PropertyId,
        image_id: ImageId,
    ) -> Result<(), ApiError> {
        // The backend expects an empty JSON object body.
        let _: serde_json::Value = self
            .api
            .put(
                &format!("/propiedades/{property_id}/imagenes/{image_id}/principal"),
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }
}
