//! Property administration: list, search, edit, images.
//!
//! A state machine over three modes. `Viewing` shows the loaded list with a
//! client-side search filter; `Editing` and `Adding` work on a scratch copy
//! so nothing touches the displayed list until a save succeeds. Saving
//! writes the property first, then fans out one upload per staged image
//! concurrently and waits for all of them to settle before reloading.

use futures::future::join_all;
use tracing::{error, info, instrument};

use casita_azul_client::{ImageFile, PropertyClient, SessionStore};
use casita_azul_core::{CatalogSet, ImageId, Property, PropertyId, PropertyImage};

use crate::error::PageError;
use crate::forms::PropertyDraft;

/// Current mode of the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    /// Showing the loaded list.
    #[default]
    Viewing,
    /// Editing an existing property on a scratch copy.
    Editing(PropertyDraft),
    /// Filling in a blank scratch record.
    Adding(PropertyDraft),
}

/// Result of a successful save.
///
/// Upload failures do not abort the flow: the property fields are already
/// saved, so the caller reports the counts and lets the user retry the
/// failed files individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOutcome {
    pub uploads_attempted: usize,
    pub uploads_failed: usize,
}

/// The property administration page.
pub struct PropertyEditor {
    session: SessionStore,
    client: PropertyClient,
    properties: Vec<Property>,
    catalogs: CatalogSet,
    mode: EditorMode,
    staged_files: Vec<ImageFile>,
}

impl PropertyEditor {
    /// Create the page controller. Call [`load`](Self::load) next.
    #[must_use]
    pub fn new(session: SessionStore, client: PropertyClient) -> Self {
        Self {
            session,
            client,
            properties: Vec::new(),
            catalogs: CatalogSet::default(),
            mode: EditorMode::Viewing,
            staged_files: Vec::new(),
        }
    }

    /// Load properties and catalogs concurrently.
    ///
    /// A 401/403 response forcibly ends the local session; the caller's
    /// next guard check will redirect to login.
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), PageError> {
        let loaded = tokio::try_join!(self.client.get_all(), self.client.get_catalogs());
        match loaded {
            Ok((properties, catalogs)) => {
                self.properties = properties;
                self.catalogs = catalogs;
                Ok(())
            }
            Err(e) => {
                if e.is_auth_failure() {
                    error!("authentication rejected while loading, ending session");
                    self.session.clear_local();
                }
                Err(e.into())
            }
        }
    }

    /// The loaded list.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The loaded catalog map.
    #[must_use]
    pub const fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Files staged for upload on the next save.
    #[must_use]
    pub fn staged_files(&self) -> &[ImageFile] {
        &self.staged_files
    }

    /// Mutable access to the active draft, if any.
    pub fn draft_mut(&mut self) -> Option<&mut PropertyDraft> {
        match &mut self.mode {
            EditorMode::Viewing => None,
            EditorMode::Editing(draft) | EditorMode::Adding(draft) => Some(draft),
        }
    }

    /// Enter edit mode on a deep copy of the listed record.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` when the id is not in the loaded
    /// list.
    pub fn begin_edit(&mut self, id: PropertyId) -> Result<(), PageError> {
        let property = self
            .properties
            .iter()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| {
                PageError::Validation(vec![format!("property {id} is not in the loaded list")])
            })?;
        self.mode = EditorMode::Editing(PropertyDraft::from_property(property));
        self.staged_files.clear();
        Ok(())
    }

    /// Enter add mode with a blank scratch record.
    pub fn begin_add(&mut self) {
        self.mode = EditorMode::Adding(PropertyDraft::empty());
        self.staged_files.clear();
    }

    /// Discard the scratch copy without any request.
    pub fn cancel(&mut self) {
        self.mode = EditorMode::Viewing;
        self.staged_files.clear();
    }

    /// Stage an image file for upload on the next save.
    pub fn stage_file(&mut self, file: ImageFile) {
        self.staged_files.push(file);
    }

    /// Remove a staged file before it is uploaded.
    pub fn unstage_file(&mut self, index: usize) {
        if index < self.staged_files.len() {
            self.staged_files.remove(index);
        }
    }

    /// Validate, normalize, and persist the scratch copy.
    ///
    /// The property write completes before any upload starts. Staged files
    /// then go out as one concurrent request each; the first staged file is
    /// flagged principal only when the property has no existing images.
    /// Every upload settles independently - failures are logged and counted
    /// but the flow still reloads and returns to viewing.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` without sending anything when the
    /// form is invalid, or the property write's error.
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> Result<SaveOutcome, PageError> {
        let (draft, is_add) = match &self.mode {
            EditorMode::Viewing => {
                return Err(PageError::Validation(vec![
                    "nothing is being edited".to_string(),
                ]));
            }
            EditorMode::Editing(draft) => (draft, false),
            EditorMode::Adding(draft) => (draft, true),
        };

        draft.validate()?;
        let payload = draft.normalize()?;
        let existing_images = payload.imagenes.len();

        let property_id = if is_add {
            let created = self.client.add(&payload).await?;
            info!(id = %created.id, "property created");
            created.id
        } else {
            self.client.update(&payload).await?;
            // Normalized update payloads always carry an id.
            payload
                .id
                .ok_or_else(|| PageError::Validation(vec!["draft lost its id".to_string()]))?
        };

        let files = std::mem::take(&mut self.staged_files);
        let outcome = self.upload_staged(property_id, existing_images, files).await;

        self.mode = EditorMode::Viewing;
        self.load().await?;
        Ok(outcome)
    }

    /// Fan out one upload per staged file and wait for all to settle.
    async fn upload_staged(
        &self,
        property_id: PropertyId,
        existing_images: usize,
        files: Vec<ImageFile>,
    ) -> SaveOutcome {
        let attempted = files.len();
        if attempted == 0 {
            return SaveOutcome::default();
        }

        let uploads = files.into_iter().enumerate().map(|(index, file)| {
            let client = self.client.clone();
            let es_principal = should_flag_principal(index, existing_images);
            async move {
                let filename = file.filename.clone();
                match client.upload_image(property_id, file, es_principal).await {
                    Ok(_) => true,
                    Err(e) => {
                        error!(%property_id, %filename, error = %e, "image upload failed");
                        false
                    }
                }
            }
        });

        let results = join_all(uploads).await;
        let failed = results.iter().filter(|ok| !**ok).count();
        info!(%property_id, attempted, failed, "image uploads settled");

        SaveOutcome {
            uploads_attempted: attempted,
            uploads_failed: failed,
        }
    }

    /// Logically delete a property and reload the list.
    ///
    /// # Errors
    ///
    /// Returns the delete or reload error.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: PropertyId) -> Result<(), PageError> {
        self.client.delete(id).await?;
        self.load().await
    }

    /// Filter the loaded list by a case-insensitive substring match over
    /// title, description, and address. Never issues a request.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Property> {
        let query = query.to_lowercase();
        self.properties
            .iter()
            .filter(|p| matches_query(p, &query))
            .collect()
    }

    /// Hard-delete one image of the property under edit, then drop it from
    /// the scratch copy.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` outside edit mode, or the request's
    /// error (in which case local state is untouched).
    #[instrument(skip(self))]
    pub async fn delete_image(&mut self, image_id: ImageId) -> Result<(), PageError> {
        let property_id = self.editing_property_id()?;
        self.client.delete_image(property_id, image_id).await?;

        if let Some(draft) = self.draft_mut() {
            draft.scratch.imagenes.retain(|img| img.id != image_id);
        }
        Ok(())
    }

    /// Promote one image of the property under edit to principal, then
    /// mirror the change locally: exactly that image keeps the flag.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` outside edit mode, or the request's
    /// error (in which case local state is untouched).
    #[instrument(skip(self))]
    pub async fn set_principal(&mut self, image_id: ImageId) -> Result<(), PageError> {
        let property_id = self.editing_property_id()?;
        self.client.set_principal_image(property_id, image_id).await?;

        if let Some(draft) = self.draft_mut() {
            promote_local(&mut draft.scratch.imagenes, image_id);
        }
        Ok(())
    }

    fn editing_property_id(&self) -> Result<PropertyId, PageError> {
        match &self.mode {
            EditorMode::Editing(draft) => draft.scratch.id.ok_or_else(|| {
                PageError::Validation(vec!["edited property has no id".to_string()])
            }),
            _ => Err(PageError::Validation(vec![
                "image operations require edit mode".to_string(),
            ])),
        }
    }
}

/// The first staged file becomes principal only when no image exists yet.
///
/// In add mode the property starts with zero images, so the first file
/// always qualifies; in edit mode any existing image suppresses the flag.
const fn should_flag_principal(file_index: usize, existing_images: usize) -> bool {
    file_index == 0 && existing_images == 0
}

/// Case-insensitive substring match; `query` must already be lowercase.
fn matches_query(property: &Property, query: &str) -> bool {
    let haystacks = [
        Some(property.titulo.as_str()),
        property.descripcion.as_deref(),
        property.direccion.as_deref(),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(query))
}

/// Set `es_principal` on exactly the given image.
fn promote_local(images: &mut [PropertyImage], image_id: ImageId) {
    for image in images {
        image.es_principal = image.id == image_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: i32, titulo: &str, descripcion: Option<&str>, direccion: Option<&str>) -> Property {
        Property {
            id: Some(PropertyId::new(id)),
            titulo: titulo.to_string(),
            descripcion: descripcion.map(String::from),
            direccion: direccion.map(String::from),
            ..Property::default()
        }
    }

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
    fn test_principal_rule() {
        // First staged file with no existing images: principal.
        assert!(should_flag_principal(0, 0));
        // Any existing image suppresses the flag.
        assert!(!should_flag_principal(0, 1));
        // Later files never qualify.
        assert!(!should_flag_principal(1, 0));
        assert!(!should_flag_principal(2, 5));
    }

    #[test]
    fn test_search_matches_title_description_address() {
        let properties = vec![
            property(1, "Casa Azul 1", None, None),
            property(2, "Loft centro", Some("fachada azul"), None),
            property(3, "Depto norte", None, Some("Calle Azul 42")),
            property(4, "Bodega", Some("industrial"), Some("Av. Principal")),
            property(5, "CASA AZULEJO", None, None),
        ];

        let query = "azul".to_lowercase();
        let hits: Vec<i32> = properties
            .iter()
            .filter(|p| matches_query(p, &query))
            .filter_map(|p| p.id.map(i32::from))
            .collect();
        assert_eq!(hits, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_promote_local_is_exclusive() {
        let mut images = vec![image(1, true), image(2, false), image(3, false)];
        promote_local(&mut images, ImageId::new(3));

        let principals: Vec<i32> = images
            .iter()
            .filter(|img| img.es_principal)
            .map(|img| img.id.as_i32())
            .collect();
        assert_eq!(principals, vec![3]);
    }

    #[test]
    fn test_begin_edit_takes_deep_copy() {
        let session = test_support::session();
        let client = test_support::client();
        let mut editor = PropertyEditor::new(session, client);

        let mut listed = property(1, "Casa Azul 1", None, None);
        listed.imagenes = vec![image(1, true)];
        editor.properties = vec![listed];

        editor.begin_edit(PropertyId::new(1)).unwrap();
        {
            let draft = editor.draft_mut().unwrap();
            draft.scratch.titulo = "renamed".to_string();
            draft.scratch.imagenes.clear();
        }

        // The displayed list is untouched until a save reloads it.
        assert_eq!(editor.properties()[0].titulo, "Casa Azul 1");
        assert_eq!(editor.properties()[0].imagenes.len(), 1);

        editor.cancel();
        assert_eq!(*editor.mode(), EditorMode::Viewing);
    }

    #[test]
    fn test_begin_edit_unknown_id_fails() {
        let mut editor = PropertyEditor::new(test_support::session(), test_support::client());
        let result = editor.begin_edit(PropertyId::new(99));
        assert!(matches!(result, Err(PageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_in_viewing_mode_is_a_validation_error() {
        let mut editor = PropertyEditor::new(test_support::session(), test_support::client());
        let result = editor.save().await;
        assert!(matches!(result, Err(PageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let mut editor = PropertyEditor::new(test_support::session(), test_support::client());
        editor.begin_add();
        // Empty title: validation aborts before any request; the client
        // points at an unreachable port, so a sent request would error
        // differently (Http, not Validation).
        let result = editor.save().await;
        assert!(matches!(result, Err(PageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_image_ops_require_edit_mode() {
        let mut editor = PropertyEditor::new(test_support::session(), test_support::client());
        let result = editor.set_principal(ImageId::new(1)).await;
        assert!(matches!(result, Err(PageError::Validation(_))));
        let result = editor.delete_image(ImageId::new(1)).await;
        assert!(matches!(result, Err(PageError::Validation(_))));
    }

    mod test_support {
        use casita_azul_client::{
            ApiClient, ApiConfig, MemoryStorage, PropertyClient, SessionStore,
        };
        use url::Url;

        fn api() -> ApiClient {
            let config = ApiConfig {
                base_url: Url::parse("http://127.0.0.1:9/api").unwrap(),
                authorized_origins: vec![],
                session_file: None,
            };
            ApiClient::new(&config).unwrap()
        }

        pub fn session() -> SessionStore {
            SessionStore::new(api(), Box::new(MemoryStorage::new()))
        }

        pub fn client() -> PropertyClient {
            PropertyClient::new(api())
        }
    }
}
