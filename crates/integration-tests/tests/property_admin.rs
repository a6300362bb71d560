//! The property editor end to end: scratch-copy editing, the concurrent
//! image-upload fan-out, principal-image rules, and logical deletion.

use casita_azul_admin::pages::{EditorMode, PropertyEditor};
use casita_azul_client::{
    ApiError, ImageFile, MemoryStorage, PersistedSession, PropertyClient, SessionStore,
};
use casita_azul_core::{ImageId, Property, PropertyImage, Role, User};
use casita_azul_integration_tests::StubApi;

async fn admin_editor(stub: &StubApi) -> (PropertyEditor, SessionStore) {
    stub.seed_account("staff@casita-azul.com", "secret-password", Some(Role::Admin));
    let (api, session) = stub.session();
    session
        .login("staff@casita-azul.com", "secret-password")
        .await
        .unwrap();
    (
        PropertyEditor::new(session.clone(), PropertyClient::new(api)),
        session,
    )
}

fn seeded_image(id: i32, principal: bool) -> PropertyImage {
    PropertyImage {
        id: ImageId::new(id),
        url: format!("http://stub.local/uploads/{id}.jpg"),
        nombre_archivo: format!("{id}.jpg"),
        es_principal: principal,
        orden: 0,
    }
}

#[tokio::test]
async fn test_add_listing_with_image_fanout() {
    let stub = StubApi::start().await.unwrap();
    let (mut editor, _session) = admin_editor(&stub).await;
    editor.load().await.unwrap();

    editor.begin_add();
    {
        let draft = editor.draft_mut().unwrap();
        draft.scratch.titulo = "Casa Azul 1".to_string();
        draft.scratch.descripcion = Some("Fachada azul, dos plantas".to_string());
        draft.selects.ciudad_id = "1".to_string();
        draft.selects.tipo_negocio_id = "1".to_string();
    }
    editor.stage_file(ImageFile::new("fachada.jpg", vec![1, 2, 3]));
    editor.stage_file(ImageFile::new("cocina.jpg", vec![4, 5, 6]));
    editor.stage_file(ImageFile::new("patio.jpg", vec![7, 8, 9]));

    let outcome = editor.save().await.unwrap();
    assert_eq!(outcome.uploads_attempted, 3);
    assert_eq!(outcome.uploads_failed, 0);
    assert_eq!(*editor.mode(), EditorMode::Viewing);

    // The reloaded list contains the new listing with all three images.
    let listing = editor
        .properties()
        .iter()
        .find(|p| p.titulo == "Casa Azul 1")
        .cloned()
        .unwrap();
    assert_eq!(listing.imagenes.len(), 3);

    // Exactly the first staged file is principal: the listing had no
    // existing images when the fan-out started.
    let principal: Vec<&str> = listing
        .imagenes
        .iter()
        .filter(|img| img.es_principal)
        .map(|img| img.nombre_archivo.as_str())
        .collect();
    assert_eq!(principal, vec!["fachada.jpg"]);
    assert!(listing.has_single_principal());
}

#[tokio::test]
async fn test_uploads_to_listing_with_images_are_not_principal() {
    let stub = StubApi::start().await.unwrap();
    let id = stub.seed_property(Property {
        titulo: "Loft centro".to_string(),
        imagenes: vec![seeded_image(90, true)],
        ..Property::default()
    });

    let (mut editor, _session) = admin_editor(&stub).await;
    editor.load().await.unwrap();

    editor.begin_edit(id).unwrap();
    editor.stage_file(ImageFile::new("terraza.jpg", vec![1, 2, 3]));
    let outcome = editor.save().await.unwrap();
    assert_eq!(outcome.uploads_attempted, 1);
    assert_eq!(outcome.uploads_failed, 0);

    // The existing cover photo keeps the flag.
    let listing = stub.property(id).unwrap();
    assert_eq!(listing.imagenes.len(), 2);
    let principal: Vec<&str> = listing
        .imagenes
        .iter()
        .filter(|img| img.es_principal)
        .map(|img| img.nombre_archivo.as_str())
        .collect();
    assert_eq!(principal, vec!["90.jpg"]);
}

#[tokio::test]
async fn test_edit_normalizes_blank_fields_to_null() {
    let stub = StubApi::start().await.unwrap();
    let id = stub.seed_property(Property {
        titulo: "Depto norte".to_string(),
        descripcion: Some("por actualizar".to_string()),
        ..Property::default()
    });

    let (mut editor, _session) = admin_editor(&stub).await;
    editor.load().await.unwrap();

    editor.begin_edit(id).unwrap();
    {
        let draft = editor.draft_mut().unwrap();
        // Clearing a text field in the form must reach the server as null,
        // not as an empty string.
        draft.scratch.descripcion = Some("   ".to_string());
        draft.selects.ciudad_id = "2".to_string();
    }
    editor.save().await.unwrap();

    let updated = stub.property(id).unwrap();
    assert_eq!(updated.descripcion, None);
    assert_eq!(updated.ciudad_id.map(i32::from), Some(2));
}

#[tokio::test]
async fn test_logical_delete_keeps_the_record() {
    let stub = StubApi::start().await.unwrap();
    let id = stub.seed_property(Property {
        titulo: "Bodega".to_string(),
        ..Property::default()
    });

    let (mut editor, _session) = admin_editor(&stub).await;
    editor.load().await.unwrap();
    assert_eq!(editor.properties().len(), 1);

    editor.delete(id).await.unwrap();
    assert!(editor.properties().is_empty());

    // The record survives server-side with a deletion timestamp.
    let record = stub.property(id).unwrap();
    assert!(record.deleted_at.is_some());

    // Direct fetches treat it as gone.
    let (api, second) = stub.session();
    second
        .login("staff@casita-azul.com", "secret-password")
        .await
        .unwrap();
    let result = PropertyClient::new(api).get_by_id(id).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_image_promotion_and_deletion_stay_in_sync() {
    let stub = StubApi::start().await.unwrap();
    let id = stub.seed_property(Property {
        titulo: "Casa jardín".to_string(),
        imagenes: vec![seeded_image(1, true), seeded_image(2, false), seeded_image(3, false)],
        ..Property::default()
    });

    let (mut editor, _session) = admin_editor(&stub).await;
    editor.load().await.unwrap();
    editor.begin_edit(id).unwrap();

    // Promote the third image; locally and remotely exactly one principal.
    editor.set_principal(ImageId::new(3)).await.unwrap();
    let draft = editor.draft_mut().unwrap();
    let local: Vec<i32> = draft
        .scratch
        .imagenes
        .iter()
        .filter(|img| img.es_principal)
        .map(|img| img.id.as_i32())
        .collect();
    assert_eq!(local, vec![3]);

    let remote = stub.property(id).unwrap();
    let remote_principal: Vec<i32> = remote
        .imagenes
        .iter()
        .filter(|img| img.es_principal)
        .map(|img| img.id.as_i32())
        .collect();
    assert_eq!(remote_principal, vec![3]);

    // Hard-delete the first image on both sides.
    editor.delete_image(ImageId::new(1)).await.unwrap();
    let draft = editor.draft_mut().unwrap();
    assert_eq!(draft.scratch.imagenes.len(), 2);
    assert_eq!(stub.property(id).unwrap().imagenes.len(), 2);

    // Deleting an unknown image fails and changes nothing.
    let result = editor.delete_image(ImageId::new(99)).await;
    assert!(result.is_err());
    assert_eq!(stub.property(id).unwrap().imagenes.len(), 2);
}

#[tokio::test]
async fn test_catalogs_load_with_properties() {
    let stub = StubApi::start().await.unwrap();
    let (mut editor, _session) = admin_editor(&stub).await;
    editor.load().await.unwrap();

    let catalogs = editor.catalogs();
    assert!(!catalogs.items("ciudades").is_empty());
    assert_eq!(
        catalogs.display_name("ciudades", Some(casita_azul_core::CatalogItemId::new(1))),
        "Monterrey"
    );
    assert_eq!(catalogs.display_name("ciudades", None), "N/A");
}

#[tokio::test]
async fn test_auth_rejection_during_load_ends_session() {
    let stub = StubApi::start().await.unwrap();

    // A persisted session whose token the server no longer accepts.
    let api = stub.client();
    let storage = MemoryStorage::with_session(PersistedSession {
        access_token: "access-expired".to_string(),
        refresh_token: "refresh-expired".to_string(),
        user: Some(User {
            id: "u-1".to_string(),
            email: "staff@casita-azul.com".to_string(),
            role: Some(Role::Admin),
        }),
    });
    let session = SessionStore::new(api.clone(), Box::new(storage));
    assert!(session.is_logged_in());

    let mut editor = PropertyEditor::new(session.clone(), PropertyClient::new(api));
    let result = editor.load().await;

    // The 401 surfaces to the caller and forcibly ends the local session,
    // so the next guard check redirects to login.
    assert!(result.is_err());
    assert!(!session.is_logged_in());
}
