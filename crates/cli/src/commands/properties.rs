//! Property listing commands.

use std::path::Path;

use rust_decimal::Decimal;

use casita_azul_admin::{Route, format, pages::PropertyEditor};
use casita_azul_client::ImageFile;
use casita_azul_core::{ImageId, Property, PropertyId};

use super::{CliError, Context};

async fn loaded_editor(ctx: &Context) -> Result<PropertyEditor, CliError> {
    let mut editor = PropertyEditor::new(ctx.session().clone(), ctx.properties());
    editor.load().await?;
    Ok(editor)
}

/// List active listings, optionally filtered by a search query.
pub async fn list(ctx: &Context, query: Option<&str>) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    let editor = loaded_editor(ctx).await?;

    let listings: Vec<&Property> = match query {
        Some(query) => editor.search(query),
        None => editor.properties().iter().collect(),
    };

    if listings.is_empty() {
        println!("No listings found.");
        return Ok(());
    }

    for property in &listings {
        let id = property.id.map_or(0, i32::from);
        let precio = property
            .precio
            .map_or_else(|| "N/A".to_string(), format::currency);
        let imagenes = property.imagenes.len();
        println!(
            "{id:>5}  {precio:>14}  {imagenes:>2} img  {}",
            property.titulo
        );
    }
    println!("{} listing(s)", listings.len());
    Ok(())
}

/// Show one listing in full.
pub async fn show(ctx: &Context, id: i32) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    let property = ctx.properties().get_by_id(PropertyId::new(id)).await?;

    println!("Title:       {}", property.titulo);
    if let Some(descripcion) = &property.descripcion {
        println!("Description: {descripcion}");
    }
    if let Some(precio) = property.precio {
        println!("Price:       {}", format::currency(precio));
    }
    if let Some(alquiler) = property.precio_alquiler {
        println!("Rent:        {}", format::currency(alquiler));
    }
    if let Some(direccion) = &property.direccion {
        println!("Address:     {direccion}");
    }
    if let Some(created) = &property.created_at {
        println!("Created:     {}", format::date(created));
    }
    println!("Visits:      {}", property.visitas.unwrap_or(0));
    println!("Images:      {}", property.imagenes.len());
    for image in &property.imagenes {
        let marker = if image.es_principal { "*" } else { " " };
        println!("  {marker} [{}] {}", image.id, image.nombre_archivo);
    }
    Ok(())
}

/// Create a listing from the given fields.
pub async fn add(
    ctx: &Context,
    titulo: &str,
    descripcion: Option<String>,
    precio: Option<Decimal>,
    direccion: Option<String>,
) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    let mut editor = loaded_editor(ctx).await?;
    editor.begin_add();
    if let Some(draft) = editor.draft_mut() {
        draft.scratch.titulo = titulo.to_string();
        draft.scratch.descripcion = descripcion;
        draft.scratch.precio = precio;
        draft.scratch.direccion = direccion;
    }
    editor.save().await?;

    println!("Listing \"{titulo}\" created.");
    Ok(())
}

/// Logically delete a listing. The record survives on the server but stops
/// appearing in listings.
pub async fn delete(ctx: &Context, id: i32) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    ctx.properties().delete(PropertyId::new(id)).await?;
    println!("Listing {id} deleted.");
    Ok(())
}

/// Upload an image file for a listing.
pub async fn upload_image(
    ctx: &Context,
    id: i32,
    path: &Path,
    principal: bool,
) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

    let file = ImageFile::new(filename.clone(), bytes);
    ctx.properties()
        .upload_image(PropertyId::new(id), file, principal)
        .await?;

    println!("Uploaded {filename} for listing {id}.");
    Ok(())
}

/// Promote one image of a listing to cover photo.
pub async fn set_principal(ctx: &Context, id: i32, image_id: i32) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    let mut editor = loaded_editor(ctx).await?;
    editor.begin_edit(PropertyId::new(id))?;
    editor.set_principal(ImageId::new(image_id)).await?;

    println!("Image {image_id} is now the cover photo of listing {id}.");
    Ok(())
}

/// Hard-delete one image of a listing.
pub async fn delete_image(ctx: &Context, id: i32, image_id: i32) -> Result<(), CliError> {
    ctx.guard(Route::Properties)?;

    let mut editor = loaded_editor(ctx).await?;
    editor.begin_edit(PropertyId::new(id))?;
    editor.delete_image(ImageId::new(image_id)).await?;

    println!("Image {image_id} of listing {id} deleted.");
    Ok(())
}
