//! Agent roster commands (admin role required).

use casita_azul_admin::{Route, pages::ManageAgentsPage};
use casita_azul_core::AgentId;

use super::{CliError, Context};

/// List the roster.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    ctx.guard(Route::ManageAgents)?;

    let mut page = ManageAgentsPage::new(ctx.agents());
    page.load().await?;

    if page.agents().is_empty() {
        println!("No agents registered.");
        return Ok(());
    }

    for agent in page.agents() {
        let id = agent.id.map_or(0, i32::from);
        let telefono = agent.telefono.as_deref().unwrap_or("-");
        println!("{id:>5}  {:<30}  {:<30}  {telefono}", agent.nombre, agent.email);
    }
    Ok(())
}

/// Add an agent to the roster.
pub async fn add(
    ctx: &Context,
    nombre: &str,
    email: &str,
    telefono: Option<String>,
) -> Result<(), CliError> {
    ctx.guard(Route::ManageAgents)?;

    let mut page = ManageAgentsPage::new(ctx.agents());
    page.load().await?;
    page.begin_add();
    if let Some(form) = page.form_mut() {
        form.nombre = nombre.to_string();
        form.email = email.to_string();
        form.telefono = telefono.unwrap_or_default();
    }
    page.save().await?;

    println!("Agent {nombre} added.");
    Ok(())
}

/// Update an agent; omitted fields keep their current value.
pub async fn update(
    ctx: &Context,
    id: i32,
    nombre: Option<String>,
    email: Option<String>,
    telefono: Option<String>,
) -> Result<(), CliError> {
    ctx.guard(Route::ManageAgents)?;

    let mut page = ManageAgentsPage::new(ctx.agents());
    page.load().await?;
    page.begin_edit(AgentId::new(id))?;
    if let Some(form) = page.form_mut() {
        if let Some(nombre) = nombre {
            form.nombre = nombre;
        }
        if let Some(email) = email {
            form.email = email;
        }
        if let Some(telefono) = telefono {
            form.telefono = telefono;
        }
    }
    page.save().await?;

    println!("Agent {id} updated.");
    Ok(())
}

/// Delete an agent.
pub async fn delete(ctx: &Context, id: i32) -> Result<(), CliError> {
    ctx.guard(Route::ManageAgents)?;

    let mut page = ManageAgentsPage::new(ctx.agents());
    page.load().await?;
    page.delete(AgentId::new(id)).await?;

    println!("Agent {id} deleted.");
    Ok(())
}
