//! User account commands (admin role required).

use casita_azul_admin::{Route, format, pages::ManageUsersPage};
use casita_azul_core::Role;

use super::{CliError, Context, password_or_prompt};

/// List all accounts.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    ctx.guard(Route::ManageUsers)?;

    let mut page = ManageUsersPage::new(ctx.admin_users());
    page.load().await?;

    for user in page.users() {
        let role = user
            .role
            .map_or_else(|| "none".to_string(), |r| r.to_string());
        let created = user
            .created_at
            .as_deref()
            .map_or_else(|| "-".to_string(), format::date);
        println!("{:<28}  {:<32}  {role:<6}  {created}", user.id, user.email);
    }
    println!("{} account(s)", page.users().len());
    Ok(())
}

/// Create an account with an initial role.
pub async fn create(
    ctx: &Context,
    email: &str,
    password: Option<String>,
    role: Role,
) -> Result<(), CliError> {
    ctx.guard(Route::ManageUsers)?;

    let password = password_or_prompt(password)?;
    let mut page = ManageUsersPage::new(ctx.admin_users());
    {
        let form = page.form_mut();
        form.email = email.to_string();
        form.password = password;
        form.role = role;
    }
    page.create().await?;

    println!("Account {email} created with role {role}.");
    Ok(())
}

/// Change an account's role.
pub async fn set_role(ctx: &Context, id: &str, role: Role) -> Result<(), CliError> {
    ctx.guard(Route::ManageUsers)?;

    let mut page = ManageUsersPage::new(ctx.admin_users());
    page.load().await?;
    page.update_role(id, role).await?;

    println!("Account {id} is now {role}.");
    Ok(())
}

/// Delete an account permanently.
pub async fn delete(ctx: &Context, id: &str) -> Result<(), CliError> {
    ctx.guard(Route::ManageUsers)?;

    let mut page = ManageUsersPage::new(ctx.admin_users());
    page.load().await?;
    page.delete(id).await?;

    println!("Account {id} deleted.");
    Ok(())
}
