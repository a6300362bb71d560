//! Session commands: login, register, logout, whoami.

use super::{CliError, Context, password_or_prompt};

/// Sign in and persist the session for later commands.
pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = password_or_prompt(password)?;
    let user = ctx.session().login(email, &password).await?;

    let role = user
        .role
        .map_or_else(|| "none".to_string(), |r| r.to_string());
    println!("Signed in as {} (role: {role})", user.email);
    Ok(())
}

/// Request an account. The account has no role until an admin grants one.
pub async fn register(ctx: &Context, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = password_or_prompt(password)?;
    ctx.session().register(email, &password).await?;

    println!("Account requested for {email}.");
    println!("An administrator must grant a role before you can sign in.");
    Ok(())
}

/// End the session. Local state clears even when the server is unreachable.
pub async fn logout(ctx: &Context) {
    ctx.session().logout().await;
    println!("Signed out.");
}

/// Show the signed-in user, if any.
pub fn whoami(ctx: &Context) {
    match ctx.session().current_user() {
        Some(user) => {
            let role = user
                .role
                .map_or_else(|| "none".to_string(), |r| r.to_string());
            println!("{} (id: {}, role: {role})", user.email, user.id);
        }
        None => println!("Not signed in."),
    }
}
