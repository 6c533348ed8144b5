use super::Context;
use crate::core::ApiError;
use anyhow::{Context as _, Result};
use console::Term;

fn prompt_password() -> Result<String> {
    let term = Term::stderr();
    term.write_str("Password: ")?;
    term.read_secure_line()
        .context("Failed to read password from terminal")
}

pub async fn login(ctx: &Context, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    match ctx.auth().login(username, &password).await {
        Ok(_) => {
            println!("Logged in as {username}");
            Ok(())
        }
        // A 401 from the token endpoint means bad credentials, not an expired session
        Err(ApiError::SessionInvalidated { .. }) => anyhow::bail!("Incorrect username or password"),
        Err(e) => Err(e).context("Login failed"),
    }
}

pub async fn register(
    ctx: &Context,
    username: &str,
    password: Option<String>,
    currency: Option<&str>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let user = ctx
        .auth()
        .register(username, &password, currency)
        .await
        .context("Registration failed")?;
    println!(
        "Registered {} (id {}, currency {}). Run `finboard login` to sign in.",
        user.username, user.id, user.currency_preference
    );
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.auth().logout()?;
    println!("Logged out");
    Ok(())
}
