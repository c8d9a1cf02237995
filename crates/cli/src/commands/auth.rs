//! Login page, logout and status.

use std::io::Write;

use anyhow::{bail, Result};
use serde_json::json;

use super::Context;
use crate::routes::Route;

pub async fn login(ctx: &Context, user: Option<String>, password: Option<String>) -> Result<()> {
    let username = match user {
        Some(u) => u,
        None => {
            eprint!("Username: ");
            std::io::stderr().flush()?;
            let mut s = String::new();
            std::io::stdin().read_line(&mut s)?;
            s.trim().to_string()
        }
    };
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };
    if username.is_empty() || password.is_empty() {
        bail!("username and password are required");
    }

    if !ctx.auth.login(&username, &password).await? {
        bail!("login failed: the server did not start a session");
    }
    println!("Logged in as {username}.");
    println!("Continue at {}.", Route::default().path());
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.auth.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn status(ctx: &Context) -> Result<()> {
    let logged_in = ctx.auth.is_logged_in().await;
    let status = json!({
        "loggedIn": logged_in,
        "baseUrl": ctx.client.base_url(),
        "imageBaseUrl": ctx.image_base(),
    });
    ctx.emit(&status, || status_text(ctx.client.base_url(), ctx.image_base(), logged_in))
}

fn status_text(base_url: &str, image_base: &str, logged_in: bool) -> String {
    let rows = [("API:", base_url), ("Images:", image_base), ("Logged in:", if logged_in { "yes" } else { "no" })];
    rows.iter().map(|(label, value)| format!("{label:<11}{value}\n")).collect()
}
