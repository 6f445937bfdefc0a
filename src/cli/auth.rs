//! Login, logout and whoami commands

use std::time::Duration;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::AuthApi;
use crate::error::Result;
use crate::models::display::UserDisplay;
use crate::output::{Formattable, json};
use crate::router::Route;

/// Spinner shown while waiting on the API
fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
    force: bool,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    if !force && ctx.navigate(Route::Login).await? == Route::Tasks {
        let state = ctx.state.read().await;
        println!(
            "{} Already logged in as {}",
            "✓".green(),
            state.username.bold()
        );
        println!("  → Use 'taskctl login --force' to sign in as someone else");
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    let username = match username {
        Some(u) => u,
        None => {
            let mut input = Input::<String>::with_theme(&theme).with_prompt("Username");
            if let Some(last) = ctx.config.username.clone() {
                input = input.default(last);
            }
            input.interact_text()?
        }
    };

    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    let progress = spinner("Signing in...");
    let result = ctx.auth.login(&username, &password).await;
    progress.finish_and_clear();
    let user = result?;

    ctx.state.write().await.set_user(&user);
    ctx.navigate(Route::Tasks).await?;

    ctx.config.username = Some(user.username.clone());
    ctx.save_config()?;
    debug!("Saved last username to {}", ctx.config_path.display());

    let name = user.full_name();
    if name.is_empty() {
        println!("{} Logged in as {}", "✓".green(), user.username.bold());
    } else {
        println!(
            "{} Logged in as {} ({})",
            "✓".green(),
            user.username.bold(),
            name
        );
    }

    Ok(())
}

/// Run the logout command
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let Some(access) = ctx.tokens.access().await? else {
        println!("{} Not logged in", "○".dimmed());
        return Ok(());
    };

    ctx.session.set_bearer(&access).await;
    let server_ok = ctx.auth.logout().await;

    ctx.tokens.clear().await?;
    ctx.session.clear_authorization().await;
    ctx.state.write().await.logout();

    if server_ok {
        println!("{} Logged out", "✓".green());
    } else {
        println!(
            "{} Server did not confirm the logout; local tokens were removed",
            "⚠".yellow()
        );
    }

    Ok(())
}

/// Run the refresh command
pub async fn refresh(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let progress = spinner("Refreshing access token...");
    let result = ctx.auth.refresh_token().await;
    progress.finish_and_clear();
    result?;

    println!("{} Access token refreshed", "✓".green());
    Ok(())
}

/// Run the whoami command
pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let state = ctx.require_session().await?;

    match ctx.format {
        OutputFormat::Pretty => {
            println!("{}", state.username.bold());
            let name = state.name.trim();
            if !name.is_empty() {
                println!("  Name:  {}", name);
            }
            if !state.email.is_empty() {
                println!("  Email: {}", state.email);
            }
        }
        OutputFormat::Table => vec![UserDisplay::from(&state)].print(ctx.format)?,
        OutputFormat::Json => println!("{}", json::format_json(&state.user())?),
    }

    Ok(())
}
