//! Status command implementation

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::args::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::json;
use crate::token::{FileTokenStore, TokenStore, jwt};

/// Local view of one stored token
#[derive(Debug, Serialize)]
struct TokenStatus {
    stored: bool,
    expires_at: Option<DateTime<Utc>>,
    expired: bool,
}

impl TokenStatus {
    fn inspect(token: Option<&str>, now: DateTime<Utc>) -> Self {
        let expires_at = token.and_then(jwt::expires_at);
        Self {
            stored: token.is_some(),
            expires_at,
            expired: expires_at.is_some_and(|exp| exp <= now),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: String,
    token_file: String,
    base_url: String,
    username: Option<String>,
    access: TokenStatus,
    refresh: TokenStatus,
}

/// Run the status command. Only local state is inspected; no request is made.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_from(&config_path)?;
    let tokens = FileTokenStore::new(Config::token_path(&config_path));
    let now = Utc::now();

    let access = tokens.access().await?;
    let refresh = tokens.refresh().await?;

    let report = StatusReport {
        config_file: config_path.display().to_string(),
        token_file: tokens.path().display().to_string(),
        base_url: config.base_url(opts.base_url_ref())?,
        username: config.username.clone(),
        access: TokenStatus::inspect(access.as_deref(), now),
        refresh: TokenStatus::inspect(refresh.as_deref(), now),
    };

    let format = opts
        .format
        .or_else(|| config.preferences.format.as_deref().and_then(OutputFormat::from_name))
        .unwrap_or_default();

    if format == OutputFormat::Json {
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "taskctl Status".bold());
    println!("Config file: {}", report.config_file.cyan());
    println!("Token file:  {}", report.token_file.cyan());
    println!("API:         {}", report.base_url.cyan());
    if let Some(ref username) = report.username {
        println!("Last user:   {}", username.bold());
    }
    println!();

    print_token("Access token", &report.access, now);
    print_token("Refresh token", &report.refresh, now);

    if !report.access.stored && !report.refresh.stored {
        println!("  → Run 'taskctl login' to sign in");
    } else if report.refresh.expired {
        println!("  → Refresh token expired; run 'taskctl login' to sign in again");
    }
    println!();

    Ok(())
}

fn print_token(label: &str, status: &TokenStatus, now: DateTime<Utc>) {
    if !status.stored {
        println!("{} {} not stored", "○".dimmed(), label);
        return;
    }

    match status.expires_at {
        Some(_) if status.expired => {
            println!("{} {} expired", "⚠".yellow(), label);
        }
        Some(expires) => {
            let remaining = expires.signed_duration_since(now);
            println!(
                "{} {} valid (expires in {}h {}m)",
                "✓".green(),
                label,
                remaining.num_hours(),
                remaining.num_minutes() % 60
            );
        }
        None => println!("{} {} stored", "✓".green(), label),
    }
}
