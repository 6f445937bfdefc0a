//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence for each option: CLI flag > environment variable > config file >
/// default. This struct captures the CLI/env layer; config defaults are applied
/// in `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, when given explicitly
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.taskctl/config.yaml)
    pub config: Option<String>,

    /// API base URL override
    pub base_url: Option<String>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            base_url: cli.base_url.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn base_url_ref(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
