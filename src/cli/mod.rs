//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod context;
pub mod status;
pub mod task;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// taskctl - command-line companion for the task API
#[derive(Parser, Debug)]
#[command(name = "taskctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, pretty, json)
    #[arg(
        long,
        global = true,
        env = "TASKCTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "TASKCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// API base URL (e.g. http://localhost:8000/api/)
    #[arg(long, global = true, env = "TASKCTL_BASE_URL", hide_env = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TASKCTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the access and refresh tokens
    Login {
        /// Username (prompted when omitted)
        #[arg(long, short = 'u', env = "TASKCTL_USERNAME", hide_env = true)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "TASKCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Sign in again even if the stored session is still valid
        #[arg(long)]
        force: bool,
    },

    /// Sign out and forget the stored tokens
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Exchange the stored refresh token for a new access token
    Refresh,

    /// Show configuration and token status
    Status,

    /// Display version information
    Version,

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List your tasks
    List {
        /// Only tasks with this status (e.g. pending, completed)
        #[arg(long)]
        status: Option<String>,

        /// Only overdue tasks
        #[arg(long)]
        overdue: bool,
    },

    /// Create a task
    Create {
        /// Task title
        #[arg(long, short = 't')]
        title: String,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,

        /// Owner (defaults to the signed-in user)
        #[arg(long)]
        owner: Option<String>,

        /// Initial status
        #[arg(long)]
        status: Option<String>,
    },

    /// Edit the title, description, owner or due date of a task
    Edit {
        /// Task ID
        id: i64,

        #[arg(long, short = 't')]
        title: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(long)]
        owner: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete one or more tasks
    Delete {
        /// Task IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },
}
