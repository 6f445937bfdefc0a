//! taskctl - command-line companion for the task API

use std::io;

use clap::{CommandFactory, Parser};
use log::{LevelFilter, debug};

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod router;
mod session;
mod token;

use cli::args::GlobalOptions;
use cli::task::TaskChanges;
use cli::{Cli, Commands, TaskCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("taskctl", LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);
    debug!("Global options: {:?}", opts);

    match cli.command {
        Commands::Login {
            username,
            password,
            force,
        } => cli::auth::login(&opts, username, password, force).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Whoami => cli::auth::whoami(&opts).await,
        Commands::Refresh => cli::auth::refresh(&opts).await,
        Commands::Status => cli::status::run(&opts).await,
        Commands::Version => {
            println!("taskctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Task(task_cmd) => match task_cmd {
            TaskCommands::List { status, overdue } => {
                cli::task::list(&opts, status, overdue).await
            }
            TaskCommands::Create {
                title,
                description,
                due,
                owner,
                status,
            } => cli::task::create(&opts, title, description, due, owner, status).await,
            TaskCommands::Edit {
                id,
                title,
                description,
                owner,
                due,
            } => {
                let changes = TaskChanges {
                    title,
                    description,
                    owner,
                    due,
                };
                cli::task::edit(&opts, id, changes).await
            }
            TaskCommands::Delete { ids } => cli::task::delete(&opts, ids).await,
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "taskctl", &mut io::stdout());
            Ok(())
        }
    }
}
