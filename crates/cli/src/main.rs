//! Repair Desk CLI - schema setup and admin credential management.
//!
//! # Usage
//!
//! ```bash
//! # Create tables (and the default admin on a new database)
//! repair-cli init
//!
//! # Add an admin credential
//! repair-cli admin add -u alice -p 'correct horse'
//!
//! # List admin usernames
//! repair-cli admin list
//! ```
//!
//! # Commands
//!
//! - `init` - Create the schema if absent
//! - `admin add` - Add an admin credential
//! - `admin list` - List admin credentials (hashes are never printed)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "repair-cli")]
#[command(author, version, about = "Repair Desk CLI tools")]
struct Cli {
    /// SQLite database URL (overrides `REPAIR_DESK_DATABASE_URL`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init,
    /// Manage admin credentials
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a new admin credential
    Add {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (stored as an Argon2 hash)
        #[arg(short, long)]
        password: String,
    },
    /// List admin credentials
    List,
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "repair_cli=info,repair_desk_server=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let database_url = commands::database_url(cli.database_url)?;

    match cli.command {
        Commands::Init => {
            commands::init::run(&database_url).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Add { username, password } => {
                let password = SecretString::from(password);
                commands::admin::add(&database_url, &username, &password).await?;
            }
            AdminAction::List => {
                commands::admin::list(&database_url).await?;
            }
        },
    }
    Ok(())
}
