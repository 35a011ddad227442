pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};

#[derive(Parser)]
#[command(name = "learnlog")]
#[command(about = "Learning Log administration - schema, users and tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create or update the database schema")]
    Migrate,

    #[command(about = "User management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Issue a bearer token for an existing user")]
    Token {
        #[arg(help = "Username")]
        username: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<PgStore> {
    let pool = DatabaseManager::connect(&config.database).await?;
    Ok(PgStore::new(pool))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        Commands::Migrate => commands::migrate::handle(&connect_store(config).await?, output_format).await,
        Commands::User { cmd } => {
            let store = connect_store(config).await?;
            commands::user::handle(cmd, &store, output_format).await
        }
        Commands::Token { username } => {
            let store = connect_store(config).await?;
            commands::token::handle(&username, &store, &config.security, output_format).await
        }
    }
}
