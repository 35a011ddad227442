use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use learning_log::cli::commands::user::seed_with_tokens;
use learning_log::config::{self, AppConfig};
use learning_log::database::{migrations, DatabaseManager, LearningLogStore, MemoryStore, PgStore};
use learning_log::{app, AppState};

#[derive(Parser)]
#[command(name = "learning-log")]
#[command(about = "Learning Log HTTP server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Serve from an in-memory store instead of PostgreSQL")]
    memory: bool,

    #[arg(long, help = "Apply the database schema before serving")]
    migrate: bool,

    #[arg(
        long = "user",
        value_name = "NAME",
        requires = "memory",
        help = "Create a user in the in-memory store and log its token (repeatable)"
    )]
    users: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config: AppConfig = config::config().clone();
    tracing::info!("Starting Learning Log in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    let store: Arc<dyn LearningLogStore> = if args.memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        let store = MemoryStore::new();
        for (user, token) in seed_with_tokens(&store, &args.users, &config.security).await? {
            tracing::info!("Demo user '{}' token: {}", user.username, token);
        }
        Arc::new(store)
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        if args.migrate {
            migrations::migrate(&pool).await?;
        }
        Arc::new(PgStore::new(pool))
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Learning Log listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(store, config))).await?;
    Ok(())
}
