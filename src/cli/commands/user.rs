use clap::Subcommand;
use serde_json::json;

use crate::auth::issue_token;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::SecurityConfig;
use crate::database::{LearningLogStore, User};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a new user")]
    Create {
        #[arg(help = "Username")]
        username: String,
    },
}

pub async fn handle(
    cmd: UserCommands,
    store: &dyn LearningLogStore,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Create { username } => {
            let user = create(store, &username).await?;

            output_success(
                output_format,
                &format!("Created user '{}'", user.username),
                Some(json!({ "user": user })),
            )
        }
    }
}

async fn create(store: &dyn LearningLogStore, username: &str) -> anyhow::Result<User> {
    let username = username.trim();
    if username.is_empty() {
        anyhow::bail!("username cannot be empty");
    }

    let user = store.insert_user(username).await?;
    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok(user)
}

/// Create each named user and issue a bearer token for it
pub async fn seed_with_tokens(
    store: &dyn LearningLogStore,
    usernames: &[String],
    security: &SecurityConfig,
) -> anyhow::Result<Vec<(User, String)>> {
    let mut seeded = Vec::with_capacity(usernames.len());
    for username in usernames {
        let user = create(store, username).await?;
        let token = issue_token(user.id, &user.username, security)?;
        seeded.push((user, token));
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DatabaseError, MemoryStore};

    #[tokio::test]
    async fn creates_user_once() {
        let store = MemoryStore::new();
        let create = || UserCommands::Create { username: " ada ".to_string() };

        handle(create(), &store, OutputFormat::Json).await.unwrap();
        assert!(store.find_user_by_username("ada").await.unwrap().is_some());

        let err = handle(create(), &store, OutputFormat::Json).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DatabaseError>(), Some(DatabaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn rejects_blank_username() {
        let store = MemoryStore::new();
        let cmd = UserCommands::Create { username: "   ".to_string() };
        assert!(handle(cmd, &store, OutputFormat::Text).await.is_err());
    }

    #[tokio::test]
    async fn seeded_users_get_valid_tokens() {
        let store = MemoryStore::new();
        let security = crate::config::AppConfig::development().security;
        let names = vec!["ada".to_string(), "bob".to_string()];

        let seeded = seed_with_tokens(&store, &names, &security).await.unwrap();
        assert_eq!(seeded.len(), 2);
        for (user, token) in &seeded {
            let claims = crate::auth::validate_jwt(token, &security).unwrap();
            assert_eq!(claims.sub, user.id);
            assert!(store.get_user(user.id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn seeding_duplicate_names_fails() {
        let store = MemoryStore::new();
        let security = crate::config::AppConfig::development().security;
        let names = vec!["ada".to_string(), "ada".to_string()];
        assert!(seed_with_tokens(&store, &names, &security).await.is_err());
    }
}
