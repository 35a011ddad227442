use anyhow::Context;
use serde_json::json;

use crate::auth::issue_token;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::SecurityConfig;
use crate::database::LearningLogStore;

pub async fn handle(
    username: &str,
    store: &dyn LearningLogStore,
    security: &SecurityConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let user = store
        .find_user_by_username(username)
        .await?
        .with_context(|| format!("no user named '{}'", username))?;

    let token = issue_token(user.id, &user.username, security)?;

    match output_format {
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
        OutputFormat::Json => output_success(
            output_format,
            "Token issued",
            Some(json!({
                "token": token,
                "user_id": user.id,
                "expires_in_hours": security.jwt_expiry_hours
            })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn unknown_user_has_no_token() {
        let store = MemoryStore::new();
        let security = AppConfig::development().security;
        let err = handle("ghost", &store, &security, OutputFormat::Text).await.unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn known_user_gets_token() {
        let store = MemoryStore::new();
        store.insert_user("ada").await.unwrap();
        let security = AppConfig::development().security;
        assert!(handle("ada", &store, &security, OutputFormat::Json).await.is_ok());
    }
}
