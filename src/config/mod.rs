use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::database::models::TOPIC_TEXT_COLUMN_LEN;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub forms: FormsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FormsConfig {
    pub topic_text_max_len: usize,
    pub entry_text_max_len: Option<usize>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            topic_text_max_len: TOPIC_TEXT_COLUMN_LEN,
            entry_text_max_len: None,
        }
    }
}

impl FormsConfig {
    /// Topic text limit, capped at the column width so valid input always fits
    pub fn with_topic_text_max_len(mut self, len: usize) -> Self {
        if len > TOPIC_TEXT_COLUMN_LEN {
            tracing::warn!(
                "FORMS_TOPIC_TEXT_MAX_LEN={} exceeds column width, using {}",
                len,
                TOPIC_TEXT_COLUMN_LEN
            );
        }
        self.topic_text_max_len = len.min(TOPIC_TEXT_COLUMN_LEN);
        self
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("LEARNING_LOG_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Form overrides
        if let Ok(v) = env::var("FORMS_TOPIC_TEXT_MAX_LEN") {
            if let Ok(len) = v.parse() {
                self.forms = self.forms.with_topic_text_max_len(len);
            }
        }
        if let Ok(v) = env::var("FORMS_ENTRY_TEXT_MAX_LEN") {
            self.forms.entry_text_max_len = v.parse().ok();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 8000 },
            database: DatabaseConfig {
                max_connections: 5,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                // Only ever used locally; staging and production must set JWT_SECRET
                jwt_secret: "learning-log-development-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
            },
            forms: FormsConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 8000 },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_cors: true,
            },
            forms: FormsConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 8000 },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                enable_cors: false,
            },
            forms: FormsConfig::default(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.security.jwt_secret.is_empty());
        assert_eq!(config.forms.topic_text_max_len, 200);
        assert_eq!(config.forms.entry_text_max_len, None);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.security.jwt_expiry_hours, 4);
        assert!(!config.security.enable_cors);
    }

    #[test]
    fn topic_limit_is_capped_at_column_width() {
        let forms = FormsConfig::default().with_topic_text_max_len(300);
        assert_eq!(forms.topic_text_max_len, TOPIC_TEXT_COLUMN_LEN);
    }

    #[test]
    fn topic_limit_can_be_tightened() {
        let forms = FormsConfig::default().with_topic_text_max_len(80);
        assert_eq!(forms.topic_text_max_len, 80);
    }
}
