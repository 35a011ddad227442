use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use learning_log::auth::issue_token;
use learning_log::config::AppConfig;
use learning_log::database::{LearningLogStore, MemoryStore};
use learning_log::{app, AppState};

/// In-process application over a fresh in-memory store
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
    router: Router,
}

pub struct TestUser {
    pub id: uuid::Uuid,
    pub token: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = AppConfig::development();
        let router = app(AppState::new(store.clone(), config.clone()));
        Self { store, config, router }
    }

    pub async fn user(&self, username: &str) -> Result<TestUser> {
        let user = self.store.insert_user(username).await?;
        let token = issue_token(user.id, &user.username, &self.config.security)?;
        Ok(TestUser { id: user.id, token })
    }

    pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Result<TestResponse> {
        self.send(Method::GET, path, user, None).await
    }

    pub async fn post_form(&self, path: &str, user: Option<&TestUser>, form: &str) -> Result<TestResponse> {
        self.send(Method::POST, path, user, Some(form.to_string())).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        user: Option<&TestUser>,
        form: Option<String>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user.token));
        }
        let request = match form {
            Some(form) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(TestResponse { status, location, body })
    }

    /// Create a topic through the HTTP surface and return its id
    pub async fn create_topic(&self, user: &TestUser, text: &str) -> Result<i64> {
        let res = self.post_form("/new_topic", Some(user), &format!("text={}", text)).await?;
        anyhow::ensure!(res.status == StatusCode::SEE_OTHER, "topic creation failed: {}", res.status);

        let topics = self.store.list_topics_by_owner(user.id).await?;
        topics
            .iter()
            .rev()
            .find(|t| t.text == text.replace('+', " "))
            .map(|t| t.id)
            .context("created topic not found")
    }
}
