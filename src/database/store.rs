use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Entry, NewEntry, NewTopic, Topic, User};
use crate::types::{EntryId, TopicId, UserId};

/// Data-access contract consumed by the workflows.
///
/// Ordering is part of the contract: owner topic listings are oldest first,
/// topic entry listings are newest first. Ties on `date_added` fall back to id
/// in the same direction so listings are stable.
#[async_trait]
pub trait LearningLogStore: Send + Sync {
    async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, DatabaseError>;

    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, DatabaseError>;

    async fn list_topics_by_owner(&self, owner: UserId) -> Result<Vec<Topic>, DatabaseError>;

    async fn list_entries_by_topic(&self, topic: TopicId) -> Result<Vec<Entry>, DatabaseError>;

    async fn insert_topic(&self, topic: NewTopic) -> Result<Topic, DatabaseError>;

    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry, DatabaseError>;

    /// Persists the entry's text. Id, topic and timestamp are never rewritten.
    async fn update_entry(&self, entry: &Entry) -> Result<(), DatabaseError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn insert_user(&self, username: &str) -> Result<User, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_unique_violation(err: sqlx::Error, what: String) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Conflict(what),
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait]
impl LearningLogStore for PgStore {
    async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, DatabaseError> {
        let topic = sqlx::query_as::<_, Topic>(
            "SELECT id, text, date_added, owner_id FROM topics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(topic)
    }

    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, DatabaseError> {
        let entry = sqlx::query_as::<_, Entry>(
            "SELECT id, topic_id, text, date_added FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn list_topics_by_owner(&self, owner: UserId) -> Result<Vec<Topic>, DatabaseError> {
        let topics = sqlx::query_as::<_, Topic>(
            "SELECT id, text, date_added, owner_id FROM topics \
             WHERE owner_id = $1 ORDER BY date_added ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(topics)
    }

    async fn list_entries_by_topic(&self, topic: TopicId) -> Result<Vec<Entry>, DatabaseError> {
        let entries = sqlx::query_as::<_, Entry>(
            "SELECT id, topic_id, text, date_added FROM entries \
             WHERE topic_id = $1 ORDER BY date_added DESC, id DESC",
        )
        .bind(topic)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn insert_topic(&self, topic: NewTopic) -> Result<Topic, DatabaseError> {
        let created = sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (text, owner_id) VALUES ($1, $2) \
             RETURNING id, text, date_added, owner_id",
        )
        .bind(&topic.text)
        .bind(topic.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry, DatabaseError> {
        let created = sqlx::query_as::<_, Entry>(
            "INSERT INTO entries (topic_id, text) VALUES ($1, $2) \
             RETURNING id, topic_id, text, date_added",
        )
        .bind(entry.topic_id)
        .bind(&entry.text)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_entry(&self, entry: &Entry) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE entries SET text = $1 WHERE id = $2")
            .bind(&entry.text)
            .bind(entry.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() != 1 {
            return Err(DatabaseError::QueryError(format!(
                "entry {} vanished during update",
                entry.id
            )));
        }
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, date_joined FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, date_joined FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, username: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username) VALUES ($1, $2) \
             RETURNING id, username, date_joined",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, format!("username '{}' is taken", username)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
