use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Entry, NewEntry, NewTopic, Topic, User};
use crate::database::store::LearningLogStore;
use crate::types::{EntryId, TopicId, UserId};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    topics: BTreeMap<TopicId, Topic>,
    entries: BTreeMap<EntryId, Entry>,
    next_topic_id: TopicId,
    next_entry_id: EntryId,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Wall clock, nudged forward so every row gets a distinct `date_added`
    fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

/// In-process store with the same ordering contract as `PgStore`
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn topic_count(&self) -> usize {
        self.tables.read().await.topics.len()
    }

    pub async fn entry_count(&self) -> usize {
        self.tables.read().await.entries.len()
    }
}

#[async_trait]
impl LearningLogStore for MemoryStore {
    async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, DatabaseError> {
        Ok(self.tables.read().await.topics.get(&id).cloned())
    }

    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, DatabaseError> {
        Ok(self.tables.read().await.entries.get(&id).cloned())
    }

    async fn list_topics_by_owner(&self, owner: UserId) -> Result<Vec<Topic>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut topics: Vec<Topic> = tables
            .topics
            .values()
            .filter(|t| t.owner_id == owner)
            .cloned()
            .collect();
        topics.sort_by(|a, b| (a.date_added, a.id).cmp(&(b.date_added, b.id)));
        Ok(topics)
    }

    async fn list_entries_by_topic(&self, topic: TopicId) -> Result<Vec<Entry>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut entries: Vec<Entry> = tables
            .entries
            .values()
            .filter(|e| e.topic_id == topic)
            .cloned()
            .collect();
        entries.sort_by(|a, b| (b.date_added, b.id).cmp(&(a.date_added, a.id)));
        Ok(entries)
    }

    async fn insert_topic(&self, topic: NewTopic) -> Result<Topic, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&topic.owner_id) {
            return Err(DatabaseError::QueryError(format!(
                "topic owner {} does not exist",
                topic.owner_id
            )));
        }

        tables.next_topic_id += 1;
        let created = Topic {
            id: tables.next_topic_id,
            text: topic.text,
            date_added: tables.now(),
            owner_id: topic.owner_id,
        };
        tables.topics.insert(created.id, created.clone());
        Ok(created)
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.topics.contains_key(&entry.topic_id) {
            return Err(DatabaseError::QueryError(format!(
                "entry topic {} does not exist",
                entry.topic_id
            )));
        }

        tables.next_entry_id += 1;
        let created = Entry {
            id: tables.next_entry_id,
            topic_id: entry.topic_id,
            text: entry.text,
            date_added: tables.now(),
        };
        tables.entries.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_entry(&self, entry: &Entry) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.entries.get_mut(&entry.id) {
            Some(stored) => {
                stored.text = entry.text.clone();
                Ok(())
            }
            None => Err(DatabaseError::QueryError(format!(
                "entry {} vanished during update",
                entry.id
            ))),
        }
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, username: &str) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(DatabaseError::Conflict(format!("username '{}' is taken", username)));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            date_joined: tables.now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
