use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{TopicId, UserId};

/// Width of `topics.text`; form limits may tighten this but never exceed it
pub const TOPIC_TEXT_COLUMN_LEN: usize = 200;

/// A subject the user is learning about. The owner is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: TopicId,
    pub text: String,
    pub date_added: DateTime<Utc>,
    pub owner_id: UserId,
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validated topic data awaiting insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub text: String,
    pub owner_id: UserId,
}
