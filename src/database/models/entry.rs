use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{EntryId, TopicId};

const SUMMARY_CHARS: usize = 50;

/// Something the user learned about a topic. Its owner is the topic's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: EntryId,
    pub topic_id: TopicId,
    pub text: String,
    pub date_added: DateTime<Utc>,
}

impl Entry {
    /// First 50 characters of the text, with an ellipsis when truncated
    pub fn summary(&self) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(SUMMARY_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub topic_id: TopicId,
    pub text: String,
}
