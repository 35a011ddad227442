/// Shared identifier types used across the codebase

use uuid::Uuid;

/// Principal identity supplied by the authentication layer
pub type UserId = Uuid;

/// Primary key of a topic row (BIGSERIAL)
pub type TopicId = i64;

/// Primary key of an entry row (BIGSERIAL)
pub type EntryId = i64;
