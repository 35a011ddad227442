pub mod entry;
pub mod topic;
pub mod user;

pub use entry::{Entry, NewEntry};
pub use topic::{NewTopic, Topic, TOPIC_TEXT_COLUMN_LEN};
pub use user::User;
