pub mod manager;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use models::{Entry, NewEntry, NewTopic, Topic, User};
pub use store::{LearningLogStore, PgStore};
