//! Request workflows for topics and entries.
//!
//! Every workflow takes the acting principal as an explicit argument and
//! checks topic ownership through [`guard::authorize`] before reading or
//! writing topic-scoped state. Workflows return an [`Outcome`]: a page to
//! render or a named route to redirect to.

pub mod entries;
pub mod error;
pub mod forms;
pub mod guard;
pub mod outcome;
pub mod topics;

pub use entries::EntryWorkflow;
pub use error::{WorkflowError, WorkflowResult};
pub use forms::{EntryForm, FieldErrors, Form, FormData, FormState, TopicForm};
pub use guard::authorize;
pub use outcome::{Outcome, Page, Route};
pub use topics::{TopicDetail, TopicWorkflow};

pub const INDEX_TEMPLATE: &str = "learning_logs/index.html";

/// The public home page
pub fn index() -> Outcome {
    Outcome::Render(Page::new(INDEX_TEMPLATE, serde_json::json!({})))
}
