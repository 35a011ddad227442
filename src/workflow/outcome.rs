use serde::Serialize;
use serde_json::Value;

use crate::types::{EntryId, TopicId};
use crate::workflow::forms::FormState;

/// Named destinations a workflow can redirect to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Topics,
    Topic { topic_id: TopicId },
    NewTopic,
    NewEntry { topic_id: TopicId },
    EditEntry { entry_id: EntryId },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Index => "learning_logs:index",
            Route::Topics => "learning_logs:topics",
            Route::Topic { .. } => "learning_logs:topic",
            Route::NewTopic => "learning_logs:new_topic",
            Route::NewEntry { .. } => "learning_logs:new_entry",
            Route::EditEntry { .. } => "learning_logs:edit_entry",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Topics => "/topics".to_string(),
            Route::Topic { topic_id } => format!("/topics/{}", topic_id),
            Route::NewTopic => "/new_topic".to_string(),
            Route::NewEntry { topic_id } => format!("/new_entry/{}", topic_id),
            Route::EditEntry { entry_id } => format!("/edit_entry/{}", entry_id),
        }
    }
}

/// Template name plus the context it is rendered with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub template: &'static str,
    pub context: Value,
    /// Present when the page carries a form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<FormState>,
}

impl Page {
    pub fn new(template: &'static str, context: Value) -> Self {
        Self {
            template,
            context,
            state: None,
        }
    }

    pub fn with_form(template: &'static str, context: Value, state: FormState) -> Self {
        Self {
            template,
            context,
            state: Some(state),
        }
    }
}

/// What a workflow asks the HTTP layer to do next
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(Page),
    Redirect(Route),
}

impl Outcome {
    /// Form lifecycle state this outcome ends in, if a form was involved
    pub fn state(&self) -> Option<FormState> {
        match self {
            Outcome::Render(page) => page.state,
            Outcome::Redirect(_) => Some(FormState::Persisted),
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            Outcome::Render(page) => Some(page),
            Outcome::Redirect(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            Outcome::Render(_) => None,
            Outcome::Redirect(route) => Some(*route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_paths_match_router() {
        assert_eq!(Route::Index.path(), "/");
        assert_eq!(Route::Topics.path(), "/topics");
        assert_eq!(Route::Topic { topic_id: 3 }.path(), "/topics/3");
        assert_eq!(Route::NewEntry { topic_id: 3 }.path(), "/new_entry/3");
        assert_eq!(Route::EditEntry { entry_id: 9 }.path(), "/edit_entry/9");
    }

    #[test]
    fn route_names_are_namespaced() {
        assert_eq!(Route::Topic { topic_id: 1 }.name(), "learning_logs:topic");
        assert_eq!(Route::NewTopic.name(), "learning_logs:new_topic");
    }
}
