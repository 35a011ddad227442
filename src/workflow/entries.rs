use serde_json::json;
use tracing::debug;

use crate::config::FormsConfig;
use crate::database::{LearningLogStore, NewEntry, Topic};
use crate::types::{EntryId, TopicId, UserId};
use crate::workflow::error::{WorkflowError, WorkflowResult};
use crate::workflow::forms::{EntryForm, Form};
use crate::workflow::guard::{authorize, not_found_topic};
use crate::workflow::outcome::{Outcome, Page, Route};

pub const NEW_ENTRY_TEMPLATE: &str = "learning_logs/new_entry.html";
pub const EDIT_ENTRY_TEMPLATE: &str = "learning_logs/edit_entry.html";

/// Entry creation and editing, always scoped through the parent topic's owner
pub struct EntryWorkflow<'a> {
    store: &'a dyn LearningLogStore,
    forms: FormsConfig,
}

impl<'a> EntryWorkflow<'a> {
    pub fn new(store: &'a dyn LearningLogStore, forms: FormsConfig) -> Self {
        Self { store, forms }
    }

    async fn owned_topic(&self, topic_id: TopicId, principal: UserId) -> WorkflowResult<Topic> {
        let topic = self
            .store
            .get_topic(topic_id)
            .await?
            .ok_or_else(|| not_found_topic(topic_id))?;
        authorize(&topic, principal)?;
        Ok(topic)
    }

    pub async fn create_entry(
        &self,
        topic_id: TopicId,
        input: Option<EntryForm>,
        principal: UserId,
    ) -> WorkflowResult<Outcome> {
        let topic = self.owned_topic(topic_id, principal).await?;

        let form = match input {
            None => Form::<EntryForm>::blank(),
            Some(data) => {
                let mut form = Form::submitted(data);
                if let Ok(text) = form.validate(&self.forms) {
                    let entry = self
                        .store
                        .insert_entry(NewEntry { topic_id: topic.id, text })
                        .await?;
                    debug!(entry_id = entry.id, topic_id = topic.id, "entry created");
                    return Ok(Outcome::Redirect(Route::Topic { topic_id: topic.id }));
                }
                form
            }
        };

        Ok(Outcome::Render(Page::with_form(
            NEW_ENTRY_TEMPLATE,
            json!({ "topic": topic, "form": &form }),
            form.state(),
        )))
    }

    pub async fn edit_entry(
        &self,
        entry_id: EntryId,
        input: Option<EntryForm>,
        principal: UserId,
    ) -> WorkflowResult<Outcome> {
        let mut entry = self
            .store
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("entry {}", entry_id)))?;
        let topic = self.owned_topic(entry.topic_id, principal).await?;

        let form = match input {
            None => Form::bind(EntryForm { text: entry.text.clone() }),
            Some(data) => {
                let mut form = Form::submitted(data);
                if let Ok(text) = form.validate(&self.forms) {
                    entry.text = text;
                    self.store.update_entry(&entry).await?;
                    debug!(entry_id = entry.id, topic_id = topic.id, "entry updated");
                    return Ok(Outcome::Redirect(Route::Topic { topic_id: topic.id }));
                }
                form
            }
        };

        Ok(Outcome::Render(Page::with_form(
            EDIT_ENTRY_TEMPLATE,
            json!({ "entry": entry, "topic": topic, "form": &form }),
            form.state(),
        )))
    }
}
