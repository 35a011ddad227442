use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::FormsConfig;
use crate::database::{Entry, LearningLogStore, NewTopic, Topic};
use crate::types::{TopicId, UserId};
use crate::workflow::error::WorkflowResult;
use crate::workflow::forms::{Form, TopicForm};
use crate::workflow::guard::{authorize, not_found_topic};
use crate::workflow::outcome::{Outcome, Page, Route};

pub const TOPICS_TEMPLATE: &str = "learning_logs/topics.html";
pub const TOPIC_TEMPLATE: &str = "learning_logs/topic.html";
pub const NEW_TOPIC_TEMPLATE: &str = "learning_logs/new_topic.html";

/// A topic together with its entries, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicDetail {
    pub topic: Topic,
    pub entries: Vec<Entry>,
}

/// Topic listing, detail and creation for one principal
pub struct TopicWorkflow<'a> {
    store: &'a dyn LearningLogStore,
    forms: FormsConfig,
}

impl<'a> TopicWorkflow<'a> {
    pub fn new(store: &'a dyn LearningLogStore, forms: FormsConfig) -> Self {
        Self { store, forms }
    }

    /// Topics owned by `principal`, oldest first
    pub async fn list_topics(&self, principal: UserId) -> WorkflowResult<Vec<Topic>> {
        Ok(self.store.list_topics_by_owner(principal).await?)
    }

    pub async fn topics_page(&self, principal: UserId) -> WorkflowResult<Outcome> {
        let topics = self.list_topics(principal).await?;
        Ok(Outcome::Render(Page::new(
            TOPICS_TEMPLATE,
            json!({ "topics": topics }),
        )))
    }

    pub async fn view_topic(&self, topic_id: TopicId, principal: UserId) -> WorkflowResult<TopicDetail> {
        let topic = self
            .store
            .get_topic(topic_id)
            .await?
            .ok_or_else(|| not_found_topic(topic_id))?;
        authorize(&topic, principal)?;

        let entries = self.store.list_entries_by_topic(topic.id).await?;
        Ok(TopicDetail { topic, entries })
    }

    pub async fn topic_page(&self, topic_id: TopicId, principal: UserId) -> WorkflowResult<Outcome> {
        let TopicDetail { topic, entries } = self.view_topic(topic_id, principal).await?;

        // Listing shows the truncated text next to the full one
        let entries: Vec<Value> = entries
            .iter()
            .map(|entry| {
                let mut value = json!(entry);
                value["summary"] = json!(entry.summary());
                value
            })
            .collect();

        Ok(Outcome::Render(Page::new(
            TOPIC_TEMPLATE,
            json!({ "topic": topic, "entries": entries }),
        )))
    }

    /// `None` input means a plain GET and yields a blank form
    pub async fn create_topic(
        &self,
        input: Option<TopicForm>,
        principal: UserId,
    ) -> WorkflowResult<Outcome> {
        let form = match input {
            None => Form::<TopicForm>::blank(),
            Some(data) => {
                let mut form = Form::submitted(data);
                if let Ok(text) = form.validate(&self.forms) {
                    let topic = self
                        .store
                        .insert_topic(NewTopic { text, owner_id: principal })
                        .await?;
                    debug!(topic_id = topic.id, %principal, "topic created");
                    return Ok(Outcome::Redirect(Route::Topics));
                }
                form
            }
        };

        Ok(Outcome::Render(Page::with_form(
            NEW_TOPIC_TEMPLATE,
            json!({ "form": &form }),
            form.state(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryStore, NewEntry};
    use crate::workflow::error::WorkflowError;
    use crate::workflow::forms::FormState;

    async fn store_with_users() -> (MemoryStore, UserId, UserId) {
        let store = MemoryStore::new();
        let ada = store.insert_user("ada").await.unwrap().id;
        let bob = store.insert_user("bob").await.unwrap().id;
        (store, ada, bob)
    }

    fn topic_input(text: &str) -> Option<TopicForm> {
        Some(TopicForm { text: text.to_string() })
    }

    #[tokio::test]
    async fn create_topic_binds_owner_and_redirects_to_listing() {
        let (store, ada, _) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());

        let outcome = workflow.create_topic(topic_input("Chess"), ada).await.unwrap();
        assert_eq!(outcome, Outcome::Redirect(Route::Topics));

        let topics = workflow.list_topics(ada).await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].text, "Chess");
        assert_eq!(topics[0].owner_id, ada);
    }

    #[tokio::test]
    async fn create_topic_without_submission_renders_blank_form() {
        let (store, ada, _) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());

        let outcome = workflow.create_topic(None, ada).await.unwrap();
        let page = outcome.page().unwrap();
        assert_eq!(page.template, NEW_TOPIC_TEMPLATE);
        assert_eq!(page.state, Some(FormState::FormDisplayed));
        assert_eq!(page.context["form"]["data"]["text"], "");
        assert_eq!(store.topic_count().await, 0);
    }

    #[tokio::test]
    async fn invalid_topic_is_rejected_without_writing() {
        let (store, ada, _) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());

        let outcome = workflow.create_topic(topic_input(""), ada).await.unwrap();
        assert_eq!(outcome.state(), Some(FormState::Rejected));
        let page = outcome.page().unwrap();
        assert_eq!(page.context["form"]["errors"]["text"][0], "This field is required.");

        let too_long = "x".repeat(201);
        let outcome = workflow.create_topic(Some(TopicForm { text: too_long }), ada).await.unwrap();
        assert_eq!(outcome.state(), Some(FormState::Rejected));

        assert_eq!(store.topic_count().await, 0);
    }

    #[tokio::test]
    async fn listing_is_scoped_and_oldest_first() {
        let (store, ada, bob) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());

        workflow.create_topic(topic_input("Chess"), ada).await.unwrap();
        workflow.create_topic(topic_input("Go"), bob).await.unwrap();
        workflow.create_topic(topic_input("Rock Climbing"), ada).await.unwrap();

        let topics = workflow.list_topics(ada).await.unwrap();
        assert!(topics.iter().all(|t| t.owner_id == ada));
        let texts: Vec<&str> = topics.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Chess", "Rock Climbing"]);

        let page = workflow.topics_page(bob).await.unwrap();
        let page = page.page().unwrap();
        assert_eq!(page.template, TOPICS_TEMPLATE);
        assert_eq!(page.context["topics"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn view_topic_hides_other_users_topics() {
        let (store, ada, bob) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());
        workflow.create_topic(topic_input("Chess"), ada).await.unwrap();
        let chess = workflow.list_topics(ada).await.unwrap().remove(0);

        let err = workflow.view_topic(chess.id, bob).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));

        let detail = workflow.view_topic(chess.id, ada).await.unwrap();
        assert_eq!(detail.topic, chess);
        assert!(detail.entries.is_empty());
    }

    #[tokio::test]
    async fn view_missing_topic_is_not_found() {
        let (store, ada, _) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());

        let missing = workflow.view_topic(42, ada).await.unwrap_err();
        assert!(matches!(missing, WorkflowError::NotFound(_)));
    }

    #[tokio::test]
    async fn view_topic_returns_only_its_entries_newest_first() {
        let (store, ada, _) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());
        workflow.create_topic(topic_input("Chess"), ada).await.unwrap();
        workflow.create_topic(topic_input("Go"), ada).await.unwrap();
        let topics = workflow.list_topics(ada).await.unwrap();
        let (chess, go) = (&topics[0], &topics[1]);

        for (topic_id, text) in [(chess.id, "opening"), (go.id, "ko"), (chess.id, "endgame")] {
            store
                .insert_entry(NewEntry { topic_id, text: text.to_string() })
                .await
                .unwrap();
        }

        let detail = workflow.view_topic(chess.id, ada).await.unwrap();
        let texts: Vec<&str> = detail.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["endgame", "opening"]);
        assert!(detail.entries.iter().all(|e| e.topic_id == chess.id));

        let page = workflow.topic_page(chess.id, ada).await.unwrap();
        let page = page.page().unwrap();
        assert_eq!(page.template, TOPIC_TEMPLATE);
        assert_eq!(page.context["topic"]["text"], "Chess");
        assert_eq!(page.context["entries"][0]["text"], "endgame");
    }

    #[tokio::test]
    async fn topic_page_lists_entry_summaries() {
        let (store, ada, _) = store_with_users().await;
        let workflow = TopicWorkflow::new(&store, FormsConfig::default());
        workflow.create_topic(topic_input("Chess"), ada).await.unwrap();
        let chess = workflow.list_topics(ada).await.unwrap().remove(0);

        let long_text = "a".repeat(60);
        for text in ["short note", long_text.as_str()] {
            store
                .insert_entry(NewEntry { topic_id: chess.id, text: text.to_string() })
                .await
                .unwrap();
        }

        let page = workflow.topic_page(chess.id, ada).await.unwrap();
        let entries = &page.page().unwrap().context["entries"];
        assert_eq!(entries[0]["summary"], format!("{}...", "a".repeat(50)));
        assert_eq!(entries[0]["text"], long_text);
        assert_eq!(entries[1]["summary"], "short note");
    }
}
