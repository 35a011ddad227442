use axum::{
    extract::{rejection::{FormRejection, PathRejection}, Form as FormBody, Path, State},
    Extension,
};

use crate::error::ApiError;
use crate::handlers::{bad_form, path_not_found};
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::types::TopicId;
use crate::workflow::{Outcome, TopicForm, TopicWorkflow};

fn workflow(state: &AppState) -> TopicWorkflow<'_> {
    TopicWorkflow::new(state.store.as_ref(), state.config.forms)
}

/// GET /topics - the current user's topics, oldest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Outcome, ApiError> {
    Ok(workflow(&state).topics_page(user.id).await?)
}

/// GET /topics/:topic_id - one topic with its entries, newest first
pub async fn show(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    topic_id: Result<Path<TopicId>, PathRejection>,
) -> Result<Outcome, ApiError> {
    let Path(topic_id) = topic_id.map_err(path_not_found)?;
    Ok(workflow(&state).topic_page(topic_id, user.id).await?)
}

/// GET /new_topic - blank topic form
pub async fn new_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Outcome, ApiError> {
    Ok(workflow(&state).create_topic(None, user.id).await?)
}

/// POST /new_topic - create a topic owned by the current user
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    body: Result<FormBody<TopicForm>, FormRejection>,
) -> Result<Outcome, ApiError> {
    let FormBody(input) = body.map_err(bad_form)?;
    Ok(workflow(&state).create_topic(Some(input), user.id).await?)
}
