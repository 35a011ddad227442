use axum::{
    extract::{rejection::{FormRejection, PathRejection}, Form as FormBody, Path, State},
    Extension,
};

use crate::error::ApiError;
use crate::handlers::{bad_form, path_not_found};
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::types::{EntryId, TopicId};
use crate::workflow::{EntryForm, EntryWorkflow, Outcome};

fn workflow(state: &AppState) -> EntryWorkflow<'_> {
    EntryWorkflow::new(state.store.as_ref(), state.config.forms)
}

/// GET /new_entry/:topic_id - blank entry form for an owned topic
pub async fn new_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    topic_id: Result<Path<TopicId>, PathRejection>,
) -> Result<Outcome, ApiError> {
    let Path(topic_id) = topic_id.map_err(path_not_found)?;
    Ok(workflow(&state).create_entry(topic_id, None, user.id).await?)
}

/// POST /new_entry/:topic_id
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    topic_id: Result<Path<TopicId>, PathRejection>,
    body: Result<FormBody<EntryForm>, FormRejection>,
) -> Result<Outcome, ApiError> {
    let Path(topic_id) = topic_id.map_err(path_not_found)?;
    let FormBody(input) = body.map_err(bad_form)?;
    Ok(workflow(&state).create_entry(topic_id, Some(input), user.id).await?)
}

/// GET /edit_entry/:entry_id - form pre-filled with the entry's text
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    entry_id: Result<Path<EntryId>, PathRejection>,
) -> Result<Outcome, ApiError> {
    let Path(entry_id) = entry_id.map_err(path_not_found)?;
    Ok(workflow(&state).edit_entry(entry_id, None, user.id).await?)
}

/// POST /edit_entry/:entry_id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    entry_id: Result<Path<EntryId>, PathRejection>,
    body: Result<FormBody<EntryForm>, FormRejection>,
) -> Result<Outcome, ApiError> {
    let Path(entry_id) = entry_id.map_err(path_not_found)?;
    let FormBody(input) = body.map_err(bad_form)?;
    Ok(workflow(&state).edit_entry(entry_id, Some(input), user.id).await?)
}
