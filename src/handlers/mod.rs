// handlers/mod.rs - HTTP adapters over the workflows
//
// Public:    GET /, GET /health
// Protected: /topics, /topics/:topic_id, /new_topic, /new_entry/:topic_id,
//            /edit_entry/:entry_id (bearer token required)
//
// Handlers only extract path, body and principal, then hand off to a
// workflow. They never read or compare ownership themselves.

pub mod entries;
pub mod home;
pub mod topics;

use axum::extract::rejection::{FormRejection, PathRejection};

use crate::error::ApiError;

/// Non-numeric ids behave like unknown ids
pub(crate) fn path_not_found(rejection: PathRejection) -> ApiError {
    tracing::debug!("Unusable path parameter: {}", rejection);
    ApiError::not_found("Not found")
}

pub(crate) fn bad_form(rejection: FormRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}
