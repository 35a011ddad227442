use thiserror::Error;

use crate::database::DatabaseError;

/// Failures a workflow propagates to the HTTP boundary.
///
/// Form validation failures are not here: workflows recover from them by
/// re-rendering the form.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The resource is absent, or belongs to someone other than the principal
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
