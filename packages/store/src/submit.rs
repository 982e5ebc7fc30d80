//! Form submission: validate locally, then hand the draft to the store.

use api::ApiError;
use board_core::{Job, JobForm, JobId, ValidationErrors};
use thiserror::Error;

use crate::JobsStore;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required fields are missing. Nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The store recorded the failure; the caller decides how to notify.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validate `form` and create a posting, or update `editing` when given.
///
/// Validation failures return before the store is touched.
pub async fn submit_form(
    store: &JobsStore,
    form: &JobForm,
    editing: Option<&JobId>,
) -> Result<Option<Job>, SubmitError> {
    let draft = form.to_draft()?;

    let saved = match editing {
        Some(id) => store.update(id, &draft).await?,
        None => store.create(&draft).await?,
    };
    Ok(saved)
}
