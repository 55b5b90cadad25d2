//! Write-path handler shared by the HTML form and the JSON API.

use tracing::{debug, info};

use super::{ADMIN_PATH, FieldErrors, PostForm, RouteError, Submission, SubmissionError};
use crate::db::{Database, PostRepository};

/// Result of a processed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The mutation was applied; send the client here.
    Redirect(&'static str),
    /// Validation failed; nothing was written.
    Invalid(FieldErrors),
}

/// Validate `form` posted to `route_slug` and apply it.
///
/// Makes exactly one store call when the form is valid and none otherwise.
pub async fn submit<D: Database>(
    db: &D,
    route_slug: &str,
    form: PostForm,
) -> Result<ActionOutcome, RouteError> {
    let submission = match form.into_submission(route_slug) {
        Ok(submission) => submission,
        Err(SubmissionError::Invalid(errors)) => {
            debug!(?errors, "submission failed validation");
            return Ok(ActionOutcome::Invalid(errors));
        }
        Err(SubmissionError::Intent(message)) => {
            return Err(RouteError::BadRequest { message });
        }
    };

    let posts = db.posts();
    match submission {
        Submission::Create(input) => {
            let created = posts.create(&input).await?;
            info!(slug = %created.slug, "created post");
        }
        Submission::Update(input) => {
            let updated = posts.update(&input).await?;
            info!(slug = %updated.slug, "updated post");
        }
        Submission::Delete { slug } => {
            posts.delete(&slug).await?;
            info!(slug = %slug, "deleted post");
        }
    }

    Ok(ActionOutcome::Redirect(ADMIN_PATH))
}
