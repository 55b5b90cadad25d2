//! Parsing and validation of admin form submissions.
//!
//! A submission carries `title`, `slug`, `markdown` and an `intent`. The
//! intent becomes a tagged [`Intent`] at this boundary; the fields are
//! checked for presence and collected into a [`FieldErrors`] map.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::PostInput;

/// Route slug that stands for "no post yet".
pub const NEW_POST_SLUG: &str = "new";

/// What a submission asks the action to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Create => write!(f, "create"),
            Intent::Update => write!(f, "update"),
            Intent::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Intent::Create),
            "update" => Ok(Intent::Update),
            "delete" => Ok(Intent::Delete),
            _ => Err(format!("invalid intent: '{}'", s)),
        }
    }
}

/// Raw form payload, exactly as submitted.
///
/// Every field is optional: browsers omit disabled inputs, and a delete
/// only needs the slug.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PostForm {
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[schema(example = "hello")]
    pub slug: Option<String>,
    #[schema(example = "# Hi")]
    pub markdown: Option<String>,
    #[schema(example = "create")]
    pub intent: Option<String>,
}

/// Per-field validation messages. An empty string means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldErrors {
    #[schema(example = "Title is required")]
    pub title: String,
    #[schema(example = "")]
    pub slug: String,
    #[schema(example = "")]
    pub markdown: String,
}

impl FieldErrors {
    pub fn has_errors(&self) -> bool {
        !(self.title.is_empty() && self.slug.is_empty() && self.markdown.is_empty())
    }
}

/// A validated submission, ready to be applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(PostInput),
    Update(PostInput),
    Delete { slug: String },
}

impl Submission {
    pub fn intent(&self) -> Intent {
        match self {
            Submission::Create(_) => Intent::Create,
            Submission::Update(_) => Intent::Update,
            Submission::Delete { .. } => Intent::Delete,
        }
    }
}

/// Why a form could not become a [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Recoverable: shown inline next to the fields.
    Invalid(FieldErrors),
    /// Not recoverable by the user: the intent is missing or unknown.
    Intent(String),
}

fn required(value: &Option<String>, message: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => String::new(),
        _ => message.to_string(),
    }
}

/// Slugs end up as a single path segment in links and form actions.
fn is_url_safe(slug: &str) -> bool {
    slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

fn new_slug(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() && !is_url_safe(v) => {
            "Slug may only contain letters, digits, '-' and '_'".to_string()
        }
        _ => required(value, "Slug is required"),
    }
}

impl PostForm {
    /// Resolve the intent of this form submitted to `route_slug`.
    ///
    /// A form without an intent posted to the `new` route is a create.
    pub fn intent(&self, route_slug: &str) -> Result<Intent, SubmissionError> {
        match self.intent.as_deref() {
            Some(value) => value.parse().map_err(SubmissionError::Intent),
            None if route_slug == NEW_POST_SLUG => Ok(Intent::Create),
            None => Err(SubmissionError::Intent("intent is required".to_string())),
        }
    }

    /// The slug this form refers to: the submitted one, or the route's
    /// slug when the input was not sent (disabled for existing posts).
    pub fn effective_slug(&self, route_slug: &str) -> Option<String> {
        self.slug.clone().or_else(|| {
            (route_slug != NEW_POST_SLUG && !route_slug.is_empty()).then(|| route_slug.to_string())
        })
    }

    fn all_fields(&self, slug_error: String) -> FieldErrors {
        FieldErrors {
            title: required(&self.title, "Title is required"),
            slug: slug_error,
            markdown: required(&self.markdown, "Markdown is required"),
        }
    }

    /// Validate the form and turn it into a [`Submission`].
    ///
    /// Field errors win over a missing or unknown intent: such a form is
    /// checked as a full post, and the intent error is only returned once
    /// every field is filled in.
    pub fn into_submission(self, route_slug: &str) -> Result<Submission, SubmissionError> {
        let slug = self.effective_slug(route_slug);

        let intent = match self.intent(route_slug) {
            Ok(intent) => intent,
            Err(e) => {
                let errors = self.all_fields(required(&slug, "Slug is required"));
                return Err(if errors.has_errors() {
                    SubmissionError::Invalid(errors)
                } else {
                    e
                });
            }
        };

        let errors = match intent {
            Intent::Create => self.all_fields(new_slug(&slug)),
            Intent::Update => self.all_fields(required(&slug, "Slug is required")),
            Intent::Delete => FieldErrors {
                slug: required(&slug, "Slug is required"),
                ..FieldErrors::default()
            },
        };

        if errors.has_errors() {
            return Err(SubmissionError::Invalid(errors));
        }

        let slug = slug.unwrap_or_default();
        let input = PostInput::new(
            slug.clone(),
            self.title.unwrap_or_default(),
            self.markdown.unwrap_or_default(),
        );

        Ok(match intent {
            Intent::Create => Submission::Create(input),
            Intent::Update => Submission::Update(input),
            Intent::Delete => Submission::Delete { slug },
        })
    }
}
