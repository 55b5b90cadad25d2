//! Post loaders and the post action as a JSON API.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::ErrorResponse;
use crate::api::actions::{self, ActionOutcome};
use crate::api::loaders::{self, PostDetail};
use crate::api::{AppState, FieldErrors, PostForm, RouteError};
use crate::db::{Database, Post, PostListItem};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct PostSummary {
    #[schema(example = "hello")]
    pub slug: String,
    #[schema(example = "Hello")]
    pub title: String,
}

impl From<PostListItem> for PostSummary {
    fn from(p: PostListItem) -> Self {
        Self {
            slug: p.slug,
            title: p.title,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PostsIndexResponse {
    pub posts: Vec<PostSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct PostDetailResponse {
    #[schema(example = "Hello")]
    pub title: String,
    /// Markdown body rendered to HTML
    #[schema(example = "<h1>Hi</h1>\n")]
    pub html: String,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(p: PostDetail) -> Self {
        Self {
            title: p.title,
            html: p.html,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PostResponse {
    #[schema(example = "hello")]
    pub slug: String,
    #[schema(example = "Hello")]
    pub title: String,
    #[schema(example = "# Hi")]
    pub markdown: String,
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            slug: p.slug,
            title: p.title,
            markdown: p.markdown,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AdminPostResponse {
    /// `null` on the `new` route
    pub post: Option<PostResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Post listing (slug and title only)", body = PostsIndexResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_posts<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<PostsIndexResponse>, RouteError> {
    let posts = loaders::posts_index(state.db()).await?;

    Ok(Json(PostsIndexResponse {
        posts: posts.into_iter().map(PostSummary::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    tag = "posts",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post found", body = PostDetailResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetailResponse>, RouteError> {
    let post = loaders::post_detail(state.db(), &slug).await?;
    Ok(Json(PostDetailResponse::from(post)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/{slug}",
    tag = "admin",
    params(("slug" = String, Path, description = "Post slug, or `new` for an empty form")),
    responses(
        (status = 200, description = "Post to edit, or null for a new post", body = AdminPostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_admin_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
) -> Result<Json<AdminPostResponse>, RouteError> {
    let post = loaders::admin_post(state.db(), &slug).await?;
    Ok(Json(AdminPostResponse {
        post: post.map(PostResponse::from),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/posts/{slug}",
    tag = "admin",
    params(("slug" = String, Path, description = "Post slug, or `new`")),
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Mutation applied; redirect to the admin listing"),
        (status = 400, description = "Missing or unknown intent", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse),
        (status = 422, description = "Field validation failed; nothing written", body = FieldErrors),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn submit_post<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Response, RouteError> {
    let outcome = actions::submit(state.db(), &slug, form).await?;

    Ok(match outcome {
        ActionOutcome::Redirect(to) => Redirect::to(to).into_response(),
        ActionOutcome::Invalid(errors) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
        }
    })
}
