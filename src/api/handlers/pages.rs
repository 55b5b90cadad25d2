//! Server-rendered pages: the public blog and its admin screens.
//!
//! Each handler runs a loader (or the action), then hands the result to
//! the views. Route errors become the not-found or generic error page.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::instrument;

use crate::api::actions::{self, ActionOutcome};
use crate::api::loaders;
use crate::api::{AppState, FieldErrors, NEW_POST_SLUG, PostForm};
use crate::db::{Database, Post};

#[instrument(skip(state))]
pub async fn home<D: Database>(State(state): State<AppState<D>>) -> Response {
    state.views().page(StatusCode::OK, "home", &json!({}))
}

#[instrument(skip(state))]
pub async fn posts_page<D: Database>(State(state): State<AppState<D>>) -> Response {
    match loaders::posts_index(state.db()).await {
        Ok(posts) => state.views().page(
            StatusCode::OK,
            "posts/index",
            &json!({ "page_title": "Posts", "posts": posts }),
        ),
        Err(e) => state.views().error_page(&e),
    }
}

#[instrument(skip(state))]
pub async fn post_page<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
) -> Response {
    match loaders::post_detail(state.db(), &slug).await {
        Ok(post) => state.views().page(
            StatusCode::OK,
            "posts/detail",
            &json!({ "page_title": post.title, "title": post.title, "html": post.html }),
        ),
        Err(e) => state.views().error_page(&e),
    }
}

#[instrument(skip(state))]
pub async fn admin_page<D: Database>(State(state): State<AppState<D>>) -> Response {
    match loaders::posts_index(state.db()).await {
        Ok(posts) => state.views().page(
            StatusCode::OK,
            "admin/index",
            &json!({
                "page_title": "Admin",
                "posts": posts,
                "admin_email": state.env().admin_email,
            }),
        ),
        Err(e) => state.views().error_page(&e),
    }
}

#[instrument(skip(state))]
pub async fn admin_post_page<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
) -> Response {
    match loaders::admin_post(state.db(), &slug).await {
        Ok(post) => {
            let values = match &post {
                Some(Post {
                    slug,
                    title,
                    markdown,
                    ..
                }) => json!({ "slug": slug, "title": title, "markdown": markdown }),
                None => json!({}),
            };
            render_form(&state, StatusCode::OK, &slug, values, &FieldErrors::default())
        }
        Err(e) => state.views().error_page(&e),
    }
}

#[instrument(skip(state))]
pub async fn admin_post_action<D: Database>(
    State(state): State<AppState<D>>,
    Path(slug): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    let submitted = form.clone();

    match actions::submit(state.db(), &slug, form).await {
        Ok(ActionOutcome::Redirect(to)) => Redirect::to(to).into_response(),
        Ok(ActionOutcome::Invalid(errors)) => {
            let values = json!({
                "slug": submitted.effective_slug(&slug),
                "title": submitted.title,
                "markdown": submitted.markdown,
            });
            render_form(
                &state,
                StatusCode::UNPROCESSABLE_ENTITY,
                &slug,
                values,
                &errors,
            )
        }
        Err(e) => state.views().error_page(&e),
    }
}

fn render_form<D: Database>(
    state: &AppState<D>,
    status: StatusCode,
    route_slug: &str,
    values: serde_json::Value,
    errors: &FieldErrors,
) -> Response {
    let is_new = route_slug == NEW_POST_SLUG;
    let page_title = if is_new { "New Post" } else { "Edit Post" };
    state.views().page(
        status,
        "admin/form",
        &json!({
            "page_title": page_title,
            "route_slug": route_slug,
            "is_new": is_new,
            "values": values,
            "errors": errors,
        }),
    )
}
