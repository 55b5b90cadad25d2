//! Route configuration.

use axum::Router;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse};
use super::state::AppState;
use super::static_assets;
use super::v1::{
    self, AdminPostResponse, ErrorResponse, PostDetailResponse, PostResponse, PostSummary,
    PostsIndexResponse,
};
use super::{FieldErrors, Intent, PostForm};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, axum::routing::$method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "0.1.0",
        description = "Loader data and the post action of the blog, as JSON",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        v1::list_posts,
        v1::get_post,
        v1::get_admin_post,
        v1::submit_post,
    ),
    components(
        schemas(
            HealthResponse,
            PostSummary,
            PostsIndexResponse,
            PostDetailResponse,
            PostResponse,
            AdminPostResponse,
            PostForm,
            FieldErrors,
            Intent,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Process liveness"),
        (name = "posts", description = "Public post loaders"),
        (name = "admin", description = "Admin loader and the create/update/delete action")
    )
)]
pub struct ApiDoc;

/// Create the router: HTML pages, JSON API, assets and docs.
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/assets/{*path}", get(static_assets::serve_asset));

    // Static segments take precedence over `{slug}`, so /posts/admin is
    // never read as a post slug.
    let page_routes = routes!(D => {
        get "/" => handlers::home,
        get "/posts" => handlers::posts_page,
        get "/posts/{slug}" => handlers::post_page,
        get "/posts/admin" => handlers::admin_page,
        get "/posts/admin/{slug}" => handlers::admin_post_page,
        post "/posts/admin/{slug}" => handlers::admin_post_action,
    });

    let api_routes = routes!(D => {
        get "/api/v1/posts" => v1::list_posts,
        get "/api/v1/posts/{slug}" => v1::get_post,
        get "/api/v1/admin/posts/{slug}" => v1::get_admin_post,
        post "/api/v1/admin/posts/{slug}" => v1::submit_post,
    });

    system_routes
        .merge(page_routes)
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
