use axum::{
    Router,
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{USER_ID_HEADER, require_caller};
use crate::state::AppState;
use crate::{auth, comments, posts};

/// Full HTTP surface. Reads and auth are open; writes need an `X-User-ID`.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/posts", get(posts::list_posts))
        .route("/api/posts/{id}", get(posts::get_post))
        .route("/api/posts/{id}/comments", get(comments::list_comments))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/posts", post(posts::create_post))
        .route("/api/posts/{id}", delete(posts::delete_post))
        .route("/api/posts/{id}/comments", post(comments::create_comment))
        .route("/api/posts/{id}/comments/{comment_id}", delete(comments::delete_comment))
        .route_layer(middleware::from_fn(require_caller))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

/// Any origin may call the API; preflights are answered here and never reach
/// a handler.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, HeaderName::from_static(USER_ID_HEADER)])
}
