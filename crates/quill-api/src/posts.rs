use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use quill_types::api::{CreatePostRequest, MessageResponse};

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::state::{AppState, run_blocking};

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = run_blocking(move || state.content.get_all_posts()).await?;

    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    WithRejection(Json(req), _): WithRejection<Json<CreatePostRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let post = run_blocking(move || {
        state
            .content
            .create_post(&req.title, &req.content, caller.user_id)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let post = run_blocking(move || state.content.get_post_by_id(id)).await?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    run_blocking(move || state.content.delete_post(id, caller.user_id)).await?;

    Ok(Json(MessageResponse {
        message: "post deleted".into(),
    }))
}
