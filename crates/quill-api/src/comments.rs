use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use quill_types::api::{CreateCommentRequest, MessageResponse};

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::state::{AppState, run_blocking};

pub async fn list_comments(
    State(state): State<AppState>,
    WithRejection(Path(post_id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = run_blocking(move || state.content.get_comments_by_post_id(post_id)).await?;

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    WithRejection(Path(post_id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(req), _): WithRejection<Json<CreateCommentRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = run_blocking(move || {
        state
            .content
            .create_comment(post_id, &req.content, caller.user_id)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    WithRejection(Path((post_id, comment_id)), _): WithRejection<Path<(i64, i64)>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    run_blocking(move || {
        state
            .content
            .delete_comment(post_id, comment_id, caller.user_id)
    })
    .await?;

    Ok(Json(MessageResponse {
        message: "comment deleted".into(),
    }))
}
