use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use quill_types::api::{LoginRequest, RegisterRequest};

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let user = run_blocking(move || {
        state
            .identity
            .register(&req.email, &req.password, &req.username)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let user = run_blocking(move || state.identity.login(&req.email, &req.password)).await?;

    Ok(Json(user))
}
