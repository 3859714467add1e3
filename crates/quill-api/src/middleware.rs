use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use crate::error::ApiError;

/// Header carrying the caller's user id. It is taken at face value; there is
/// no session or token behind it.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
}

/// Reject requests without a usable `X-User-ID` and expose the caller to
/// handlers as an `Extension<Caller>`.
pub async fn require_caller(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .map(|v| v.to_str().map(str::trim))
        .ok_or(ApiError::Unauthenticated)?;

    let user_id = match raw {
        Ok("") => return Err(ApiError::Unauthenticated),
        Ok(value) => value.parse::<i64>().ok(),
        Err(_) => None,
    }
    .ok_or_else(|| {
        warn!("Rejected malformed {} header", USER_ID_HEADER);
        ApiError::BadRequest("invalid user id".into())
    })?;

    req.extensions_mut().insert(Caller { user_id });
    Ok(next.run(req).await)
}
