//! Bearer-token guard for mutating requests.
//!
//! When `server.api_token` is configured, every request with a method other
//! than GET, HEAD or OPTIONS must carry `Authorization: Bearer <token>`.
//! Without a configured token the API is open.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::Response,
};

use crate::api::error::ApiError;
use crate::api::state::AppState;

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.server.api_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    if is_read_only(request.method()) || bearer_token(&request) == Some(expected) {
        return Ok(next.run(request).await);
    }

    tracing::warn!("Rejected {} {} without a valid token", request.method(), request.uri().path());
    Err(ApiError::Unauthorized)
}
