use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Bearer-token guard for protected routes. On success the caller's
/// `Identity` is attached to the request extensions.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(token) = token else {
        warn!(path = %req.uri().path(), "missing bearer token");
        return Err(ApiError::Unauthorized("Not authorized, no token".into()));
    };

    let identity = state.auth.authenticate(&token).map_err(|e| {
        warn!(path = %req.uri().path(), "token validation failed");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
