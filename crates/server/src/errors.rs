use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{error, warn};

use common::types::Envelope;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

static EXPOSE_DETAILS: OnceCell<bool> = OnceCell::new();

/// Echo internal error details in 500 responses. Set once at startup from
/// the run mode; later calls are ignored.
pub fn expose_internal_details(enabled: bool) {
    let _ = EXPOSE_DETAILS.set(enabled);
}

fn details_exposed() -> bool {
    EXPOSE_DETAILS.get().copied().unwrap_or(false)
}

/// Boundary error for every HTTP handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                let mut body = serde_json::json!(Envelope::<()>::failure("Server error"));
                if details_exposed() {
                    body["detail"] = serde_json::Value::String(detail);
                }
                body
            }
            other => {
                warn!(status = status.as_u16(), message = %other, "request rejected");
                serde_json::json!(Envelope::<()>::failure(other.to_string()))
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ApiError::Validation(m),
            AuthError::Conflict => ApiError::Conflict(e.to_string()),
            AuthError::NotFound => ApiError::NotFound(e.to_string()),
            AuthError::Unauthorized | AuthError::InvalidToken => ApiError::Unauthorized(e.to_string()),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                ApiError::Internal(format!("[{}] {e}", e.code()))
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => ApiError::Validation(m),
            // Ownership failures answer 401, which existing clients rely on.
            ServiceError::Forbidden(m) => ApiError::Unauthorized(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Conflict(m) => ApiError::Conflict(m),
            ServiceError::Db(m) => ApiError::Internal(m),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::Validation(r.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from(ServiceError::Forbidden("x".into())).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(ServiceError::Conflict("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ServiceError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(AuthError::Conflict).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(AuthError::Unauthorized).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::Repository("down".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_message_is_preserved() {
        let e = ApiError::from(AuthError::Conflict);
        assert_eq!(e.to_string(), "User already exists with this email, ID, or driver's license");
    }

    #[tokio::test]
    async fn internal_detail_hidden_without_explicit_mode() {
        let mut cfg = configs::AppConfig::default();
        cfg.apply_env(|_| None).unwrap();
        expose_internal_details(cfg.server.mode.is_development());

        let resp = ApiError::from(ServiceError::Db("relation \"fine\" does not exist".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Server error");
        assert!(body.get("detail").is_none(), "{body}");
    }
}
