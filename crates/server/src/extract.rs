use axum::extract::FromRequest;
use uuid::Uuid;

use crate::errors::ApiError;

/// `axum::Json` whose rejections render as the standard error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path ids that do not parse can never match a record.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(not_found.to_string()))
}
