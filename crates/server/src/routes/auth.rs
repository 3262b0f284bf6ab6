use axum::{extract::State, http::StatusCode, Extension, Json};

use common::types::Envelope;
use service::auth::domain::{Identity, LoginInput, RegisterInput, UserProfile};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered; returns token and profile"), (status = 400, description = "Validation error or duplicate user")))]
pub async fn register(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<Envelope<UserProfile>>), ApiError> {
    let session = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(session.user).with_token(session.token))))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in; returns token"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<Json<Envelope<UserProfile>>, ApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(Envelope::data(session.user).with_token(session.token)))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", security(("bearer" = [])),
    responses((status = 200, description = "Current user profile"), (status = 401, description = "Not authorized")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<UserProfile>>, ApiError> {
    let user = state.auth.current_user(identity.user_id).await?;
    Ok(Json(Envelope::data(user)))
}
