use axum::{extract::{Path, State}, Extension, Json};
use serde_json::Value;

use common::types::Envelope;
use models::fine;
use service::auth::domain::Identity;
use service::fine::FineView;

use crate::errors::ApiError;
use crate::extract::{parse_id, ApiJson};
use crate::state::ServerState;

const NOT_FOUND: &str = "Fine not found";

/// `status` from a dispute body. Non-string values are kept as their JSON
/// text so the service rejects them like any other status but "Disputed".
fn requested_status(body: Option<Value>) -> Option<String> {
    match body?.get("status")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[utoipa::path(get, path = "/api/fines", tag = "fines", security(("bearer" = [])),
    responses((status = 200, description = "All fines, newest first")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<Vec<FineView>>>, ApiError> {
    let fines = state.fines.list_user_fines(identity.user_id).await?;
    Ok(Json(Envelope::list(fines)))
}

#[utoipa::path(get, path = "/api/fines/outstanding", tag = "fines", security(("bearer" = [])),
    responses((status = 200, description = "Unpaid and overdue fines, earliest due first")))]
pub async fn outstanding(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<Vec<fine::Model>>>, ApiError> {
    let fines = state.fines.list_outstanding(identity.user_id).await?;
    Ok(Json(Envelope::list(fines)))
}

#[utoipa::path(get, path = "/api/fines/{id}", tag = "fines", security(("bearer" = [])),
    params(("id" = String, Path, description = "Fine id")),
    responses((status = 200, description = "Fine with its payment"), (status = 401, description = "Not the owner"), (status = 404, description = "Fine not found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<FineView>>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let fine = state.fines.get_fine(identity.user_id, id).await?;
    Ok(Json(Envelope::data(fine)))
}

/// The body is optional; an absent or unreadable body disputes the fine.
#[utoipa::path(put, path = "/api/fines/{id}", tag = "fines", security(("bearer" = [])),
    params(("id" = String, Path, description = "Fine id")), request_body = crate::openapi::DisputeRequestDoc,
    responses((status = 200, description = "Fine marked Disputed"), (status = 400, description = "Only Disputed is accepted")))]
pub async fn dispute(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    body: Option<ApiJson<Value>>,
) -> Result<Json<Envelope<fine::Model>>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let requested = requested_status(body.map(|ApiJson(v)| v));
    let fine = state.fines.dispute_fine(identity.user_id, id, requested.as_deref()).await?;
    Ok(Json(Envelope::data(fine)))
}
