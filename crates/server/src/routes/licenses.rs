use axum::{extract::State, Extension, Json};

use common::types::Envelope;
use models::license;
use service::auth::domain::Identity;
use service::license::{LicenseStatusView, RenewalAck};

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/licenses", tag = "licenses", security(("bearer" = [])),
    responses((status = 200, description = "The caller's license"), (status = 404, description = "No license found for this user")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<license::Model>>, ApiError> {
    let lic = state.licenses.get_user_license(identity.user_id).await?;
    Ok(Json(Envelope::data(lic)))
}

#[utoipa::path(get, path = "/api/licenses/status", tag = "licenses", security(("bearer" = [])),
    responses((status = 200, description = "Derived expiry status"), (status = 404, description = "No license found for this user")))]
pub async fn status(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<LicenseStatusView>>, ApiError> {
    let view = state.licenses.get_license_status(identity.user_id).await?;
    Ok(Json(Envelope::data(view)))
}

#[utoipa::path(post, path = "/api/licenses/renewal-request", tag = "licenses", security(("bearer" = [])),
    responses((status = 200, description = "Renewal acknowledged"), (status = 404, description = "No license found for this user")))]
pub async fn renewal_request(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<RenewalAck>>, ApiError> {
    let ack = state.licenses.request_renewal(identity.user_id).await?;
    Ok(Json(Envelope::data(ack).with_message("Renewal request submitted successfully")))
}
