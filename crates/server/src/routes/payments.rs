use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use serde::Deserialize;

use common::types::Envelope;
use service::auth::domain::Identity;
use service::payment::{PaymentOutcome, PaymentView, Receipt};

use crate::errors::ApiError;
use crate::extract::{parse_id, ApiJson};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayFineRequest {
    pub payment_method: Option<String>,
}

#[utoipa::path(get, path = "/api/payments", tag = "payments", security(("bearer" = [])),
    responses((status = 200, description = "Payment history, newest first")))]
pub async fn history(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Envelope<Vec<PaymentView>>>, ApiError> {
    let payments = state.payments.list_payment_history(identity.user_id).await?;
    Ok(Json(Envelope::list(payments)))
}

#[utoipa::path(post, path = "/api/payments/fines/{fine_id}", tag = "payments", security(("bearer" = [])),
    params(("fine_id" = String, Path, description = "Fine id")), request_body = crate::openapi::PayFineRequestDoc,
    responses((status = 201, description = "Payment successful"), (status = 400, description = "Missing method or already paid"), (status = 404, description = "Fine not found")))]
pub async fn pay_fine(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
    Path(fine_id): Path<String>,
    body: Option<ApiJson<PayFineRequest>>,
) -> Result<(StatusCode, Json<Envelope<PaymentOutcome>>), ApiError> {
    let fine_id = parse_id(&fine_id, "Fine not found")?;
    let method = body.and_then(|ApiJson(b)| b.payment_method);
    let outcome = state.payments.pay_fine(identity.user_id, fine_id, method.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(outcome).with_message("Payment successful"))))
}

#[utoipa::path(get, path = "/api/payments/{id}/receipt", tag = "payments", security(("bearer" = [])),
    params(("id" = String, Path, description = "Payment id")),
    responses((status = 200, description = "Formatted receipt"), (status = 404, description = "Payment not found")))]
pub async fn receipt(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Receipt>>, ApiError> {
    let id = parse_id(&id, "Payment not found")?;
    let receipt = state.payments.get_receipt(identity.user_id, id).await?;
    Ok(Json(Envelope::data(receipt)))
}
