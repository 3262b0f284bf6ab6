use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::fine::{self, FineStatus};
use models::payment;

use crate::errors::{ensure_owner, ServiceError};
use crate::payment::repository::PaymentRepository;
use super::repository::FineRepository;

const FINE_NOT_FOUND: &str = "Fine not found";

/// A fine with its settling payment expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineView {
    #[serde(flatten)]
    pub fine: fine::Model,
    #[serde(default)]
    pub payment: Option<payment::Model>,
}

pub struct FineService<F: FineRepository + ?Sized, P: PaymentRepository + ?Sized> {
    fines: Arc<F>,
    payments: Arc<P>,
}

impl<F: FineRepository + ?Sized, P: PaymentRepository + ?Sized> FineService<F, P> {
    pub fn new(fines: Arc<F>, payments: Arc<P>) -> Self { Self { fines, payments } }

    async fn expand(&self, fines: Vec<fine::Model>) -> Result<Vec<FineView>, ServiceError> {
        let ids: Vec<Uuid> = fines.iter().filter_map(|f| f.payment_id).collect();
        let mut by_id: HashMap<Uuid, payment::Model> = self.payments
            .find_payments_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Ok(fines
            .into_iter()
            .map(|f| {
                let payment = f.payment_id.and_then(|id| by_id.remove(&id));
                FineView { fine: f, payment }
            })
            .collect())
    }

    async fn owned_fine(&self, user_id: Uuid, fine_id: Uuid, action: &str) -> Result<fine::Model, ServiceError> {
        let fine = self.fines
            .find_fine_by_id(fine_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(FINE_NOT_FOUND))?;
        ensure_owner(fine.user_id, user_id, action)?;
        Ok(fine)
    }

    #[instrument(skip(self))]
    pub async fn list_user_fines(&self, user_id: Uuid) -> Result<Vec<FineView>, ServiceError> {
        let fines = self.fines.list_fines_by_user(user_id).await?;
        self.expand(fines).await
    }

    #[instrument(skip(self))]
    pub async fn list_outstanding(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError> {
        self.fines.list_outstanding_fines(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_fine(&self, user_id: Uuid, fine_id: Uuid) -> Result<FineView, ServiceError> {
        let fine = self.owned_fine(user_id, fine_id, "access this fine").await?;
        let mut views = self.expand(vec![fine]).await?;
        views.pop().ok_or_else(|| ServiceError::not_found(FINE_NOT_FOUND))
    }

    /// Mark a fine as disputed. The only transition callers may request;
    /// an absent status means "Disputed".
    #[instrument(skip(self))]
    pub async fn dispute_fine(&self, user_id: Uuid, fine_id: Uuid, requested_status: Option<&str>) -> Result<fine::Model, ServiceError> {
        let fine = self.owned_fine(user_id, fine_id, "update this fine").await?;
        if let Some(requested) = requested_status.filter(|s| !s.is_empty()) {
            if requested != FineStatus::Disputed.as_str() {
                return Err(ServiceError::Validation("You can only mark a fine as disputed".into()));
            }
        }
        let updated = self.fines.set_fine_status(fine.id, FineStatus::Disputed).await?;
        info!(user_id = %user_id, fine_id = %fine.id, previous = fine.status.as_str(), "fine_disputed");
        Ok(updated)
    }
}
