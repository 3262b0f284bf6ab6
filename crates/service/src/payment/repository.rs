use async_trait::async_trait;
use uuid::Uuid;

use models::{fine, payment, user};

use crate::errors::ServiceError;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Newest payment date first.
    async fn list_payments_by_user(&self, user_id: Uuid) -> Result<Vec<payment::Model>, ServiceError>;
    async fn find_payment_by_id(&self, id: Uuid) -> Result<Option<payment::Model>, ServiceError>;
    async fn find_payments_by_ids(&self, ids: &[Uuid]) -> Result<Vec<payment::Model>, ServiceError>;
    /// Payer identity printed on receipts.
    async fn find_payer(&self, user_id: Uuid) -> Result<Option<user::Model>, ServiceError>;

    /// Persist `payment` and mark `fine_id` Paid with a link back to it, as one
    /// unit. Fails with `Conflict` and persists nothing if the fine is already
    /// Paid at the moment of the update.
    async fn record_fine_payment(&self, payment: payment::Model, fine_id: Uuid) -> Result<(payment::Model, fine::Model), ServiceError>;
}

pub(crate) const ALREADY_PAID: &str = "This fine has already been paid";
