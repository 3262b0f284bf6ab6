use async_trait::async_trait;
use uuid::Uuid;

use models::fine::{self, FineStatus};

use crate::errors::ServiceError;

#[async_trait]
pub trait FineRepository: Send + Sync {
    /// Newest creation first.
    async fn list_fines_by_user(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError>;
    /// Unpaid or overdue, earliest due date first.
    async fn list_outstanding_fines(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError>;
    async fn find_fine_by_id(&self, id: Uuid) -> Result<Option<fine::Model>, ServiceError>;
    async fn find_fines_by_ids(&self, ids: &[Uuid]) -> Result<Vec<fine::Model>, ServiceError>;
    async fn set_fine_status(&self, id: Uuid, status: FineStatus) -> Result<fine::Model, ServiceError>;
}
