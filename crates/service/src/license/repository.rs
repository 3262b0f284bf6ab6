use async_trait::async_trait;
use uuid::Uuid;

use models::license;

use crate::errors::ServiceError;

#[async_trait]
pub trait LicenseRepository: Send + Sync {
    /// The single license owned by a user.
    async fn find_license_by_user(&self, user_id: Uuid) -> Result<Option<license::Model>, ServiceError>;
    async fn find_license_by_id(&self, id: Uuid) -> Result<Option<license::Model>, ServiceError>;
    async fn find_licenses_by_ids(&self, ids: &[Uuid]) -> Result<Vec<license::Model>, ServiceError>;
}
