use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::license;

use crate::errors::ServiceError;
use super::repository::LicenseRepository;

pub struct SeaOrmLicenseRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl LicenseRepository for SeaOrmLicenseRepository {
    async fn find_license_by_user(&self, user_id: Uuid) -> Result<Option<license::Model>, ServiceError> {
        Ok(license::Entity::find()
            .filter(license::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    async fn find_license_by_id(&self, id: Uuid) -> Result<Option<license::Model>, ServiceError> {
        Ok(license::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_licenses_by_ids(&self, ids: &[Uuid]) -> Result<Vec<license::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(license::Entity::find()
            .filter(license::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }
}
