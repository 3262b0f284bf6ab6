use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::fine::{self, FineStatus};

use crate::errors::ServiceError;
use super::repository::FineRepository;

pub struct SeaOrmFineRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl FineRepository for SeaOrmFineRepository {
    async fn list_fines_by_user(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError> {
        Ok(fine::Entity::find()
            .filter(fine::Column::UserId.eq(user_id))
            .order_by_desc(fine::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn list_outstanding_fines(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError> {
        Ok(fine::Entity::find()
            .filter(fine::Column::UserId.eq(user_id))
            .filter(fine::Column::Status.is_in([FineStatus::Unpaid.as_str(), FineStatus::Overdue.as_str()]))
            .order_by_asc(fine::Column::DueDate)
            .all(&self.db)
            .await?)
    }

    async fn find_fine_by_id(&self, id: Uuid) -> Result<Option<fine::Model>, ServiceError> {
        Ok(fine::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_fines_by_ids(&self, ids: &[Uuid]) -> Result<Vec<fine::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(fine::Entity::find()
            .filter(fine::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn set_fine_status(&self, id: Uuid, status: FineStatus) -> Result<fine::Model, ServiceError> {
        let existing = fine::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Fine not found"))?;
        let mut am: fine::ActiveModel = existing.into();
        am.status = Set(status);
        Ok(am.update(&self.db).await?)
    }
}
