use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use models::fine::{self, FineStatus};
use models::{payment, user};

use crate::errors::ServiceError;
use super::repository::{PaymentRepository, ALREADY_PAID};

pub struct SeaOrmPaymentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn list_payments_by_user(&self, user_id: Uuid) -> Result<Vec<payment::Model>, ServiceError> {
        Ok(payment::Entity::find()
            .filter(payment::Column::UserId.eq(user_id))
            .order_by_desc(payment::Column::PaymentDate)
            .all(&self.db)
            .await?)
    }

    async fn find_payment_by_id(&self, id: Uuid) -> Result<Option<payment::Model>, ServiceError> {
        Ok(payment::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_payments_by_ids(&self, ids: &[Uuid]) -> Result<Vec<payment::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(payment::Entity::find()
            .filter(payment::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn find_payer(&self, user_id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(user_id).one(&self.db).await?)
    }

    async fn record_fine_payment(&self, payment: payment::Model, fine_id: Uuid) -> Result<(payment::Model, fine::Model), ServiceError> {
        let txn = self.db.begin().await?;

        // Conditional update: the status guard is what serializes concurrent payers.
        let res = fine::Entity::update_many()
            .col_expr(fine::Column::Status, Expr::value(FineStatus::Paid.as_str()))
            .col_expr(fine::Column::PaymentId, Expr::value(payment.id))
            .filter(fine::Column::Id.eq(fine_id))
            .filter(fine::Column::Status.ne(FineStatus::Paid.as_str()))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            debug!(fine_id = %fine_id, "fine already paid, payment rolled back");
            return Err(ServiceError::Conflict(ALREADY_PAID.into()));
        }

        let saved = payment::insertable(&payment).insert(&txn).await?;
        let fine = fine::Entity::find_by_id(fine_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Fine not found"))?;
        txn.commit().await?;
        Ok((saved, fine))
    }
}
