use sea_orm::{Condition, DatabaseConnection, EntityTrait, ColumnTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use models::user::NewUser;

use crate::auth::domain::{Credentials, UserProfile};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn repo_err(e: sea_orm::DbErr) -> AuthError { AuthError::Repository(e.to_string()) }

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_conflicting_user(&self, email: &str, id_number: &str, dl_number: &str) -> Result<Option<UserProfile>, AuthError> {
        models::user::Entity::find()
            .filter(
                Condition::any()
                    .add(models::user::Column::Email.eq(email))
                    .add(models::user::Column::IdNumber.eq(id_number))
                    .add(models::user::Column::DlNumber.eq(dl_number)),
            )
            .one(&self.db)
            .await
            .map_err(repo_err)
    }

    async fn find_user_by_id_number(&self, id_number: &str) -> Result<Option<UserProfile>, AuthError> {
        models::user::Entity::find()
            .filter(models::user::Column::IdNumber.eq(id_number))
            .one(&self.db)
            .await
            .map_err(repo_err)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError> {
        models::user::Entity::find_by_id(id).one(&self.db).await.map_err(repo_err)
    }

    async fn create_user(&self, input: NewUser, password_hash: String, password_algorithm: String) -> Result<UserProfile, AuthError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        let created = models::user::create(&txn, Uuid::new_v4(), input).await?;
        models::user_credentials::set_password(&txn, created.id, password_hash, &password_algorithm).await?;
        txn.commit().await.map_err(repo_err)?;
        Ok(created)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }
}
