use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user;

/// Password material for a driver, kept apart from the `user` row so profile
/// queries never load it. One row per user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_credentials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Hashes are stored as PHC strings (`$argon2id$v=19$...`) whose identifier
/// must agree with the recorded algorithm.
fn check_phc(password_hash: &str, algorithm: &str) -> Result<(), ModelError> {
    if algorithm.trim().is_empty() {
        return Err(ModelError::Validation("password algorithm required".into()));
    }
    let id = password_hash.strip_prefix('$').and_then(|rest| rest.split('$').next());
    match id {
        Some(id) if id == algorithm => Ok(()),
        Some(_) => Err(ModelError::Validation(format!("password hash is not {algorithm}"))),
        None => Err(ModelError::Validation("password hash must be a PHC string".into())),
    }
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}

/// Store a driver's password hash, replacing any previous one.
pub async fn set_password<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, ModelError> {
    check_phc(&password_hash, algorithm)?;
    let now = Utc::now().into();
    match find_by_user(db, user_id).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.password_hash = Set(password_hash);
            am.password_algorithm = Set(algorithm.to_string());
            am.updated_at = Set(now);
            Ok(am.update(db).await?)
        }
        None => {
            let am = ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                password_hash: Set(password_hash),
                password_algorithm: Set(algorithm.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            Ok(am.insert(db).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phc_identifier_must_match() {
        assert!(check_phc("$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA", "argon2id").is_ok());
        assert!(check_phc("$argon2i$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA", "argon2id").is_err());
        assert!(check_phc("plaintext", "argon2id").is_err());
        assert!(check_phc("$argon2id$v=19$x", "").is_err());
    }
}
