use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Registered user. Credentials live in `user_credentials`, so serializing a
/// `Model` can never leak a password hash.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub id_number: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub dl_number: String,
    pub dl_expire_date: Date,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields captured at registration.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub dl_number: String,
    pub dl_expire_date: NaiveDate,
    pub email: String,
}

impl NewUser {
    pub fn into_model(self, id: Uuid) -> Model {
        let now = Utc::now().into();
        Model {
            id,
            name: self.name,
            id_number: self.id_number,
            phone: self.phone,
            dl_number: self.dl_number,
            dl_expire_date: self.dl_expire_date,
            email: self.email,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::Validation("Invalid email format".into());
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.len() > 128 {
        return Err(ModelError::Validation("name too long".into()));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (the mobile date picker
/// sends the latter).
pub fn parse_date(raw: &str) -> Result<NaiveDate, ModelError> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| ModelError::Validation(format!("invalid date: {raw}")))
}

pub async fn create<C: ConnectionTrait>(db: &C, id: Uuid, input: NewUser) -> Result<Model, ModelError> {
    validate_email(&input.email)?;
    validate_name(&input.name)?;
    let m = input.into_model(id);
    let am = ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        id_number: Set(m.id_number),
        phone: Set(m.phone),
        dl_number: Set(m.dl_number),
        dl_expire_date: Set(m.dl_expire_date),
        email: Set(m.email),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    Ok(am.insert(db).await?)
}
