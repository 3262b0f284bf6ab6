use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use sea_orm::sea_query::StringLen;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum LicenseStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Expired")]
    Expired,
    #[sea_orm(string_value = "Suspended")]
    Suspended,
    #[sea_orm(string_value = "Revoked")]
    Revoked,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "license")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub license_number: String,
    pub issued_date: DateTimeWithTimeZone,
    pub expiry_date: DateTimeWithTimeZone,
    pub category: String,
    pub status: LicenseStatus,
    /// JSON array of restriction codes, e.g. `["Corrective lenses"]`.
    #[sea_orm(column_type = "Json")]
    pub restrictions: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Licenses are issued out of band; this is the seeding/import entry point.
#[derive(Clone, Debug)]
pub struct NewLicense {
    pub user_id: Uuid,
    pub license_number: String,
    pub issued_date: DateTimeWithTimeZone,
    pub expiry_date: DateTimeWithTimeZone,
    pub category: String,
    pub status: LicenseStatus,
    pub restrictions: Vec<String>,
}

impl NewLicense {
    pub fn into_model(self, id: Uuid) -> Model {
        Model {
            id,
            user_id: self.user_id,
            license_number: self.license_number,
            issued_date: self.issued_date,
            expiry_date: self.expiry_date,
            category: self.category,
            status: self.status,
            restrictions: serde_json::json!(self.restrictions),
            created_at: Utc::now().into(),
        }
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewLicense) -> Result<Model, ModelError> {
    if input.license_number.trim().is_empty() { return Err(ModelError::Validation("license number required".into())); }
    if input.category.trim().is_empty() { return Err(ModelError::Validation("license category required".into())); }
    if input.expiry_date < input.issued_date { return Err(ModelError::Validation("expiry date precedes issue date".into())); }
    let m = input.into_model(Uuid::new_v4());
    let am = ActiveModel {
        id: Set(m.id),
        user_id: Set(m.user_id),
        license_number: Set(m.license_number),
        issued_date: Set(m.issued_date),
        expiry_date: Set(m.expiry_date),
        category: Set(m.category),
        status: Set(m.status),
        restrictions: Set(m.restrictions),
        created_at: Set(m.created_at),
    };
    Ok(am.insert(db).await?)
}
