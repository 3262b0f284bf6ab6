use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use sea_orm::sea_query::StringLen;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum FineStatus {
    #[sea_orm(string_value = "Unpaid")]
    Unpaid,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Overdue")]
    Overdue,
    #[sea_orm(string_value = "Disputed")]
    Disputed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl FineStatus {
    /// Still owed: listed by the outstanding-fines view.
    pub fn is_outstanding(self) -> bool {
        matches!(self, FineStatus::Unpaid | FineStatus::Overdue)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FineStatus::Unpaid => "Unpaid",
            FineStatus::Paid => "Paid",
            FineStatus::Overdue => "Overdue",
            FineStatus::Disputed => "Disputed",
            FineStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fine")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub fine_number: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub reason: String,
    pub location: String,
    /// When the fine was issued.
    pub date: DateTimeWithTimeZone,
    pub due_date: DateTimeWithTimeZone,
    pub status: FineStatus,
    pub payment_id: Option<Uuid>,
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

#[derive(Clone, Debug)]
pub struct NewFine {
    pub user_id: Uuid,
    pub fine_number: String,
    pub amount: f64,
    pub reason: String,
    pub location: String,
    pub date: DateTimeWithTimeZone,
    pub due_date: DateTimeWithTimeZone,
    pub status: FineStatus,
}

impl NewFine {
    pub fn into_model(self, id: Uuid) -> Model {
        Model {
            id,
            user_id: self.user_id,
            fine_number: self.fine_number,
            amount: self.amount,
            reason: self.reason,
            location: self.location,
            date: self.date,
            due_date: self.due_date,
            status: self.status,
            payment_id: None,
            created_at: Utc::now().into(),
        }
    }
}

pub fn validate(input: &NewFine) -> Result<(), ModelError> {
    if input.fine_number.trim().is_empty() { return Err(ModelError::Validation("Please add fine number".into())); }
    if !(input.amount.is_finite() && input.amount > 0.0) { return Err(ModelError::Validation("Please add fine amount".into())); }
    if input.reason.trim().is_empty() { return Err(ModelError::Validation("Please add reason for fine".into())); }
    if input.location.trim().is_empty() { return Err(ModelError::Validation("Please add location where fine was issued".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewFine) -> Result<Model, ModelError> {
    validate(&input)?;
    let m = input.into_model(Uuid::new_v4());
    let am = ActiveModel {
        id: Set(m.id),
        user_id: Set(m.user_id),
        fine_number: Set(m.fine_number),
        amount: Set(m.amount),
        reason: Set(m.reason),
        location: Set(m.location),
        date: Set(m.date),
        due_date: Set(m.due_date),
        status: Set(m.status),
        payment_id: Set(None),
        created_at: Set(m.created_at),
    };
    Ok(am.insert(db).await?)
}
