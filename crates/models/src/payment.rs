use sea_orm::{entity::prelude::*, Set};
use sea_orm::sea_query::StringLen;
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{fine, license, user};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "Credit Card")]
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[sea_orm(string_value = "Debit Card")]
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[sea_orm(string_value = "Bank Transfer")]
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[sea_orm(string_value = "Cash")]
    Cash,
    #[sea_orm(string_value = "Mobile Money")]
    #[serde(rename = "Mobile Money")]
    MobileMoney,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::MobileMoney => "Mobile Money",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        <Self as sea_orm::Iterable>::iter().find(|m| m.label() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PaymentType {
    #[sea_orm(string_value = "Fine Payment")]
    #[serde(rename = "Fine Payment")]
    FinePayment,
    #[sea_orm(string_value = "License Renewal")]
    #[serde(rename = "License Renewal")]
    LicenseRenewal,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Failed")]
    Failed,
    #[sea_orm(string_value = "Refunded")]
    Refunded,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub payment_date: DateTimeWithTimeZone,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    #[sea_orm(unique)]
    pub reference_id: String,
    pub status: PaymentStatus,
    pub related_fine: Option<Uuid>,
    pub related_license: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Fine, License }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Fine => Entity::belongs_to(fine::Entity).from(Column::RelatedFine).to(fine::Column::Id).into(),
            Relation::License => Entity::belongs_to(license::Entity).from(Column::RelatedLicense).to(license::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    pub reference_id: String,
    pub status: PaymentStatus,
    pub related_fine: Option<Uuid>,
    pub related_license: Option<Uuid>,
}

impl NewPayment {
    pub fn into_model(self, id: Uuid) -> Model {
        let now = Utc::now().into();
        Model {
            id,
            user_id: self.user_id,
            amount: self.amount,
            payment_date: now,
            payment_method: self.payment_method,
            payment_type: self.payment_type,
            reference_id: self.reference_id,
            status: self.status,
            related_fine: self.related_fine,
            related_license: self.related_license,
            created_at: now,
        }
    }
}

/// Insertable form of a fully built model.
pub fn insertable(m: &Model) -> ActiveModel {
    ActiveModel {
        id: Set(m.id),
        user_id: Set(m.user_id),
        amount: Set(m.amount),
        payment_date: Set(m.payment_date),
        payment_method: Set(m.payment_method),
        payment_type: Set(m.payment_type),
        reference_id: Set(m.reference_id.clone()),
        status: Set(m.status),
        related_fine: Set(m.related_fine),
        related_license: Set(m.related_license),
        created_at: Set(m.created_at),
    }
}
