use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::fine::{self, FineStatus};
use models::license;
use models::payment::{self, NewPayment, PaymentMethod, PaymentStatus, PaymentType};

use crate::errors::{ensure_owner, ServiceError};
use crate::fine::repository::FineRepository;
use crate::license::repository::LicenseRepository;
use super::repository::{PaymentRepository, ALREADY_PAID};

const PAYMENT_NOT_FOUND: &str = "Payment not found";

/// A payment with the fine or license it settled expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: payment::Model,
    #[serde(default)]
    pub fine: Option<fine::Model>,
    #[serde(default)]
    pub license: Option<license::Model>,
}

/// Result of settling a fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub payment: payment::Model,
    pub fine: fine::Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerDetails {
    pub name: String,
    pub id_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentDetails {
    #[serde(rename_all = "camelCase")]
    Fine { fine_number: String, reason: String, issue_date: DateTime<FixedOffset> },
    #[serde(rename_all = "camelCase")]
    License { license_number: String, category: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub payment_date: DateTime<FixedOffset>,
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub status: PaymentStatus,
    pub payer_details: PayerDetails,
    pub payment_type: PaymentType,
    pub payment_details: PaymentDetails,
}

/// `FINE-<epoch millis>-<random>`; uniqueness is enforced by the store.
pub fn fine_reference(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("FINE-{}-{suffix:06}", now.timestamp_millis())
}

pub struct PaymentService<P, F, L>
where
    P: PaymentRepository + ?Sized,
    F: FineRepository + ?Sized,
    L: LicenseRepository + ?Sized,
{
    payments: Arc<P>,
    fines: Arc<F>,
    licenses: Arc<L>,
}

impl<P, F, L> PaymentService<P, F, L>
where
    P: PaymentRepository + ?Sized,
    F: FineRepository + ?Sized,
    L: LicenseRepository + ?Sized,
{
    pub fn new(payments: Arc<P>, fines: Arc<F>, licenses: Arc<L>) -> Self { Self { payments, fines, licenses } }

    #[instrument(skip(self))]
    pub async fn list_payment_history(&self, user_id: Uuid) -> Result<Vec<PaymentView>, ServiceError> {
        let payments = self.payments.list_payments_by_user(user_id).await?;
        let fine_ids: Vec<Uuid> = payments.iter().filter_map(|p| p.related_fine).collect();
        let license_ids: Vec<Uuid> = payments.iter().filter_map(|p| p.related_license).collect();
        let fines: HashMap<Uuid, fine::Model> =
            self.fines.find_fines_by_ids(&fine_ids).await?.into_iter().map(|f| (f.id, f)).collect();
        let licenses: HashMap<Uuid, license::Model> =
            self.licenses.find_licenses_by_ids(&license_ids).await?.into_iter().map(|l| (l.id, l)).collect();
        Ok(payments
            .into_iter()
            .map(|p| PaymentView {
                fine: p.related_fine.and_then(|id| fines.get(&id).cloned()),
                license: p.related_license.and_then(|id| licenses.get(&id).cloned()),
                payment: p,
            })
            .collect())
    }

    /// Settle a fine in full with the given method.
    #[instrument(skip(self))]
    pub async fn pay_fine(&self, user_id: Uuid, fine_id: Uuid, payment_method: Option<&str>) -> Result<PaymentOutcome, ServiceError> {
        let method = match payment_method.map(str::trim).filter(|m| !m.is_empty()) {
            None => return Err(ServiceError::Validation("Please provide payment method".into())),
            Some(label) => PaymentMethod::from_label(label)
                .ok_or_else(|| ServiceError::Validation(format!("Invalid payment method: {label}")))?,
        };

        let fine = self.fines
            .find_fine_by_id(fine_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Fine not found"))?;
        ensure_owner(fine.user_id, user_id, "pay this fine")?;
        if fine.status == FineStatus::Paid {
            return Err(ServiceError::Conflict(ALREADY_PAID.into()));
        }

        let new_payment = NewPayment {
            user_id,
            amount: fine.amount,
            payment_method: method,
            payment_type: PaymentType::FinePayment,
            reference_id: fine_reference(Utc::now()),
            status: PaymentStatus::Completed,
            related_fine: Some(fine.id),
            related_license: None,
        };
        let (payment, fine) = self.payments
            .record_fine_payment(new_payment.into_model(Uuid::new_v4()), fine.id)
            .await?;
        info!(
            user_id = %user_id,
            fine_id = %fine.id,
            payment_id = %payment.id,
            reference_id = %payment.reference_id,
            amount = payment.amount,
            "fine_paid"
        );
        Ok(PaymentOutcome { payment, fine })
    }

    #[instrument(skip(self))]
    pub async fn get_receipt(&self, user_id: Uuid, payment_id: Uuid) -> Result<Receipt, ServiceError> {
        let payment = self.payments
            .find_payment_by_id(payment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(PAYMENT_NOT_FOUND))?;
        ensure_owner(payment.user_id, user_id, "access this receipt")?;

        let payer = self.payments
            .find_payer(payment.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        let fine = match payment.related_fine {
            Some(id) => self.fines.find_fine_by_id(id).await?,
            None => None,
        };
        let license = match (&fine, payment.related_license) {
            (None, Some(id)) => self.licenses.find_license_by_id(id).await?,
            _ => None,
        };
        let payment_details = match (fine, license) {
            (Some(f), _) => PaymentDetails::Fine { fine_number: f.fine_number, reason: f.reason, issue_date: f.date },
            (None, Some(l)) => PaymentDetails::License { license_number: l.license_number, category: l.category },
            (None, None) => PaymentDetails::Other,
        };

        Ok(Receipt {
            receipt_number: payment.reference_id,
            payment_date: payment.payment_date,
            payment_method: payment.payment_method,
            amount: payment.amount,
            status: payment.status,
            payer_details: PayerDetails { name: payer.name, id_number: payer.id_number, email: payer.email },
            payment_type: payment.payment_type,
            payment_details,
        })
    }
}
