//! Wire types as the mobile app sees them. Status and method fields stay
//! strings so a newer server cannot break an older client.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub dl_number: String,
    pub dl_expire_date: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub dl_number: String,
    pub dl_expire_date: NaiveDate,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: Uuid,
    pub license_number: String,
    pub issued_date: DateTime<FixedOffset>,
    pub expiry_date: DateTime<FixedOffset>,
    pub category: String,
    pub status: String,
    #[serde(default)]
    pub restrictions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatus {
    pub license_number: String,
    pub category: String,
    pub status: String,
    pub expiry_date: DateTime<FixedOffset>,
    pub days_until_expiry: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalAck {
    pub license: String,
    pub request_date: DateTime<FixedOffset>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    pub id: Uuid,
    pub fine_number: String,
    pub amount: f64,
    pub reason: String,
    pub location: String,
    pub date: DateTime<FixedOffset>,
    pub due_date: DateTime<FixedOffset>,
    pub status: String,
    pub payment_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub amount: f64,
    pub payment_date: DateTime<FixedOffset>,
    pub payment_method: String,
    pub payment_type: String,
    pub reference_id: String,
    pub status: String,
    pub related_fine: Option<Uuid>,
    pub related_license: Option<Uuid>,
}

/// A fine with its settling payment, if any.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineDetails {
    #[serde(flatten)]
    pub fine: Fine,
    #[serde(default)]
    pub payment: Option<Payment>,
}

/// A history entry with the fine or license it paid for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRecord {
    #[serde(flatten)]
    pub payment: Payment,
    #[serde(default)]
    pub fine: Option<Fine>,
    #[serde(default)]
    pub license: Option<License>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentOutcome {
    pub payment: Payment,
    pub fine: Fine,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerDetails {
    pub name: String,
    pub id_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentDetails {
    #[serde(rename_all = "camelCase")]
    Fine { fine_number: String, reason: String, issue_date: DateTime<FixedOffset> },
    #[serde(rename_all = "camelCase")]
    License { license_number: String, category: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub payment_date: DateTime<FixedOffset>,
    pub payment_method: String,
    pub amount: f64,
    pub status: String,
    pub payer_details: PayerDetails,
    pub payment_type: String,
    pub payment_details: PaymentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_details_decode_by_tag() {
        let fine: PaymentDetails = serde_json::from_value(serde_json::json!({
            "type": "Fine", "fineNumber": "F-1", "reason": "Speeding", "issueDate": "2026-01-02T03:04:05Z"
        }))
        .unwrap();
        assert!(matches!(fine, PaymentDetails::Fine { ref fine_number, .. } if fine_number == "F-1"));
        let other: PaymentDetails = serde_json::from_value(serde_json::json!({"type": "Other"})).unwrap();
        assert_eq!(other, PaymentDetails::Other);
    }
}
