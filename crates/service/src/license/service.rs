use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::license::{self, LicenseStatus};

use crate::errors::ServiceError;
use super::repository::LicenseRepository;

const NO_LICENSE: &str = "No license found for this user";
const EXPIRY_WARNING_DAYS: i64 = 30;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Display status of a license at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatusView {
    pub license_number: String,
    pub category: String,
    pub status: LicenseStatus,
    pub expiry_date: DateTime<FixedOffset>,
    pub days_until_expiry: i64,
    pub message: String,
}

/// Acknowledgement of a renewal request. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalAck {
    pub license: String,
    pub request_date: DateTime<Utc>,
    pub status: String,
}

/// Whole days until expiry, rounded up; zero or negative once expired.
pub fn days_until_expiry(expiry: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry.with_timezone(&Utc) - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Derive the display status. Only persisted `Active` licenses are
/// re-evaluated against the clock; other statuses pass through unchanged.
pub fn derive_status(lic: &license::Model, now: DateTime<Utc>) -> LicenseStatusView {
    let days = days_until_expiry(lic.expiry_date, now);
    let (status, message) = match lic.status {
        LicenseStatus::Active if days <= 0 => (LicenseStatus::Expired, "Your license has expired.".to_string()),
        LicenseStatus::Active if days <= EXPIRY_WARNING_DAYS => {
            (LicenseStatus::Active, format!("Your license will expire in {days} days."))
        }
        LicenseStatus::Active => (LicenseStatus::Active, "Your license is active.".to_string()),
        other => (other, String::new()),
    };
    LicenseStatusView {
        license_number: lic.license_number.clone(),
        category: lic.category.clone(),
        status,
        expiry_date: lic.expiry_date,
        days_until_expiry: days,
        message,
    }
}

pub struct LicenseService<R: LicenseRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: LicenseRepository + ?Sized> LicenseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get_user_license(&self, user_id: Uuid) -> Result<license::Model, ServiceError> {
        self.repo
            .find_license_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(NO_LICENSE))
    }

    #[instrument(skip(self))]
    pub async fn get_license_status(&self, user_id: Uuid) -> Result<LicenseStatusView, ServiceError> {
        let lic = self.get_user_license(user_id).await?;
        Ok(derive_status(&lic, Utc::now()))
    }

    #[instrument(skip(self))]
    pub async fn request_renewal(&self, user_id: Uuid) -> Result<RenewalAck, ServiceError> {
        let lic = self.get_user_license(user_id).await?;
        info!(user_id = %user_id, license_number = %lic.license_number, "renewal_requested");
        Ok(RenewalAck { license: lic.license_number, request_date: Utc::now(), status: "Pending".into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::license::seaorm::SeaOrmLicenseRepository;
    use crate::storage::memory::MemoryStore;
    use crate::test_support;

    fn license_expiring(expiry: DateTime<Utc>, status: LicenseStatus) -> license::Model {
        let mut l = test_support::new_license(Uuid::new_v4(), "LIC-1").into_model(Uuid::new_v4());
        l.expiry_date = expiry.into();
        l.status = status;
        l
    }

    #[test]
    fn expired_yesterday() {
        let now = Utc::now();
        let view = derive_status(&license_expiring(now - Duration::days(1), LicenseStatus::Active), now);
        assert_eq!(view.status, LicenseStatus::Expired);
        assert_eq!(view.message, "Your license has expired.");
        assert!(view.days_until_expiry <= 0);
    }

    #[test]
    fn expiring_in_fifteen_days() {
        let now = Utc::now();
        let view = derive_status(&license_expiring(now + Duration::days(15), LicenseStatus::Active), now);
        assert_eq!(view.status, LicenseStatus::Active);
        assert_eq!(view.days_until_expiry, 15);
        assert!(view.message.contains("15 days"));
    }

    #[test]
    fn partial_days_round_up() {
        let now = Utc::now();
        let view = derive_status(&license_expiring(now + Duration::hours(36), LicenseStatus::Active), now);
        assert_eq!(view.days_until_expiry, 2);
    }

    #[test]
    fn far_expiry_is_plain_active() {
        let now = Utc::now();
        let view = derive_status(&license_expiring(now + Duration::days(200), LicenseStatus::Active), now);
        assert_eq!(view.message, "Your license is active.");
    }

    #[test]
    fn non_active_passes_through() {
        let now = Utc::now();
        let view = derive_status(&license_expiring(now - Duration::days(10), LicenseStatus::Suspended), now);
        assert_eq!(view.status, LicenseStatus::Suspended);
        assert_eq!(view.message, "");
    }

    #[tokio::test]
    async fn missing_license_is_not_found() {
        let svc = LicenseService::new(Arc::new(MemoryStore::default()));
        let err = svc.get_license_status(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.public_message(), NO_LICENSE);
        assert!(matches!(svc.request_renewal(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn status_read_does_not_write_back() {
        let store = Arc::new(MemoryStore::default());
        let owner = Uuid::new_v4();
        let mut seed = test_support::new_license(owner, "LIC-9");
        seed.expiry_date = (Utc::now() - Duration::days(2)).into();
        store.insert_license(seed.into_model(Uuid::new_v4())).await;

        let svc = LicenseService::new(store.clone());
        assert_eq!(svc.get_license_status(owner).await.unwrap().status, LicenseStatus::Expired);
        assert_eq!(svc.get_user_license(owner).await.unwrap().status, LicenseStatus::Active);
    }

    #[tokio::test]
    async fn seaorm_license_lookup_and_renewal() {
        let db = test_support::setup_db().await.unwrap();
        let user = test_support::seed_user(&db, "lic").await.unwrap();
        models::license::create(&db, test_support::new_license(user.id, "LIC-DB-1")).await.unwrap();

        let svc = LicenseService::new(Arc::new(SeaOrmLicenseRepository { db }));
        let lic = svc.get_user_license(user.id).await.unwrap();
        assert_eq!(lic.license_number, "LIC-DB-1");
        assert_eq!(lic.restrictions, serde_json::json!(["Corrective lenses"]));

        let ack = svc.request_renewal(user.id).await.unwrap();
        assert_eq!(ack.license, "LIC-DB-1");
        assert_eq!(ack.status, "Pending");
    }
}
