
/// Transaction commit/rollback behaviour the payment flow depends on.
pub mod transaction_tests;

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{db, fine, license, user};

/// Setup test database with migrations
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::connect_with_config(&db::single_connection("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn new_user(tag: &str) -> user::NewUser {
    user::NewUser {
        name: format!("Driver {tag}"),
        id_number: format!("ID-{tag}"),
        phone: "0700000000".into(),
        dl_number: format!("DL-{tag}"),
        dl_expire_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        email: format!("{tag}@example.com"),
    }
}

pub(crate) fn new_fine(user_id: Uuid, number: &str) -> fine::NewFine {
    let now = Utc::now();
    fine::NewFine {
        user_id,
        fine_number: number.into(),
        amount: 2500.0,
        reason: "Speeding".into(),
        location: "Mombasa Rd".into(),
        date: (now - Duration::days(3)).into(),
        due_date: (now + Duration::days(27)).into(),
        status: fine::FineStatus::Unpaid,
    }
}

pub(crate) fn new_license(user_id: Uuid, number: &str) -> license::NewLicense {
    let now = Utc::now();
    license::NewLicense {
        user_id,
        license_number: number.into(),
        issued_date: (now - Duration::days(365)).into(),
        expiry_date: (now + Duration::days(365)).into(),
        category: "B".into(),
        status: license::LicenseStatus::Active,
        restrictions: vec!["Corrective lenses".into()],
    }
}
