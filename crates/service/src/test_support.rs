//! Shared fixtures for service tests.

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::db::{connect_with_config, single_connection};
use models::{fine, license, user};

/// Fresh in-memory SQLite database with every migration applied.
pub async fn setup_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&single_connection("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn new_user(tag: &str) -> user::NewUser {
    user::NewUser {
        name: format!("Driver {tag}"),
        id_number: format!("ID-{tag}"),
        phone: "0700000000".into(),
        dl_number: format!("DL-{tag}"),
        dl_expire_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap_or_default(),
        email: format!("{tag}@example.com"),
    }
}

pub async fn seed_user(db: &DatabaseConnection, tag: &str) -> Result<user::Model> {
    Ok(user::create(db, Uuid::new_v4(), new_user(tag)).await?)
}

pub fn new_fine(user_id: Uuid, number: &str) -> fine::NewFine {
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

pub fn new_license(user_id: Uuid, number: &str) -> license::NewLicense {
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
