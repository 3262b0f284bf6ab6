use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;

use client::types::{PaymentDetails, Registration};
use client::{ClientError, DriveMeClient, FileTokenStore};
use models::fine::{FineStatus, NewFine};
use models::license::{LicenseStatus, NewLicense};
use server::{routes, ServerState};
use service::auth::{service::AuthConfig, TokenIssuer};

struct TestApp {
    base_url: String,
    db: DatabaseConnection,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&models::db::single_connection("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState::with_database(
        db.clone(),
        TokenIssuer::new("e2e-secret", Duration::hours(1)),
        AuthConfig::fast_hashing(),
    );
    let app = routes::build_router(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), db })
}

fn registration(tag: &str) -> Registration {
    Registration {
        name: format!("Driver {tag}"),
        id_number: format!("ID-{tag}"),
        phone: "0712345678".into(),
        dl_number: format!("DL-{tag}"),
        dl_expire_date: "2031-12-31".into(),
        email: format!("{tag}@example.com"),
        password: "Passw0rd!".into(),
    }
}

#[tokio::test]
async fn e2e_connection_check() -> anyhow::Result<()> {
    let app = start_server().await?;
    assert!(DriveMeClient::new(&app.base_url)?.test_connection().await);
    assert!(!DriveMeClient::new("http://127.0.0.1:9")?.test_connection().await);
    Ok(())
}

#[tokio::test]
async fn e2e_driver_journey() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token_path = std::env::temp_dir().join(format!("driveme_e2e_{}/token", uuid::Uuid::new_v4()));
    let api = DriveMeClient::with_token_store(&app.base_url, Arc::new(FileTokenStore::new(&token_path)))?;

    let session = api.register(&registration("journey")).await?;
    assert_eq!(api.current_user().await?.id, session.user.id);

    let now = Utc::now();
    models::license::create(&app.db, NewLicense {
        user_id: session.user.id,
        license_number: "LIC-E2E".into(),
        issued_date: (now - Duration::days(3000)).into(),
        expiry_date: (now - Duration::days(1)).into(),
        category: "C".into(),
        status: LicenseStatus::Active,
        restrictions: vec!["Automatic only".into()],
    })
    .await?;
    let fine = models::fine::create(&app.db, NewFine {
        user_id: session.user.id,
        fine_number: "F-E2E".into(),
        amount: 5000.0,
        reason: "Speeding".into(),
        location: "Thika Rd".into(),
        date: (now - Duration::days(4)).into(),
        due_date: (now + Duration::days(10)).into(),
        status: FineStatus::Unpaid,
    })
    .await?;

    let license = api.license_details().await?;
    assert_eq!(license.restrictions, vec!["Automatic only".to_string()]);
    let status = api.license_status().await?;
    assert_eq!(status.status, "Expired");
    assert_eq!(status.message, "Your license has expired.");
    assert_eq!(api.request_renewal().await?.status, "Pending");

    assert_eq!(api.outstanding_fines().await?.len(), 1);
    let outcome = api.pay_fine(fine.id, "Credit Card").await?;
    assert_eq!(outcome.fine.status, "Paid");
    assert_eq!(outcome.fine.payment_id, Some(outcome.payment.id));

    match api.pay_fine(fine.id, "Credit Card").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "This fine has already been paid");
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    let details = api.fine_details(fine.id).await?;
    assert_eq!(details.payment.map(|p| p.id), Some(outcome.payment.id));
    assert!(api.outstanding_fines().await?.is_empty());

    let history = api.payment_history().await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].fine.as_ref().map(|f| f.fine_number.as_str()), Some("F-E2E"));

    let receipt = api.payment_receipt(outcome.payment.id).await?;
    assert_eq!(receipt.receipt_number, outcome.payment.reference_id);
    assert!(matches!(receipt.payment_details, PaymentDetails::Fine { ref fine_number, .. } if fine_number == "F-E2E"));

    // A fresh client reading the same token file is already signed in.
    let relaunched = DriveMeClient::with_token_store(&app.base_url, Arc::new(FileTokenStore::new(&token_path)))?;
    assert_eq!(relaunched.current_user().await?.email, "journey@example.com");

    relaunched.logout().await?;
    let err = api.all_fines().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    Ok(())
}

#[tokio::test]
async fn e2e_login_and_dispute() -> anyhow::Result<()> {
    let app = start_server().await?;
    let api = DriveMeClient::new(&app.base_url)?;
    let user = api.register(&registration("disputer")).await?.user;
    api.logout().await?;

    match api.login("ID-disputer", "wrong").await {
        Err(ClientError::Api { status: 401, message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected 401, got {other:?}"),
    }
    api.login("ID-disputer", "Passw0rd!").await?;

    let fine = models::fine::create(&app.db, NewFine {
        user_id: user.id,
        fine_number: "F-DSP".into(),
        amount: 800.0,
        reason: "Obstruction".into(),
        location: "Ngong Rd".into(),
        date: Utc::now().into(),
        due_date: (Utc::now() + Duration::days(14)).into(),
        status: FineStatus::Unpaid,
    })
    .await?;

    let disputed = api.dispute_fine(fine.id).await?;
    assert_eq!(disputed.status, "Disputed");
    let all = api.all_fines().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].fine.status, "Disputed");
    Ok(())
}
