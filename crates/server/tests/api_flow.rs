use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use models::fine::{FineStatus, NewFine};
use models::license::{LicenseStatus, NewLicense};
use server::{routes, ServerState};
use service::auth::{service::AuthConfig, TokenIssuer};
use service::storage::memory::MemoryStore;

fn build_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = ServerState::in_memory(
        store.clone(),
        TokenIssuer::new("test-secret", Duration::hours(1)),
        AuthConfig::fast_hashing(),
    );
    (routes::build_router(state), store)
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

fn registration(tag: &str) -> Value {
    json!({
        "name": format!("Driver {tag}"),
        "idNumber": format!("ID-{tag}"),
        "phone": "0712345678",
        "dlNumber": format!("DL-{tag}"),
        "dlExpireDate": "2030-01-31",
        "email": format!("{tag}@example.com"),
        "password": "Passw0rd!"
    })
}

/// Register a user and return (user id, token).
async fn register(app: &Router, tag: &str) -> (Uuid, String) {
    let (status, body) = send(app, "POST", "/api/auth/register", None, Some(registration(tag))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap();
    (id, body["token"].as_str().unwrap().to_string())
}

fn fine_for(user_id: Uuid, number: &str, due_in_days: i64) -> models::fine::Model {
    let now = Utc::now();
    NewFine {
        user_id,
        fine_number: number.into(),
        amount: 1500.0,
        reason: "Running a red light".into(),
        location: "Uhuru Hwy".into(),
        date: (now - Duration::days(2)).into(),
        due_date: (now + Duration::days(due_in_days)).into(),
        status: FineStatus::Unpaid,
    }
    .into_model(Uuid::new_v4())
}

#[tokio::test]
async fn public_routes() {
    let (app, _) = build_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("DriveMe API is running".into()));

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/fines"].is_object());
}

#[tokio::test]
async fn register_login_me() {
    let (app, _) = build_app();
    let (user_id, token) = register(&app, "alice").await;

    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(registration("alice"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User already exists with this email, ID, or driver's license");

    let (status, body) = send(&app, "POST", "/api/auth/login", None, Some(json!({"idNumber": "ID-alice", "password": "Passw0rd!"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (wrong_status, wrong) = send(&app, "POST", "/api/auth/login", None, Some(json!({"idNumber": "ID-alice", "password": "nope"}))).await;
    let (unknown_status, unknown) = send(&app, "POST", "/api/auth/login", None, Some(json!({"idNumber": "ID-bob", "password": "Passw0rd!"}))).await;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["message"], "Invalid credentials");

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.to_string());
    assert_eq!(body["data"]["idNumber"], "ID-alice");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let (app, _) = build_app();
    let mut missing = registration("x");
    missing.as_object_mut().unwrap().remove("phone");
    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please add all fields");

    let mut bad_email = registration("y");
    bad_email["email"] = json!("nope");
    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn protected_routes_require_valid_token() {
    let (app, _) = build_app();
    for uri in ["/api/auth/me", "/api/fines", "/api/licenses/status", "/api/payments"] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["success"], false);
    }
    let (status, _) = send(&app, "GET", "/api/fines", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other_issuer = TokenIssuer::new("another-secret", Duration::hours(1));
    let forged = other_issuer.issue(Uuid::new_v4()).unwrap();
    let (status, _) = send(&app, "GET", "/api/fines", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn fines_and_disputes() {
    let (app, store) = build_app();
    let (user_id, token) = register(&app, "carol").await;
    let (_, intruder) = register(&app, "mallory").await;

    let later = fine_for(user_id, "F-10", 25);
    let sooner = fine_for(user_id, "F-11", 3);
    store.insert_fine(later.clone()).await;
    store.insert_fine(sooner.clone()).await;

    let (status, body) = send(&app, "GET", "/api/fines", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, "GET", "/api/fines/outstanding", Some(&token), None).await;
    assert_eq!(body["data"][0]["fineNumber"], "F-11");
    assert_eq!(body["data"][1]["fineNumber"], "F-10");

    let uri = format!("/api/fines/{}", later.id);
    let (status, body) = send(&app, "GET", &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized to access this fine");

    let (status, body) = send(&app, "GET", "/api/fines/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Fine not found");

    let (status, body) = send(&app, "PUT", &uri, Some(&token), Some(json!({"status": "Cancelled"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You can only mark a fine as disputed");

    for wrong_type in [json!({"status": 5}), json!({"status": ["Cancelled"]}), json!({"status": false})] {
        let (status, body) = send(&app, "PUT", &uri, Some(&token), Some(wrong_type.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{wrong_type}");
        assert_eq!(body["message"], "You can only mark a fine as disputed");
    }

    let (status, body) = send(&app, "PUT", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Disputed");

    let (_, body) = send(&app, "GET", "/api/fines/outstanding", Some(&token), None).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn pay_fine_and_receipt() {
    let (app, store) = build_app();
    let (user_id, token) = register(&app, "dave").await;
    let (_, intruder) = register(&app, "eve").await;
    let fine = fine_for(user_id, "F-20", 10);
    store.insert_fine(fine.clone()).await;
    let uri = format!("/api/payments/fines/{}", fine.id);

    let (status, body) = send(&app, "POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide payment method");

    let (status, _) = send(&app, "POST", &uri, Some(&intruder), Some(json!({"paymentMethod": "Cash"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "POST", &uri, Some(&token), Some(json!({"paymentMethod": "Mobile Money"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Payment successful");
    assert_eq!(body["data"]["fine"]["status"], "Paid");
    assert_eq!(body["data"]["payment"]["paymentType"], "Fine Payment");
    assert_eq!(body["data"]["payment"]["status"], "Completed");
    assert_eq!(body["data"]["fine"]["paymentId"], body["data"]["payment"]["id"]);
    let payment_id = body["data"]["payment"]["id"].as_str().unwrap().to_string();
    let reference = body["data"]["payment"]["referenceId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "POST", &uri, Some(&token), Some(json!({"paymentMethod": "Cash"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This fine has already been paid");

    let (_, body) = send(&app, "GET", "/api/payments", Some(&token), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["fine"]["fineNumber"], "F-20");

    let receipt_uri = format!("/api/payments/{payment_id}/receipt");
    let (status, body) = send(&app, "GET", &receipt_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["receiptNumber"], reference.as_str());
    assert_eq!(body["data"]["payerDetails"]["idNumber"], "ID-dave");
    assert_eq!(body["data"]["paymentDetails"]["type"], "Fine");

    let (status, body) = send(&app, "GET", &receipt_uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized to access this receipt");

    let (status, _) = send(&app, "GET", &format!("/api/payments/{}/receipt", Uuid::new_v4()), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn license_status_and_renewal() {
    let (app, store) = build_app();
    let (user_id, token) = register(&app, "frank").await;

    let (status, body) = send(&app, "GET", "/api/licenses", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No license found for this user");

    let now = Utc::now();
    let lic = NewLicense {
        user_id,
        license_number: "LIC-F-1".into(),
        issued_date: (now - Duration::days(1800)).into(),
        expiry_date: (now + Duration::days(15)).into(),
        category: "B".into(),
        status: LicenseStatus::Active,
        restrictions: vec![],
    }
    .into_model(Uuid::new_v4());
    store.insert_license(lic).await;

    let (status, body) = send(&app, "GET", "/api/licenses/status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Active");
    assert!(body["data"]["message"].as_str().unwrap().contains("15 days"));

    let (status, body) = send(&app, "POST", "/api/licenses/renewal-request", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Renewal request submitted successfully");
    assert_eq!(body["data"]["license"], "LIC-F-1");
    assert_eq!(body["data"]["status"], "Pending");
}
