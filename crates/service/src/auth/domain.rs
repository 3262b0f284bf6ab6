use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a user. Never carries credentials.
pub type UserProfile = models::user::Model;

/// Registration input. Every field is optional at the type level so a missing
/// field surfaces as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: Option<String>,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub dl_number: Option<String>,
    pub dl_expire_date: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub id_number: Option<String>,
    pub password: Option<String>,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login/registration result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

/// Identity established by token verification and attached to each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}
