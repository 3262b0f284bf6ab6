use async_trait::async_trait;
use uuid::Uuid;

use models::user::NewUser;

use super::domain::{Credentials, UserProfile};
use super::errors::AuthError;

/// Repository abstraction for identity persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Any user sharing one of the unique identity fields.
    async fn find_conflicting_user(&self, email: &str, id_number: &str, dl_number: &str) -> Result<Option<UserProfile>, AuthError>;
    async fn find_user_by_id_number(&self, id_number: &str) -> Result<Option<UserProfile>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError>;

    /// Create the user and its credentials as one unit.
    async fn create_user(&self, input: NewUser, password_hash: String, password_algorithm: String) -> Result<UserProfile, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}
