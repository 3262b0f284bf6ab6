use std::sync::Arc;

use argon2::{Argon2, Algorithm, Params, Version, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};
use uuid::Uuid;

use models::user::{self, NewUser};

use super::domain::{AuthSession, Identity, LoginInput, RegisterInput, UserProfile};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::TokenIssuer;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub password_algorithm: String,
    /// Argon2 cost parameters; lowered in tests.
    pub argon2_params: Params,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { password_algorithm: "argon2id".into(), argon2_params: Params::default() }
    }
}

impl AuthConfig {
    /// Minimum-cost hashing for tests and local fixtures.
    pub fn fast_hashing() -> Self {
        let argon2_params = Params::new(1024, 1, 1, None).unwrap_or_default();
        Self { argon2_params, ..Self::default() }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    tokens: TokenIssuer,
    cfg: AuthConfig,
}

fn required(field: &Option<String>) -> Option<String> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenIssuer, cfg: AuthConfig) -> Self { Self { repo, tokens, cfg } }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.cfg.argon2_params.clone())
    }

    /// Register a new user and open a session for it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenIssuer, service::AuthConfig, domain::RegisterInput};
    /// use service::storage::memory::MemoryStore;
    /// let store = Arc::new(MemoryStore::default());
    /// let svc = AuthService::new(store, TokenIssuer::new("secret", chrono::Duration::hours(1)), AuthConfig::fast_hashing());
    /// let input = RegisterInput {
    ///     name: Some("Jane Driver".into()),
    ///     id_number: Some("12345678".into()),
    ///     phone: Some("0712345678".into()),
    ///     dl_number: Some("DL-001".into()),
    ///     dl_expire_date: Some("2030-01-01".into()),
    ///     email: Some("jane@example.com".into()),
    ///     password: Some("Passw0rd".into()),
    /// };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "jane@example.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(id_number = input.id_number.as_deref().unwrap_or("")))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let (Some(name), Some(id_number), Some(phone), Some(dl_number), Some(dl_expire_date), Some(email), Some(password)) = (
            required(&input.name),
            required(&input.id_number),
            required(&input.phone),
            required(&input.dl_number),
            required(&input.dl_expire_date),
            required(&input.email),
            input.password.clone().filter(|p| !p.is_empty()),
        ) else {
            return Err(AuthError::Validation("Please add all fields".into()));
        };

        user::validate_email(&email)?;
        let dl_expire_date = user::parse_date(&dl_expire_date)
            .map_err(|_| AuthError::Validation("Invalid driver's license expiry date".into()))?;

        if let Some(existing) = self.repo.find_conflicting_user(&email, &id_number, &dl_number).await? {
            debug!(existing_id = %existing.id, "user exists");
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self.hasher()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let new_user = NewUser { name, id_number, phone, dl_number, dl_expire_date, email };
        let user = self.repo.create_user(new_user, hash, self.cfg.password_algorithm.clone()).await?;
        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user_registered");
        Ok(AuthSession { user, token })
    }

    /// Authenticate by national id number and password.
    ///
    /// Unknown id numbers and wrong passwords fail identically.
    #[instrument(skip(self, input), fields(id_number = input.id_number.as_deref().unwrap_or("")))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let (Some(id_number), Some(password)) = (required(&input.id_number), input.password.filter(|p| !p.is_empty())) else {
            return Err(AuthError::Validation("Please provide ID number and password".into()));
        };

        let user = self.repo
            .find_user_by_id_number(&id_number)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if self.hasher().verify_password(password.as_bytes(), &parsed).is_err() {
            debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Profile of the authenticated caller.
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        self.repo.find_user_by_id(user_id).await?.ok_or(AuthError::NotFound)
    }

    /// Verify a bearer token and resolve it to an identity.
    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens.verify(token)
    }
}
