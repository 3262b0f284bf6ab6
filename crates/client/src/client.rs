use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use common::types::Envelope;

use crate::error::ClientError;
use crate::token_store::{MemoryTokenStore, TokenStore};
use crate::types::*;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// DriveMe API client. Cheap to clone; clones share the token store.
#[derive(Clone)]
pub struct DriveMeClient {
    http: reqwest::Client,
    root: String,
    tokens: Arc<dyn TokenStore>,
}

impl DriveMeClient {
    /// Client for the server at `root` (e.g. `http://10.0.2.2:5002`), keeping
    /// the token in memory.
    pub fn new(root: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_token_store(root, Arc::new(MemoryTokenStore::default()))
    }

    pub fn with_token_store(root: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        let root = root.into().trim_end_matches('/').to_string();
        Ok(Self { http, root, tokens })
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.root, path)
    }

    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let mut req = self.http.request(method, self.api(path));
        if let Some(token) = self.tokens.load().await? {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, operation: &str) -> Result<Envelope<T>, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&bytes)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
            warn!(operation, status = status.as_u16(), %message, "request failed");
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        debug!(operation, status = status.as_u16(), "request ok");
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(format!("{operation}: {e}")))
    }

    async fn call<T: DeserializeOwned>(&self, method: Method, path: &str, operation: &str) -> Result<T, ClientError> {
        let req = self.authorized(method, path).await?;
        Self::data(self.send(req, operation).await?, operation)
    }

    async fn call_with<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<T, ClientError> {
        let req = self.authorized(method, path).await?.json(body);
        Self::data(self.send(req, operation).await?, operation)
    }

    fn data<T>(envelope: Envelope<T>, operation: &str) -> Result<T, ClientError> {
        envelope.data.ok_or_else(|| ClientError::Decode(format!("{operation}: missing data")))
    }

    async fn open_session(&self, envelope: Envelope<User>, operation: &str) -> Result<Session, ClientError> {
        let token = envelope
            .token
            .clone()
            .ok_or_else(|| ClientError::Decode(format!("{operation}: missing token")))?;
        self.tokens.save(&token).await?;
        Ok(Session { user: Self::data(envelope, operation)?, token })
    }

    // Auth

    pub async fn register(&self, input: &Registration) -> Result<Session, ClientError> {
        let req = self.http.post(self.api("/auth/register")).json(input);
        let envelope = self.send(req, "register").await?;
        self.open_session(envelope, "register").await
    }

    pub async fn login(&self, id_number: &str, password: &str) -> Result<Session, ClientError> {
        let body = serde_json::json!({ "idNumber": id_number, "password": password });
        let req = self.http.post(self.api("/auth/login")).json(&body);
        let envelope = self.send(req, "login").await?;
        self.open_session(envelope, "login").await
    }

    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.call(Method::GET, "/auth/me", "current_user").await
    }

    /// Forget the session locally; tokens are stateless so the server is not
    /// involved.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.tokens.clear().await
    }

    // Fines

    pub async fn all_fines(&self) -> Result<Vec<FineDetails>, ClientError> {
        self.call(Method::GET, "/fines", "all_fines").await
    }

    pub async fn outstanding_fines(&self) -> Result<Vec<Fine>, ClientError> {
        self.call(Method::GET, "/fines/outstanding", "outstanding_fines").await
    }

    pub async fn fine_details(&self, fine_id: Uuid) -> Result<FineDetails, ClientError> {
        self.call(Method::GET, &format!("/fines/{fine_id}"), "fine_details").await
    }

    pub async fn dispute_fine(&self, fine_id: Uuid) -> Result<Fine, ClientError> {
        let body = serde_json::json!({ "status": "Disputed" });
        self.call_with(Method::PUT, &format!("/fines/{fine_id}"), &body, "dispute_fine").await
    }

    // Licenses

    pub async fn license_details(&self) -> Result<License, ClientError> {
        self.call(Method::GET, "/licenses", "license_details").await
    }

    pub async fn license_status(&self) -> Result<LicenseStatus, ClientError> {
        self.call(Method::GET, "/licenses/status", "license_status").await
    }

    pub async fn request_renewal(&self) -> Result<RenewalAck, ClientError> {
        self.call(Method::POST, "/licenses/renewal-request", "request_renewal").await
    }

    // Payments

    pub async fn payment_history(&self) -> Result<Vec<PaymentRecord>, ClientError> {
        self.call(Method::GET, "/payments", "payment_history").await
    }

    pub async fn pay_fine(&self, fine_id: Uuid, payment_method: &str) -> Result<PaymentOutcome, ClientError> {
        let body = serde_json::json!({ "paymentMethod": payment_method });
        self.call_with(Method::POST, &format!("/payments/fines/{fine_id}"), &body, "pay_fine").await
    }

    pub async fn payment_receipt(&self, payment_id: Uuid) -> Result<Receipt, ClientError> {
        self.call(Method::GET, &format!("/payments/{payment_id}/receipt"), "payment_receipt").await
    }

    /// True when the server answers its health check.
    pub async fn test_connection(&self) -> bool {
        match self.http.get(format!("{}/health", self.root)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!(error = %e, root = %self.root, "server unreachable");
                false
            }
        }
    }
}
