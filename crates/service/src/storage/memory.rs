use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use models::fine::{self, FineStatus};
use models::user::NewUser;
use models::{license, payment, user};

use crate::auth::domain::Credentials;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::fine::repository::FineRepository;
use crate::license::repository::LicenseRepository;
use crate::payment::repository::{PaymentRepository, ALREADY_PAID};

#[derive(Default)]
struct Tables {
    users: Vec<user::Model>,
    credentials: Vec<Credentials>,
    licenses: Vec<license::Model>,
    fines: Vec<fine::Model>,
    payments: Vec<payment::Model>,
}

/// In-process store implementing every repository trait.
///
/// All tables sit behind one mutex, so multi-table units (user + credentials,
/// payment + fine) are atomic with respect to each other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub async fn insert_user(&self, m: user::Model) {
        self.inner.lock().await.users.push(m);
    }

    pub async fn insert_license(&self, m: license::Model) {
        self.inner.lock().await.licenses.push(m);
    }

    pub async fn insert_fine(&self, m: fine::Model) {
        self.inner.lock().await.fines.push(m);
    }

    pub async fn insert_payment(&self, m: payment::Model) {
        self.inner.lock().await.payments.push(m);
    }
}

#[async_trait]
impl AuthRepository for MemoryStore {
    async fn find_conflicting_user(&self, email: &str, id_number: &str, dl_number: &str) -> Result<Option<user::Model>, AuthError> {
        let t = self.inner.lock().await;
        Ok(t.users
            .iter()
            .find(|u| u.email == email || u.id_number == id_number || u.dl_number == dl_number)
            .cloned())
    }

    async fn find_user_by_id_number(&self, id_number: &str) -> Result<Option<user::Model>, AuthError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.id_number == id_number).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, input: NewUser, password_hash: String, password_algorithm: String) -> Result<user::Model, AuthError> {
        let mut t = self.inner.lock().await;
        if t.users.iter().any(|u| u.email == input.email || u.id_number == input.id_number || u.dl_number == input.dl_number) {
            return Err(AuthError::Conflict);
        }
        let m = input.into_model(Uuid::new_v4());
        t.credentials.push(Credentials { user_id: m.id, password_hash, password_algorithm });
        t.users.push(m.clone());
        Ok(m)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let t = self.inner.lock().await;
        Ok(t.credentials.iter().find(|c| c.user_id == user_id).cloned())
    }
}

#[async_trait]
impl LicenseRepository for MemoryStore {
    async fn find_license_by_user(&self, user_id: Uuid) -> Result<Option<license::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.licenses.iter().find(|l| l.user_id == user_id).cloned())
    }

    async fn find_license_by_id(&self, id: Uuid) -> Result<Option<license::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.licenses.iter().find(|l| l.id == id).cloned())
    }

    async fn find_licenses_by_ids(&self, ids: &[Uuid]) -> Result<Vec<license::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.licenses.iter().filter(|l| ids.contains(&l.id)).cloned().collect())
    }
}

#[async_trait]
impl FineRepository for MemoryStore {
    async fn list_fines_by_user(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError> {
        let t = self.inner.lock().await;
        let mut out: Vec<fine::Model> = t.fines.iter().filter(|f| f.user_id == user_id).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn list_outstanding_fines(&self, user_id: Uuid) -> Result<Vec<fine::Model>, ServiceError> {
        let t = self.inner.lock().await;
        let mut out: Vec<fine::Model> = t.fines
            .iter()
            .filter(|f| f.user_id == user_id && f.status.is_outstanding())
            .cloned()
            .collect();
        out.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        Ok(out)
    }

    async fn find_fine_by_id(&self, id: Uuid) -> Result<Option<fine::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.fines.iter().find(|f| f.id == id).cloned())
    }

    async fn find_fines_by_ids(&self, ids: &[Uuid]) -> Result<Vec<fine::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.fines.iter().filter(|f| ids.contains(&f.id)).cloned().collect())
    }

    async fn set_fine_status(&self, id: Uuid, status: FineStatus) -> Result<fine::Model, ServiceError> {
        let mut t = self.inner.lock().await;
        let f = t.fines
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| ServiceError::not_found("Fine not found"))?;
        f.status = status;
        Ok(f.clone())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn list_payments_by_user(&self, user_id: Uuid) -> Result<Vec<payment::Model>, ServiceError> {
        let t = self.inner.lock().await;
        let mut out: Vec<payment::Model> = t.payments.iter().filter(|p| p.user_id == user_id).cloned().collect();
        out.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(out)
    }

    async fn find_payment_by_id(&self, id: Uuid) -> Result<Option<payment::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.payments.iter().find(|p| p.id == id).cloned())
    }

    async fn find_payments_by_ids(&self, ids: &[Uuid]) -> Result<Vec<payment::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.payments.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn find_payer(&self, user_id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn record_fine_payment(&self, payment: payment::Model, fine_id: Uuid) -> Result<(payment::Model, fine::Model), ServiceError> {
        let mut t = self.inner.lock().await;
        if t.payments.iter().any(|p| p.reference_id == payment.reference_id) {
            return Err(ServiceError::Conflict(format!("duplicate reference id {}", payment.reference_id)));
        }
        let f = t.fines
            .iter_mut()
            .find(|f| f.id == fine_id)
            .ok_or_else(|| ServiceError::not_found("Fine not found"))?;
        if f.status == FineStatus::Paid {
            return Err(ServiceError::Conflict(ALREADY_PAID.into()));
        }
        f.status = FineStatus::Paid;
        f.payment_id = Some(payment.id);
        let fine = f.clone();
        t.payments.push(payment.clone());
        Ok((payment, fine))
    }
}
