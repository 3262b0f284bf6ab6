use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::AuthConfig;
use service::auth::{AuthService, TokenIssuer};
use service::fine::repository::FineRepository;
use service::fine::seaorm::SeaOrmFineRepository;
use service::fine::FineService;
use service::license::repository::LicenseRepository;
use service::license::seaorm::SeaOrmLicenseRepository;
use service::license::LicenseService;
use service::payment::repository::PaymentRepository;
use service::payment::seaorm::SeaOrmPaymentRepository;
use service::payment::PaymentService;
use service::storage::memory::MemoryStore;

pub type DynAuthService = AuthService<dyn AuthRepository>;
pub type DynLicenseService = LicenseService<dyn LicenseRepository>;
pub type DynFineService = FineService<dyn FineRepository, dyn PaymentRepository>;
pub type DynPaymentService = PaymentService<dyn PaymentRepository, dyn FineRepository, dyn LicenseRepository>;

/// Shared handler state: one service per resource domain.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<DynAuthService>,
    pub licenses: Arc<DynLicenseService>,
    pub fines: Arc<DynFineService>,
    pub payments: Arc<DynPaymentService>,
}

impl ServerState {
    pub fn from_repositories(
        users: Arc<dyn AuthRepository>,
        licenses: Arc<dyn LicenseRepository>,
        fines: Arc<dyn FineRepository>,
        payments: Arc<dyn PaymentRepository>,
        tokens: TokenIssuer,
        auth_cfg: AuthConfig,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users, tokens, auth_cfg)),
            licenses: Arc::new(LicenseService::new(licenses.clone())),
            fines: Arc::new(FineService::new(fines.clone(), payments.clone())),
            payments: Arc::new(PaymentService::new(payments, fines, licenses)),
        }
    }

    /// Services backed by the SeaORM repositories sharing one pool.
    pub fn with_database(db: DatabaseConnection, tokens: TokenIssuer, auth_cfg: AuthConfig) -> Self {
        Self::from_repositories(
            Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            Arc::new(SeaOrmLicenseRepository { db: db.clone() }),
            Arc::new(SeaOrmFineRepository { db: db.clone() }),
            Arc::new(SeaOrmPaymentRepository { db }),
            tokens,
            auth_cfg,
        )
    }

    /// Services backed by a single in-process store.
    pub fn in_memory(store: MemoryStore, tokens: TokenIssuer, auth_cfg: AuthConfig) -> Self {
        let store = Arc::new(store);
        Self::from_repositories(store.clone(), store.clone(), store.clone(), store, tokens, auth_cfg)
    }
}
