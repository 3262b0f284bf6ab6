//! Service layer: the business rules of the driver-services backend.
//! - Each resource domain (auth, license, fine, payment) has a repository
//!   trait, a SeaORM implementation and a framework-independent service.
//! - `storage::memory::MemoryStore` implements every repository in process
//!   for tests and local runs without a database.
//! - Errors are typed (`AuthError`, `ServiceError`) and mapped to HTTP by the
//!   server crate.

pub mod errors;
pub mod auth;
pub mod license;
pub mod fine;
pub mod payment;
pub mod storage;
#[cfg(test)]
pub mod test_support;
