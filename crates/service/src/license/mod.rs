//! Driver licenses: lookup, derived expiry status and renewal requests.

pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::{LicenseService, LicenseStatusView, RenewalAck};
