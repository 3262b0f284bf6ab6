//! Payments: history, fine settlement and receipts.

pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::{PaymentDetails, PaymentOutcome, PaymentService, PaymentView, Receipt};
