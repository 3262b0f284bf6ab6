//! Traffic fines: listing, detail and disputes.

pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::{FineService, FineView};
