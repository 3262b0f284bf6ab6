//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and current-user lookup, plus the stateless session
//! tokens the HTTP gateway verifies on every protected request.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::AuthService;
pub use token::TokenIssuer;
