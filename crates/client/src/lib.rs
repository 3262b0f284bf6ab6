//! Typed HTTP client for the DriveMe API, used by the mobile app.
//!
//! `DriveMeClient` keeps the session token in a pluggable [`TokenStore`] and
//! attaches it as a bearer token to every call after register/login.

pub mod client;
pub mod error;
pub mod token_store;
pub mod types;

pub use client::DriveMeClient;
pub use error::ClientError;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
