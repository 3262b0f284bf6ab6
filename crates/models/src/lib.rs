//! SeaORM entities for users, licenses, fines and payments, plus the
//! connection pool and validation helpers shared by the service layer.

pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod license;
pub mod fine;
pub mod payment;

#[cfg(test)]
mod tests;
