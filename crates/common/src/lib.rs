//! Types and helpers shared by the server, its binaries and the mobile client.

pub mod types;
pub mod utils;
