//! Database models backing the client repository.

pub mod client;
#[cfg(feature = "cli")]
pub mod config;
