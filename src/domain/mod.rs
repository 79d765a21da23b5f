//! Domain entities exposed by the client registry.

pub mod client;
pub mod types;
