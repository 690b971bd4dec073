//! Database models shared across the person repository.

pub mod address;
#[cfg(feature = "server")]
pub mod config;
pub mod email;
pub mod person;
pub mod phone;
