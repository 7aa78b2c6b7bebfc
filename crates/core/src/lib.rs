//! Dentquote Core - Domain entities, services, and traits.
//!
//! This crate contains quote composition, valuation, export and the
//! data-source switch. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate and by the built-in fixtures.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod confirmation;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod export;
pub mod fixtures;
pub mod gateway;
pub mod quotes;

pub use config::AppConfig;
pub use gateway::{DataMode, DataSource};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
