//! Uplink core library
//!
//! Domain models, error taxonomy, configuration, and the upload validation
//! policy shared by the storage, database, and API crates. This crate does
//! no I/O of its own.

pub mod config;
pub mod error;
pub mod models;
pub mod policy;

pub use config::{Config, PolicyConfig, StorageBackend, StorageSettings};
pub use error::{AppError, LogLevel};
pub use policy::UploadPolicy;
