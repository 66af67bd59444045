//! Uplink Storage Library
//!
//! Object-storage abstraction for the ingest pipeline: the [`Storage`] trait,
//! storage-key derivation, and backends for S3 (`object_store`) and the local
//! filesystem.
//!
//! # Storage key format
//!
//! `uploads/{folder}/{uuid-v4}-{sanitized_name}` where `folder` is derived
//! from the MIME category (`images`, `videos`, `audio`, `documents`). The
//! random token makes keys collision-resistant even for identical filenames;
//! keys never contain `..` or a leading `/`. Derivation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{derive_key, public_url, sanitize_filename, DerivedKey};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectHeaders, Storage, StorageError, StorageResult};
