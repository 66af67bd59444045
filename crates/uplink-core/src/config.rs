//! Configuration module
//!
//! Configuration is read once from the environment at startup and threaded
//! into the pipeline as explicit values; nothing in the per-request path
//! reads environment variables. Storage bucket/region stay `Option`s here:
//! their absence rejects the upload request, not process startup, so a
//! misconfigured deploy still serves descriptive errors.

use std::env;

/// Available storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

/// Object-storage settings (S3 or local filesystem).
#[derive(Clone, Debug, Default)]
pub struct StorageSettings {
    pub backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, etc.)
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
}

/// Upload policy settings: allow-list and per-category size ceilings.
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    pub allowed_content_types: Vec<String>,
    pub max_image_size_bytes: u64,
    pub max_video_size_bytes: u64,
    pub max_audio_size_bytes: u64,
    pub max_other_size_bytes: u64,
}

/// Application configuration (ingest gateway).
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub storage: StorageSettings,
    pub policy: PolicyConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        const MAX_IMAGE_SIZE_MB: u64 = 25;
        const MAX_VIDEO_SIZE_MB: u64 = 500;
        const MAX_AUDIO_SIZE_MB: u64 = 100;
        const MAX_OTHER_SIZE_MB: u64 = 50;

        let storage_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "s3" => Some(StorageBackend::S3),
                    "local" => Some(StorageBackend::Local),
                    _ => None,
                });

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| crate::policy::DEFAULT_ALLOWED_CONTENT_TYPES.join(","))
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let size_mb = |var: &str, default: u64| -> u64 {
            env::var(var)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(default)
                * 1024
                * 1024
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage: StorageSettings {
                backend: storage_backend,
                s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
                s3_region: env::var("S3_REGION")
                    .or_else(|_| env::var("AWS_REGION"))
                    .ok()
                    .filter(|s| !s.is_empty()),
                s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
                local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            },
            policy: PolicyConfig {
                allowed_content_types,
                max_image_size_bytes: size_mb("MAX_IMAGE_SIZE_MB", MAX_IMAGE_SIZE_MB),
                max_video_size_bytes: size_mb("MAX_VIDEO_SIZE_MB", MAX_VIDEO_SIZE_MB),
                max_audio_size_bytes: size_mb("MAX_AUDIO_SIZE_MB", MAX_AUDIO_SIZE_MB),
                max_other_size_bytes: size_mb("MAX_OTHER_SIZE_MB", MAX_OTHER_SIZE_MB),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        // S3 bucket/region absence is deliberately not a startup error: the
        // pipeline rejects requests with a missing-configuration error instead.
        if self.storage.backend == Some(StorageBackend::Local)
            && self.storage.local_storage_path.is_none()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}
