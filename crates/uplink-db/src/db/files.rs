//! File record repository

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use uplink_core::models::{FileRecord, NewFileRecord};
use uplink_core::AppError;

/// Repository for persisted file records.
///
/// Records are created once per accepted upload and never mutated by the
/// ingest pipeline; the nullable media columns are filled by the downstream
/// processing worker.
#[derive(Clone)]
pub struct FileRecordRepository {
    pool: PgPool,
}

impl FileRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new file record, assigning id and timestamp.
    pub async fn create(&self, new: NewFileRecord) -> Result<FileRecord, AppError> {
        let record = sqlx::query_as::<_, FileRecord>(
            r#"
            INSERT INTO files
                (id, storage_key, url, file_type, original_filename, size,
                 duration, width, height, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, storage_key, url, file_type, original_filename, size,
                      duration, width, height, uploaded_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.storage_key)
        .bind(&new.url)
        .bind(&new.file_type)
        .bind(&new.original_filename)
        .bind(new.size)
        .bind(new.metadata.duration)
        .bind(new.metadata.width)
        .bind(new.metadata.height)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            record_id = %record.id,
            storage_key = %record.storage_key,
            "File record created"
        );

        Ok(record)
    }

    /// Fetch a record by id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        let record = sqlx::query_as::<_, FileRecord>(
            r#"
            SELECT id, storage_key, url, file_type, original_filename, size,
                   duration, width, height, uploaded_at
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
