//! SQLite queue backend.

use crate::{QueueStore, StorageError};
use async_trait::async_trait;
use regsync_types::{LocalId, QueueEntry, RegistrationPayload};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// SQLite-based durable queue.
///
/// Uses WAL mode for concurrent reads/writes. `local_id` is an
/// `AUTOINCREMENT` primary key: SQLite guarantees it is monotonic and never
/// reassigned, even after rows are deleted, so a replayed idempotency key
/// can never collide with a different record.
#[derive(Clone)]
pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    /// Open (or create) a queue database at the given path.
    pub async fn new(path: &Path) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(path.to_str().unwrap_or("queue.db"))
            .map_err(StorageError::Database)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StorageError::Database)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory queue (for testing).
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(":memory:")
            .map_err(StorageError::Database)?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(StorageError::Database)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS queue (
                local_id INTEGER PRIMARY KEY AUTOINCREMENT,
                payload TEXT NOT NULL,
                synced INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        // Secondary index so list_unsynced avoids a full scan
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_queue_synced ON queue(synced, local_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(())
    }

    fn current_timestamp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn enqueue(&self, payload: RegistrationPayload) -> Result<QueueEntry, StorageError> {
        let json = payload.to_json()?;
        let created_at = Self::current_timestamp();

        let local_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO queue (payload, synced, created_at)
            VALUES (?1, 0, ?2)
            RETURNING local_id
            "#,
        )
        .bind(&json)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(QueueEntry {
            local_id: LocalId::new(local_id as u64),
            payload,
            synced: false,
            created_at,
        })
    }

    async fn list_unsynced(&self) -> Result<Vec<QueueEntry>, StorageError> {
        let rows = sqlx::query_as::<_, QueueRow>(
            r#"
            SELECT local_id, payload, synced, created_at
            FROM queue
            WHERE synced = 0
            ORDER BY local_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }

    async fn mark_synced(&self, local_id: LocalId) -> Result<(), StorageError> {
        sqlx::query("UPDATE queue SET synced = 1 WHERE local_id = ?1")
            .bind(local_id.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;
        Ok(())
    }

    async fn remove(&self, local_id: LocalId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM queue WHERE local_id = ?1")
            .bind(local_id.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;
        Ok(())
    }

    async fn get(&self, local_id: LocalId) -> Result<Option<QueueEntry>, StorageError> {
        let row = sqlx::query_as::<_, QueueRow>(
            r#"
            SELECT local_id, payload, synced, created_at
            FROM queue
            WHERE local_id = ?1
            "#,
        )
        .bind(local_id.value() as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    async fn unsynced_count(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue WHERE synced = 0")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Database)?;
        Ok(count as u64)
    }

    async fn prune_synced(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM queue WHERE synced = 1")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;
        Ok(result.rows_affected())
    }
}

/// Internal row type for SQLite queries.
#[derive(sqlx::FromRow)]
struct QueueRow {
    local_id: i64,
    payload: String,
    synced: i64,
    created_at: i64,
}

impl TryFrom<QueueRow> for QueueEntry {
    type Error = StorageError;

    fn try_from(row: QueueRow) -> Result<Self, Self::Error> {
        let payload = RegistrationPayload::from_json(&row.payload).map_err(|e| {
            StorageError::CorruptRow {
                local_id: row.local_id as u64,
                reason: e.to_string(),
            }
        })?;
        Ok(QueueEntry {
            local_id: LocalId::new(row.local_id as u64),
            payload,
            synced: row.synced != 0,
            created_at: row.created_at,
        })
    }
}
