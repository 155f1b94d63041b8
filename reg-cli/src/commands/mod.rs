//! Command implementations.

pub mod enqueue;
pub mod prune;
pub mod status;
pub mod sync;

use anyhow::{Context, Result};
use regsync_client::Config;
use regsync_store::SqliteQueueStore;

/// Open the queue database named in the configuration.
pub async fn open_store(config: &Config) -> Result<SqliteQueueStore> {
    SqliteQueueStore::new(&config.storage.database)
        .await
        .with_context(|| {
            format!(
                "Failed to open queue database {}",
                config.storage.database.display()
            )
        })
}
