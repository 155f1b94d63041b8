//! Show queue status.

use anyhow::Result;
use regsync_client::Config;
use regsync_store::QueueStore;

/// Run the status command.
pub async fn run(config: &Config) -> Result<()> {
    let store = super::open_store(config).await?;

    println!("=== regsync status ===");
    println!();
    println!("Queue:    {}", config.storage.database.display());
    println!("Endpoint: {}", config.endpoint.base_url);
    println!();

    let pending = store.list_unsynced().await?;
    if pending.is_empty() {
        println!("Everything is synced.");
        return Ok(());
    }

    println!("{} registration(s) waiting to sync:", pending.len());
    for entry in &pending {
        println!(
            "  [{}] {} {} (class {}, queued {})",
            entry.local_id,
            entry.payload.first_name,
            entry.payload.last_name,
            entry.payload.class_applied,
            format_timestamp(entry.created_at)
        );
    }
    println!();
    println!("Run 'regsync sync' to submit them now.");

    Ok(())
}

/// Format a Unix timestamp as a human-readable string.
fn format_timestamp(ts: i64) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let diff = now.saturating_sub(ts.max(0) as u64);

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86400 {
        format!("{} hours ago", diff / 3600)
    } else {
        format!("{} days ago", diff / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regsync_types::{Guardian, RegistrationPayload};
    use tempfile::tempdir;

    #[tokio::test]
    async fn status_on_empty_queue() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.database = dir.path().join("queue.db");

        assert!(run(&config).await.is_ok());
    }

    #[tokio::test]
    async fn status_with_pending_entries() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.database = dir.path().join("queue.db");

        let store = super::super::open_store(&config).await.unwrap();
        store
            .enqueue(RegistrationPayload {
                first_name: "Ada".into(),
                last_name: "Okafor".into(),
                date_of_birth: "2013-01-09".into(),
                class_applied: "JSS1".into(),
                guardian: Guardian {
                    name: "Chioma Okafor".into(),
                    phone: "+2348011111111".into(),
                    email: None,
                },
                scores: vec![],
            })
            .await
            .unwrap();

        assert!(run(&config).await.is_ok());
    }

    #[test]
    fn format_timestamp_works() {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        assert_eq!(format_timestamp(now), "just now");
        assert!(format_timestamp(now - 120).contains("minutes"));
        assert!(format_timestamp(now - 7200).contains("hours"));
        assert!(format_timestamp(now - 172800).contains("days"));
    }
}
