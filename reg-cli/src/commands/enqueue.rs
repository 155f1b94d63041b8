//! Queue a registration locally.

use anyhow::{Context, Result};
use regsync_client::Config;
use regsync_store::QueueStore;
use regsync_types::RegistrationPayload;
use std::io::Read;
use std::path::Path;

/// Run the enqueue command.
pub async fn run(config: &Config, file: &Path) -> Result<()> {
    let json = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read registration from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read registration file {}", file.display()))?
    };

    let payload = RegistrationPayload::from_json(&json)
        .context("Registration file is not a valid registration")?;

    let store = super::open_store(config).await?;
    let entry = store.enqueue(payload).await?;

    println!(
        "Queued registration {} for {} {} (class {})",
        entry.local_id,
        entry.payload.first_name,
        entry.payload.last_name,
        entry.payload.class_applied
    );
    println!("It will be submitted on the next sync.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.storage.database = dir.join("queue.db");
        config
    }

    #[tokio::test]
    async fn enqueue_valid_registration() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("student.json");
        std::fs::write(
            &file,
            r#"{
                "first_name": "Ada",
                "last_name": "Okafor",
                "date_of_birth": "2013-01-09",
                "class_applied": "JSS1",
                "guardian": { "name": "Chioma Okafor", "phone": "+2348011111111" }
            }"#,
        )
        .unwrap();

        let config = test_config(dir.path());
        run(&config, &file).await.unwrap();

        let store = super::super::open_store(&config).await.unwrap();
        assert_eq!(store.unsynced_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn enqueue_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, "not json").unwrap();

        let config = test_config(dir.path());
        assert!(run(&config, &file).await.is_err());
    }

    #[tokio::test]
    async fn enqueue_missing_file_fails() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let missing = dir.path().join("nope.json");
        assert!(run(&config, &missing).await.is_err());
    }
}
