//! Push the backlog to the server now.

use anyhow::{Context, Result};
use regsync_client::{Config, HttpRegistrationApi, SyncOrchestrator, SyncOutcome};

/// Run the sync command.
pub async fn run(config: &Config) -> Result<()> {
    let store = super::open_store(config).await?;
    let api = HttpRegistrationApi::new(&config.endpoint.base_url, config.endpoint.request_timeout())
        .context("Failed to build registration client")?;

    let orchestrator = SyncOrchestrator::new(store, api, config.endpoint.request_timeout());

    match orchestrator.sync_pass().await? {
        SyncOutcome::Completed(report) => {
            println!("{report}");
            if !report.still_pending.is_empty() {
                println!("Run 'regsync sync' again once the problem is resolved.");
            }
        }
        SyncOutcome::Skipped => {
            println!("A sync is already in progress.");
        }
    }

    Ok(())
}
