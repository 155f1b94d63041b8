//! Delete entries the server has already confirmed.

use anyhow::Result;
use regsync_client::Config;
use regsync_store::QueueStore;

/// Run the prune command.
pub async fn run(config: &Config) -> Result<()> {
    let store = super::open_store(config).await?;
    let removed = store.prune_synced().await?;

    if removed == 0 {
        println!("Nothing to prune.");
    } else {
        println!("Pruned {removed} synced registration(s).");
    }

    Ok(())
}
