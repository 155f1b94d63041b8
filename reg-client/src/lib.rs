//! # regsync-client
//!
//! Client library for offline-first registration sync.
//!
//! # Architecture
//!
//! The application writes registrations into the durable queue
//! (`regsync-store`), always local-first. [`SyncOrchestrator`] drains the
//! queue against the remote endpoint via the [`RegistrationApi`] trait, one
//! record at a time, with per-record failure isolation and at-least-once
//! delivery. The reachability monitor turns offline→online transitions into
//! sync triggers.
//!
//! ```text
//! Form submission → QueueStore (durable, works offline)
//!                        ↓
//! online event / manual trigger → SyncOrchestrator → RegistrationApi → REST
//! ```
//!
//! # Example
//!
//! ```ignore
//! use regsync_client::{MockRegistrationApi, SyncOrchestrator, SyncOutcome};
//! use regsync_store::SqliteQueueStore;
//!
//! let store = SqliteQueueStore::new("queue.db".as_ref()).await?;
//! let api = MockRegistrationApi::new();
//! let orchestrator = SyncOrchestrator::new(store, api, Duration::from_secs(30));
//!
//! store.enqueue(payload).await?;        // works offline
//! let outcome = orchestrator.sync_pass().await?;  // drains when online
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod error;
pub mod monitor;
pub mod orchestrator;

pub use api::{ApiError, HttpRegistrationApi, MockRegistrationApi, RegistrationApi};
pub use config::{Config, ConfigError, EndpointConfig, StorageConfig};
pub use error::ClientError;
pub use monitor::{spawn_monitor, ReachabilitySignal, WatchSignal};
pub use orchestrator::{SyncOrchestrator, SyncOutcome};
