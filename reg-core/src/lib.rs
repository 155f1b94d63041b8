//! # regsync-core
//!
//! Pure logic for regsync (no I/O, instant tests).
//!
//! This crate implements the state machines and bookkeeping for offline-first
//! registration sync without any network or disk I/O:
//!
//! - [`ReachabilityState`] decides when a connectivity signal is a genuine
//!   offline→online transition worth triggering a sync pass for.
//! - [`PassState`] is the Idle/Running value that keeps passes from
//!   overlapping.
//! - [`SyncReport`] aggregates the per-record outcomes of one pass.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. The actual I/O (storage, HTTP) is performed by
//! `regsync-client`, which owns instances of these types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pass;
pub mod reachability;

pub use pass::{PassState, RecordOutcome, SyncReport};
pub use reachability::{Reachability, ReachabilityState, Transition};
