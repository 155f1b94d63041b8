//! # regsync-types
//!
//! Foundational types for the regsync offline-first registration sync engine.
//!
//! This crate provides the types shared across all regsync crates:
//! - [`LocalId`], [`RegistrationId`] - Local and server-assigned identifiers
//! - [`RegistrationPayload`] - The registration record captured on the device
//! - [`QueueEntry`] - One locally persisted, not-yet-confirmed submission
//! - [`CreateRegistration`], [`CreatedRegistration`], [`RejectionBody`] - Wire bodies
//! - [`CodecError`] - Payload (de)serialization errors

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entry;
mod error;
mod ids;
mod payload;
mod wire;

pub use entry::QueueEntry;
pub use error::CodecError;
pub use ids::{LocalId, RegistrationId};
pub use payload::{Guardian, RegistrationPayload, SubjectScore};
pub use wire::{CreateRegistration, CreatedRegistration, RejectionBody};
