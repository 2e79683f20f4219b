//! Domain layer between `lispmap-api` and UI consumers (the CLI).
//!
//! This crate owns the LISP address model, its display codec, locator
//! selection, and the per-table view state that used to live in the
//! browser controllers:
//!
//! - **[`LispAddress`]** - Sum type over every address family and LCAF
//!   encoding the store uses. [`codec`] renders it to the canonical
//!   display string (`ipv4:10.0.0.1`, `[5] ipv4:10.0.0.1/32`, …), parses
//!   the scalar forms back, and rebuilds delete payloads from a row.
//!
//! - **[`LocatorRecord`]** / [`select_primary`] - Picks the primary RLOC
//!   of a mapping (lowest priority, then highest weight) and derives the
//!   flags / TTL / locator summary strings shown in tables.
//!
//! - **[`MappingService`]** - Facade over the RESTCONF client: loads the
//!   mapping database into [`TableView`]s, runs typed [`Command`]s, and
//!   sequences deletes as resolve → remove → reload.
//!
//! - **[`TableView`]** - Row state (detail / delete panels), the status
//!   banner, and a load generation that drops stale responses.

pub mod codec;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod pretty;
pub mod service;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use codec::{CodecError, Deletable, DeleteRequest, build_delete_payload, render};
pub use command::requests::*;
pub use command::{Command, CommandResult};
pub use config::{ServiceConfig, TlsVerification};
pub use error::CoreError;
pub use service::MappingService;
pub use store::{Panel, StatusBanner, StatusKind, TableRow, TableSnapshot, TableView};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ApplicationData, Hop, KeyEntry, LispAddress, LocatorRecord, MappingAction, MappingEntry,
    MappingSummary, SourceDestKey, select_primary,
};
