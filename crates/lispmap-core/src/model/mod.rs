// ── LISP domain model ──
//
// Canonical representations of what the mapping database stores. Raw
// RESTCONF types from `lispmap_api` are converted into these by
// `crate::convert`; consumers (the CLI) only ever see this module.

pub mod address;
pub mod key;
pub mod locator;
pub mod mapping;

// ── Re-exports ──────────────────────────────────────────────────────

pub use address::{ApplicationData, Hop, LispAddress, SourceDestKey};
pub use key::KeyEntry;
pub use locator::{LocatorRecord, MappingSummary, flags, select_primary, ttl};
pub use mapping::{MappingAction, MappingEntry};
