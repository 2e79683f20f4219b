// ── Table view state ──
//
// Per-table row state, status banner and load generation. State lives in
// a `watch` channel so any consumer can subscribe to changes without
// sharing locks with the loader.

mod status;
mod table;

pub use status::{SUCCESS_BANNER_TTL, StatusBanner, StatusKind};
pub use table::{LoadTicket, Panel, TableRow, TableSnapshot, TableView};
