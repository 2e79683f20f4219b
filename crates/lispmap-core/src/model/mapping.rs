// ── Mapping domain types ──

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use super::address::LispAddress;
use super::locator::{LocatorRecord, MappingSummary};

/// What a map-resolver does for EIDs covered by a negative mapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum MappingAction {
    #[default]
    NoAction,
    NativelyForward,
    SendMapRequest,
    Drop,
}

/// A mapping row: one EID and its locator set, within one VNI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub vni: u32,
    pub eid_uri: String,
    pub origin: Option<String>,
    pub eid: LispAddress,
    pub record_ttl: Option<u32>,
    pub action: MappingAction,
    pub authoritative: bool,
    pub map_version: Option<i16>,
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    pub site_id: Option<String>,
    pub xtr_id: Option<String>,
    pub locators: Vec<LocatorRecord>,
    pub summary: MappingSummary,

    /// The mapping record exactly as the store returned it.
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub raw: Value,
}

impl MappingEntry {
    /// A mapping without locators.
    pub fn is_negative(&self) -> bool {
        self.locators.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn action_parses_case_insensitively() {
        assert_eq!(
            MappingAction::from_str("nativelyforward").unwrap(),
            MappingAction::NativelyForward
        );
        assert_eq!(MappingAction::from_str("Drop").unwrap(), MappingAction::Drop);
        assert!(MappingAction::from_str("Forward").is_err());
    }

    #[test]
    fn action_display_matches_wire_name() {
        assert_eq!(MappingAction::SendMapRequest.to_string(), "SendMapRequest");
    }
}
