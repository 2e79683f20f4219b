// ── Locator records and primary-locator selection ──

use serde::{Deserialize, Serialize};

use super::address::LispAddress;
use super::mapping::MappingAction;
use crate::error::CoreError;

/// One RLOC of a mapping, with its traffic-engineering attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorRecord {
    pub locator_id: Option<String>,
    pub address: LispAddress,
    pub priority: u8,
    pub weight: u8,
    pub multicast_priority: u8,
    pub multicast_weight: u8,
    pub local_locator: bool,
    pub rloc_probed: bool,
    pub routed: bool,
}

impl LocatorRecord {
    /// A routed locator with neutral priorities.
    pub fn new(address: LispAddress) -> Self {
        Self {
            locator_id: None,
            address,
            priority: 1,
            weight: 100,
            multicast_priority: 255,
            multicast_weight: 0,
            local_locator: false,
            rloc_probed: false,
            routed: true,
        }
    }
}

/// Pick the primary locator: lowest priority wins, ties go to the higher
/// weight, and a full tie keeps the earlier record.
pub fn select_primary(locators: &[LocatorRecord]) -> Result<&LocatorRecord, CoreError> {
    let (first, rest) = locators.split_first().ok_or_else(|| CoreError::InvalidInput {
        message: "cannot select a primary locator from an empty set".into(),
    })?;

    Ok(rest.iter().fold(first, |best, candidate| {
        if candidate.priority < best.priority
            || (candidate.priority == best.priority && candidate.weight > best.weight)
        {
            candidate
        } else {
            best
        }
    }))
}

/// `Local | Probed | Up`, listing only the flags that are set.
pub fn flags(locator: &LocatorRecord) -> String {
    [
        (locator.local_locator, "Local"),
        (locator.rloc_probed, "Probed"),
        (locator.routed, "Up"),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, label)| *label)
    .collect::<Vec<_>>()
    .join(" | ")
}

/// `priority/weight/multicastPriority/multicastWeight`.
pub fn ttl(locator: &LocatorRecord) -> String {
    format!(
        "{}/{}/{}/{}",
        locator.priority, locator.weight, locator.multicast_priority, locator.multicast_weight
    )
}

/// Table columns derived from a mapping's locator set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    pub locator_string: String,
    pub flags: String,
    pub ttl: String,
}

impl MappingSummary {
    /// Summarise the locator set; a negative mapping (no locators) shows
    /// its action instead.
    pub fn from_locators(locators: &[LocatorRecord], action: MappingAction) -> Self {
        let Ok(primary) = select_primary(locators) else {
            return Self {
                locator_string: action.to_string(),
                flags: String::new(),
                ttl: String::new(),
            };
        };

        let mut locator_string = primary.address.to_string();
        if locators.len() > 1 {
            locator_string.push_str(&format!(" (+{})", locators.len() - 1));
        }

        Self {
            locator_string,
            flags: flags(primary),
            ttl: ttl(primary),
        }
    }
}
