// ── Typed request structs for Command payloads ──

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

use crate::convert::address_from_wire;
use crate::model::{LispAddress, LocatorRecord, MappingAction};

/// Instance-id mask used when wrapping an EID into its VNI.
pub const IID_MASK_LENGTH: u8 = 32;

/// Place an EID in its overlay instance: non-zero VNIs are sent as an
/// instance-id LCAF unless the EID already is one.
pub fn scope_to_vni(eid: &LispAddress, vni: u32) -> LispAddress {
    if vni == 0 {
        eid.clone()
    } else {
        eid.clone().with_instance_id(vni, IID_MASK_LENGTH)
    }
}

/// Request files accept an address either in display form
/// (`"ipv4:10.0.0.0/24"`, `"[5] 10.0.0.1/32"`) or as a tagged wire object.
fn display_or_wire<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LispAddress, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => text.parse().map_err(D::Error::custom),
        other => Ok(address_from_wire(&other)),
    }
}

// ── Lookups ────────────────────────────────────────────────────────

/// `get-*` / `remove-*` input: the EID exactly as given.
#[derive(Debug, Clone, Deserialize)]
pub struct EidRequest {
    #[serde(deserialize_with = "display_or_wire")]
    pub eid: LispAddress,
}

impl EidRequest {
    pub fn new(eid: LispAddress) -> Self {
        Self { eid }
    }
}

// ── Keys ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct KeyRequest {
    #[serde(deserialize_with = "display_or_wire")]
    pub eid: LispAddress,
    #[serde(default)]
    pub vni: u32,
    #[serde(default = "default_key_type")]
    pub key_type: u16,
    pub key_string: SecretString,
}

fn default_key_type() -> u16 {
    1
}

impl KeyRequest {
    pub fn wire_eid(&self) -> LispAddress {
        scope_to_vni(&self.eid, self.vni)
    }
}

// ── Mappings ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LocatorRequest {
    #[serde(deserialize_with = "display_or_wire")]
    pub rloc: LispAddress,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default = "default_weight")]
    pub weight: u8,
    #[serde(default = "default_multicast_priority")]
    pub multicast_priority: u8,
    #[serde(default)]
    pub multicast_weight: u8,
    #[serde(default)]
    pub local_locator: bool,
    #[serde(default)]
    pub rloc_probed: bool,
    #[serde(default = "default_routed")]
    pub routed: bool,
}

fn default_priority() -> u8 {
    1
}

fn default_weight() -> u8 {
    100
}

fn default_multicast_priority() -> u8 {
    255
}

fn default_routed() -> bool {
    true
}

impl LocatorRequest {
    pub fn new(rloc: LispAddress) -> Self {
        Self {
            rloc,
            priority: default_priority(),
            weight: default_weight(),
            multicast_priority: default_multicast_priority(),
            multicast_weight: 0,
            local_locator: false,
            rloc_probed: false,
            routed: default_routed(),
        }
    }
}

impl From<&LocatorRequest> for LocatorRecord {
    fn from(r: &LocatorRequest) -> Self {
        LocatorRecord {
            locator_id: None,
            address: r.rloc.clone(),
            priority: r.priority,
            weight: r.weight,
            multicast_priority: r.multicast_priority,
            multicast_weight: r.multicast_weight,
            local_locator: r.local_locator,
            rloc_probed: r.rloc_probed,
            routed: r.routed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingRequest {
    #[serde(deserialize_with = "display_or_wire")]
    pub eid: LispAddress,
    #[serde(default)]
    pub vni: u32,
    #[serde(default)]
    pub record_ttl: Option<u32>,
    #[serde(default)]
    pub action: MappingAction,
    #[serde(default)]
    pub authoritative: bool,
    #[serde(default)]
    pub locators: Vec<LocatorRequest>,
}

impl MappingRequest {
    pub fn wire_eid(&self) -> LispAddress {
        scope_to_vni(&self.eid, self.vni)
    }

    pub fn locator_records(&self) -> Vec<LocatorRecord> {
        self.locators.iter().map(LocatorRecord::from).collect()
    }
}
