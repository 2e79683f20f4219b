// RESTCONF wire types for `odl-mappingservice`.
//
// Field names follow the store's JSON encoding exactly (a mix of
// kebab-case YANG leaves and camelCase legacy leaves). Addresses stay as
// raw `serde_json::Value` here: decoding the LISP address union is the
// job of `lispmap-core`, and keeping the raw form lets callers pass a
// stored EID back to the store untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Config datastore ────────────────────────────────────────────────

/// Top-level document returned by
/// `GET /restconf/config/odl-mappingservice:mapping-database`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MappingDatabaseDocument {
    #[serde(rename = "mapping-database", default)]
    pub mapping_database: MappingDatabase,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MappingDatabase {
    #[serde(rename = "virtual-network-identifier", default)]
    pub virtual_networks: Vec<VirtualNetwork>,
}

/// One overlay instance and everything registered under it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualNetwork {
    #[serde(alias = "iid")]
    pub vni: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mapping: Vec<MappingWire>,
    #[serde(
        rename = "authentication-key",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub authentication_keys: Vec<AuthenticationKey>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingWire {
    #[serde(rename = "eid-uri")]
    pub eid_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(rename = "mapping-record")]
    pub mapping_record: MappingRecordWire,
}

/// An EID-to-locator-set record.
///
/// Unknown leaves are preserved in `extra` so a record can be echoed back
/// to the store (or shown in a detail view) without losing data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingRecordWire {
    pub eid: Value,
    #[serde(
        rename = "recordTtl",
        alias = "record-ttl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub record_ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authoritative: Option<bool>,
    #[serde(
        rename = "mapVersion",
        alias = "map-version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub map_version: Option<i16>,
    /// Registration time in milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(rename = "site-id", default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(rename = "xtr-id", default, skip_serializing_if = "Option::is_none")]
    pub xtr_id: Option<String>,
    #[serde(
        rename = "LocatorRecord",
        alias = "locator-record",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub locator_records: Vec<LocatorRecordWire>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocatorRecordWire {
    #[serde(rename = "locator-id", default, skip_serializing_if = "Option::is_none")]
    pub locator_id: Option<String>,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub weight: u8,
    #[serde(rename = "multicastPriority", default)]
    pub multicast_priority: u8,
    #[serde(rename = "multicastWeight", default)]
    pub multicast_weight: u8,
    #[serde(rename = "localLocator", default)]
    pub local_locator: bool,
    #[serde(rename = "rlocProbed", default)]
    pub rloc_probed: bool,
    #[serde(default)]
    pub routed: bool,
    pub rloc: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthenticationKey {
    #[serde(rename = "eid-uri")]
    pub eid_uri: String,
    pub eid: Value,
    #[serde(rename = "mapping-authkey")]
    pub mapping_authkey: MappingAuthKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingAuthKey {
    #[serde(rename = "key-type", default)]
    pub key_type: u16,
    #[serde(rename = "key-string", default)]
    pub key_string: String,
}

// ── RPC envelopes ───────────────────────────────────────────────────

/// `{ "input": { ... } }` request body for every RESTCONF operation.
#[derive(Debug, Clone, Serialize)]
pub struct RpcInput<T> {
    pub input: T,
}

/// `{ "output": { ... } }` response body. Some RPCs answer `{}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcOutput<T> {
    #[serde(default)]
    pub output: T,
}

/// Input of operations addressed by EID only (`get-*`, `remove-*`).
#[derive(Debug, Clone, Serialize)]
pub struct EidInput {
    pub eid: Value,
}

/// Input of `add-key` / `update-key`.
#[derive(Debug, Clone, Serialize)]
pub struct KeyInput {
    pub eid: Value,
    #[serde(rename = "mapping-authkey")]
    pub mapping_authkey: MappingAuthKey,
}

/// Input of `add-mapping` / `update-mapping`.
#[derive(Debug, Clone, Serialize)]
pub struct MappingInput {
    #[serde(rename = "mapping-record")]
    pub mapping_record: MappingRecordWire,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetKeyOutput {
    #[serde(rename = "mapping-authkey", default)]
    pub mapping_authkey: Option<MappingAuthKey>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetMappingOutput {
    #[serde(rename = "mapping-record", default)]
    pub mapping_record: Option<MappingRecordWire>,
}

// ── Error document ──────────────────────────────────────────────────

/// `{"errors":{"error":[{"error-type":..,"error-tag":..,"error-message":..}]}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDocument {
    pub errors: ErrorList,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorList {
    #[serde(default)]
    pub error: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEntry {
    #[serde(rename = "error-tag", default)]
    pub error_tag: Option<String>,
    #[serde(rename = "error-message", default)]
    pub error_message: Option<String>,
}

impl ErrorDocument {
    /// Server messages in document order, falling back to the error tag
    /// when an entry carries no message.
    pub(crate) fn messages(self) -> Vec<String> {
        self.errors
            .error
            .into_iter()
            .filter_map(|e| e.error_message.or(e.error_tag))
            .collect()
    }
}
