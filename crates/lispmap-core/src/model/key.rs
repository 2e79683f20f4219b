// ── Authentication key domain type ──

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::address::LispAddress;

/// A shared secret registered for an EID prefix.
#[derive(Debug, Clone, Serialize)]
pub struct KeyEntry {
    pub vni: u32,
    pub eid_uri: String,
    pub eid: LispAddress,
    pub key_type: u16,
    #[serde(serialize_with = "redact")]
    pub key_string: SecretString,

    /// The stored key record with its secret already masked.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub raw: Value,
}

impl KeyEntry {
    /// The actual key, for callers that must send it back to the store.
    pub fn expose_key(&self) -> &str {
        self.key_string.expose_secret()
    }
}

fn redact<S: Serializer>(_: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str("****")
}
