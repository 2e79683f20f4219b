// ── Wire-to-domain conversions ──
//
// Bridges raw `lispmap_api` records and `ietf-lisp-address-types` JSON
// into `crate::model` types, and back. Decoding never fails: anything
// that does not decode becomes `LispAddress::Unrenderable`, logged once
// here so callers can render it without special-casing.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use tracing::warn;

use lispmap_api::{AuthenticationKey, LocatorRecordWire, MappingRecordWire, MappingWire};

use crate::model::{
    ApplicationData, Hop, KeyEntry, LispAddress, LocatorRecord, MappingAction, MappingEntry,
    MappingSummary, SourceDestKey,
};

const TYPE_MODULE: &str = "ietf-lisp-address-types";

/// Payload keys recognised when an object carries no `address-type`.
const PAYLOAD_KEYS: &[&str] = &[
    "no-address",
    "ipv4",
    "ipv4-prefix",
    "ipv6",
    "ipv6-prefix",
    "mac",
    "distinguished-name",
    "as-number",
    "afi-list",
    "instance-id",
    "application-data",
    "explicit-locator-path",
    "source-dest-key",
    "key-value-address",
];

// ── Address decoding ────────────────────────────────────────────────

/// `ietf-lisp-address-types:ipv4-prefix-afi` → `ipv4-prefix`.
pub fn normalize_address_type(address_type: &str) -> &str {
    let local = address_type
        .rsplit_once(':')
        .map_or(address_type, |(_, name)| name);
    local
        .strip_suffix("-afi")
        .or_else(|| local.strip_suffix("-lcaf"))
        .unwrap_or(local)
}

/// Decode a wire address: a tagged object, or a bare "simple address".
pub fn address_from_wire(value: &Value) -> LispAddress {
    match value {
        Value::String(s) => LispAddress::from_simple_str(s),
        Value::Number(n) => match n.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(asn) => LispAddress::AsNumber(asn),
            None => unrenderable("as-number", "AS number out of range", value),
        },
        Value::Object(map) => decode_object(map, value),
        _ => unrenderable("", "not an address", value),
    }
}

fn decode_object(map: &Map<String, Value>, value: &Value) -> LispAddress {
    let tag = match map.get("address-type").and_then(Value::as_str) {
        Some(address_type) => normalize_address_type(address_type),
        None => match PAYLOAD_KEYS.iter().copied().find(|k| map.contains_key(*k)) {
            Some(key) => key,
            None => return unrenderable("", "missing address-type", value),
        },
    };

    if tag == "no-address" {
        return LispAddress::NoAddress;
    }
    let Some(payload) = map.get(tag) else {
        return unrenderable(tag, "missing payload", value);
    };

    decode_tagged(tag, payload).unwrap_or_else(|reason| unrenderable(tag, &reason, value))
}

fn decode_tagged(tag: &str, payload: &Value) -> Result<LispAddress, String> {
    match tag {
        "ipv4" | "ipv4-prefix" => match LispAddress::from_simple_str(as_str(payload)?) {
            v4 @ LispAddress::Ipv4 { .. } => Ok(v4),
            _ => Err(format!("not an IPv4 address: {payload}")),
        },
        "ipv6" | "ipv6-prefix" => match LispAddress::from_simple_str(as_str(payload)?) {
            v6 @ LispAddress::Ipv6 { .. } => Ok(v6),
            _ => Err(format!("not an IPv6 address: {payload}")),
        },
        "mac" => Ok(LispAddress::Mac(as_str(payload)?.to_owned())),
        "distinguished-name" => Ok(LispAddress::DistinguishedName(as_str(payload)?.to_owned())),
        "as-number" => payload
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(LispAddress::AsNumber)
            .ok_or_else(|| format!("not an AS number: {payload}")),
        "afi-list" => {
            let list: AfiListWire = from_payload(payload)?;
            Ok(LispAddress::AfiList(
                list.address_list.iter().map(address_from_wire).collect(),
            ))
        }
        "instance-id" => {
            let iid: InstanceIdWire = from_payload(payload)?;
            let inner = address_from_wire(&iid.address);
            // Without an explicit mask the inner prefix becomes the mask.
            let (address, mask_length) = match iid.mask_length {
                Some(mask) => (inner, mask),
                None => inner.split_prefix(),
            };
            Ok(LispAddress::InstanceId {
                iid: iid.iid,
                mask_length,
                address: Box::new(address),
            })
        }
        "application-data" => {
            let app: ApplicationDataWire = from_payload(payload)?;
            Ok(LispAddress::ApplicationData(Box::new(ApplicationData {
                address: address_from_wire(&app.address),
                ip_tos: app.ip_tos,
                protocol: app.protocol,
                local_port_low: app.local_port_low,
                local_port_high: app.local_port_high,
                remote_port_low: app.remote_port_low,
                remote_port_high: app.remote_port_high,
            })))
        }
        "explicit-locator-path" => {
            let elp: ElpWire = from_payload(payload)?;
            Ok(LispAddress::ExplicitLocatorPath(
                elp.hop
                    .into_iter()
                    .map(|h| Hop {
                        hop_id: h.hop_id,
                        address: address_from_wire(&h.address),
                        lrs_bits: h.lrs_bits,
                    })
                    .collect(),
            ))
        }
        "source-dest-key" => {
            let sd: SourceDestWire = from_payload(payload)?;
            let (source, source_prefix) = address_from_wire(&sd.source).split_prefix();
            let (dest, dest_prefix) = address_from_wire(&sd.dest).split_prefix();
            Ok(LispAddress::SourceDest(Box::new(SourceDestKey {
                source,
                source_mask_length: sd.source_mask_length.unwrap_or(source_prefix),
                dest,
                dest_mask_length: sd.dest_mask_length.unwrap_or(dest_prefix),
            })))
        }
        "key-value-address" => {
            let kv: KeyValueWire = from_payload(payload)?;
            Ok(LispAddress::KeyValue {
                key: Box::new(address_from_wire(&kv.key)),
                value: Box::new(address_from_wire(&kv.value)),
            })
        }
        other => Err(format!("unsupported address type '{other}'")),
    }
}

fn as_str(payload: &Value) -> Result<&str, String> {
    payload
        .as_str()
        .ok_or_else(|| format!("expected a string, got {payload}"))
}

fn from_payload<T: DeserializeOwned>(payload: &Value) -> Result<T, String> {
    T::deserialize(payload).map_err(|e| e.to_string())
}

fn unrenderable(address_type: &str, reason: &str, raw: &Value) -> LispAddress {
    warn!(address_type, reason, "unrenderable LISP address");
    LispAddress::Unrenderable {
        address_type: address_type.to_owned(),
        reason: reason.to_owned(),
        raw: raw.clone(),
    }
}

// ── LCAF payload shapes ─────────────────────────────────────────────

#[derive(Deserialize)]
struct AfiListWire {
    #[serde(rename = "address-list", alias = "address")]
    address_list: Vec<Value>,
}

#[derive(Deserialize)]
struct InstanceIdWire {
    iid: u32,
    #[serde(rename = "mask-length", default)]
    mask_length: Option<u8>,
    address: Value,
}

#[derive(Deserialize)]
struct ApplicationDataWire {
    address: Value,
    #[serde(rename = "ip-tos", alias = "ipTos", default)]
    ip_tos: u32,
    #[serde(default)]
    protocol: u8,
    #[serde(rename = "local-port-low", alias = "localPortLow", default)]
    local_port_low: u16,
    #[serde(rename = "local-port-high", alias = "localPortHigh", default)]
    local_port_high: u16,
    #[serde(rename = "remote-port-low", alias = "remotePortLow", default)]
    remote_port_low: u16,
    #[serde(rename = "remote-port-high", alias = "remotePortHigh", default)]
    remote_port_high: u16,
}

#[derive(Deserialize)]
struct ElpWire {
    #[serde(default)]
    hop: Vec<HopWire>,
}

#[derive(Deserialize)]
struct HopWire {
    #[serde(rename = "hop-id", default)]
    hop_id: Option<String>,
    address: Value,
    #[serde(rename = "lrs-bits", default)]
    lrs_bits: Option<String>,
}

#[derive(Deserialize)]
struct SourceDestWire {
    source: Value,
    dest: Value,
    #[serde(rename = "source-mask-length", default)]
    source_mask_length: Option<u8>,
    #[serde(rename = "dest-mask-length", default)]
    dest_mask_length: Option<u8>,
}

#[derive(Deserialize)]
struct KeyValueWire {
    key: Value,
    value: Value,
}

// ── Address encoding ────────────────────────────────────────────────

/// Encode an address as a fully tagged wire object, at every nesting level.
///
/// `Unrenderable` addresses are echoed back exactly as they arrived.
pub fn address_to_wire(address: &LispAddress) -> Value {
    match address {
        LispAddress::NoAddress => tagged("no-address-afi", "no-address", json!(true)),
        LispAddress::Ipv4 { addr, prefix: None } => tagged("ipv4-afi", "ipv4", json!(addr)),
        LispAddress::Ipv4 {
            addr,
            prefix: Some(p),
        } => tagged("ipv4-prefix-afi", "ipv4-prefix", json!(format!("{addr}/{p}"))),
        LispAddress::Ipv6 { addr, prefix: None } => tagged("ipv6-afi", "ipv6", json!(addr)),
        LispAddress::Ipv6 {
            addr,
            prefix: Some(p),
        } => tagged("ipv6-prefix-afi", "ipv6-prefix", json!(format!("{addr}/{p}"))),
        LispAddress::Mac(mac) => tagged("mac-afi", "mac", json!(mac)),
        LispAddress::DistinguishedName(dn) => {
            tagged("distinguished-name-afi", "distinguished-name", json!(dn))
        }
        LispAddress::AsNumber(asn) => tagged("as-number-afi", "as-number", json!(asn)),
        LispAddress::AfiList(list) => tagged(
            "afi-list-lcaf",
            "afi-list",
            json!({ "address-list": list.iter().map(address_to_wire).collect::<Vec<_>>() }),
        ),
        LispAddress::InstanceId {
            iid,
            mask_length,
            address,
        } => tagged(
            "instance-id-lcaf",
            "instance-id",
            json!({
                "address": address_to_wire(address),
                "iid": iid,
                "mask-length": mask_length,
            }),
        ),
        LispAddress::ApplicationData(app) => tagged(
            "application-data-lcaf",
            "application-data",
            json!({
                "address": address_to_wire(&app.address),
                "ip-tos": app.ip_tos,
                "local-port-high": app.local_port_high,
                "local-port-low": app.local_port_low,
                "protocol": app.protocol,
                "remote-port-high": app.remote_port_high,
                "remote-port-low": app.remote_port_low,
            }),
        ),
        LispAddress::ExplicitLocatorPath(hops) => {
            let hops: Vec<Value> = hops
                .iter()
                .map(|h| {
                    let mut hop = Map::new();
                    hop.insert("address".into(), address_to_wire(&h.address));
                    if let Some(id) = &h.hop_id {
                        hop.insert("hop-id".into(), json!(id));
                    }
                    if let Some(bits) = &h.lrs_bits {
                        hop.insert("lrs-bits".into(), json!(bits));
                    }
                    Value::Object(hop)
                })
                .collect();
            tagged(
                "explicit-locator-path-lcaf",
                "explicit-locator-path",
                json!({ "hop": hops }),
            )
        }
        LispAddress::SourceDest(sd) => tagged(
            "source-dest-key-lcaf",
            "source-dest-key",
            json!({
                "dest": address_to_wire(&sd.dest),
                "dest-mask-length": sd.dest_mask_length,
                "source": address_to_wire(&sd.source),
                "source-mask-length": sd.source_mask_length,
            }),
        ),
        LispAddress::KeyValue { key, value } => tagged(
            "key-value-address-lcaf",
            "key-value-address",
            json!({ "key": address_to_wire(key), "value": address_to_wire(value) }),
        ),
        LispAddress::Unrenderable { raw, .. } => raw.clone(),
    }
}

fn tagged(address_type: &str, key: &str, payload: Value) -> Value {
    let mut map = Map::new();
    map.insert(
        "address-type".into(),
        Value::String(format!("{TYPE_MODULE}:{address_type}")),
    );
    map.insert(key.into(), payload);
    Value::Object(map)
}

impl Serialize for LispAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        address_to_wire(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LispAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(address_from_wire(&value))
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// Map the wire `action` leaf; unknown values fall back to `NoAction`.
pub fn parse_action(action: Option<&str>) -> MappingAction {
    match action {
        None => MappingAction::NoAction,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(action = raw, "unknown mapping action, treating as NoAction");
            MappingAction::NoAction
        }),
    }
}

impl From<LocatorRecordWire> for LocatorRecord {
    fn from(l: LocatorRecordWire) -> Self {
        LocatorRecord {
            locator_id: l.locator_id,
            address: address_from_wire(&l.rloc),
            priority: l.priority,
            weight: l.weight,
            multicast_priority: l.multicast_priority,
            multicast_weight: l.multicast_weight,
            local_locator: l.local_locator,
            rloc_probed: l.rloc_probed,
            routed: l.routed,
        }
    }
}

impl From<&LocatorRecord> for LocatorRecordWire {
    fn from(l: &LocatorRecord) -> Self {
        LocatorRecordWire {
            locator_id: l.locator_id.clone(),
            priority: l.priority,
            weight: l.weight,
            multicast_priority: l.multicast_priority,
            multicast_weight: l.multicast_weight,
            local_locator: l.local_locator,
            rloc_probed: l.rloc_probed,
            routed: l.routed,
            rloc: address_to_wire(&l.address),
        }
    }
}

/// Registration timestamps are milliseconds since the epoch.
fn millis_to_datetime(ms: Option<i64>) -> Option<DateTime<Utc>> {
    ms.and_then(DateTime::from_timestamp_millis)
}

/// Decorate a stored mapping with its decoded EID, locators and summary.
pub fn mapping_from_wire(vni: u32, wire: MappingWire) -> MappingEntry {
    let raw = serde_json::to_value(&wire.mapping_record).unwrap_or(Value::Null);
    let record = wire.mapping_record;

    let action = parse_action(record.action.as_deref());
    let locators: Vec<LocatorRecord> = record
        .locator_records
        .into_iter()
        .map(LocatorRecord::from)
        .collect();
    let summary = MappingSummary::from_locators(&locators, action);

    MappingEntry {
        vni,
        eid_uri: wire.eid_uri,
        origin: wire.origin,
        eid: address_from_wire(&record.eid),
        record_ttl: record.record_ttl,
        action,
        authoritative: record.authoritative.unwrap_or(false),
        map_version: record.map_version,
        timestamp: millis_to_datetime(record.timestamp),
        site_id: record.site_id,
        xtr_id: record.xtr_id,
        locators,
        summary,
        raw,
    }
}

/// Decorate a stored key; the secret is masked in `raw`.
pub fn key_from_wire(vni: u32, wire: AuthenticationKey) -> KeyEntry {
    let mut raw = serde_json::to_value(&wire).unwrap_or(Value::Null);
    if let Some(authkey) = raw.get_mut("mapping-authkey").and_then(Value::as_object_mut) {
        authkey.insert("key-string".into(), json!("****"));
    }

    KeyEntry {
        vni,
        eid_uri: wire.eid_uri,
        eid: address_from_wire(&wire.eid),
        key_type: wire.mapping_authkey.key_type,
        key_string: wire.mapping_authkey.key_string.into(),
        raw,
    }
}

/// Build the `mapping-record` of an add/update request.
pub fn mapping_record_to_wire(
    eid: &LispAddress,
    record_ttl: Option<u32>,
    action: MappingAction,
    authoritative: bool,
    locators: &[LocatorRecord],
) -> MappingRecordWire {
    MappingRecordWire {
        eid: address_to_wire(eid),
        record_ttl,
        action: Some(action.to_string()),
        authoritative: Some(authoritative),
        map_version: None,
        timestamp: None,
        site_id: None,
        xtr_id: None,
        locator_records: locators.iter().map(LocatorRecordWire::from).collect(),
        extra: Map::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::command::requests::scope_to_vni;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_type_names() {
        assert_eq!(
            normalize_address_type("ietf-lisp-address-types:ipv4-prefix-afi"),
            "ipv4-prefix"
        );
        assert_eq!(normalize_address_type("instance-id-lcaf"), "instance-id");
        assert_eq!(normalize_address_type("x:y:mac-afi"), "mac");
    }

    #[test]
    fn decodes_tagged_scalar() {
        let addr = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
            "ipv4-prefix": "10.0.0.0/24",
            "virtual-network-id": 0
        }));
        assert_eq!(addr.to_string(), "ipv4:10.0.0.0/24");
    }

    #[test]
    fn decodes_instance_id_with_simple_address() {
        let addr = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:instance-id-lcaf",
            "instance-id": { "iid": 5, "mask-length": 32, "address": "10.0.0.1" }
        }));
        assert_eq!(addr.to_string(), "[5] ipv4:10.0.0.1/32");
    }

    #[test]
    fn instance_id_prefix_moves_into_mask() {
        let addr = address_from_wire(&json!({
            "address-type": "instance-id-lcaf",
            "instance-id": { "iid": 3, "address": "10.1.0.0/16" }
        }));
        assert_eq!(addr.to_string(), "[3] ipv4:10.1.0.0/16");
    }

    #[test]
    fn instance_id_mask_keeps_inner_prefix() {
        let scoped = scope_to_vni(&LispAddress::from_simple_str("10.0.0.0/24"), 7);
        let decoded = address_from_wire(&address_to_wire(&scoped));
        assert_eq!(decoded, scoped);
        assert_eq!(decoded.to_string(), "[7] ipv4:10.0.0.0/24/32");
    }

    #[test]
    fn afi_list_accepts_address_key() {
        let list = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:afi-list-lcaf",
            "afi-list": { "address": ["1.1.1.1", "2.2.2.2"] }
        }));
        assert_eq!(list.to_string(), "list:{ipv4:1.1.1.1,ipv4:2.2.2.2}");
    }

    #[test]
    fn afi_list_without_addresses_is_unrenderable() {
        let list = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:afi-list-lcaf",
            "afi-list": {}
        }));
        assert!(matches!(list, LispAddress::Unrenderable { ref address_type, .. } if address_type == "afi-list"));
    }

    #[test]
    fn decodes_nested_lcafs() {
        let list = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:afi-list-lcaf",
            "afi-list": { "address-list": ["1.1.1.1", "2.2.2.2"] }
        }));
        assert_eq!(list.to_string(), "list:{ipv4:1.1.1.1,ipv4:2.2.2.2}");

        let sd = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:source-dest-key-lcaf",
            "source-dest-key": { "source": "10.0.0.0/8", "dest": "20.0.0.1" }
        }));
        assert_eq!(sd.to_string(), "srcdst:ipv4:10.0.0.0/8|ipv4:20.0.0.1/32");

        let elp = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:explicit-locator-path-lcaf",
            "explicit-locator-path": { "hop": [
                { "hop-id": "h1", "address": "1.1.1.1", "lrs-bits": "strict" },
                { "hop-id": "h2", "address": "2.2.2.2" }
            ] }
        }));
        assert_eq!(elp.to_string(), "elp:{ipv4:1.1.1.1→ipv4:2.2.2.2}");

        let kv = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:key-value-address-lcaf",
            "key-value-address": { "key": "site-a", "value": 64512 }
        }));
        assert_eq!(kv.to_string(), "dn:site-a=>as:AS64512");
    }

    #[test]
    fn decodes_application_data_with_legacy_names() {
        let app = address_from_wire(&json!({
            "address-type": "application-data-lcaf",
            "application-data": {
                "address": "10.0.0.1", "ipTos": 1, "protocol": 17,
                "localPortLow": 53, "localPortHigh": 53,
                "remotePortLow": 1000, "remotePortHigh": 2000
            }
        }));
        assert_eq!(app.to_string(), "appdata:ipv4:10.0.0.1!1!17!53-53!1000-2000");
    }

    #[test]
    fn unknown_type_is_unrenderable_and_kept() {
        let raw = json!({
            "address-type": "ietf-lisp-address-types:ipv4-binary-afi",
            "ipv4-binary": "CgAAAQ=="
        });
        let addr = address_from_wire(&raw);
        assert_eq!(addr.to_string(), "unknown:ipv4-binary");
        assert_eq!(address_to_wire(&addr), raw);
    }

    #[test]
    fn malformed_payload_is_unrenderable() {
        let addr = address_from_wire(&json!({
            "address-type": "ietf-lisp-address-types:ipv4-afi",
            "ipv4": "not-an-ip"
        }));
        assert!(matches!(addr, LispAddress::Unrenderable { ref address_type, .. } if address_type == "ipv4"));
    }

    #[test]
    fn encodes_instance_id_fully_tagged() {
        let addr = LispAddress::from_simple_str("10.0.0.1").with_instance_id(5, 32);
        insta::assert_json_snapshot!(address_to_wire(&addr), @r#"
        {
          "address-type": "ietf-lisp-address-types:instance-id-lcaf",
          "instance-id": {
            "address": {
              "address-type": "ietf-lisp-address-types:ipv4-afi",
              "ipv4": "10.0.0.1"
            },
            "iid": 5,
            "mask-length": 32
          }
        }
        "#);
    }

    #[test]
    fn wire_round_trip_preserves_lcaf() {
        let original = LispAddress::AfiList(vec![
            LispAddress::from_simple_str("1.1.1.1"),
            LispAddress::Mac("aa:bb:cc:dd:ee:ff".into()),
        ]);
        assert_eq!(address_from_wire(&address_to_wire(&original)), original);
    }

    #[test]
    fn unknown_action_defaults() {
        assert_eq!(parse_action(Some("Drop")), MappingAction::Drop);
        assert_eq!(parse_action(Some("Bounce")), MappingAction::NoAction);
        assert_eq!(parse_action(None), MappingAction::NoAction);
    }

    #[test]
    fn mapping_summary_is_derived() {
        let wire: MappingWire = serde_json::from_value(json!({
            "eid-uri": "ipv4:10.0.0.0/24",
            "origin": "northbound",
            "mapping-record": {
                "eid": { "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
                         "ipv4-prefix": "10.0.0.0/24" },
                "recordTtl": 1440,
                "action": "NoAction",
                "authoritative": true,
                "timestamp": 1_700_000_000_000_i64,
                "LocatorRecord": [
                    { "locator-id": "a", "priority": 2, "weight": 10,
                      "multicastPriority": 255, "multicastWeight": 0,
                      "localLocator": true, "rlocProbed": false, "routed": true,
                      "rloc": { "address-type": "ietf-lisp-address-types:ipv4-afi",
                                "ipv4": "192.0.2.1" } },
                    { "locator-id": "b", "priority": 1, "weight": 10,
                      "multicastPriority": 255, "multicastWeight": 0,
                      "localLocator": false, "rlocProbed": true, "routed": true,
                      "rloc": { "address-type": "ietf-lisp-address-types:ipv4-afi",
                                "ipv4": "192.0.2.2" } }
                ]
            }
        }))
        .unwrap();

        let entry = mapping_from_wire(0, wire);
        assert_eq!(entry.eid.to_string(), "ipv4:10.0.0.0/24");
        assert_eq!(entry.summary.locator_string, "ipv4:192.0.2.2 (+1)");
        assert_eq!(entry.summary.flags, "Probed | Up");
        assert_eq!(entry.summary.ttl, "1/10/255/0");
        assert!(entry.timestamp.is_some());
        assert_eq!(entry.raw["recordTtl"], json!(1440));
    }

    #[test]
    fn key_raw_is_masked() {
        let wire: AuthenticationKey = serde_json::from_value(json!({
            "eid-uri": "ipv4:10.0.0.1/32",
            "eid": { "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
                     "ipv4-prefix": "10.0.0.1/32" },
            "mapping-authkey": { "key-type": 1, "key-string": "secret" }
        }))
        .unwrap();

        let key = key_from_wire(7, wire);
        assert_eq!(key.expose_key(), "secret");
        assert_eq!(key.raw["mapping-authkey"]["key-string"], json!("****"));
        assert_eq!(key.vni, 7);
    }
}
