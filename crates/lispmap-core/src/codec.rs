// ── Address display codec ──
//
// Canonical display strings for `LispAddress` (`ipv4:10.0.0.1`,
// `[5] ipv4:10.0.0.1/32`, `list:{…}`, …), the partial reverse direction
// for the scalar and instance-id forms, and delete-payload construction
// from a displayed row.

use std::fmt;
use std::str::FromStr;

use lispmap_api::Operation;
use serde_json::{Value, json};
use thiserror::Error;

use crate::convert::address_to_wire;
use crate::model::{KeyEntry, LispAddress, MappingEntry};
use crate::model::address::is_mac;

/// Failure to turn a display string into an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("empty address")]
    Empty,

    #[error("invalid {kind} address: {value}")]
    InvalidAddress { kind: &'static str, value: String },

    #[error("instance-id form needs a mask length: {0}")]
    MissingMask(String),

    #[error("cannot parse '{0}': only scalar and instance-id forms are accepted")]
    UnsupportedForm(String),
}

// ── Rendering ───────────────────────────────────────────────────────

/// Render an optional address; an absent address renders as `""`.
pub fn render(address: Option<&LispAddress>) -> String {
    address.map(ToString::to_string).unwrap_or_default()
}

impl fmt::Display for LispAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAddress => f.write_str("no:No Address Present"),
            Self::Ipv4 { addr, prefix } => write_ip(f, "ipv4", addr, *prefix),
            Self::Ipv6 { addr, prefix } => write_ip(f, "ipv6", addr, *prefix),
            Self::Mac(mac) => write!(f, "mac:{mac}"),
            Self::DistinguishedName(dn) => write!(f, "dn:{dn}"),
            Self::AsNumber(asn) => write!(f, "as:AS{asn}"),
            Self::AfiList(list) => {
                f.write_str("list:{")?;
                write_joined(f, list.iter(), ",")?;
                f.write_str("}")
            }
            Self::InstanceId {
                iid,
                mask_length,
                address,
            } => write!(f, "[{iid}] {address}/{mask_length}"),
            Self::ApplicationData(app) => write!(
                f,
                "appdata:{}!{}!{}!{}-{}!{}-{}",
                app.address,
                app.ip_tos,
                app.protocol,
                app.local_port_low,
                app.local_port_high,
                app.remote_port_low,
                app.remote_port_high
            ),
            Self::ExplicitLocatorPath(hops) => {
                f.write_str("elp:{")?;
                write_joined(f, hops.iter().map(|h| &h.address), "→")?;
                f.write_str("}")
            }
            Self::SourceDest(sd) => write!(
                f,
                "srcdst:{}/{}|{}/{}",
                sd.source, sd.source_mask_length, sd.dest, sd.dest_mask_length
            ),
            Self::KeyValue { key, value } => write!(f, "{key}=>{value}"),
            Self::Unrenderable { address_type, .. } => write!(f, "unknown:{address_type}"),
        }
    }
}

fn write_ip(
    f: &mut fmt::Formatter<'_>,
    tag: &str,
    addr: &dyn fmt::Display,
    prefix: Option<u8>,
) -> fmt::Result {
    write!(f, "{tag}:{addr}")?;
    if let Some(p) = prefix {
        write!(f, "/{p}")?;
    }
    Ok(())
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a LispAddress>,
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Display tags of the LCAF forms that only render one way.
const RENDER_ONLY_TAGS: &[&str] = &["list", "appdata", "elp", "srcdst", "unknown"];

impl FromStr for LispAddress {
    type Err = CodecError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CodecError::Empty);
        }

        if let Some(rest) = text.strip_prefix('[') {
            return parse_instance_id(text, rest);
        }
        if text.contains("=>") {
            return Err(CodecError::UnsupportedForm(text.to_owned()));
        }

        parse_scalar(text)
    }
}

/// Parse a display string. Same as `text.parse::<LispAddress>()`.
pub fn parse(text: &str) -> Result<LispAddress, CodecError> {
    text.parse()
}

fn parse_instance_id(text: &str, rest: &str) -> Result<LispAddress, CodecError> {
    let (iid, inner) = rest
        .split_once(']')
        .ok_or_else(|| CodecError::UnsupportedForm(text.to_owned()))?;
    let iid = iid.trim().parse::<u32>().map_err(|_| CodecError::InvalidAddress {
        kind: "instance-id",
        value: text.to_owned(),
    })?;

    let (address, mask) = inner
        .trim()
        .rsplit_once('/')
        .ok_or_else(|| CodecError::MissingMask(text.to_owned()))?;
    let mask_length = mask.parse::<u8>().map_err(|_| CodecError::InvalidAddress {
        kind: "instance-id",
        value: text.to_owned(),
    })?;

    let address = parse_scalar(address)?;
    Ok(address.with_instance_id(iid, mask_length))
}

fn parse_scalar(text: &str) -> Result<LispAddress, CodecError> {
    let Some((tag, value)) = text.split_once(':') else {
        return Ok(LispAddress::from_simple_str(text));
    };

    match tag {
        "no" => Ok(LispAddress::NoAddress),
        "ipv4" => match LispAddress::from_simple_str(value) {
            v4 @ LispAddress::Ipv4 { .. } => Ok(v4),
            _ => Err(invalid("ipv4", value)),
        },
        "ipv6" => match LispAddress::from_simple_str(value) {
            v6 @ LispAddress::Ipv6 { .. } => Ok(v6),
            _ => Err(invalid("ipv6", value)),
        },
        "mac" if is_mac(value) => Ok(LispAddress::Mac(value.to_owned())),
        "mac" => Err(invalid("mac", value)),
        "dn" if !value.is_empty() => Ok(LispAddress::DistinguishedName(value.to_owned())),
        "dn" => Err(invalid("dn", value)),
        "as" => value
            .strip_prefix("AS")
            .unwrap_or(value)
            .parse()
            .map(LispAddress::AsNumber)
            .map_err(|_| invalid("as", value)),
        t if RENDER_ONLY_TAGS.contains(&t) => Err(CodecError::UnsupportedForm(text.to_owned())),
        // Bare IPv6 text (`2001:db8::1`) also splits on ':'.
        _ => Ok(LispAddress::from_simple_str(text)),
    }
}

fn invalid(kind: &'static str, value: &str) -> CodecError {
    CodecError::InvalidAddress {
        kind,
        value: value.to_owned(),
    }
}

// ── Delete payloads ─────────────────────────────────────────────────

/// A row that can be removed from the store by its EID.
pub trait Deletable {
    /// The RPC that removes this kind of row.
    const OPERATION: Operation;

    fn eid_uri(&self) -> &str;

    /// The EID as the store encoded it.
    fn stored_eid(&self) -> Value;
}

impl Deletable for MappingEntry {
    const OPERATION: Operation = Operation::RemoveMapping;

    fn eid_uri(&self) -> &str {
        &self.eid_uri
    }

    fn stored_eid(&self) -> Value {
        self.raw
            .get("eid")
            .cloned()
            .unwrap_or_else(|| address_to_wire(&self.eid))
    }
}

impl Deletable for KeyEntry {
    const OPERATION: Operation = Operation::RemoveKey;

    fn eid_uri(&self) -> &str {
        &self.eid_uri
    }

    fn stored_eid(&self) -> Value {
        self.raw
            .get("eid")
            .cloned()
            .unwrap_or_else(|| address_to_wire(&self.eid))
    }
}

/// A ready-to-send remove RPC.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub operation: Operation,
    pub eid_uri: String,
    /// `{"input": {"eid": …}}`
    pub body: Value,
}

/// Build the remove-RPC body for a row, passing its stored EID through.
pub fn build_delete_payload<T: Deletable>(entry: &T) -> DeleteRequest {
    DeleteRequest {
        operation: T::OPERATION,
        eid_uri: entry.eid_uri().to_owned(),
        body: json!({ "input": { "eid": entry.stored_eid() } }),
    }
}
