// ── LISP address union ──
//
// One variant per address family (AFI) and per LCAF encoding the mapping
// database uses. Display rendering and parsing live in `crate::codec`;
// wire (de)serialization lives in `crate::convert`.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde_json::Value;

/// AFI numbers (IANA address family numbers, plus the LISP extensions).
pub mod afi {
    pub const NO_ADDRESS: u16 = 0;
    pub const IPV4: u16 = 1;
    pub const IPV6: u16 = 2;
    pub const DISTINGUISHED_NAME: u16 = 17;
    pub const AS_NUMBER: u16 = 18;
    pub const LCAF: u16 = 16387;
    pub const MAC: u16 = 16389;
}

/// LCAF type codes (RFC 8060).
pub mod lcaf {
    pub const AFI_LIST: u8 = 1;
    pub const INSTANCE_ID: u8 = 2;
    pub const APPLICATION_DATA: u8 = 4;
    pub const EXPLICIT_LOCATOR_PATH: u8 = 10;
    pub const SOURCE_DEST_KEY: u8 = 12;
    pub const KEY_VALUE: u8 = 15;
}

/// A LISP address: a plain address family or a nested LCAF encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LispAddress {
    NoAddress,
    Ipv4 {
        addr: Ipv4Addr,
        prefix: Option<u8>,
    },
    Ipv6 {
        addr: Ipv6Addr,
        prefix: Option<u8>,
    },
    /// Six hex octets, kept in the form the store sent.
    Mac(String),
    DistinguishedName(String),
    AsNumber(u32),
    AfiList(Vec<LispAddress>),
    /// An address scoped to an overlay instance (VNI).
    InstanceId {
        iid: u32,
        mask_length: u8,
        address: Box<LispAddress>,
    },
    ApplicationData(Box<ApplicationData>),
    ExplicitLocatorPath(Vec<Hop>),
    SourceDest(Box<SourceDestKey>),
    KeyValue {
        key: Box<LispAddress>,
        value: Box<LispAddress>,
    },
    /// A tag this client does not understand, or a payload that failed to
    /// decode. `raw` is the original wire object, echoed back untouched.
    Unrenderable {
        address_type: String,
        reason: String,
        raw: Value,
    },
}

/// LCAF 4: an address plus a transport 5-tuple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationData {
    pub address: LispAddress,
    pub ip_tos: u32,
    pub protocol: u8,
    pub local_port_low: u16,
    pub local_port_high: u16,
    pub remote_port_low: u16,
    pub remote_port_high: u16,
}

/// One re-encapsulation hop of an explicit locator path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub hop_id: Option<String>,
    pub address: LispAddress,
    pub lrs_bits: Option<String>,
}

/// LCAF 12: a (source, destination) prefix pair.
///
/// The masks are held here rather than on the addresses, so `source` and
/// `dest` never carry a prefix of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDestKey {
    pub source: LispAddress,
    pub source_mask_length: u8,
    pub dest: LispAddress,
    pub dest_mask_length: u8,
}

impl LispAddress {
    /// The AFI this address is encoded under on the wire.
    pub fn afi(&self) -> Option<u16> {
        match self {
            Self::NoAddress => Some(afi::NO_ADDRESS),
            Self::Ipv4 { .. } => Some(afi::IPV4),
            Self::Ipv6 { .. } => Some(afi::IPV6),
            Self::DistinguishedName(_) => Some(afi::DISTINGUISHED_NAME),
            Self::AsNumber(_) => Some(afi::AS_NUMBER),
            Self::Mac(_) => Some(afi::MAC),
            Self::AfiList(_)
            | Self::InstanceId { .. }
            | Self::ApplicationData(_)
            | Self::ExplicitLocatorPath(_)
            | Self::SourceDest(_)
            | Self::KeyValue { .. } => Some(afi::LCAF),
            Self::Unrenderable { .. } => None,
        }
    }

    /// The LCAF type code, for LCAF-encoded addresses only.
    pub fn lcaf_type(&self) -> Option<u8> {
        match self {
            Self::AfiList(_) => Some(lcaf::AFI_LIST),
            Self::InstanceId { .. } => Some(lcaf::INSTANCE_ID),
            Self::ApplicationData(_) => Some(lcaf::APPLICATION_DATA),
            Self::ExplicitLocatorPath(_) => Some(lcaf::EXPLICIT_LOCATOR_PATH),
            Self::SourceDest(_) => Some(lcaf::SOURCE_DEST_KEY),
            Self::KeyValue { .. } => Some(lcaf::KEY_VALUE),
            _ => None,
        }
    }

    /// Plain (non-LCAF, non-nested) address.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::NoAddress
                | Self::Ipv4 { .. }
                | Self::Ipv6 { .. }
                | Self::Mac(_)
                | Self::DistinguishedName(_)
                | Self::AsNumber(_)
        )
    }

    /// Full host mask for the address family: 32 for IPv4, 128 for IPv6,
    /// 0 for everything that has no notion of a prefix.
    pub fn host_mask(&self) -> u8 {
        match self {
            Self::Ipv4 { .. } => 32,
            Self::Ipv6 { .. } => 128,
            _ => 0,
        }
    }

    /// Split an IP prefix into its bare address and mask length.
    ///
    /// Non-IP addresses come back unchanged with their `host_mask`.
    pub fn split_prefix(self) -> (Self, u8) {
        match self {
            Self::Ipv4 { addr, prefix } => (Self::Ipv4 { addr, prefix: None }, prefix.unwrap_or(32)),
            Self::Ipv6 { addr, prefix } => (Self::Ipv6 { addr, prefix: None }, prefix.unwrap_or(128)),
            other => {
                let mask = other.host_mask();
                (other, mask)
            }
        }
    }

    /// Classify a bare string the way the store's "simple address"
    /// encoding does: IPv4 or IPv6 (with optional prefix), MAC, or
    /// distinguished name as the catch-all.
    pub fn from_simple_str(text: &str) -> Self {
        let (addr_part, prefix) = match text.rsplit_once('/') {
            Some((a, p)) => match p.parse::<u8>() {
                Ok(p) => (a, Some(p)),
                Err(_) => (text, None),
            },
            None => (text, None),
        };

        if let Ok(addr) = addr_part.parse::<Ipv4Addr>() {
            if prefix.is_none_or(|p| p <= 32) {
                return Self::Ipv4 { addr, prefix };
            }
        }
        if let Ok(addr) = addr_part.parse::<Ipv6Addr>() {
            if prefix.is_none_or(|p| p <= 128) {
                return Self::Ipv6 { addr, prefix };
            }
        }
        if is_mac(text) {
            return Self::Mac(text.to_owned());
        }
        Self::DistinguishedName(text.to_owned())
    }

    /// Wrap this address in an instance-id LCAF, unless it already is one.
    pub fn with_instance_id(self, iid: u32, mask_length: u8) -> Self {
        match self {
            already @ Self::InstanceId { .. } => already,
            other => Self::InstanceId {
                iid,
                mask_length,
                address: Box::new(other),
            },
        }
    }
}

/// Six hex octets separated by `:` or `-` (one separator style throughout).
pub(crate) fn is_mac(text: &str) -> bool {
    let sep = if text.contains(':') { ':' } else { '-' };
    let octets: Vec<&str> = text.split(sep).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}
