// ── Command API ──
//
// Every RPC against the mapping database flows through a `Command`.
// `MappingService::execute` routes each variant to its RESTCONF
// operation and records the outcome on the matching table's banner.

pub mod requests;

use lispmap_api::Operation;

use crate::model::{KeyEntry, LispAddress, MappingEntry};

pub use requests::{EidRequest, KeyRequest, LocatorRequest, MappingRequest};

/// All operations the mapping service exposes.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Keys ─────────────────────────────────────────────────────────
    AddKey(KeyRequest),
    GetKey(EidRequest),
    UpdateKey(KeyRequest),
    RemoveKey(EidRequest),

    // ── Mappings ─────────────────────────────────────────────────────
    AddMapping(MappingRequest),
    GetMapping(EidRequest),
    UpdateMapping(MappingRequest),
    RemoveMapping(EidRequest),
}

impl Command {
    /// The RESTCONF operation this command invokes.
    pub fn operation(&self) -> Operation {
        match self {
            Self::AddKey(_) => Operation::AddKey,
            Self::GetKey(_) => Operation::GetKey,
            Self::UpdateKey(_) => Operation::UpdateKey,
            Self::RemoveKey(_) => Operation::RemoveKey,
            Self::AddMapping(_) => Operation::AddMapping,
            Self::GetMapping(_) => Operation::GetMapping,
            Self::UpdateMapping(_) => Operation::UpdateMapping,
            Self::RemoveMapping(_) => Operation::RemoveMapping,
        }
    }

    /// `true` for commands that act on the keys table.
    pub fn targets_keys(&self) -> bool {
        matches!(
            self,
            Self::AddKey(_) | Self::GetKey(_) | Self::UpdateKey(_) | Self::RemoveKey(_)
        )
    }

    /// The EID this command addresses, as it will be sent.
    pub fn eid(&self) -> LispAddress {
        match self {
            Self::AddKey(r) | Self::UpdateKey(r) => r.wire_eid(),
            Self::AddMapping(r) | Self::UpdateMapping(r) => r.wire_eid(),
            Self::GetKey(r) | Self::RemoveKey(r) | Self::GetMapping(r) | Self::RemoveMapping(r) => {
                r.eid.clone()
            }
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    Key(KeyEntry),
    Mapping(Box<MappingEntry>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn routes_to_operations() {
        let eid = LispAddress::from_simple_str("10.0.0.1");
        let get = Command::GetMapping(EidRequest::new(eid.clone()));
        assert_eq!(get.operation(), Operation::GetMapping);
        assert!(!get.targets_keys());

        let add = Command::AddKey(KeyRequest {
            eid,
            vni: 3,
            key_type: 1,
            key_string: SecretString::from("k"),
        });
        assert_eq!(add.operation(), Operation::AddKey);
        assert!(add.targets_keys());
        assert_eq!(add.eid().to_string(), "[3] ipv4:10.0.0.1/32");
    }
}
