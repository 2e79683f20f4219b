// RESTCONF operations (RPCs) of `odl-mappingservice`
//
// Every RPC is `POST /restconf/operations/odl-mappingservice:<name>` with
// an `{"input": {...}}` body. Removal and write RPCs return no output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::restconf::client::RestconfClient;
use crate::restconf::models::{
    EidInput, GetKeyOutput, GetMappingOutput, KeyInput, MappingAuthKey, MappingInput,
    MappingRecordWire, RpcInput, RpcOutput,
};

/// The mapping-database RPCs exposed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddKey,
    GetKey,
    UpdateKey,
    RemoveKey,
    AddMapping,
    GetMapping,
    UpdateMapping,
    RemoveMapping,
}

impl Operation {
    /// The RPC name as it appears in the operations path.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddKey => "add-key",
            Self::GetKey => "get-key",
            Self::UpdateKey => "update-key",
            Self::RemoveKey => "remove-key",
            Self::AddMapping => "add-mapping",
            Self::GetMapping => "get-mapping",
            Self::UpdateMapping => "update-mapping",
            Self::RemoveMapping => "remove-mapping",
        }
    }

    /// `true` for RPCs that change the store.
    pub fn is_write(self) -> bool {
        !matches!(self, Self::GetKey | Self::GetMapping)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RestconfClient {
    /// Invoke an RPC and decode its `output` container, if any.
    pub async fn invoke<I, O>(&self, op: Operation, input: I) -> Result<Option<O>, Error>
    where
        I: Serialize + Sync,
        O: DeserializeOwned + Default,
    {
        let url = self.operations_url(&format!("odl-mappingservice:{}", op.as_str()))?;
        let out: Option<RpcOutput<O>> = self.post(url, &RpcInput { input }).await?;
        Ok(out.map(|o| o.output))
    }

    /// Invoke an RPC whose output (if any) is irrelevant.
    async fn invoke_unit<I: Serialize + Sync>(&self, op: Operation, input: I) -> Result<(), Error> {
        let _: Option<Value> = self.invoke(op, input).await?;
        Ok(())
    }

    // ── Keys ─────────────────────────────────────────────────────────

    /// `add-key`
    pub async fn add_key(&self, eid: Value, authkey: MappingAuthKey) -> Result<(), Error> {
        debug!("adding key");
        self.invoke_unit(
            Operation::AddKey,
            KeyInput {
                eid,
                mapping_authkey: authkey,
            },
        )
        .await
    }

    /// `get-key`; `None` when the store has no key for the EID.
    pub async fn get_key(&self, eid: Value) -> Result<Option<MappingAuthKey>, Error> {
        let out: Option<GetKeyOutput> = self.invoke(Operation::GetKey, EidInput { eid }).await?;
        Ok(out.and_then(|o| o.mapping_authkey))
    }

    /// `update-key`
    pub async fn update_key(&self, eid: Value, authkey: MappingAuthKey) -> Result<(), Error> {
        debug!("updating key");
        self.invoke_unit(
            Operation::UpdateKey,
            KeyInput {
                eid,
                mapping_authkey: authkey,
            },
        )
        .await
    }

    /// `remove-key`
    pub async fn remove_key(&self, eid: Value) -> Result<(), Error> {
        debug!("removing key");
        self.invoke_unit(Operation::RemoveKey, EidInput { eid }).await
    }

    // ── Mappings ─────────────────────────────────────────────────────

    /// `add-mapping`
    pub async fn add_mapping(&self, record: MappingRecordWire) -> Result<(), Error> {
        debug!("adding mapping");
        self.invoke_unit(
            Operation::AddMapping,
            MappingInput {
                mapping_record: record,
            },
        )
        .await
    }

    /// `get-mapping`; `None` when the store has no mapping for the EID.
    pub async fn get_mapping(&self, eid: Value) -> Result<Option<MappingRecordWire>, Error> {
        let out: Option<GetMappingOutput> = self
            .invoke(Operation::GetMapping, EidInput { eid })
            .await?;
        Ok(out.and_then(|o| o.mapping_record))
    }

    /// `update-mapping`
    pub async fn update_mapping(&self, record: MappingRecordWire) -> Result<(), Error> {
        debug!("updating mapping");
        self.invoke_unit(
            Operation::UpdateMapping,
            MappingInput {
                mapping_record: record,
            },
        )
        .await
    }

    /// `remove-mapping`
    pub async fn remove_mapping(&self, eid: Value) -> Result<(), Error> {
        debug!("removing mapping");
        self.invoke_unit(Operation::RemoveMapping, EidInput { eid }).await
    }

    /// Send a pre-built `{"input": {...}}` body to a removal RPC.
    ///
    /// Used for delete requests reconstructed from a displayed row, where
    /// the body is already in its final shape.
    pub async fn remove_raw(&self, op: Operation, body: &Value) -> Result<(), Error> {
        let url = self.operations_url(&format!("odl-mappingservice:{}", op.as_str()))?;
        let _: Option<Value> = self.post(url, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_match_rpc_paths() {
        assert_eq!(Operation::RemoveMapping.as_str(), "remove-mapping");
        assert_eq!(Operation::AddKey.to_string(), "add-key");
        assert!(Operation::UpdateKey.is_write());
        assert!(!Operation::GetMapping.is_write());
    }
}
