// ── Mapping service facade ──
//
// Owns the RESTCONF client and the two table views (mappings, keys).
// Loads flatten every VNI into one table; deletes are sequenced as
// resolve (fresh load) → build payload → remove → reload, all within
// one task so the reload never races the remove it depends on.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use lispmap_api::transport::{TlsMode, TransportConfig};
use lispmap_api::{Credentials, MappingAuthKey, MappingDatabase, MappingWire, RestconfClient};

use crate::codec::{DeleteRequest, build_delete_payload};
use crate::command::{Command, CommandResult, EidRequest, KeyRequest, MappingRequest};
use crate::config::{ServiceConfig, TlsVerification};
use crate::convert::{address_to_wire, key_from_wire, mapping_from_wire, mapping_record_to_wire};
use crate::error::CoreError;
use crate::model::{KeyEntry, LispAddress, MappingEntry};
use crate::store::{TableSnapshot, TableView};

const MAPPINGS_TABLE: &str = "mappings";
const KEYS_TABLE: &str = "keys";

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ServiceInner>`. The HTTP client is built
/// lazily by [`connect()`](Self::connect); every other call connects on
/// first use.
#[derive(Clone)]
pub struct MappingService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: ServiceConfig,
    client: OnceCell<RestconfClient>,
    mappings: TableView<MappingEntry>,
    keys: TableView<KeyEntry>,
}

impl MappingService {
    /// Create a service from configuration. Does NOT connect.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                config,
                client: OnceCell::new(),
                mappings: TableView::new(MAPPINGS_TABLE),
                keys: TableView::new(KEYS_TABLE),
            }),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    pub fn mappings(&self) -> &TableView<MappingEntry> {
        &self.inner.mappings
    }

    pub fn keys(&self) -> &TableView<KeyEntry> {
        &self.inner.keys
    }

    // ── Connection ───────────────────────────────────────────────────

    /// Build the HTTP client. Calling this again is a no-op.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.client().await.map(|_| ())
    }

    async fn client(&self) -> Result<&RestconfClient, CoreError> {
        self.inner
            .client
            .get_or_try_init(|| async { build_client(&self.inner.config) })
            .await
    }

    async fn load_database(&self) -> Result<MappingDatabase, CoreError> {
        let db = self.client().await?.mapping_database().await?;
        debug!(vnis = db.virtual_networks.len(), "mapping database loaded");
        Ok(db)
    }

    // ── Table loads ──────────────────────────────────────────────────

    /// Reload the mappings table from the store.
    pub async fn refresh_mappings(&self) -> Result<TableSnapshot<MappingEntry>, CoreError> {
        let table = &self.inner.mappings;
        let ticket = table.begin_load();
        match self.load_database().await {
            Ok(db) => {
                let entries: Vec<MappingEntry> = db
                    .virtual_networks
                    .into_iter()
                    .flat_map(|vn| {
                        let vni = vn.vni;
                        vn.mapping.into_iter().map(move |m| mapping_from_wire(vni, m))
                    })
                    .collect();
                table.finish_load(ticket, Ok(entries));
                Ok(table.snapshot())
            }
            Err(e) => {
                let e = e.into_load_error(MAPPINGS_TABLE);
                table.finish_load(ticket, Err(&e));
                Err(e)
            }
        }
    }

    /// Reload the keys table from the store.
    pub async fn refresh_keys(&self) -> Result<TableSnapshot<KeyEntry>, CoreError> {
        let table = &self.inner.keys;
        let ticket = table.begin_load();
        match self.load_database().await {
            Ok(db) => {
                let entries: Vec<KeyEntry> = db
                    .virtual_networks
                    .into_iter()
                    .flat_map(|vn| {
                        let vni = vn.vni;
                        vn.authentication_keys
                            .into_iter()
                            .map(move |k| key_from_wire(vni, k))
                    })
                    .collect();
                table.finish_load(ticket, Ok(entries));
                Ok(table.snapshot())
            }
            Err(e) => {
                let e = e.into_load_error(KEYS_TABLE);
                table.finish_load(ticket, Err(&e));
                Err(e)
            }
        }
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Find a mapping by `eid-uri` in a fresh load.
    pub async fn mapping(&self, eid_uri: &str) -> Result<Arc<MappingEntry>, CoreError> {
        self.refresh_mappings()
            .await?
            .find(|m| m.eid_uri == eid_uri)
            .ok_or_else(|| not_found("mapping", eid_uri))
    }

    /// Find a key by `eid-uri` in a fresh load.
    pub async fn key(&self, eid_uri: &str) -> Result<Arc<KeyEntry>, CoreError> {
        self.refresh_keys()
            .await?
            .find(|k| k.eid_uri == eid_uri)
            .ok_or_else(|| not_found("key", eid_uri))
    }

    // ── Deletes ──────────────────────────────────────────────────────

    /// Remove a mapping identified by its `eid-uri`, then reload.
    pub async fn delete_mapping(&self, eid_uri: &str) -> Result<(), CoreError> {
        let entry = self.mapping(eid_uri).await?;
        let request = build_delete_payload(entry.as_ref());
        self.send_delete(&request, &self.inner.mappings).await?;
        // A failed reload leaves its load error on the banner.
        match self.refresh_mappings().await {
            Ok(_) => self
                .inner
                .mappings
                .record_operation(request.operation.as_str(), Ok(())),
            Err(e) => warn!(error = %e, "reload after delete failed"),
        }
        Ok(())
    }

    /// Remove a key identified by its `eid-uri`, then reload.
    pub async fn delete_key(&self, eid_uri: &str) -> Result<(), CoreError> {
        let entry = self.key(eid_uri).await?;
        let request = build_delete_payload(entry.as_ref());
        self.send_delete(&request, &self.inner.keys).await?;
        // A failed reload leaves its load error on the banner.
        match self.refresh_keys().await {
            Ok(_) => self
                .inner
                .keys
                .record_operation(request.operation.as_str(), Ok(())),
            Err(e) => warn!(error = %e, "reload after delete failed"),
        }
        Ok(())
    }

    async fn send_delete<T>(
        &self,
        request: &DeleteRequest,
        table: &TableView<T>,
    ) -> Result<(), CoreError> {
        info!(eid_uri = %request.eid_uri, operation = %request.operation, "deleting");
        let result = match self.client().await {
            Ok(client) => client
                .remove_raw(request.operation, &request.body)
                .await
                .map_err(CoreError::from),
            Err(e) => Err(e),
        };
        result.map_err(|e| {
            let e = e.into_operation_error(request.operation.as_str());
            table.record_operation(request.operation.as_str(), Err(&e));
            e
        })
    }

    // ── Command execution ────────────────────────────────────────────

    /// Run a command and record its outcome on the table it targets.
    /// Successful writes reload that table first.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let op = cmd.operation();
        let on_keys = cmd.targets_keys();
        debug!(operation = %op, "executing command");

        let result = self
            .dispatch(cmd)
            .await
            .map_err(|e| e.into_operation_error(op.as_str()));

        if result.is_ok() && op.is_write() {
            let reload = if on_keys {
                self.refresh_keys().await.map(|_| ())
            } else {
                self.refresh_mappings().await.map(|_| ())
            };
            if let Err(e) = reload {
                warn!(error = %e, "reload after {op} failed");
                return result;
            }
        }

        let outcome = result.as_ref().map(|_| ());
        if on_keys {
            self.inner.keys.record_operation(op.as_str(), outcome);
        } else {
            self.inner.mappings.record_operation(op.as_str(), outcome);
        }
        result
    }

    async fn dispatch(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let client = self.client().await?;
        match cmd {
            Command::AddKey(req) => {
                client.add_key(key_eid(&req), authkey(&req)).await?;
                Ok(CommandResult::Ok)
            }
            Command::UpdateKey(req) => {
                client.update_key(key_eid(&req), authkey(&req)).await?;
                Ok(CommandResult::Ok)
            }
            Command::GetKey(EidRequest { eid }) => {
                let found = client.get_key(address_to_wire(&eid)).await?;
                let authkey = found.ok_or_else(|| not_found("key", &eid.to_string()))?;
                Ok(CommandResult::Key(key_lookup(eid, authkey)))
            }
            Command::RemoveKey(EidRequest { eid }) => {
                client.remove_key(address_to_wire(&eid)).await?;
                Ok(CommandResult::Ok)
            }
            Command::AddMapping(req) => {
                client.add_mapping(mapping_record(&req)).await?;
                Ok(CommandResult::Ok)
            }
            Command::UpdateMapping(req) => {
                client.update_mapping(mapping_record(&req)).await?;
                Ok(CommandResult::Ok)
            }
            Command::GetMapping(EidRequest { eid }) => {
                let found = client.get_mapping(address_to_wire(&eid)).await?;
                let record = found.ok_or_else(|| not_found("mapping", &eid.to_string()))?;
                let wire = MappingWire {
                    eid_uri: eid.to_string(),
                    origin: None,
                    mapping_record: record,
                };
                Ok(CommandResult::Mapping(Box::new(mapping_from_wire(
                    vni_of(&eid),
                    wire,
                ))))
            }
            Command::RemoveMapping(EidRequest { eid }) => {
                client.remove_mapping(address_to_wire(&eid)).await?;
                Ok(CommandResult::Ok)
            }
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn build_client(config: &ServiceConfig) -> Result<RestconfClient, CoreError> {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    let transport = TransportConfig {
        tls,
        timeout: config.timeout,
    };
    let credentials = config.username.as_ref().map(|username| Credentials {
        username: username.clone(),
        password: config
            .password
            .clone()
            .unwrap_or_else(|| SecretString::from("")),
    });

    let client = RestconfClient::new(config.url.clone(), credentials, &transport)?;
    debug!(url = %config.url, "RESTCONF client ready");
    Ok(client)
}

fn not_found(entity_type: &str, identifier: &str) -> CoreError {
    CoreError::NotFound {
        entity_type: entity_type.to_owned(),
        identifier: identifier.to_owned(),
    }
}

fn vni_of(eid: &LispAddress) -> u32 {
    match eid {
        LispAddress::InstanceId { iid, .. } => *iid,
        _ => 0,
    }
}

fn key_eid(req: &KeyRequest) -> serde_json::Value {
    address_to_wire(&req.wire_eid())
}

fn authkey(req: &KeyRequest) -> MappingAuthKey {
    MappingAuthKey {
        key_type: req.key_type,
        key_string: req.key_string.expose_secret().to_owned(),
    }
}

fn mapping_record(req: &MappingRequest) -> lispmap_api::MappingRecordWire {
    mapping_record_to_wire(
        &req.wire_eid(),
        req.record_ttl,
        req.action,
        req.authoritative,
        &req.locator_records(),
    )
}

fn key_lookup(eid: LispAddress, authkey: MappingAuthKey) -> KeyEntry {
    let raw = json!({
        "eid": address_to_wire(&eid),
        "mapping-authkey": { "key-string": "****", "key-type": authkey.key_type },
    });
    KeyEntry {
        vni: vni_of(&eid),
        eid_uri: eid.to_string(),
        eid,
        key_type: authkey.key_type,
        key_string: authkey.key_string.into(),
        raw,
    }
}
