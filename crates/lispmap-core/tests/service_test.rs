#![allow(clippy::unwrap_used)]
// Integration tests for `MappingService` against a mocked RESTCONF store.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lispmap_core::{
    Command, CommandResult, CoreError, EidRequest, KeyRequest, LispAddress, LocatorRequest,
    MappingAction, MappingRequest, MappingService, ServiceConfig, StatusKind,
};

// ── Helpers ─────────────────────────────────────────────────────────

const DATABASE_PATH: &str = "/restconf/config/odl-mappingservice:mapping-database";

fn op_path(op: &str) -> String {
    format!("/restconf/operations/odl-mappingservice:{op}")
}

async fn setup() -> (MockServer, MappingService) {
    let server = MockServer::start().await;
    let mut config = ServiceConfig::new(Url::parse(&server.uri()).unwrap())
        .with_credentials("admin", SecretString::from("admin"));
    config.timeout = Duration::from_secs(5);
    (server, MappingService::new(config))
}

fn prefix_eid(prefix: &str) -> Value {
    json!({
        "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
        "ipv4-prefix": prefix,
        "virtual-network-id": 0
    })
}

fn rloc(addr: &str, priority: u8, weight: u8) -> Value {
    json!({
        "locator-id": addr,
        "priority": priority, "weight": weight,
        "multicastPriority": 255, "multicastWeight": 0,
        "localLocator": false, "rlocProbed": false, "routed": true,
        "rloc": { "address-type": "ietf-lisp-address-types:ipv4-afi", "ipv4": addr }
    })
}

fn database() -> Value {
    json!({
        "mapping-database": {
            "virtual-network-identifier": [
                {
                    "vni": 0,
                    "mapping": [{
                        "eid-uri": "ipv4:10.0.0.0/24",
                        "origin": "northbound",
                        "mapping-record": {
                            "eid": prefix_eid("10.0.0.0/24"),
                            "recordTtl": 1440,
                            "action": "NoAction",
                            "authoritative": true,
                            "LocatorRecord": [rloc("192.0.2.1", 1, 50), rloc("192.0.2.2", 1, 80)]
                        }
                    }],
                    "authentication-key": [{
                        "eid-uri": "ipv4:10.0.0.0/24",
                        "eid": prefix_eid("10.0.0.0/24"),
                        "mapping-authkey": { "key-type": 1, "key-string": "password" }
                    }]
                },
                {
                    "vni": 5,
                    "mapping": [{
                        "eid-uri": "ipv4:172.16.0.0/16",
                        "mapping-record": {
                            "eid": prefix_eid("172.16.0.0/16"),
                            "action": "NativelyForward"
                        }
                    }]
                }
            ]
        }
    })
}

async fn mount_database(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(database()))
        .mount(server)
        .await;
}

// ── Loads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_flattens_all_vnis() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    let snap = service.refresh_mappings().await.unwrap();
    assert_eq!(snap.rows.len(), 2);
    assert_eq!(snap.status.kind, StatusKind::Loaded);

    let first = &snap.rows[0].item;
    assert_eq!(first.vni, 0);
    assert_eq!(first.summary.locator_string, "ipv4:192.0.2.2 (+1)");
    assert_eq!(first.summary.ttl, "1/80/255/0");

    let negative = &snap.rows[1].item;
    assert_eq!(negative.vni, 5);
    assert_eq!(negative.summary.locator_string, "NativelyForward");
    assert!(negative.summary.flags.is_empty());
}

#[tokio::test]
async fn test_refresh_keys_masks_secret() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    let snap = service.refresh_keys().await.unwrap();
    assert_eq!(snap.rows.len(), 1);
    let key = &snap.rows[0].item;
    assert_eq!(key.expose_key(), "password");
    assert!(!serde_json::to_string(key.as_ref()).unwrap().contains("password"));
}

#[tokio::test]
async fn test_empty_store_is_empty_table() {
    let (server, service) = setup().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let snap = service.refresh_mappings().await.unwrap();
    assert!(snap.rows.is_empty());
}

#[tokio::test]
async fn test_load_failure_sets_banner() {
    let (server, service) = setup().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": { "error": [{ "error-tag": "operation-failed", "error-message": "datastore down" }] }
        })))
        .mount(&server)
        .await;

    let err = service.refresh_mappings().await.unwrap_err();
    assert!(matches!(err, CoreError::LoadFailed { .. }), "got {err:?}");
    assert!(service.mappings().status().is_error());
}

#[tokio::test]
async fn test_unknown_eid_uri_is_not_found() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    let err = service.mapping("ipv4:1.2.3.4/32").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

// ── Deletes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_mapping_sends_stored_eid() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    Mock::given(method("POST"))
        .and(path(op_path("remove-mapping")))
        .and(body_json(json!({ "input": { "eid": prefix_eid("172.16.0.0/16") } })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    service.delete_mapping("ipv4:172.16.0.0/16").await.unwrap();
    assert_eq!(
        service.mappings().status().kind,
        StatusKind::OperationSucceeded("remove-mapping".into())
    );
}

#[tokio::test]
async fn test_delete_key_failure_surfaces_messages() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    Mock::given(method("POST"))
        .and(path(op_path("remove-key")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": { "error": [
                { "error-message": "key is locked" },
                { "error-message": "try later" }
            ] }
        })))
        .mount(&server)
        .await;

    let err = service.delete_key("ipv4:10.0.0.0/24").await.unwrap_err();
    match err {
        CoreError::OperationFailed { operation, message } => {
            assert_eq!(operation, "remove-key");
            assert_eq!(message, "key is locked, try later");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(service.keys().status().is_error());
}

#[tokio::test]
async fn test_failed_reload_after_delete_keeps_load_error() {
    let (server, service) = setup().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(database()))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(op_path("remove-mapping")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    service.delete_mapping("ipv4:172.16.0.0/16").await.unwrap();
    assert!(matches!(
        service.mappings().status().kind,
        StatusKind::LoadError(_)
    ));
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_key_wraps_nonzero_vni() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    Mock::given(method("POST"))
        .and(path(op_path("add-key")))
        .and(body_json(json!({
            "input": {
                "eid": {
                    "address-type": "ietf-lisp-address-types:instance-id-lcaf",
                    "instance-id": {
                        "iid": 5,
                        "mask-length": 32,
                        "address": {
                            "address-type": "ietf-lisp-address-types:ipv4-afi",
                            "ipv4": "10.9.9.9"
                        }
                    }
                },
                "mapping-authkey": { "key-type": 1, "key-string": "s3cret" }
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = service
        .execute(Command::AddKey(KeyRequest {
            eid: "ipv4:10.9.9.9".parse().unwrap(),
            vni: 5,
            key_type: 1,
            key_string: SecretString::from("s3cret"),
        }))
        .await
        .unwrap();
    assert!(matches!(result, CommandResult::Ok));
    assert_eq!(
        service.keys().status().kind,
        StatusKind::OperationSucceeded("add-key".into())
    );
}

#[tokio::test]
async fn test_add_mapping_body() {
    let (server, service) = setup().await;
    mount_database(&server).await;

    Mock::given(method("POST"))
        .and(path(op_path("add-mapping")))
        .and(body_json(json!({
            "input": {
                "mapping-record": {
                    "eid": {
                        "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
                        "ipv4-prefix": "10.1.0.0/16"
                    },
                    "recordTtl": 60,
                    "action": "NoAction",
                    "authoritative": true,
                    "LocatorRecord": [{
                        "priority": 1, "weight": 100,
                        "multicastPriority": 255, "multicastWeight": 0,
                        "localLocator": false, "rlocProbed": false, "routed": true,
                        "rloc": {
                            "address-type": "ietf-lisp-address-types:ipv4-afi",
                            "ipv4": "192.0.2.9"
                        }
                    }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    service
        .execute(Command::AddMapping(MappingRequest {
            eid: "ipv4:10.1.0.0/16".parse().unwrap(),
            vni: 0,
            record_ttl: Some(60),
            action: MappingAction::NoAction,
            authoritative: true,
            locators: vec![LocatorRequest::new("ipv4:192.0.2.9".parse().unwrap())],
        }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_mapping_decodes_output() {
    let (server, service) = setup().await;
    Mock::given(method("POST"))
        .and(path(op_path("get-mapping")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": {
                "mapping-record": {
                    "eid": prefix_eid("10.0.0.0/24"),
                    "action": "NoAction",
                    "LocatorRecord": [rloc("192.0.2.7", 1, 1)]
                }
            }
        })))
        .mount(&server)
        .await;

    let eid: LispAddress = "ipv4:10.0.0.0/24".parse().unwrap();
    let result = service
        .execute(Command::GetMapping(EidRequest::new(eid)))
        .await
        .unwrap();
    let CommandResult::Mapping(entry) = result else {
        panic!("expected a mapping");
    };
    assert_eq!(entry.eid_uri, "ipv4:10.0.0.0/24");
    assert_eq!(entry.summary.locator_string, "ipv4:192.0.2.7");
}

#[tokio::test]
async fn test_get_key_missing_is_not_found() {
    let (server, service) = setup().await;
    Mock::given(method("POST"))
        .and(path(op_path("get-key")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = service
        .execute(Command::GetKey(EidRequest::new(
            "ipv4:10.0.0.1".parse().unwrap(),
        )))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_auth_failure_maps_to_domain_error() {
    let (server, service) = setup().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = service.refresh_keys().await.unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
}
