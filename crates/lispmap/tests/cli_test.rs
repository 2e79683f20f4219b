//! Integration tests for the `lispmap` CLI binary.
//!
//! Argument handling and exit codes are checked without a controller;
//! the data commands run against a wiremock RESTCONF store.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const DATABASE_PATH: &str = "/restconf/config/odl-mappingservice:mapping-database";

/// The `lispmap` binary with env isolation: no `LISPMAP_*` variables and
/// a config directory that does not exist.
fn lispmap_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lispmap");
    cmd.env("HOME", "/tmp/lispmap-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lispmap-cli-test-nonexistent")
        .env_remove("RUST_LOG");
    for var in [
        "LISPMAP_PROFILE",
        "LISPMAP_CONTROLLER",
        "LISPMAP_USERNAME",
        "LISPMAP_PASSWORD",
        "LISPMAP_OUTPUT",
        "LISPMAP_INSECURE",
        "LISPMAP_TIMEOUT",
        "LISPMAP_KEY_STRING",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn database() -> Value {
    json!({
        "mapping-database": {
            "virtual-network-identifier": [{
                "vni": 0,
                "mapping": [{
                    "eid-uri": "ipv4:10.0.0.0/24",
                    "origin": "northbound",
                    "mapping-record": {
                        "eid": {
                            "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
                            "ipv4-prefix": "10.0.0.0/24"
                        },
                        "recordTtl": 1440,
                        "action": "NoAction",
                        "authoritative": true,
                        "LocatorRecord": [{
                            "locator-id": "r1",
                            "priority": 1, "weight": 100,
                            "multicastPriority": 255, "multicastWeight": 0,
                            "localLocator": true, "rlocProbed": false, "routed": true,
                            "rloc": {
                                "address-type": "ietf-lisp-address-types:ipv4-afi",
                                "ipv4": "192.0.2.1"
                            }
                        }]
                    }
                }],
                "authentication-key": [{
                    "eid-uri": "ipv4:10.0.0.0/24",
                    "eid": {
                        "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
                        "ipv4-prefix": "10.0.0.0/24"
                    },
                    "mapping-authkey": { "key-type": 1, "key-string": "s3cr3t" }
                }]
            }]
        }
    })
}

async fn store() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(database()))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lispmap_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    lispmap_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("mappings")
            .and(predicate::str::contains("keys"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_password_env_value_is_hidden_in_help() {
    lispmap_cmd()
        .env("LISPMAP_PASSWORD", "do-not-print")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("do-not-print").not());
}

#[test]
fn test_version_flag() {
    lispmap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lispmap"));
}

#[test]
fn test_completions_bash() {
    lispmap_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_unknown_output_format_is_usage_error() {
    lispmap_cmd()
        .args(["mappings", "list", "-o", "xml"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_controller_explains_config() {
    lispmap_cmd()
        .args(["mappings", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_bad_eid_is_usage_error() {
    lispmap_cmd()
        .args([
            "-c",
            "http://127.0.0.1:9",
            "mappings",
            "lookup",
            "ipv4:10.0.0.300",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_delete_without_tty_needs_yes() {
    lispmap_cmd()
        .args(["-c", "http://127.0.0.1:9", "mappings", "delete", "ipv4:10.0.0.0/24"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── Against a mocked store ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_mappings_list_plain() {
    let server = store().await;
    lispmap_cmd()
        .args(["-c", &server.uri(), "mappings", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("ipv4:10.0.0.0/24\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mappings_list_table() {
    let server = store().await;
    lispmap_cmd()
        .args(["-c", &server.uri(), "mappings", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ipv4:10.0.0.0/24")
                .and(predicate::str::contains("ipv4:192.0.2.1"))
                .and(predicate::str::contains("Local | Up")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vni_filter_can_empty_the_list() {
    let server = store().await;
    lispmap_cmd()
        .args(["-c", &server.uri(), "mappings", "list", "--vni", "9", "-o", "json-compact"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_keys_json_never_shows_secret() {
    let server = store().await;
    lispmap_cmd()
        .args(["-c", &server.uri(), "keys", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****").and(predicate::str::contains("s3cr3t").not()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_unknown_mapping_exits_not_found() {
    let server = store().await;
    lispmap_cmd()
        .args(["-c", &server.uri(), "mappings", "get", "ipv4:99.0.0.0/8"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("mappings list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_mapping_detail_shows_stored_record() {
    let server = store().await;
    lispmap_cmd()
        .args(["-c", &server.uri(), "mappings", "get", "ipv4:10.0.0.0/24"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Stored record:")
                .and(predicate::str::contains("    \"recordTtl\": 1440")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_sends_stored_eid() {
    let server = store().await;
    Mock::given(method("POST"))
        .and(path(
            "/restconf/operations/odl-mappingservice:remove-mapping",
        ))
        .and(body_json(json!({
            "input": {
                "eid": {
                    "address-type": "ietf-lisp-address-types:ipv4-prefix-afi",
                    "ipv4-prefix": "10.0.0.0/24"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    lispmap_cmd()
        .args(["-c", &server.uri(), "-y", "mappings", "delete", "ipv4:10.0.0.0/24"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    lispmap_cmd()
        .args(["-c", &server.uri(), "-u", "admin", "--password", "wrong", "keys", "list"])
        .assert()
        .code(3);
}

#[test]
fn test_connection_refused_exits_connection() {
    lispmap_cmd()
        .args(["-c", "http://127.0.0.1:9", "--timeout", "2", "mappings", "list"])
        .assert()
        .code(7);
}
