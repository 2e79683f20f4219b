//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use lispmap_config::ConfigError;
use lispmap_core::{CodecError, CoreError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to mapping service at {url}")]
    #[diagnostic(
        code(lispmap::connection_failed),
        help(
            "Check that the controller is running and RESTCONF is enabled.\n\
             Reason: {reason}\n\
             Try: lispmap mappings list --controller http://127.0.0.1:8181"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lispmap::auth_failed),
        help("Verify your RESTCONF credentials.\nRun: lispmap config set-password --profile {profile}")
    )]
    AuthFailed { profile: String, message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(lispmap::no_credentials),
        help(
            "Store one with: lispmap config set-password\n\
             Or set the LISPMAP_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(lispmap::not_found),
        help("Run: lispmap {list_command} to see what is stored")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Mapping service ──────────────────────────────────────────────
    #[error("Failed to load {table}: {message}")]
    #[diagnostic(code(lispmap::load_failed))]
    LoadFailed { table: String, message: String },

    #[error("{operation} failed: {message}")]
    #[diagnostic(code(lispmap::operation_failed))]
    OperationFailed { operation: String, message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(lispmap::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lispmap::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(lispmap::address),
        help(
            "Accepted forms: 10.0.0.1, ipv4:10.0.0.0/24, ipv6:2001:db8::/32,\n\
             mac:00:11:22:33:44:55, dn:name, as:65000, \"[5] ipv4:10.0.0.1/32\""
        )
    )]
    Address(#[from] CodecError),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(lispmap::profile_not_found),
        help("Available profiles: {available}\nCreate one with: lispmap config init")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(lispmap::no_config),
        help(
            "Create a profile with: lispmap config init\n\
             Or pass --controller. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(lispmap::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(lispmap::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(lispmap::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(lispmap::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(lispmap::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. }
            | Self::NoCredentials { .. }
            | Self::ApiError {
                status: Some(401 | 403),
                ..
            } => exit_code::AUTH,
            Self::NotFound { .. }
            | Self::ProfileNotFound { .. }
            | Self::ApiError {
                status: Some(404),
                ..
            } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::Address(_)
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                profile: "current".into(),
                message,
            },
            CoreError::Timeout => Self::Timeout,
            CoreError::LoadFailed { table, message } => Self::LoadFailed { table, message },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },
            CoreError::InvalidInput { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Codec(e) => Self::Address(e),
            CoreError::OperationFailed { operation, message } => {
                Self::OperationFailed { operation, message }
            }
            CoreError::Api { message, status } => Self::ApiError { message, status },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::ApiError {
                message,
                status: None,
            },
        }
    }
}

fn list_command_for(entity_type: &str) -> &'static str {
    if entity_type.contains("key") {
        "keys list"
    } else {
        "mappings list"
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see `lispmap config profiles`)".into(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}
