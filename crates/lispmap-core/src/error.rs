// ── Core error types ──
//
// User-facing errors from lispmap-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<lispmap_api::Error>`
// impl translates transport-layer errors into domain variants, and the
// service picks `LoadFailed` or `OperationFailed` depending on whether a
// read or a write went wrong.

use thiserror::Error;

use crate::codec::CodecError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to mapping service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Failed to load {table}: {message}")]
    LoadFailed { table: String, message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{operation} failed: {message}")]
    OperationFailed { operation: String, message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Re-label a transport-level failure as a failed table load.
    ///
    /// Connection, auth and timeout errors keep their own variants so the
    /// CLI can still map them to dedicated exit codes.
    pub(crate) fn into_load_error(self, table: &str) -> Self {
        match self {
            Self::Api { message, .. } | Self::Internal(message) => Self::LoadFailed {
                table: table.to_owned(),
                message,
            },
            other => other,
        }
    }

    /// Re-label a transport-level failure as a failed write operation.
    pub(crate) fn into_operation_error(self, operation: &str) -> Self {
        match self {
            Self::Api { message, .. } | Self::Internal(message) => Self::OperationFailed {
                operation: operation.to_owned(),
                message,
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<lispmap_api::Error> for CoreError {
    fn from(err: lispmap_api::Error) -> Self {
        match err {
            lispmap_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            lispmap_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            lispmap_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            lispmap_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            lispmap_api::Error::NotFound { path } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: path,
            },
            lispmap_api::Error::Restconf { status, messages } => CoreError::Api {
                message: messages.join(", "),
                status: Some(status),
            },
            lispmap_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restconf_messages_become_operation_error() {
        let api = lispmap_api::Error::Restconf {
            status: 400,
            messages: vec!["bad eid".into(), "bad key".into()],
        };
        let err = CoreError::from(api).into_operation_error("remove-key");
        match err {
            CoreError::OperationFailed { operation, message } => {
                assert_eq!(operation, "remove-key");
                assert_eq!(message, "bad eid, bad key");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn auth_errors_survive_relabeling() {
        let api = lispmap_api::Error::Authentication {
            message: "nope".into(),
        };
        let err = CoreError::from(api).into_load_error("mappings");
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }
}
