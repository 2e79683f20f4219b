use thiserror::Error;

/// Top-level error type for the `lispmap-api` crate.
///
/// Covers every failure mode of the RESTCONF surface: authentication,
/// transport, RESTCONF error documents, and payload decoding.
/// `lispmap-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected by the store (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── RESTCONF ────────────────────────────────────────────────────
    /// The requested data node does not exist (HTTP 404).
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// Error document returned by the store
    /// (`{"errors":{"error":[{"error-message":"..."}]}}`).
    #[error("RESTCONF error (HTTP {status}): {}", .messages.join(", "))]
    Restconf { status: u16, messages: Vec<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if re-entering credentials might resolve this error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Restconf { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// The server-provided messages joined with `", "`, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Restconf { messages, .. } if !messages.is_empty() => Some(messages.join(", ")),
            _ => None,
        }
    }
}
