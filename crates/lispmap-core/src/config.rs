// ── Runtime connection configuration ──
//
// These types describe *how* to reach a mapping service. They carry
// credential data and connection tuning, but never touch disk.
// The CLI constructs a `ServiceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single mapping service.
///
/// Built by the CLI, passed to `MappingService` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Controller URL (e.g., `http://127.0.0.1:8181`).
    pub url: Url,
    /// RESTCONF basic-auth user; `None` sends no credentials.
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    /// A config with default TLS and timeout settings and no credentials.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            username: None,
            password: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Attach basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.username = Some(username.into());
        self.password = Some(password);
        self
    }
}
