// RESTCONF HTTP client
//
// Wraps `reqwest::Client` with RESTCONF URL construction, HTTP basic
// auth, and error-document unwrapping. Endpoint groups live in sibling
// modules as inherent methods to keep this file focused on transport
// mechanics.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::restconf::models::ErrorDocument;
use crate::transport::TransportConfig;

/// Media type the store expects on RPC request bodies.
const YANG_JSON: &str = "application/yang.data+json";

/// HTTP basic-auth credentials sent with every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Raw HTTP client for the mapping service's RESTCONF API.
///
/// Handles `/restconf/config/...` reads and `/restconf/operations/...`
/// RPCs. All methods return decoded payloads; RESTCONF error documents
/// are turned into [`Error::Restconf`] before the caller sees them.
pub struct RestconfClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl RestconfClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root (e.g. `http://127.0.0.1:8181`);
    /// the `/restconf` prefix is appended per request.
    pub fn new(
        base_url: Url,
        credentials: Option<Credentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/restconf/config/{path}`
    pub(crate) fn config_url(&self, path: &str) -> Result<Url, Error> {
        self.restconf_url("config", path)
    }

    /// `{base}/restconf/operations/{path}`
    pub(crate) fn operations_url(&self, path: &str) -> Result<Url, Error> {
        self.restconf_url("operations", path)
    }

    fn restconf_url(&self, datastore: &str, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/restconf/{datastore}/{path}");
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(creds) => {
                builder.basic_auth(&creds.username, Some(creds.password.expose_secret()))
            }
            None => builder,
        }
    }

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let builder = self
            .apply_auth(self.http.get(url.clone()))
            .header(ACCEPT, "application/json");
        let resp = builder.send().await.map_err(Error::Transport)?;

        let body = self.read_body(&url, resp).await?;
        decode(&body)
    }

    /// Send a POST request with a JSON body.
    ///
    /// RPCs without output answer with an empty body (HTTP 200 or 204);
    /// that case yields `Ok(None)`.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        debug!("POST {}", url);

        let payload = serde_json::to_vec(body).map_err(|e| Error::Deserialization {
            message: format!("failed to encode request: {e}"),
            body: String::new(),
        })?;
        trace!(body = %String::from_utf8_lossy(&payload), "request body");

        let builder = self
            .apply_auth(self.http.post(url.clone()))
            .header(CONTENT_TYPE, YANG_JSON)
            .header(ACCEPT, "application/json")
            .body(payload);
        let resp = builder.send().await.map_err(Error::Transport)?;

        let text = self.read_body(&url, resp).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        decode(&text).map(Some)
    }

    /// Check the status line and return the body text on success.
    ///
    /// Non-success responses are mapped to typed errors, preferring the
    /// messages of a RESTCONF error document when one is present.
    async fn read_body(&self, url: &Url, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return Ok(body);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "credentials rejected by the mapping service".into(),
            });
        }

        let messages = serde_json::from_str::<ErrorDocument>(&body)
            .map(ErrorDocument::messages)
            .unwrap_or_default();

        if status == reqwest::StatusCode::NOT_FOUND && messages.is_empty() {
            return Err(Error::NotFound {
                path: url.path().to_owned(),
            });
        }

        let messages = if messages.is_empty() {
            vec![format!("HTTP {status}: {}", preview(&body))]
        } else {
            messages
        };

        Err(Error::Restconf {
            status: status.as_u16(),
            messages,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn client(base: &str) -> RestconfClient {
        RestconfClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap(), None)
    }

    #[test]
    fn urls_tolerate_trailing_slash() {
        let c = client("http://odl.example:8181/");
        assert_eq!(
            c.config_url("odl-mappingservice:mapping-database")
                .unwrap()
                .as_str(),
            "http://odl.example:8181/restconf/config/odl-mappingservice:mapping-database"
        );
        assert_eq!(
            c.operations_url("odl-mappingservice:remove-key")
                .unwrap()
                .as_str(),
            "http://odl.example:8181/restconf/operations/odl-mappingservice:remove-key"
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), 200);
    }
}
