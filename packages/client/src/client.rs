//! The transport adapter: authenticated POSTs and envelope decoding.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::ConfigService;
use crate::error::Error;
use crate::image::ContainerImageService;

/// The API endpoints the device exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Read the configuration tree.
    Retrieve,
    /// Apply set/delete operations.
    Configure,
    /// Save or load configuration snapshots.
    ConfigFile,
    /// Manage container images.
    ContainerImage,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Retrieve => "retrieve",
            Endpoint::Configure => "configure",
            Endpoint::ConfigFile => "config-file",
            Endpoint::ContainerImage => "container-image",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `{success, data, error}` wrapper around every API response.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
}

/// A client for the appliance's HTTP configuration API.
///
/// Every operation is an authenticated form-encoded POST carrying the
/// shared API key and a JSON payload. The functional surface lives on the
/// service handles: [`Client::config`] for the configuration tree and
/// [`Client::container_images`] for image management.
///
/// # Example
///
/// ```ignore
/// use vyapi_client::Client;
///
/// let client = Client::new("https://gateway.local", "secret")?;
///
/// let hostname = client.config().show("system host-name")?;
/// client.config().set("service ntp listen-address", "1.2.3.4")?;
/// client.config().save()?;
/// ```
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: Url,
    key: String,
    // Serializes request construction and send across threads sharing
    // this client. One in-flight request at a time.
    send_lock: Mutex<()>,
}

impl Client {
    /// Create a client with a default HTTP client (10 second timeout).
    pub fn new(base_url: &str, key: impl Into<String>) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Self::with_client(http, base_url, key)
    }

    /// Create a client with a caller-supplied HTTP client.
    ///
    /// Use this to control TLS trust (self-signed device certificates),
    /// timeouts, or connection pooling.
    pub fn with_client(
        http: reqwest::blocking::Client,
        base_url: &str,
        key: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        // Endpoint names are joined onto the base path, which requires a
        // trailing slash to keep the last path segment.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            http,
            base_url,
            key: key.into(),
            send_lock: Mutex::new(()),
        })
    }

    /// Configuration tree operations.
    pub fn config(&self) -> ConfigService<'_> {
        ConfigService { client: self }
    }

    /// Container image operations.
    pub fn container_images(&self) -> ContainerImageService<'_> {
        ContainerImageService { client: self }
    }

    /// Post a raw `payload` to `endpoint` and return the envelope's data.
    ///
    /// Non-2xx statuses fail with [`Error::Status`]; a decoded envelope
    /// carrying an error string fails with [`Error::Api`].
    pub fn request(
        &self,
        endpoint: Endpoint,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        let data = serde_json::to_string(payload)?;
        let url = self.base_url.join(endpoint.as_str())?;
        log::debug!("POST {url} ({} payload bytes)", data.len());

        let response = {
            let _guard = self.send_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.http
                .post(url.clone())
                .form(&[("key", self.key.as_str()), ("data", data.as_str())])
                .send()?
        };

        let status = response.status();
        let body = response.text()?;
        log::debug!("{endpoint} responded {status}");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        if let Some(message) = envelope.error {
            return Err(Error::Api { message });
        }
        if !envelope.success {
            return Err(Error::Api {
                message: format!("{endpoint} request failed without an error message"),
            });
        }
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Retrieve.as_str(), "retrieve");
        assert_eq!(Endpoint::Configure.as_str(), "configure");
        assert_eq!(Endpoint::ConfigFile.as_str(), "config-file");
        assert_eq!(Endpoint::ContainerImage.as_str(), "container-image");
    }

    #[test]
    fn base_url_gets_a_trailing_slash() {
        let client = Client::new("https://gateway.local", "secret").unwrap();
        assert_eq!(client.base_url.as_str(), "https://gateway.local/");

        let client = Client::new("https://gateway.local/api", "secret").unwrap();
        assert_eq!(client.base_url.as_str(), "https://gateway.local/api/");
        assert_eq!(
            client.base_url.join("retrieve").unwrap().as_str(),
            "https://gateway.local/api/retrieve"
        );
    }

    #[test]
    fn envelope_decodes_with_missing_fields() {
        let envelope: Envelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.error.is_none());
        assert!(envelope.data.is_null());

        let envelope: Envelope =
            serde_json::from_str(r#"{"success": false, "error": "boom", "data": null}"#).unwrap();
        assert_eq!(envelope.error.as_deref(), Some("boom"));
    }
}
