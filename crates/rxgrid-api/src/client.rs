// Catalog backend HTTP client
//
// Wraps `reqwest::Client` with base-URL handling and uniform failure
// mapping. The endpoint methods live in `catalog.rs` as inherent impls
// to keep this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Resource};
use crate::transport::TransportConfig;

/// HTTP client for the drug-catalog backend.
///
/// Each operation is one outbound request; non-2xx statuses and
/// transport failures both map to the per-resource error variant, so
/// callers never see raw `reqwest` errors.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from a base URL (e.g. `http://localhost:3001/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an endpoint path: `{base}/{path}`.
    pub(crate) fn endpoint_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).expect("invalid endpoint URL")
    }

    /// Send a GET request and deserialize the JSON body.
    ///
    /// Failures are tagged with `resource` so the caller's error names
    /// what was being loaded, not how it failed.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: Resource,
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| resource.fetch_error(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(resource.fetch_error(format!("HTTP {status}: {}", preview(&body))));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| resource.fetch_error(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }
}

/// First 200 characters of a response body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
