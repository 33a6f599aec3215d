// Shared transport configuration for building reqwest::Client instances.
//
// The backend is a plain HTTP endpoint with no authentication, so the
// only tunable is the request timeout.

use std::time::Duration;

use crate::error::Error;

/// Transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("rxgrid/0.1.0")
            .build()
            .map_err(|e| Error::ClientBuild {
                message: e.to_string(),
            })
    }
}
