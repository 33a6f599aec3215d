use thiserror::Error;

/// Top-level error type for the `rxgrid-api` crate.
///
/// Failures are keyed by the resource being fetched rather than by
/// transport layer: a connection refusal and an HTTP 500 while loading
/// drug records both surface as [`Error::DrugsFetch`]. The message is
/// what UI consumers display.
#[derive(Debug, Error)]
pub enum Error {
    /// Table configuration could not be fetched.
    #[error("failed to fetch table configuration: {message}")]
    ConfigFetch { message: String },

    /// Drug records could not be fetched.
    #[error("failed to fetch drugs: {message}")]
    DrugsFetch { message: String },

    /// The manufacturer list could not be fetched.
    #[error("failed to fetch companies: {message}")]
    CompaniesFetch { message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

/// The three backend resources, used to tag fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    TableConfig,
    Drugs,
    Companies,
}

impl Resource {
    /// Wrap a failure message in the resource's error variant.
    pub(crate) fn fetch_error(self, message: String) -> Error {
        match self {
            Self::TableConfig => Error::ConfigFetch { message },
            Self::Drugs => Error::DrugsFetch { message },
            Self::Companies => Error::CompaniesFetch { message },
        }
    }
}
