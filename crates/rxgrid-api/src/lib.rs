//! Async HTTP client for the rxgrid drug-catalog backend.
//!
//! The backend exposes three read-only endpoints: column configuration,
//! drug records (optionally filtered by manufacturer), and the distinct
//! manufacturer list. Each operation is a single round trip with no
//! retries and no caching; `rxgrid-core` turns failures into user-facing
//! view state.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod catalog;

pub use client::ApiClient;
pub use error::Error;
pub use models::{ALL_COMPANIES, ColumnId, Drug, TableColumn, TableConfig};
pub use transport::TransportConfig;
