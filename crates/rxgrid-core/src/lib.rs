//! Orchestration layer between `rxgrid-api` and UI consumers.
//!
//! This crate owns the view state and the fetch-and-filter state machine
//! for the rxgrid catalog viewer:
//!
//! - **[`TableController`]** — Central facade owning all application
//!   state. [`load()`](TableController::load) performs the one-time
//!   startup fetch (column configuration, drug records, manufacturer
//!   list, issued concurrently and committed all-or-nothing);
//!   [`select_company()`](TableController::select_company) drives the
//!   filter-triggered reload. Fetch failures never escape the controller
//!   -- they land in the [`ViewState::error`] slot and the controller
//!   stays usable.
//!
//! - **[`ViewState`]** — Immutable snapshot published through a
//!   `tokio::sync::watch` channel. Pagination is derived, never stored:
//!   [`page_drugs()`](ViewState::page_drugs) slices the current page out
//!   of the record list on every read.
//!
//! - **[`fmt`]** — Launch-date display formatting, skin-independent.
//!
//! Overlapping filter fetches are resolved by a request generation
//! counter: a response from a superseded request is discarded, so the
//! most recently issued selection always wins.

pub mod controller;
pub mod fmt;
pub mod state;

pub use controller::TableController;
pub use state::{DEFAULT_ITEMS_PER_PAGE, ViewState};

// Re-export the catalog types so UI crates can depend on core alone.
pub use rxgrid_api::models::{ALL_COMPANIES, ColumnId, Drug, TableColumn, TableConfig};
pub use rxgrid_api::{ApiClient, TransportConfig};
