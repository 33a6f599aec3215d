// Wire models for the drug-catalog backend.
//
// Responses are bare JSON (no envelope). Field names are camelCase on
// the wire. These types double as the domain model -- `rxgrid-core`
// re-exports them unchanged.

use serde::{Deserialize, Serialize};

/// Sentinel filter value meaning "no manufacturer constraint".
pub const ALL_COMPANIES: &str = "all";

/// One pharmaceutical product record from `GET /drugs`.
///
/// Immutable once fetched. Records arrive in server-defined order and
/// are never re-sorted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    /// Unique, stable identifier.
    pub id: u64,
    /// Manufacturer product code.
    pub code: String,
    pub generic_name: String,
    pub brand_name: String,
    /// Manufacturer name, free text. Exact-match filter key.
    pub company: String,
    /// ISO-8601 timestamp; formatted for display by `rxgrid-core::fmt`.
    pub launch_date: String,
}

impl Drug {
    /// Combined display name for the `name` column: `"{generic} ({brand})"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.generic_name, self.brand_name)
    }
}

/// Closed set of renderable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Id,
    Code,
    Name,
    Company,
    LaunchDate,
}

/// One column descriptor from the table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: ColumnId,
    /// Display header text.
    pub label: String,
    /// Advisory only -- no client-side sort is implemented.
    #[serde(default)]
    pub sortable: bool,
}

/// Server-supplied column layout from `GET /table-config`.
///
/// Fetched once per session and treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub columns: Vec<TableColumn>,
}
