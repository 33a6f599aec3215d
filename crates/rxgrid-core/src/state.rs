// ── View state snapshot ──
//
// One immutable value holding everything the presentation layer needs.
// Pagination is derived on every read, never stored independently, so
// page math can't drift out of sync with the record list.

use rxgrid_api::models::{ALL_COMPANIES, Drug, TableConfig};

/// Records shown per page when configuration doesn't override it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

/// Snapshot of the full application state.
///
/// Published through a `watch` channel by [`TableController`]
/// (crate::TableController); every commit replaces the whole snapshot,
/// so observers never see a partial update.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Drug records for the current filter selection, server order.
    pub drugs: Vec<Drug>,
    /// Distinct manufacturer names, dropdown order.
    pub companies: Vec<String>,
    /// Column layout; `None` until the first load completes.
    pub table_config: Option<TableConfig>,
    /// Current filter: a company name or the `"all"` sentinel.
    pub selected_company: String,
    /// A fetch is in flight.
    pub loading: bool,
    /// Last fetch failure, if any. Cleared by a successful reload.
    pub error: Option<String>,
    /// 1-based page number, always within `1..=total_pages()`.
    pub current_page: usize,
    /// Page size, fixed for the session.
    pub items_per_page: usize,
}

impl ViewState {
    /// Fresh pre-load state: no data, `"all"` filter, loading until the
    /// first load settles.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            drugs: Vec::new(),
            companies: Vec::new(),
            table_config: None,
            selected_company: ALL_COMPANIES.to_owned(),
            loading: true,
            error: None,
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Total page count; at least 1 even when there are no records.
    pub fn total_pages(&self) -> usize {
        self.drugs.len().div_ceil(self.items_per_page).max(1)
    }

    /// The slice of records on the current page.
    pub fn page_drugs(&self) -> &[Drug] {
        let start = (self.current_page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.drugs.len());
        self.drugs.get(start..end).unwrap_or_default()
    }

    /// Dropdown options: the `"all"` sentinel followed by every company.
    pub fn filter_options(&self) -> Vec<&str> {
        std::iter::once(ALL_COMPANIES)
            .chain(self.companies.iter().map(String::as_str))
            .collect()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}
