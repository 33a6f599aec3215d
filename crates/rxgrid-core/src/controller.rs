// ── Orchestration controller ──
//
// Owns all application state and sequences the two fetch workflows:
// the one-time startup load and the filter-triggered reload. UI layers
// bind through `subscribe()` / `snapshot()` plus the method calls here;
// no fetch or state logic belongs in view code.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use rxgrid_api::ApiClient;
use rxgrid_api::models::ALL_COMPANIES;

use crate::state::{DEFAULT_ITEMS_PER_PAGE, ViewState};

/// The stateful coordinator for data loading, filtering, and pagination.
///
/// Cheaply cloneable via `Arc`. Fetch failures are converted into the
/// [`ViewState::error`] slot at the workflow boundary -- nothing
/// propagates past the controller, and a later
/// [`select_company`](Self::select_company) can always recover.
#[derive(Clone)]
pub struct TableController {
    inner: Arc<Inner>,
}

struct Inner {
    client: ApiClient,
    state: watch::Sender<Arc<ViewState>>,
    /// Request generation, bumped each time a drugs fetch is issued.
    /// A workflow commits its drugs only while its generation is still
    /// current, so a stale in-flight response can never overwrite data
    /// from a more recently issued selection.
    generation: AtomicU64,
}

impl TableController {
    /// Create a controller with the default page size.
    pub fn new(client: ApiClient) -> Self {
        Self::with_page_size(client, DEFAULT_ITEMS_PER_PAGE)
    }

    /// Create a controller with an explicit page size (fixed for the
    /// session).
    pub fn with_page_size(client: ApiClient, items_per_page: usize) -> Self {
        let (state, _) = watch::channel(Arc::new(ViewState::new(items_per_page)));
        Self {
            inner: Arc::new(Inner {
                client,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.inner.state.subscribe()
    }

    /// The current state snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<ViewState> {
        self.inner.state.borrow().clone()
    }

    // ── Workflows ────────────────────────────────────────────────────

    /// Startup load: column configuration, unfiltered drug records, and
    /// the manufacturer list, fetched concurrently.
    ///
    /// The three results commit together only on joint success -- the
    /// view never shows configuration without data or vice versa. On any
    /// failure the first failing resource's message lands in the error
    /// slot and prior state is left alone.
    pub async fn load(&self) {
        let generation = self.next_generation();
        self.modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let (config_res, drugs_res, companies_res) = tokio::join!(
            self.inner.client.table_config(),
            self.inner.client.drugs(None),
            self.inner.client.companies(),
        );

        let current = self.is_current(generation);

        match (config_res, drugs_res, companies_res) {
            (Ok(config), Ok(drugs), Ok(companies)) => {
                let companies = dedup_preserving_order(companies);
                debug!(
                    drugs = drugs.len(),
                    companies = companies.len(),
                    columns = config.columns.len(),
                    "initial load complete"
                );
                self.modify(|s| {
                    // Config and companies are session-static; commit
                    // them even if a filter fetch superseded this load.
                    s.table_config = Some(config);
                    s.companies = companies;
                    if current {
                        s.drugs = drugs;
                        s.current_page = 1;
                        s.loading = false;
                    }
                });
            }
            (config_res, drugs_res, companies_res) => {
                let message = config_res
                    .err()
                    .map(|e| e.to_string())
                    .or_else(|| drugs_res.err().map(|e| e.to_string()))
                    .or_else(|| companies_res.err().map(|e| e.to_string()))
                    .unwrap_or_else(|| "initial load failed".to_owned());
                warn!(error = %message, "initial load failed");
                if current {
                    self.modify(|s| {
                        s.error = Some(message);
                        s.loading = false;
                    });
                }
            }
        }
    }

    /// Change the filter selection and reload drug records.
    ///
    /// `"all"` lifts the constraint; any other value is sent verbatim as
    /// an exact-match company name. On success the record list is
    /// replaced and the page resets to 1; on failure the previous
    /// records stay visible and only the error slot changes.
    pub async fn select_company(&self, name: &str) {
        let generation = self.next_generation();
        let name = name.to_owned();
        debug!(company = %name, "filter selection changed");
        self.modify(|s| {
            s.selected_company = name.clone();
            s.loading = true;
        });

        let filter = if name == ALL_COMPANIES {
            None
        } else {
            Some(name.as_str())
        };
        let result = self.inner.client.drugs(filter).await;

        if !self.is_current(generation) {
            debug!(company = %name, "discarding stale filter response");
            return;
        }

        match result {
            Ok(drugs) => {
                debug!(company = %name, count = drugs.len(), "filter reload complete");
                self.modify(|s| {
                    s.drugs = drugs;
                    s.current_page = 1;
                    s.error = None;
                    s.loading = false;
                });
            }
            Err(e) => {
                warn!(company = %name, error = %e, "filter reload failed");
                self.modify(|s| {
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// A company cell was activated in the table -- identical to picking
    /// that company in the filter control.
    pub async fn company_cell_clicked(&self, company: &str) {
        self.select_company(company).await;
    }

    /// Move to `page` (1-based).
    ///
    /// Out-of-range pages are silently ignored and the state is left
    /// untouched. Returns `true` when the page changed, which tells the
    /// bound view to scroll its results region back to the top.
    pub fn change_page(&self, page: usize) -> bool {
        if page < 1 || page > self.snapshot().total_pages() {
            return false;
        }
        self.modify(|s| s.current_page = page);
        true
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn modify(&self, f: impl FnOnce(&mut ViewState)) {
        self.inner.state.send_modify(|s| f(Arc::make_mut(s)));
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }
}

/// Drop duplicate company names, keeping first-seen order.
fn dedup_preserving_order(companies: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    companies
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
