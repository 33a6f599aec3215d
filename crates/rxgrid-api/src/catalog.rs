// Catalog endpoints
//
// The backend's three read operations. Server-side filtering only: the
// `company` constraint is passed through as a query parameter and the
// client never filters records locally.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::{Error, Resource};
use crate::models::{ALL_COMPANIES, Drug, TableConfig};

impl ApiClient {
    /// Fetch the column configuration.
    ///
    /// `GET {base}/table-config`
    pub async fn table_config(&self) -> Result<TableConfig, Error> {
        let url = self.endpoint_url("table-config");
        debug!("fetching table configuration");
        self.get(url, Resource::TableConfig).await
    }

    /// Fetch drug records, optionally constrained to one manufacturer.
    ///
    /// `GET {base}/drugs` or `GET {base}/drugs?company=<name>`
    ///
    /// `None` and the `"all"` sentinel both return the unfiltered set.
    /// Company names are percent-encoded when embedded in the query, so
    /// names with reserved URL characters round-trip exactly.
    pub async fn drugs(&self, company: Option<&str>) -> Result<Vec<Drug>, Error> {
        let mut url = self.endpoint_url("drugs");
        if let Some(name) = company.filter(|c| *c != ALL_COMPANIES) {
            url.query_pairs_mut().append_pair("company", name);
        }
        debug!(?company, "fetching drugs");
        self.get(url, Resource::Drugs).await
    }

    /// Fetch the distinct manufacturer list.
    ///
    /// `GET {base}/companies`
    pub async fn companies(&self) -> Result<Vec<String>, Error> {
        let url = self.endpoint_url("companies");
        debug!("fetching companies");
        self.get(url, Resource::Companies).await
    }
}
