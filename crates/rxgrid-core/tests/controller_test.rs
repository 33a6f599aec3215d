#![allow(clippy::unwrap_used)]
// Integration tests for `TableController` workflows against a wiremock
// backend: startup load, filter reloads, pagination, and the stale
// response guard.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rxgrid_core::{ApiClient, TableController};

// ── Helpers ─────────────────────────────────────────────────────────

fn drug_json(id: u64, company: &str) -> serde_json::Value {
    json!({
        "id": id,
        "code": format!("RX-{id:04}"),
        "genericName": "metformin",
        "brandName": "Glucophage",
        "company": company,
        "launchDate": "1995-03-03T00:00:00Z"
    })
}

fn drugs_body(count: u64, company: &str) -> serde_json::Value {
    json!((1..=count).map(|id| drug_json(id, company)).collect::<Vec<_>>())
}

async fn controller(server: &MockServer) -> TableController {
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    TableController::new(client)
}

/// Mount the three startup endpoints: a 4-column config, `count`
/// unfiltered drugs, and a three-company list.
async fn mount_initial(server: &MockServer, count: u64) {
    Mock::given(method("GET"))
        .and(path("/table-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "columns": [
                { "id": "id", "label": "ID", "sortable": true },
                { "id": "name", "label": "Name", "sortable": true },
                { "id": "company", "label": "Company", "sortable": false },
                { "id": "launchDate", "label": "Launch Date", "sortable": false }
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param_is_missing("company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drugs_body(count, "Bayer")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["Bayer", "Pfizer", "Roche"])),
        )
        .mount(server)
        .await;
}

// ── Startup load ────────────────────────────────────────────────────

#[tokio::test]
async fn load_commits_config_drugs_and_companies_together() {
    let server = MockServer::start().await;
    mount_initial(&server, 2).await;
    let controller = controller(&server).await;

    assert!(controller.snapshot().loading, "pre-load state is loading");

    controller.load().await;

    let state = controller.snapshot();
    assert_eq!(state.drugs.len(), 2);
    assert_eq!(state.companies, vec!["Bayer", "Pfizer", "Roche"]);
    assert_eq!(state.table_config.as_ref().unwrap().columns.len(), 4);
    assert_eq!(state.selected_company, "all");
    assert_eq!(state.current_page, 1);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn failed_load_commits_nothing_but_the_error() {
    let server = MockServer::start().await;

    // Config and companies succeed; drugs fails. A partial commit would
    // show columns with no data -- nothing may land except the error.
    Mock::given(method("GET"))
        .and(path("/table-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "columns": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drugs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Bayer"])))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;

    let state = controller.snapshot();
    assert!(state.drugs.is_empty());
    assert!(state.companies.is_empty());
    assert_eq!(state.table_config, None);
    assert!(!state.loading);
    let error = state.error.as_deref().unwrap();
    assert!(error.contains("drugs"), "error names the failing resource: {error}");
}

#[tokio::test]
async fn load_dedups_company_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/table-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "columns": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drugs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["Bayer", "Pfizer", "Bayer", "Roche", "Pfizer"])),
        )
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;

    let state = controller.snapshot();
    assert_eq!(state.companies, vec!["Bayer", "Pfizer", "Roche"]);
    assert_eq!(state.filter_options(), vec!["all", "Bayer", "Pfizer", "Roche"]);
}

// ── Filter-triggered reload ─────────────────────────────────────────

#[tokio::test]
async fn selecting_a_company_fetches_once_with_the_exact_name() {
    let server = MockServer::start().await;
    mount_initial(&server, 3).await;

    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Pfizer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drugs_body(1, "Pfizer")))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;
    controller.select_company("Pfizer").await;

    let state = controller.snapshot();
    assert_eq!(state.selected_company, "Pfizer");
    assert_eq!(state.drugs.len(), 1);
    assert_eq!(state.drugs[0].company, "Pfizer");
    assert!(!state.loading);
}

#[tokio::test]
async fn selecting_all_fetches_without_a_company_constraint() {
    let server = MockServer::start().await;
    mount_initial(&server, 3).await;

    let controller = controller(&server).await;
    controller.load().await;
    controller.select_company("all").await;

    let state = controller.snapshot();
    assert_eq!(state.selected_company, "all");
    assert_eq!(state.drugs.len(), 3);

    // One unfiltered request from load(), one from the "all" selection,
    // and no request ever carried a company parameter.
    let requests = server.received_requests().await.unwrap();
    let drugs_requests: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/drugs")
        .collect();
    assert_eq!(drugs_requests.len(), 2);
    assert!(
        drugs_requests
            .iter()
            .all(|r| !r.url.query_pairs().any(|(k, _)| k == "company"))
    );
}

#[tokio::test]
async fn company_cell_click_is_equivalent_to_dropdown_selection() {
    let server = MockServer::start().await;
    mount_initial(&server, 3).await;

    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Roche"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drugs_body(2, "Roche")))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;
    controller.company_cell_clicked("Roche").await;

    let state = controller.snapshot();
    assert_eq!(state.selected_company, "Roche");
    assert_eq!(state.drugs.len(), 2);
}

#[tokio::test]
async fn filter_change_resets_the_page_to_one() {
    let server = MockServer::start().await;
    mount_initial(&server, 120).await;

    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Bayer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drugs_body(60, "Bayer")))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;

    assert!(controller.change_page(3));
    assert_eq!(controller.snapshot().current_page, 3);

    controller.select_company("Bayer").await;
    assert_eq!(controller.snapshot().current_page, 1);
}

#[tokio::test]
async fn failed_filter_reload_keeps_the_previous_records() {
    let server = MockServer::start().await;
    mount_initial(&server, 5).await;

    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Pfizer"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;
    controller.select_company("Pfizer").await;

    let state = controller.snapshot();
    assert_eq!(state.drugs.len(), 5, "last-known-good records stay visible");
    assert_eq!(state.selected_company, "Pfizer");
    assert!(state.error.is_some());
    assert!(!state.loading);
}

#[tokio::test]
async fn successful_reload_clears_a_previous_error() {
    let server = MockServer::start().await;
    mount_initial(&server, 5).await;

    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Pfizer"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Roche"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drugs_body(1, "Roche")))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;

    controller.select_company("Pfizer").await;
    assert!(controller.snapshot().error.is_some());

    controller.select_company("Roche").await;
    let state = controller.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.drugs[0].company, "Roche");
}

// ── Stale-response guard ────────────────────────────────────────────

#[tokio::test]
async fn stale_filter_response_is_discarded() {
    let server = MockServer::start().await;
    mount_initial(&server, 3).await;

    // The first selection's response arrives long after the second
    // selection has already resolved.
    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Bayer"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(drugs_body(9, "Bayer"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drugs"))
        .and(query_param("company", "Pfizer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drugs_body(1, "Pfizer")))
        .mount(&server)
        .await;

    let controller = controller(&server).await;
    controller.load().await;

    let slow = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.select_company("Bayer").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.select_company("Pfizer").await;
    slow.await.unwrap();

    let state = controller.snapshot();
    assert_eq!(state.selected_company, "Pfizer");
    assert_eq!(state.drugs.len(), 1, "late Bayer response must not win");
    assert_eq!(state.drugs[0].company, "Pfizer");
    assert!(!state.loading);
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn change_page_ignores_out_of_range_targets() {
    let server = MockServer::start().await;
    mount_initial(&server, 120).await;

    let controller = controller(&server).await;
    controller.load().await;

    assert_eq!(controller.snapshot().total_pages(), 3);

    assert!(!controller.change_page(0));
    assert_eq!(controller.snapshot().current_page, 1);

    assert!(!controller.change_page(4));
    assert_eq!(controller.snapshot().current_page, 1);

    assert!(controller.change_page(2));
    assert_eq!(controller.snapshot().current_page, 2);
    assert_eq!(controller.snapshot().page_drugs()[0].id, 51);
}
