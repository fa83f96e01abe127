use scentdb_core::{Gender, ScentFamily};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn temp_store() -> ProductStore {
    let path = std::env::temp_dir()
        .join(format!("scentdb-seed-{}", uuid::Uuid::new_v4()))
        .join("products.json");
    ProductStore::open(path).expect("open temp store")
}

fn client(server: &MockServer, max_requests: u32) -> FragellaClient {
    FragellaClient::with_base_url(Some("test-key"), 30, max_requests, &server.uri())
        .expect("client construction should not fail")
}

fn seed_config(terms: &[&str], max_total_requests: u32) -> SeedConfig {
    SeedConfig {
        search_terms: terms.iter().map(|t| (*t).to_string()).collect(),
        max_items_per_term: 4,
        max_total_requests,
    }
}

async fn mount_term(server: &MockServer, term: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/fragrances/search"))
        .and(query_param("q", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn seeds_each_term_and_suppresses_duplicates() {
    let server = MockServer::start().await;
    mount_term(
        &server,
        "Dior",
        json!({ "results": [
            { "id": 1, "name": "Sauvage", "brand": "Dior", "male": true },
            { "id": 2, "name": "J'adore", "brand": "Dior", "female": true }
        ]}),
    )
    .await;
    mount_term(
        &server,
        "Sauvage",
        json!([{ "id": 3, "name": "Sauvage", "brand": "Dior" }]),
    )
    .await;

    let store = temp_store();
    let summary = run_seed(
        &client(&server, 20),
        &store,
        &seed_config(&["Dior", "Sauvage"], 10),
    )
    .await
    .expect("seed run");

    assert_eq!(summary.terms_attempted, 2);
    assert_eq!(summary.terms_failed, 0);
    assert_eq!(summary.requests_used, 2);
    assert_eq!(summary.products_added, 2);
    assert_eq!(summary.store_total, 2);

    let sauvage = store.get_by_id("frag_1").expect("first Sauvage kept");
    assert_eq!(sauvage.gender, Gender::Men);
    assert!(store.get_by_id("frag_3").is_none(), "later duplicate dropped");
}

#[tokio::test]
async fn failing_term_is_skipped_and_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Chanel"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;
    mount_term(&server, "Creed", json!({ "data": [{ "id": 9, "name": "Aventus", "brand": "Creed" }] }))
        .await;

    let store = temp_store();
    let summary = run_seed(
        &client(&server, 20),
        &store,
        &seed_config(&["Chanel", "Creed"], 10),
    )
    .await
    .expect("seed run");

    assert_eq!(summary.terms_attempted, 2);
    assert_eq!(summary.terms_failed, 1);
    assert_eq!(summary.products_added, 1);
    assert!(store.get_by_id("frag_9").is_some());
}

#[tokio::test]
async fn unrecognized_envelope_counts_as_failed_term() {
    let server = MockServer::start().await;
    mount_term(&server, "Guerlain", json!({ "items": [] })).await;

    let summary = run_seed(
        &client(&server, 20),
        &temp_store(),
        &seed_config(&["Guerlain"], 10),
    )
    .await
    .expect("seed run");

    assert_eq!(summary.terms_failed, 1);
    assert_eq!(summary.products_added, 0);
}

#[tokio::test]
async fn empty_results_continue_to_next_term() {
    let server = MockServer::start().await;
    mount_term(&server, "Nobody", json!({ "fragrances": [] })).await;
    mount_term(&server, "Creed", json!([{ "id": 9, "name": "Aventus", "brand": "Creed" }])).await;

    let summary = run_seed(
        &client(&server, 20),
        &temp_store(),
        &seed_config(&["Nobody", "Creed"], 10),
    )
    .await
    .expect("seed run");

    assert_eq!(summary.terms_attempted, 2);
    assert_eq!(summary.terms_failed, 0);
    assert_eq!(summary.products_added, 1);
}

#[tokio::test]
async fn run_stops_at_configured_request_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let summary = run_seed(
        &client(&server, 20),
        &temp_store(),
        &seed_config(&["Dior", "Chanel", "Creed", "Guerlain"], 2),
    )
    .await
    .expect("seed run");

    assert_eq!(summary.terms_attempted, 2);
    assert_eq!(summary.requests_used, 2);
}

#[tokio::test]
async fn client_quota_exhaustion_stops_without_error() {
    let server = MockServer::start().await;
    mount_term(&server, "Dior", json!([{ "id": 1, "name": "Sauvage", "brand": "Dior" }])).await;
    mount_term(&server, "Chanel", json!([{ "id": 2, "name": "No 5", "brand": "Chanel" }])).await;

    let store = temp_store();
    let summary = run_seed(
        &client(&server, 1),
        &store,
        &seed_config(&["Dior", "Chanel", "Creed"], 10),
    )
    .await
    .expect("quota exhaustion is not an error");

    assert_eq!(summary.terms_attempted, 2);
    assert_eq!(summary.terms_failed, 0);
    assert_eq!(summary.requests_used, 1);
    assert_eq!(summary.store_total, 1);

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1, "refused call never reaches the server");
}

#[tokio::test]
async fn oud_intense_is_stored_as_woody_for_men() {
    let server = MockServer::start().await;
    mount_term(
        &server,
        "X",
        json!([{
            "name": "Oud Intense",
            "brand": "X",
            "description": "rich oud and leather",
            "male": true
        }]),
    )
    .await;

    let store = temp_store();
    run_seed(&client(&server, 20), &store, &seed_config(&["X"], 10))
        .await
        .expect("seed run");

    let product = store
        .get_by_id("frag_x_oud_intense")
        .expect("slug id from brand and name");
    assert_eq!(product.gender, Gender::Men);
    assert_eq!(product.scent_family, ScentFamily::Woody);
    assert_eq!(product.sizes.len(), 2);
    assert!(product.is_best_seller, "first record of its batch");
}

#[tokio::test]
async fn corrupt_store_aborts_the_run() {
    let server = MockServer::start().await;
    mount_term(&server, "Dior", json!([{ "id": 1, "name": "Sauvage", "brand": "Dior" }])).await;

    let store = temp_store();
    std::fs::write(store.path(), "{ broken").unwrap();

    let result = run_seed(&client(&server, 20), &store, &seed_config(&["Dior"], 10)).await;
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ broken");
}

#[test]
fn missing_seed_path_uses_default_terms() {
    let config = resolve_seed_config(None).unwrap();
    assert_eq!(config, SeedConfig::default());
    assert_eq!(config.search_terms.len(), 5);
}
