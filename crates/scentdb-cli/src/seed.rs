//! Offline ingestion: search Fragella for each configured term, normalize the
//! results, and add them to the product store.
//!
//! Per-term API failures are logged and skipped so one bad term does not
//! abort the run. Running out of request budget ends the run early and is
//! not an error. A missing API key or an unwritable store is.

use std::path::Path;
use std::time::{Duration, Instant};

use scentdb_core::SeedConfig;
use scentdb_fragella::{normalize_batch, FragellaClient, FragellaError};
use scentdb_store::ProductStore;

/// Outcome of one seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedSummary {
    pub terms_attempted: usize,
    pub terms_failed: usize,
    pub requests_used: u32,
    pub products_added: usize,
    pub store_total: usize,
    pub elapsed: Duration,
}

/// Loads the seed configuration from `path`, or falls back to the built-in
/// default term list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// configuration fails validation.
pub(crate) fn resolve_seed_config(path: Option<&Path>) -> anyhow::Result<SeedConfig> {
    let config = match path {
        Some(path) => scentdb_core::load_seed_config(path)?,
        None => SeedConfig::default(),
    };
    scentdb_core::validate_seed_config(&config)?;
    Ok(config)
}

pub(crate) fn print_plan(seed: &SeedConfig) {
    println!(
        "dry-run: would search {} terms (max {} items each, max {} requests): [{}]",
        seed.search_terms.len(),
        seed.max_items_per_term,
        seed.max_total_requests,
        seed.search_terms.join(", ")
    );
}

/// Builds the client and store from `config`, runs the seed, and reports the
/// summary.
///
/// The client is built first so a missing API key fails before the store
/// file is touched.
///
/// # Errors
///
/// Returns an error if the Fragella client cannot be built (for example, no
/// API key), the store cannot be opened, or a store write fails mid-run.
pub(crate) async fn run_seed_command(
    config: &scentdb_core::AppConfig,
    seed: &SeedConfig,
) -> anyhow::Result<()> {
    let client = FragellaClient::with_base_url(
        config.fragella_api_key.as_deref(),
        config.fragella_request_timeout_secs,
        config.fragella_max_requests,
        &config.fragella_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Fragella client: {e}"))?;

    let store = ProductStore::open(&config.store_path)?;
    tracing::info!(
        path = %store.path().display(),
        terms = seed.search_terms.len(),
        max_items_per_term = seed.max_items_per_term,
        max_total_requests = seed.max_total_requests,
        "starting seed run"
    );

    let summary = match run_seed(&client, &store, seed).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(
                error = %e,
                requests_used = client.requests_used(),
                "seed run failed"
            );
            return Err(e);
        }
    };

    tracing::info!(
        terms_attempted = summary.terms_attempted,
        terms_failed = summary.terms_failed,
        requests_used = summary.requests_used,
        products_added = summary.products_added,
        store_total = summary.store_total,
        elapsed_ms = u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX),
        "seed run complete"
    );
    println!(
        "added {} products ({} in store) using {}/{} requests in {:.1}s",
        summary.products_added,
        summary.store_total,
        summary.requests_used,
        seed.max_total_requests,
        summary.elapsed.as_secs_f64()
    );

    Ok(())
}

/// Runs the seed loop against an already-built client and store.
///
/// # Errors
///
/// Returns an error only when the store rejects a write. API failures are
/// logged per term and counted in [`SeedSummary::terms_failed`].
pub(crate) async fn run_seed(
    client: &FragellaClient,
    store: &ProductStore,
    seed: &SeedConfig,
) -> anyhow::Result<SeedSummary> {
    let started = Instant::now();
    let mut terms_attempted = 0usize;
    let mut terms_failed = 0usize;
    let mut products_added = 0usize;

    for term in &seed.search_terms {
        if client.requests_used() >= seed.max_total_requests {
            tracing::info!(
                used = client.requests_used(),
                limit = seed.max_total_requests,
                "request cap reached; stopping"
            );
            break;
        }
        terms_attempted += 1;

        let raws = match client
            .search_fragrances(term, seed.max_items_per_term)
            .await
        {
            Ok(raws) => raws,
            Err(FragellaError::QuotaExhausted { used, limit }) => {
                tracing::warn!(term = %term, used, limit, "client quota exhausted; stopping");
                break;
            }
            Err(e) => {
                tracing::warn!(term = %term, error = %e, "search failed; skipping term");
                terms_failed += 1;
                continue;
            }
        };

        if raws.is_empty() {
            tracing::info!(term = %term, "no results");
            continue;
        }

        let products = normalize_batch(&raws);
        let fetched = products.len();
        let added = store.add_batch(products)?;
        products_added += added;

        tracing::info!(
            term = %term,
            added,
            fetched,
            duplicates = fetched - added,
            "term processed"
        );
    }

    Ok(SeedSummary {
        terms_attempted,
        terms_failed,
        requests_used: client.requests_used(),
        products_added,
        store_total: store.stats().count,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
