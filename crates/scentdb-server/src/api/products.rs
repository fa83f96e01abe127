//! Read-only product routes. Every request reads the store file afresh; the
//! Fragella API is never called from here.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use scentdb_core::Product;
use scentdb_store::ProductStore;
use serde::{Deserialize, Serialize};

use super::{internal_error_response, not_found, ApiError, AppState, EmptyList};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatsResponse {
    count: usize,
    last_synced_at: DateTime<Utc>,
    version: u32,
    message: &'static str,
}

fn join_failed(error: &tokio::task::JoinError) {
    tracing::error!(error = %error, "store task failed");
}

pub(super) async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, EmptyList> {
    state
        .with_store(ProductStore::get_all)
        .await
        .map(Json)
        .map_err(|e| {
            join_failed(&e);
            EmptyList(StatusCode::INTERNAL_SERVER_ERROR)
        })
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, EmptyList> {
    let Some(q) = query.q.filter(|q| !q.trim().is_empty()) else {
        return Err(EmptyList(StatusCode::BAD_REQUEST));
    };

    state
        .with_store(move |store| store.search(&q))
        .await
        .map(Json)
        .map_err(|e| {
            join_failed(&e);
            EmptyList(StatusCode::INTERNAL_SERVER_ERROR)
        })
}

/// `/api/products/family` or `/api/products/family/` with no family segment.
pub(super) async fn missing_family() -> EmptyList {
    EmptyList(StatusCode::BAD_REQUEST)
}

pub(super) async fn products_by_family(
    State(state): State<AppState>,
    Path(family): Path<String>,
) -> Result<Json<Vec<Product>>, EmptyList> {
    if family.trim().is_empty() {
        return Err(EmptyList(StatusCode::BAD_REQUEST));
    }

    state
        .with_store(move |store| store.filter_by_family(&family))
        .await
        .map(Json)
        .map_err(|e| {
            join_failed(&e);
            EmptyList(StatusCode::INTERNAL_SERVER_ERROR)
        })
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let found = state
        .with_store(move |store| store.get_by_id(&id))
        .await
        .map_err(|e| {
            join_failed(&e);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })?;

    found
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

/// Store statistics for local debugging. Answers like an unknown route in
/// production.
pub(super) async fn store_stats(State(state): State<AppState>) -> Response {
    if state.production {
        return not_found().await.into_response();
    }

    match state.with_store(ProductStore::stats).await {
        Ok(stats) => Json(StatsResponse {
            count: stats.count,
            last_synced_at: stats.last_synced_at,
            version: stats.version,
            message: "Database statistics (development only)",
        })
        .into_response(),
        Err(e) => {
            join_failed(&e);
            internal_error_response(Some(e.to_string()))
        }
    }
}
