mod products;

use std::any::Any;

use axum::{
    extract::Request,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use scentdb_core::Product;
use scentdb_store::ProductStore;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Routes listed in the 404 body.
const AVAILABLE_ROUTES: [&str; 5] = [
    "GET /health",
    "GET /api/products",
    "GET /api/products/:id",
    "GET /api/products/search?q=...",
    "GET /api/products/family/:family",
];

#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
    /// Hides the internal stats route and 500 error detail.
    pub production: bool,
}

impl AppState {
    #[must_use]
    pub fn new(store: ProductStore, production: bool) -> Self {
        Self { store, production }
    }

    /// Runs a store operation on the blocking pool. The store does
    /// synchronous file I/O on every call.
    pub(super) async fn with_store<T, F>(&self, op: F) -> Result<T, tokio::task::JoinError>
    where
        F: FnOnce(&ProductStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store)).await
    }
}

/// `{ "error": ... }` body for single-object endpoints.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Failure on a list endpoint: the status code with an empty array body.
#[derive(Debug, Clone, Copy)]
pub struct EmptyList(pub StatusCode);

impl IntoResponse for EmptyList {
    fn into_response(self) -> Response {
        (self.0, Json(Vec::<Product>::new())).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundBody {
    error: &'static str,
    available_routes: [&'static str; 5],
}

#[derive(Debug, Serialize)]
struct InternalErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

pub(super) fn internal_error_response(message: Option<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorBody {
            error: "Internal server error",
            message,
        }),
    )
        .into_response()
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    let production = state.production;
    let routes = Router::new()
        .route("/health", get(health))
        .route("/api/products", get(products::list_products))
        .route("/api/products/search", get(products::search_products))
        .route("/api/products/family", get(products::missing_family))
        .route("/api/products/family/", get(products::missing_family))
        .route(
            "/api/products/family/{family}",
            get(products::products_by_family),
        )
        .route("/api/products/internal/stats", get(products::store_stats))
        .route("/api/products/{id}", get(products::get_product))
        .fallback(not_found);

    with_layers(routes, production).with_state(state)
}

/// Wraps `router` in the request id, tracing, CORS, and panic layers.
/// Panic bodies carry the panic message only when `production` is false.
pub(super) fn with_layers(router: Router<AppState>, production: bool) -> Router<AppState> {
    let on_panic = move |err: Box<dyn Any + Send + 'static>| {
        let message = panic_message(err.as_ref());
        tracing::error!(panic = %message, "handler panicked");
        internal_error_response((!production).then_some(message))
    };

    router.layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                let id = req
                    .extensions()
                    .get::<RequestId>()
                    .map_or("", |r| r.0.as_str());
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %id,
                )
            }))
            .layer(build_cors())
            .layer(CatchPanicLayer::custom(on_panic)),
    )
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        timestamp: Utc::now(),
    })
}

pub(super) async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "Route not found",
            available_routes: AVAILABLE_ROUTES,
        }),
    )
}
