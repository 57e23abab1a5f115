// Library crate for mocksmith
// Exports modules for use by the server binary and tests

pub mod chaos;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    clear_endpoints, create_endpoint, delete_endpoint, dispatch_mock, get_endpoint,
    list_endpoints, sync_endpoints, update_endpoint,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Lifecycle surface: endpoint CRUD, generation, bulk sync. Gets the
    // stock permissive CORS layer; the mock dispatcher writes its own
    // CORS headers because they must ride on every shaped response.
    let lifecycle_routes = Router::new()
        .route("/api/generate", post(create_endpoint).get(list_endpoints))
        .route("/api/endpoints", get(list_endpoints))
        .route(
            "/api/endpoints/{id}",
            get(get_endpoint)
                .put(update_endpoint)
                .delete(delete_endpoint),
        )
        .route("/api/sync", post(sync_endpoints).delete(clear_endpoints))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(|| async { "Hello, mocksmith!" }))
        .merge(lifecycle_routes)
        // The public mock surface answers every verb, OPTIONS included
        .route("/api/mock/{slug}", any(dispatch_mock))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
