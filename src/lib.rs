//! Melrose Mobile Restrooms web application.
//!
//! Public marketing pages, an instant quote for restroom trailer rentals,
//! and an admin back office for working the resulting leads. The pricing
//! engine in [`pricing`] is the one source of truth for quoted amounts;
//! both the live estimate endpoint and the quote form submission go
//! through it.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod format;
pub mod geo;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use cache::AppCache;
use geo::GeoClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub geo: GeoClient,
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    // The JSON endpoints also serve the quote form's fetch calls, which
    // arrive same-origin; the permissive CORS layer covers local tooling
    let api = pricing::router().layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(routes::site::home))
        .route("/restrooms", get(routes::site::restrooms))
        .route("/about", get(routes::site::about))
        .route("/service-area", get(routes::site::service_area))
        .route("/quote", get(routes::quote::form).post(routes::quote::submit))
        .nest("/api", api)
        .nest("/admin", routes::admin::router())
        .nest_service("/static", ServeDir::new("static"))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
