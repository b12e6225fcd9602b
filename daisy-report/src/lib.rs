//! daisy-report library - blog analysis report service
//!
//! Serves stored analysis reports with the blog's posts listed newest first,
//! plus the status endpoint the submission page polls while a report is being
//! prepared.

use std::sync::Arc;

use axum::Router;
use daisy_common::config::ServiceConfig;
use daisy_common::OrderingEngine;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod poll;
pub mod render;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Orders post cards on the report page
    pub engine: Arc<OrderingEngine>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: &ServiceConfig) -> Self {
        Self {
            db,
            engine: Arc::new(OrderingEngine::new(config.ordering)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    // JSON API
    let api = Router::new()
        .route("/api/blogs", post(api::create_blog))
        .route("/api/blogs/:blog_id/posts", get(api::list_blog_posts))
        .route("/api/blogs/:blog_id/report", post(api::create_report))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/status/:blog_id", get(api::get_status));

    // Server-rendered pages
    let pages = Router::new()
        .route("/", get(api::serve_index))
        .route("/report/:report_id", get(api::view_report))
        .fallback(api::not_found_page);

    Router::new()
        .merge(api)
        .merge(pages)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
