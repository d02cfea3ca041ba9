//! The brewlog HTTP server: Axum routes over a SQLite database.
//!
//! The router is built here so integration tests can drive it in-process;
//! `main.rs` only wires up configuration and the listener.

pub mod error;
pub mod routes;
pub mod storage;

use axum::{
    extract::FromRef,
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storage::Db;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self {
            db,
            started_at: Utc::now(),
        }
    }
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & metrics
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics::metrics))
        // Beans
        .route(
            "/beans",
            post(routes::beans::create_bean).get(routes::beans::list_beans),
        )
        .route(
            "/beans/{id}",
            get(routes::beans::get_bean)
                .put(routes::beans::update_bean)
                .delete(routes::beans::delete_bean),
        )
        // Methods
        .route(
            "/methods",
            post(routes::methods::create_method).get(routes::methods::list_methods),
        )
        .route(
            "/methods/{id}",
            get(routes::methods::get_method)
                .put(routes::methods::update_method)
                .delete(routes::methods::delete_method),
        )
        // Grinders
        .route(
            "/grinders",
            post(routes::grinders::create_grinder).get(routes::grinders::list_grinders),
        )
        .route(
            "/grinders/{id}",
            get(routes::grinders::get_grinder)
                .put(routes::grinders::update_grinder)
                .delete(routes::grinders::delete_grinder),
        )
        // Brews
        .route(
            "/brews",
            post(routes::brews::create_brew).get(routes::brews::list_brews),
        )
        .route(
            "/brews/{id}",
            get(routes::brews::get_brew).delete(routes::brews::delete_brew),
        )
        // Feedback
        .route(
            "/brews/{id}/feedback",
            post(routes::feedback::create_feedback),
        )
        .route("/feedback/{id}", delete(routes::feedback::delete_feedback))
        // Calculator & recommendations
        .route("/calculator", post(routes::calculator::calculate))
        .route(
            "/recommendations",
            get(routes::recommendations::get_recommendation),
        )
}

/// The full application router with middleware applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
