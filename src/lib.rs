pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod employee;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod types;
pub mod workflow;

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Full application router over the given state
pub fn app(state: AppState) -> Router {
    let enable_cors = state.config.security.enable_cors;

    let router = Router::new()
        // Public
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::home::health))
        // Topic and entry pages (bearer token required)
        .merge(learning_log_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn learning_log_routes(state: AppState) -> Router<AppState> {
    use handlers::{entries, topics};

    Router::new()
        .route("/topics", get(topics::list))
        .route("/topics/:topic_id", get(topics::show))
        .route("/new_topic", get(topics::new_form).post(topics::create))
        .route("/new_entry/:topic_id", get(entries::new_form).post(entries::create))
        .route("/edit_entry/:entry_id", get(entries::edit_form).post(entries::update))
        .route_layer(from_fn_with_state(state, middleware::auth_middleware))
}
