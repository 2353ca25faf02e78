//! Router configuration and route composition.

use std::time::Duration;

use axum::http::Method;
use axum::{Router, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health, users};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/users", get(users::list_users))
        .route("/users/{login}", get(users::get_user))
        .route("/users/{login}/repos", get(users::list_user_repos));

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware layers (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state)
}

/// CORS for a read-only API: any origin, GET only.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .allow_origin(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600))
}
