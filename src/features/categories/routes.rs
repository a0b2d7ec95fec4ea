use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public category routes (no authentication required)
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/{id}", get(handlers::get_category))
        .route("/api/categories/{id}/children", get(handlers::list_children))
        .route(
            "/api/categories/{id}/attributes/validate",
            post(handlers::validate_attributes),
        )
        .with_state(service)
}

/// Protected category routes (JWT plus the admin role)
pub fn protected_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", post(handlers::create_category))
        .with_state(service)
}
