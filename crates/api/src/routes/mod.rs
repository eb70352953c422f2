//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Store reachability (503 when down)
//!
//! GET    /customers/          - List active customers
//! POST   /customers/          - Register a customer
//! GET    /customers/{id}      - Get an active customer
//! PATCH  /customers/{id}      - Update an active customer
//! DELETE /customers/{id}      - Deactivate a customer
//!
//! GET    /cakes/              - List cakes
//! POST   /cakes/              - Add a cake
//! GET    /cakes/{id}          - Get a cake
//! PATCH  /cakes/{id}          - Update a cake
//! DELETE /cakes/{id}          - Remove a cake
//!
//! GET    /orders/             - List orders
//! POST   /orders/             - Place an order
//! GET    /orders/{id}         - Get an order
//! PATCH  /orders/{id}         - Update an order
//! DELETE /orders/{id}         - Remove an order
//! ```
//!
//! Routes are registered without a trailing slash; [`app`] wraps the router
//! in a path normalizer so `/customers/` and `/customers` reach the same
//! handler. Unknown paths and unsupported methods answer with the usual
//! error envelope.

pub mod cakes;
pub mod customers;
pub mod health;
pub mod orders;

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::{error::AppError, state::AppState};

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(cakes::router())
        .merge(orders::router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Wrap a finished router so trailing slashes are ignored.
pub fn app(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
