//! Order route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use confectionery_core::OrderId;

use crate::{
    error::AppError,
    schemas::{OrderInput, OrderOutput, OrderPatch},
    services::OrderService,
    state::AppState,
};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index).post(create))
        .route("/orders/{id}", get(show).patch(update).delete(destroy))
}

/// List orders.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<OrderOutput>>, AppError> {
    let orders = OrderService::new(state.store()).list().await?;
    Ok(Json(orders.into_iter().map(OrderOutput::from).collect()))
}

/// Place an order.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<OrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderOutput>), AppError> {
    let Json(input) = body?;
    let order = input.validate().map_err(AppError::Validation)?;

    let order = OrderService::new(state.store()).create(order).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// Get an order.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<OrderOutput>, AppError> {
    let Path(id) = path?;
    let id: OrderId = id.parse()?;

    let order = OrderService::new(state.store()).get(id).await?;
    Ok(Json(order.into()))
}

/// Update an order.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<OrderPatch>, JsonRejection>,
) -> Result<Json<OrderOutput>, AppError> {
    let Path(id) = path?;
    let id: OrderId = id.parse()?;
    let Json(patch) = body?;
    let changes = patch.validate().map_err(AppError::Validation)?;

    let order = OrderService::new(state.store()).update(id, changes).await?;
    Ok(Json(order.into()))
}

/// Remove an order.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let id: OrderId = id.parse()?;

    OrderService::new(state.store()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
