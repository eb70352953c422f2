//! Customer route handlers.
//!
//! A body that fails to decode is 422 on create and 400 on update.

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

use confectionery_core::CustomerId;

use crate::{
    error::AppError,
    schemas::{CustomerInput, CustomerOutput, CustomerPatch},
    services::CustomerService,
    state::AppState,
};

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index).post(create))
        .route("/customers/{id}", get(show).patch(update).delete(destroy))
}

/// List active customers.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CustomerOutput>>, AppError> {
    let customers = CustomerService::new(state.store()).list().await?;
    Ok(Json(customers.into_iter().map(CustomerOutput::from).collect()))
}

/// Register a customer.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerOutput>), AppError> {
    let Json(input) = body.map_err(|e| AppError::UnprocessableBody(e.body_text()))?;
    let draft = input.validate().map_err(AppError::Validation)?;

    let customer = CustomerService::new(state.store()).create(draft).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Get an active customer.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CustomerOutput>, AppError> {
    let Path(id) = path?;
    let id: CustomerId = id.parse()?;

    let customer = CustomerService::new(state.store()).get(id).await?;
    Ok(Json(customer.into()))
}

/// Update an active customer.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CustomerPatch>, JsonRejection>,
) -> Result<Json<CustomerOutput>, AppError> {
    let Path(id) = path?;
    let id: CustomerId = id.parse()?;
    let Json(patch) = body?;
    let draft = patch.validate().map_err(AppError::Validation)?;

    let customer = CustomerService::new(state.store())
        .update(id, draft)
        .await?;
    Ok(Json(customer.into()))
}

/// Deactivate a customer.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let id: CustomerId = id.parse()?;

    CustomerService::new(state.store()).deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
