//! Cake route handlers.

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

use confectionery_core::CakeId;

use crate::{
    error::AppError,
    schemas::{CakeInput, CakeOutput, CakePatch},
    services::CakeService,
    state::AppState,
};

/// Build the cakes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cakes", get(index).post(create))
        .route("/cakes/{id}", get(show).patch(update).delete(destroy))
}

/// List cakes.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CakeOutput>>, AppError> {
    let cakes = CakeService::new(state.store()).list().await?;
    Ok(Json(cakes.into_iter().map(CakeOutput::from).collect()))
}

/// Add a cake.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CakeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CakeOutput>), AppError> {
    let Json(input) = body?;
    let cake = input.validate().map_err(AppError::Validation)?;

    let cake = CakeService::new(state.store()).create(cake).await?;
    Ok((StatusCode::CREATED, Json(cake.into())))
}

/// Get a cake.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CakeOutput>, AppError> {
    let Path(id) = path?;
    let id: CakeId = id.parse()?;

    let cake = CakeService::new(state.store()).get(id).await?;
    Ok(Json(cake.into()))
}

/// Update a cake.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CakePatch>, JsonRejection>,
) -> Result<Json<CakeOutput>, AppError> {
    let Path(id) = path?;
    let id: CakeId = id.parse()?;
    let Json(patch) = body?;
    let changes = patch.validate().map_err(AppError::Validation)?;

    let cake = CakeService::new(state.store()).update(id, changes).await?;
    Ok(Json(cake.into()))
}

/// Remove a cake.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let id: CakeId = id.parse()?;

    CakeService::new(state.store()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
