use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::{Product, ProductInput};
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::routes::ServerState;

/// List every product in insertion order
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, ApiError> {
    let rows = state.products.list().await?;
    Ok(Json(rows))
}

/// Create a product; the stored record (with its new id) is returned
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let created = state.products.create(&input).await?;
    info!(event = "product_created", id = created.id, "product stored");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Overwrite a product; echoes the submitted body whether or not `id` exists
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductInput>, ApiError> {
    let touched = state.products.update(id, &input).await?;
    debug!(event = "product_updated", id, touched, "update applied");
    Ok(Json(input))
}

/// Delete a product; 204 whether or not `id` existed
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let removed = state.products.delete(id).await?;
    debug!(event = "product_deleted", id, removed, "delete applied");
    Ok(StatusCode::NO_CONTENT)
}
