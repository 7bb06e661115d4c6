//! Product route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::de::DeserializeOwned;

use proshop_core::{NewProduct, Product, ProductId, ProductUpdate};

use crate::error::{AppError, MessageBody, Result};
use crate::state::AppState;

/// Fetch all products.
///
/// `GET /api/products`
#[tracing::instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products().list_all().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Fetch a single product by id.
///
/// `GET /api/products/{id}`
#[tracing::instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let product = state.products().get_by_id(&ProductId::new(id)).await?;
    Ok(Json(product))
}

/// Create a product. An empty body creates the sample product the admin
/// screen then edits.
///
/// `POST /api/products`
#[tracing::instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>)> {
    let new: NewProduct = parse_body(&body)?;
    new.validate()?;

    let product = Product::from_new(new, None, Utc::now());
    let product = state.products().insert(product).await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update the given fields of a product.
///
/// `PUT /api/products/{id}`
#[tracing::instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>> {
    let changes: ProductUpdate = parse_body(&body)?;
    changes.validate()?;

    let product = state
        .products()
        .update(&ProductId::new(id), changes)
        .await?;

    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// Delete a product.
///
/// `DELETE /api/products/{id}`
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>> {
    let id = ProductId::new(id);
    state.products().delete(&id).await?;

    tracing::info!(product_id = %id, "Product removed");
    Ok(Json(MessageBody {
        message: "Product removed".to_string(),
    }))
}

/// Decode a JSON body, treating an empty body as `T::default()`.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}
