use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use service::product::domain::{ProductInput, ProductView};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub description: String,
}

#[utoipa::path(get, path = "/api/products", tag = "products",
    responses((status = 200, description = "All products", body = [crate::openapi::ProductDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    Ok(Json(state.products.list_all().await?))
}

#[utoipa::path(get, path = "/api/products/search", tag = "products",
    params(("description" = String, Query, description = "Case-insensitive substring of the description")),
    responses((status = 200, description = "Matching products", body = [crate::openapi::ProductDoc]), (status = 400, description = "Missing description")))]
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    let Query(q) = query?;
    Ok(Json(state.products.search(&q.description).await?))
}

#[utoipa::path(get, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses((status = 200, description = "Product", body = crate::openapi::ProductDoc), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductView>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductView>), JsonApiError> {
    let Json(input) = payload?;
    let view = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(put, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = crate::openapi::ProductInputDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<ProductView>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.products.update(id, input).await?))
}

#[utoipa::path(delete, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
