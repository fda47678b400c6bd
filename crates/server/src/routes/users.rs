use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use service::user::domain::{NewUser, UserUpdate, UserView};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/api/users", tag = "users",
    responses((status = 200, description = "All users", body = [crate::openapi::UserDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, JsonApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "User", body = crate::openapi::UserDoc), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserView>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.users.get(id).await?.into()))
}

#[utoipa::path(post, path = "/api/users", tag = "users",
    request_body = crate::openapi::NewUserDoc,
    responses((status = 201, description = "Created", body = crate::openapi::UserDoc), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>), JsonApiError> {
    let Json(input) = payload?;
    let user = state.users.add(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = crate::openapi::UserUpdateDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::UserDoc), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict")))]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<UserView>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.users.update(id, input).await?.into()))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
