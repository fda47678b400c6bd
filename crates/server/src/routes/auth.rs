use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use service::user::domain::{AuthenticatedUser, Credentials};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    pub authenticated: bool,
    #[serde(flatten)]
    pub user: AuthenticatedUser,
}

/// Verify credentials. No token or cookie is issued.
#[utoipa::path(post, path = "/api/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Authenticated", body = crate::openapi::LoginResponse), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginOutput>, JsonApiError> {
    let Json(creds) = payload?;
    let user = state.users.authenticate(&creds.username, &creds.password).await?;
    Ok(Json(LoginOutput { authenticated: true, user }))
}
