#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::Service;

use configs::PasswordConfig;
use server::{routes, AppState};
use service::user::hasher::Argon2Hasher;

pub fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// Router over in-memory gateways with a cheap hasher.
pub fn build_app() -> Router {
    let hasher = Argon2Hasher::new(&PasswordConfig { memory_kib: 64, iterations: 1, parallelism: 1 })
        .expect("argon2 params");
    routes::build_router(AppState::in_memory(Arc::new(hasher)), cors())
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };
    send_request(app, req).await
}

pub async fn send_request(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}
