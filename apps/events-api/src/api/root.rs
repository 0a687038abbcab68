//! Landing endpoint

use axum::{Json, Router, routing::get};
use axum_helpers::DOCS_PATH;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    /// Interactive API reference
    pub docs: String,
    pub health: String,
}

pub fn router() -> Router {
    Router::new().route("/", get(root))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses((status = 200, description = "Service greeting with useful links", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to Event Management API".to_string(),
        docs: DOCS_PATH.to_string(),
        health: "/health".to_string(),
    })
}
