//! Request handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod favorites;
pub mod minerals;
pub mod translation;

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;

/// Successful response body: `{"status": "success", "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub data: T,
}

pub fn success<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: "success",
        data,
    })
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "GazlinGO Api is running",
    }))
}

/// Parse a path id, rejecting anything that is not an integer
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::invalid_input("invalid id"))
}
