// Per-user favorites, mounted behind `require_auth`. The user is always the
// token's subject.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{Value, json};
use tracing::debug;

use super::{Envelope, parse_id, success};
use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Envelope<Vec<i64>>>, ApiError> {
    Ok(success(state.minerals.favorites(claims.id).await?))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mineral_id = parse_id(&id)?;
    state.minerals.add_favorite(claims.id, mineral_id).await?;
    debug!(user_id = claims.id, mineral_id, "favorite added");
    Ok(Json(json!({
        "status": "success",
        "message": "mineral added to favorites",
    })))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mineral_id = parse_id(&id)?;
    state.minerals.remove_favorite(claims.id, mineral_id).await?;
    debug!(user_id = claims.id, mineral_id, "favorite removed");
    Ok(Json(json!({
        "status": "success",
        "message": "mineral removed from favorites",
    })))
}
