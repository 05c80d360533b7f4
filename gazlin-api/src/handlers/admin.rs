// Catalog maintenance, mounted behind `require_auth` + `admin_only`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use super::{Envelope, parse_id, success};
use crate::error::ApiError;
use crate::models::{Mineral, MineralUpdate, NewMineral};
use crate::state::AppState;

pub async fn create_mineral(
    State(state): State<AppState>,
    Json(mineral): Json<NewMineral>,
) -> Result<(StatusCode, Json<Envelope<Mineral>>), ApiError> {
    mineral.validate()?;
    let created = state.minerals.create(mineral).await?;
    info!(mineral_id = created.id, "mineral created");
    Ok((StatusCode::CREATED, success(created)))
}

pub async fn update_mineral(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<MineralUpdate>,
) -> Result<Json<Envelope<Mineral>>, ApiError> {
    let id = parse_id(&id)?;
    let mut mineral = state.minerals.get(id).await?;
    mineral.apply(update);
    mineral.validate()?;
    let updated = state.minerals.update(mineral).await?;
    info!(mineral_id = id, "mineral updated");
    Ok(success(updated))
}

pub async fn delete_mineral(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.minerals.delete(id).await?;
    info!(mineral_id = id, "mineral deleted");
    Ok(StatusCode::NO_CONTENT)
}
