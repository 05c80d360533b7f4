use axum::Json;
use axum::extract::{Path, State};

use super::{Envelope, parse_id, success};
use crate::error::ApiError;
use crate::models::Mineral;
use crate::state::AppState;

pub async fn list_minerals(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Mineral>>>, ApiError> {
    Ok(success(state.minerals.all().await?))
}

pub async fn get_mineral(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Mineral>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(success(state.minerals.get(id).await?))
}
