use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OccupationResponse {
    pub success: bool,
    pub occupied: bool,
}

/// POST /terrains/:id/occupation - flip a court between free and occupied
pub async fn toggle_occupation(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OccupationResponse>, AppError> {
    let Path(id) = id?;

    let occupied = state
        .terrains()
        .toggle_occupation(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("terrain {id}")))?;

    tracing::info!(terrain_id = id, occupied, "occupation toggled");
    Ok(Json(OccupationResponse {
        success: true,
        occupied,
    }))
}
