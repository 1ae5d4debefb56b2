//! Maintenance handler: bulk deletion of published artifacts.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// Maintenance response.
#[derive(Serialize)]
pub struct ClearDataResponse {
    pub success: bool,
    pub deleted: usize,
}

/// Delete every published artifact from the output store.
///
/// No selection criteria and no coordination with in-flight jobs; a job
/// publishing concurrently keeps its workspace copy until cleanup, and its
/// artifact simply lands after the wipe.
pub async fn clear_data(State(state): State<AppState>) -> ApiResult<Json<ClearDataResponse>> {
    let deleted = state.store.wipe().await?;
    info!(deleted, "Cleared published outputs");
    Ok(Json(ClearDataResponse {
        success: true,
        deleted,
    }))
}
