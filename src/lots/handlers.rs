use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::extract::json_rejection;
use crate::gateway::types::{ApiResult, Path, ValidatedJson, created, ok, validate_each};

use super::types::LotDto;

/// GET /api/lots/{event_id}
pub async fn get_lots(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i32>,
) -> ApiResult<Vec<LotDto>> {
    ok(state.lots.get_by_event(event_id).await?)
}

/// GET /api/lots/{event_id}/{lot_id}
pub async fn get_lot(
    State(state): State<Arc<AppState>>,
    Path((event_id, lot_id)): Path<(i32, i32)>,
) -> ApiResult<LotDto> {
    ok(state.lots.get_by_id(event_id, lot_id).await?)
}

/// POST /api/lots/{event_id}
pub async fn create_lot(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<LotDto>,
) -> ApiResult<LotDto> {
    created(state.lots.add(event_id, dto).await?)
}

/// PUT /api/lots/{event_id}
///
/// Batch upsert of the event's lots.
pub async fn save_lots(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i32>,
    body: Result<Json<Vec<LotDto>>, JsonRejection>,
) -> ApiResult<Vec<LotDto>> {
    let Json(dtos) = body.map_err(json_rejection)?;
    validate_each(&dtos)?;
    ok(state.lots.save_lots(event_id, dtos).await?)
}

/// DELETE /api/lots/{event_id}/{lot_id}
pub async fn delete_lot(
    State(state): State<Arc<AppState>>,
    Path((event_id, lot_id)): Path<(i32, i32)>,
) -> ApiResult<String> {
    state.lots.delete(event_id, lot_id).await?;
    ok("Deleted".to_string())
}
