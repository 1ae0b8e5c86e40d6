use axum::extract::State;
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, PageData, Path, Query, ValidatedJson, created, ok};

use super::types::{SpeakerDto, SpeakerQuery};

/// GET /api/speakers?term=&page_number=&page_size=
pub async fn get_speakers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SpeakerQuery>,
) -> ApiResult<PageData<SpeakerDto>> {
    ok(state.speakers.get_all(query).await?)
}

/// GET /api/speakers/{id}
pub async fn get_speaker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<SpeakerDto> {
    ok(state.speakers.get_by_id(id).await?)
}

/// POST /api/speakers
pub async fn create_speaker(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<SpeakerDto>,
) -> ApiResult<SpeakerDto> {
    created(state.speakers.add(dto).await?)
}

/// PUT /api/speakers/{id}
pub async fn update_speaker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<SpeakerDto>,
) -> ApiResult<SpeakerDto> {
    ok(state.speakers.update(id, dto).await?)
}

/// DELETE /api/speakers/{id}
pub async fn delete_speaker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<String> {
    state.speakers.delete(id).await?;
    ok("Deleted".to_string())
}
