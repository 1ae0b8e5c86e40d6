use axum::extract::State;
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, PageData, Path, Query, ValidatedJson, created, ok};

use super::types::{EventDto, EventQuery, IncludeSpeakers};

/// GET /api/events?term=&page_number=&page_size=&include_speakers=
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventQuery>,
) -> ApiResult<PageData<EventDto>> {
    ok(state.events.get_all(query).await?)
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(include): Query<IncludeSpeakers>,
) -> ApiResult<EventDto> {
    ok(state.events.get_by_id(id, include.include_speakers).await?)
}

/// POST /api/events
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> ApiResult<EventDto> {
    created(state.events.add(dto).await?)
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> ApiResult<EventDto> {
    ok(state.events.update(id, dto).await?)
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<String> {
    state.events.delete(id).await?;
    ok("Deleted".to_string())
}

/// POST /api/events/{id}/speakers/{speaker_id}
pub async fn link_speaker(
    State(state): State<Arc<AppState>>,
    Path((id, speaker_id)): Path<(i32, i32)>,
) -> ApiResult<String> {
    state.events.link_speaker(id, speaker_id).await?;
    ok("Linked".to_string())
}

/// DELETE /api/events/{id}/speakers/{speaker_id}
pub async fn unlink_speaker(
    State(state): State<Arc<AppState>>,
    Path((id, speaker_id)): Path<(i32, i32)>,
) -> ApiResult<String> {
    state.events.unlink_speaker(id, speaker_id).await?;
    ok("Unlinked".to_string())
}
