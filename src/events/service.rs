use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::gateway::types::PageData;
use crate::persistence::{Event, EventRepository, ListFilter, PageRequest};

use super::types::{EventDto, EventQuery};

pub struct EventService {
    events: Arc<dyn EventRepository>,
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound { entity: "event", id }
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Theme search with paging. Lots are always included.
    pub async fn get_all(&self, query: EventQuery) -> ServiceResult<PageData<EventDto>> {
        let page = PageRequest::new(query.page_number, query.page_size);
        let filter = ListFilter::new(query.term, page);
        let paged = self
            .events
            .list_events(&filter, query.include_speakers)
            .await?;
        Ok(PageData::from_paged(paged, page, EventDto::from))
    }

    pub async fn get_by_id(&self, id: i32, include_speakers: bool) -> ServiceResult<EventDto> {
        self.events
            .get_event(id, include_speakers)
            .await?
            .map(EventDto::from)
            .ok_or(not_found(id))
    }

    pub async fn add(&self, dto: EventDto) -> ServiceResult<EventDto> {
        let event = Event {
            id: 0,
            ..Event::from(dto)
        };
        let saved = self.events.add_event(&event).await?;
        tracing::info!(event_id = saved.id, theme = %saved.theme, "Event created");
        Ok(saved.into())
    }

    /// Replace every scalar field of event `id`.
    pub async fn update(&self, id: i32, dto: EventDto) -> ServiceResult<EventDto> {
        let event = Event {
            id,
            ..Event::from(dto)
        };
        let saved = self
            .events
            .update_event(&event)
            .await?
            .ok_or(not_found(id))?;
        tracing::info!(event_id = id, "Event updated");
        Ok(saved.into())
    }

    /// Removes the event with its lots and speaker links.
    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        if !self.events.delete_event(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }

    pub async fn link_speaker(&self, event_id: i32, speaker_id: i32) -> ServiceResult<()> {
        self.events.link_speaker(event_id, speaker_id).await?;
        tracing::info!(event_id, speaker_id, "Speaker linked");
        Ok(())
    }

    pub async fn unlink_speaker(&self, event_id: i32, speaker_id: i32) -> ServiceResult<()> {
        if !self.events.unlink_speaker(event_id, speaker_id).await? {
            return Err(ServiceError::NotFound {
                entity: "event speaker link",
                id: speaker_id,
            });
        }
        tracing::info!(event_id, speaker_id, "Speaker unlinked");
        Ok(())
    }
}
