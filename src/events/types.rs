use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::lots::LotDto;
use crate::persistence::Event;
use crate::speakers::SpeakerDto;

/// Event request/response body.
///
/// `lots` and `speakers` are output only: lots are written through
/// `/api/lots`, speakers are linked through `/api/events/{id}/speakers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventDto {
    #[serde(default)]
    pub id: i32,
    #[validate(
        required(message = "The theme field is required"),
        length(min = 3, max = 50, message = "The theme field must be between 3 and 50 characters")
    )]
    pub theme: Option<String>,
    #[validate(
        required(message = "The location field is required"),
        length(max = 200, message = "The location field must be at most 200 characters")
    )]
    pub location: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(
        min = 1,
        max = 120000,
        message = "The people_count field must be between 1 and 120000"
    ))]
    pub people_count: i32,
    pub image_url: Option<String>,
    #[validate(length(max = 30, message = "The phone field must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(
        required(message = "The email field is required"),
        email(message = "The email field is not a valid e-mail address"),
        length(max = 256, message = "The email field must be at most 256 characters")
    )]
    pub email: Option<String>,
    #[serde(default)]
    pub lots: Vec<LotDto>,
    #[serde(default)]
    pub speakers: Vec<SpeakerDto>,
}

/// Query string of `GET /api/events`
#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub term: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub include_speakers: bool,
}

/// Query string of `GET /api/events/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct IncludeSpeakers {
    #[serde(default)]
    pub include_speakers: bool,
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            theme: Some(e.theme),
            location: Some(e.location),
            event_date: e.event_date,
            description: e.description,
            people_count: e.people_count,
            image_url: e.image_url,
            phone: e.phone,
            email: Some(e.email),
            lots: e.lots.into_iter().map(Into::into).collect(),
            speakers: e.speakers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<EventDto> for Event {
    fn from(dto: EventDto) -> Self {
        Self {
            id: dto.id,
            theme: dto.theme.unwrap_or_default(),
            location: dto.location.unwrap_or_default(),
            event_date: dto.event_date,
            description: dto.description,
            people_count: dto.people_count,
            image_url: dto.image_url,
            phone: dto.phone,
            email: dto.email.unwrap_or_default(),
            lots: dto.lots.into_iter().map(Into::into).collect(),
            speakers: dto.speakers.into_iter().map(Into::into).collect(),
        }
    }
}
