use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::persistence::{SocialMedia, Speaker};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SocialMediaDto {
    #[serde(default)]
    pub id: i32,
    #[validate(
        required(message = "The name field is required"),
        length(max = 50, message = "The name field must be at most 50 characters")
    )]
    pub name: Option<String>,
    #[validate(required(message = "The url field is required"))]
    pub url: Option<String>,
    #[serde(default)]
    pub speaker_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SpeakerDto {
    #[serde(default)]
    pub id: i32,
    #[validate(
        required(message = "The name field is required"),
        length(max = 100, message = "The name field must be at most 100 characters")
    )]
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    #[validate(length(max = 30, message = "The phone field must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 256, message = "The email field must be at most 256 characters"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub social_media: Vec<SocialMediaDto>,
}

/// Query string of `GET /api/speakers`
#[derive(Debug, Default, Deserialize)]
pub struct SpeakerQuery {
    pub term: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<SocialMedia> for SocialMediaDto {
    fn from(s: SocialMedia) -> Self {
        Self {
            id: s.id,
            name: Some(s.name),
            url: Some(s.url),
            speaker_id: s.speaker_id,
        }
    }
}

impl From<SocialMediaDto> for SocialMedia {
    fn from(dto: SocialMediaDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            url: dto.url.unwrap_or_default(),
            speaker_id: dto.speaker_id,
        }
    }
}

impl From<Speaker> for SpeakerDto {
    fn from(s: Speaker) -> Self {
        Self {
            id: s.id,
            name: Some(s.name),
            bio: s.bio,
            image_url: s.image_url,
            phone: s.phone,
            email: s.email,
            social_media: s.social_media.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SpeakerDto> for Speaker {
    fn from(dto: SpeakerDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            bio: dto.bio,
            image_url: dto.image_url,
            phone: dto.phone,
            email: dto.email,
            social_media: dto.social_media.into_iter().map(Into::into).collect(),
        }
    }
}
