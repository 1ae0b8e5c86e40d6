use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::gateway::types::PageData;
use crate::persistence::{ListFilter, PageRequest, Speaker, SpeakerRepository};

use super::types::{SpeakerDto, SpeakerQuery};

pub struct SpeakerService {
    speakers: Arc<dyn SpeakerRepository>,
}

impl SpeakerService {
    pub fn new(speakers: Arc<dyn SpeakerRepository>) -> Self {
        Self { speakers }
    }

    /// Name search with paging.
    pub async fn get_all(&self, query: SpeakerQuery) -> ServiceResult<PageData<SpeakerDto>> {
        let page = PageRequest::new(query.page_number, query.page_size);
        let filter = ListFilter::new(query.term, page);
        let paged = self.speakers.list_speakers(&filter).await?;
        Ok(PageData::from_paged(paged, page, SpeakerDto::from))
    }

    pub async fn get_by_id(&self, id: i32) -> ServiceResult<SpeakerDto> {
        self.speakers
            .get_speaker(id)
            .await?
            .map(SpeakerDto::from)
            .ok_or(ServiceError::NotFound {
                entity: "speaker",
                id,
            })
    }

    pub async fn add(&self, dto: SpeakerDto) -> ServiceResult<SpeakerDto> {
        let speaker = Speaker {
            id: 0,
            ..Speaker::from(dto)
        };
        let saved = self.speakers.add_speaker(&speaker).await?;
        tracing::info!(speaker_id = saved.id, "Speaker created");
        Ok(saved.into())
    }

    /// Full replace, social media included.
    pub async fn update(&self, id: i32, dto: SpeakerDto) -> ServiceResult<SpeakerDto> {
        let speaker = Speaker {
            id,
            ..Speaker::from(dto)
        };
        let saved = self
            .speakers
            .update_speaker(&speaker)
            .await?
            .ok_or(ServiceError::NotFound {
                entity: "speaker",
                id,
            })?;
        tracing::info!(speaker_id = id, "Speaker updated");
        Ok(saved.into())
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        if !self.speakers.delete_speaker(id).await? {
            return Err(ServiceError::NotFound {
                entity: "speaker",
                id,
            });
        }
        tracing::info!(speaker_id = id, "Speaker deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::speakers::types::SocialMediaDto;

    fn service() -> SpeakerService {
        SpeakerService::new(Arc::new(MemoryStore::new()))
    }

    fn dto(name: &str) -> SpeakerDto {
        SpeakerDto {
            name: Some(name.into()),
            social_media: vec![SocialMediaDto {
                name: Some("Mastodon".into()),
                url: Some(format!("https://hachyderm.io/@{}", name)),
                ..SocialMediaDto::default()
            }],
            ..SpeakerDto::default()
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let service = service();
        let created = service.add(dto("ana")).await.unwrap();
        assert_eq!(created.social_media.len(), 1);
        assert_eq!(created.social_media[0].speaker_id, created.id);

        let updated = service
            .update(
                created.id,
                SpeakerDto {
                    bio: Some("Compiler engineer".into()),
                    social_media: vec![],
                    ..dto("ana")
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.bio.as_deref(), Some("Compiler engineer"));
        assert!(updated.social_media.is_empty());

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_all_filters_by_name() {
        let service = service();
        for name in ["Ana", "Bruno", "Anabela"] {
            service.add(dto(name)).await.unwrap();
        }
        let page = service
            .get_all(SpeakerQuery {
                term: Some("ana".into()),
                page_number: None,
                page_size: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let err = service().update(42, dto("x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "speaker", id: 42 }));
    }
}
