use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::persistence::{EventRepository, Lot, LotRepository};

use super::types::LotDto;

/// Lot operations, always scoped to an owning event.
pub struct LotService {
    events: Arc<dyn EventRepository>,
    lots: Arc<dyn LotRepository>,
}

impl LotService {
    pub fn new(events: Arc<dyn EventRepository>, lots: Arc<dyn LotRepository>) -> Self {
        Self { events, lots }
    }

    async fn require_event(&self, event_id: i32) -> ServiceResult<()> {
        match self.events.get_event(event_id, false).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound {
                entity: "event",
                id: event_id,
            }),
        }
    }

    pub async fn get_by_event(&self, event_id: i32) -> ServiceResult<Vec<LotDto>> {
        self.require_event(event_id).await?;
        let lots = self.lots.lots_by_event(event_id).await?;
        Ok(lots.into_iter().map(LotDto::from).collect())
    }

    pub async fn get_by_id(&self, event_id: i32, lot_id: i32) -> ServiceResult<LotDto> {
        self.lots
            .get_lot(event_id, lot_id)
            .await?
            .map(LotDto::from)
            .ok_or(ServiceError::NotFound {
                entity: "lot",
                id: lot_id,
            })
    }

    pub async fn add(&self, event_id: i32, dto: LotDto) -> ServiceResult<LotDto> {
        let lot = Lot {
            id: 0,
            event_id,
            ..Lot::from(dto)
        };
        let saved = self.lots.add_lot(&lot).await?;
        tracing::info!(event_id, lot_id = saved.id, "Lot created");
        Ok(saved.into())
    }

    /// Batch upsert: `id == 0` inserts, other ids must be lots of `event_id`.
    pub async fn save_lots(&self, event_id: i32, dtos: Vec<LotDto>) -> ServiceResult<Vec<LotDto>> {
        let lots: Vec<Lot> = dtos
            .into_iter()
            .map(|dto| Lot {
                event_id,
                ..Lot::from(dto)
            })
            .collect();
        let saved = self.lots.save_lots(event_id, &lots).await?;
        tracing::info!(event_id, count = saved.len(), "Lots saved");
        Ok(saved.into_iter().map(LotDto::from).collect())
    }

    pub async fn delete(&self, event_id: i32, lot_id: i32) -> ServiceResult<()> {
        if !self.lots.delete_lot(event_id, lot_id).await? {
            return Err(ServiceError::NotFound {
                entity: "lot",
                id: lot_id,
            });
        }
        tracing::info!(event_id, lot_id, "Lot deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{Event, MemoryStore};
    use rust_decimal::Decimal;

    async fn setup() -> (LotService, i32) {
        let store = Arc::new(MemoryStore::new());
        let event = store
            .add_event(&Event {
                id: 0,
                theme: "RustConf".into(),
                location: "Lisbon".into(),
                event_date: None,
                description: None,
                people_count: 100,
                image_url: None,
                phone: None,
                email: "info@rustconf.dev".into(),
                lots: vec![],
                speakers: vec![],
            })
            .await
            .unwrap();
        (LotService::new(store.clone(), store), event.id)
    }

    fn dto(id: i32, name: &str, price: i64) -> LotDto {
        LotDto {
            id,
            name: Some(name.into()),
            price: Some(Decimal::from(price)),
            quantity: 10,
            ..LotDto::default()
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let (service, event_id) = setup().await;
        let lot = service.add(event_id, dto(0, "First", 50)).await.unwrap();
        assert_eq!(lot.event_id, event_id);

        let lots = service.get_by_event(event_id).await.unwrap();
        assert_eq!(lots, vec![lot.clone()]);
        assert_eq!(service.get_by_id(event_id, lot.id).await.unwrap(), lot);
    }

    #[tokio::test]
    async fn test_unknown_event_not_found() {
        let (service, _) = setup().await;
        let err = service.get_by_event(99).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "event", id: 99 }));
        let err = service.add(99, dto(0, "x", 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "event", .. }));
    }

    #[tokio::test]
    async fn test_save_lots_upserts() {
        let (service, event_id) = setup().await;
        let first = service.add(event_id, dto(0, "First", 50)).await.unwrap();

        let saved = service
            .save_lots(event_id, vec![dto(first.id, "First (updated)", 60), dto(0, "Second", 80)])
            .await
            .unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, first.id);
        assert_eq!(saved[0].name.as_deref(), Some("First (updated)"));
        assert_ne!(saved[1].id, first.id);

        assert_eq!(service.get_by_event(event_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_lot() {
        let (service, event_id) = setup().await;
        let err = service.delete(event_id, 5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "lot", id: 5 }));
    }
}
