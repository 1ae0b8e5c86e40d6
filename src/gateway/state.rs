use std::sync::Arc;

use crate::events::EventService;
use crate::lots::LotService;
use crate::persistence::{HealthCheck, Store};
use crate::speakers::SpeakerService;
use crate::user_auth::UserAuthService;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventService>,
    pub lots: Arc<LotService>,
    pub speakers: Arc<SpeakerService>,
    pub user_auth: Arc<UserAuthService>,
    /// Backend check behind the health endpoint
    pub store_health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Wire every service onto one backend.
    pub fn new<S: Store + 'static>(store: Arc<S>, jwt_secret: String) -> Self {
        Self {
            events: Arc::new(EventService::new(store.clone())),
            lots: Arc::new(LotService::new(store.clone(), store.clone())),
            speakers: Arc::new(SpeakerService::new(store.clone())),
            user_auth: Arc::new(UserAuthService::new(store.clone(), jwt_secret)),
            store_health: store,
        }
    }
}
