//! Repository traits for data access abstraction
//!
//! Services depend on these traits only, so the PostgreSQL and memory
//! backends are interchangeable.

use async_trait::async_trait;

use super::error::StorageError;
use super::models::{Event, Lot, NewUser, Role, Speaker, User};
use super::{ListFilter, Paged};

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================================
// Event Repository
// ============================================================================

/// Events with their lots always loaded; speakers (and their social media)
/// only when `include_speakers` is set.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list_events(
        &self,
        filter: &ListFilter,
        include_speakers: bool,
    ) -> StorageResult<Paged<Event>>;

    async fn get_event(&self, id: i32, include_speakers: bool) -> StorageResult<Option<Event>>;

    /// Insert scalar fields; `id`, `lots` and `speakers` are ignored.
    async fn add_event(&self, event: &Event) -> StorageResult<Event>;

    /// Replace scalar fields of `event.id`. `None` when the row is missing.
    async fn update_event(&self, event: &Event) -> StorageResult<Option<Event>>;

    /// Delete the event, its lots and its speaker links.
    async fn delete_event(&self, id: i32) -> StorageResult<bool>;

    /// Idempotent. Both rows must exist.
    async fn link_speaker(&self, event_id: i32, speaker_id: i32) -> StorageResult<()>;

    async fn unlink_speaker(&self, event_id: i32, speaker_id: i32) -> StorageResult<bool>;
}

// ============================================================================
// Lot Repository
// ============================================================================

#[async_trait]
pub trait LotRepository: Send + Sync {
    async fn lots_by_event(&self, event_id: i32) -> StorageResult<Vec<Lot>>;

    async fn get_lot(&self, event_id: i32, lot_id: i32) -> StorageResult<Option<Lot>>;

    async fn add_lot(&self, lot: &Lot) -> StorageResult<Lot>;

    /// Insert lots with `id == 0`, update the others, all or nothing.
    /// Fails with [`StorageError::MissingRow`] when an id is not a lot of
    /// `event_id`.
    async fn save_lots(&self, event_id: i32, lots: &[Lot]) -> StorageResult<Vec<Lot>>;

    async fn delete_lot(&self, event_id: i32, lot_id: i32) -> StorageResult<bool>;
}

// ============================================================================
// Speaker Repository
// ============================================================================

/// Speakers are always returned with their social media.
#[async_trait]
pub trait SpeakerRepository: Send + Sync {
    async fn list_speakers(&self, filter: &ListFilter) -> StorageResult<Paged<Speaker>>;

    async fn get_speaker(&self, id: i32) -> StorageResult<Option<Speaker>>;

    async fn add_speaker(&self, speaker: &Speaker) -> StorageResult<Speaker>;

    /// Replace scalar fields and the whole social-media list.
    async fn update_speaker(&self, speaker: &Speaker) -> StorageResult<Option<Speaker>>;

    async fn delete_speaker(&self, id: i32) -> StorageResult<bool>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`StorageError::Duplicate`] on a taken user name or email.
    async fn create_user(&self, user: &NewUser) -> StorageResult<User>;

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>>;

    async fn find_user_by_name(&self, user_name: &str) -> StorageResult<Option<User>>;

    async fn update_user(&self, user: &User) -> StorageResult<Option<User>>;

    async fn create_role(&self, name: &str) -> StorageResult<Role>;

    async fn find_role(&self, name: &str) -> StorageResult<Option<Role>>;

    /// Idempotent.
    async fn add_user_to_role(&self, user_id: i32, role_id: i32) -> StorageResult<()>;

    async fn roles_for_user(&self, user_id: i32) -> StorageResult<Vec<String>>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn health_check(&self) -> StorageResult<()>;
}

/// Everything a backend must provide to serve the API.
pub trait Store:
    EventRepository + LotRepository + SpeakerRepository + UserRepository + HealthCheck
{
}

impl<T> Store for T where
    T: EventRepository + LotRepository + SpeakerRepository + UserRepository + HealthCheck
{
}
