//! In-process store
//!
//! All tables sit behind a single `RwLock` so multi-table writes (cascading
//! deletes, batch lot saves) are atomic. Ids are per-table sequences starting
//! at 1, like PostgreSQL `SERIAL` columns.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use super::error::StorageError;
use super::models::{Event, Lot, NewUser, Role, SocialMedia, Speaker, User};
use super::repository::{
    EventRepository, HealthCheck, LotRepository, SpeakerRepository, StorageResult,
    UserRepository,
};
use super::{ListFilter, Paged};

#[derive(Default)]
struct Sequence(i32);

impl Sequence {
    fn next(&mut self) -> i32 {
        self.0 += 1;
        self.0
    }
}

/// Case-insensitive name equality, matching the `LOWER()` unique indexes.
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Default)]
struct Tables {
    events: BTreeMap<i32, Event>,
    lots: BTreeMap<i32, Lot>,
    speakers: BTreeMap<i32, Speaker>,
    social_media: BTreeMap<i32, SocialMedia>,
    /// (event_id, speaker_id)
    event_speakers: BTreeSet<(i32, i32)>,
    users: BTreeMap<i32, User>,
    roles: BTreeMap<i32, Role>,
    /// (user_id, role_id)
    user_roles: BTreeSet<(i32, i32)>,

    event_seq: Sequence,
    lot_seq: Sequence,
    speaker_seq: Sequence,
    social_media_seq: Sequence,
    user_seq: Sequence,
    role_seq: Sequence,
}

impl Tables {
    fn load_speaker(&self, id: i32) -> Option<Speaker> {
        let mut speaker = self.speakers.get(&id)?.clone();
        speaker.social_media = self
            .social_media
            .values()
            .filter(|s| s.speaker_id == id)
            .cloned()
            .collect();
        Some(speaker)
    }

    fn load_event(&self, id: i32, include_speakers: bool) -> Option<Event> {
        let mut event = self.events.get(&id)?.clone();
        event.lots = self
            .lots
            .values()
            .filter(|l| l.event_id == id)
            .cloned()
            .collect();
        if include_speakers {
            event.speakers = self
                .event_speakers
                .iter()
                .filter(|(event_id, _)| *event_id == id)
                .filter_map(|(_, speaker_id)| self.load_speaker(*speaker_id))
                .collect();
        }
        Some(event)
    }

    fn insert_social_media(&mut self, speaker_id: i32, items: &[SocialMedia]) {
        for item in items {
            let id = self.social_media_seq.next();
            self.social_media.insert(
                id,
                SocialMedia {
                    id,
                    name: item.name.clone(),
                    url: item.url.clone(),
                    speaker_id,
                },
            );
        }
    }

    fn user_name_or_email_taken(&self, user_name: &str, email: &str, except: i32) -> bool {
        self.users.values().any(|u| {
            u.id != except && (same_name(&u.user_name, user_name) || same_name(&u.email, email))
        })
    }
}

fn paginate<T>(rows: Vec<T>, filter: &ListFilter) -> Paged<T> {
    let total_count = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(filter.page.offset() as usize)
        .take(filter.page.limit() as usize)
        .collect();
    Paged { items, total_count }
}

/// Memory-backed implementation of every repository trait
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn list_events(
        &self,
        filter: &ListFilter,
        include_speakers: bool,
    ) -> StorageResult<Paged<Event>> {
        let tables = self.tables.read().await;
        let ids: Vec<i32> = tables
            .events
            .values()
            .filter(|e| filter.matches(&e.theme))
            .map(|e| e.id)
            .collect();
        let page = paginate(ids, filter);
        Ok(Paged {
            items: page
                .items
                .into_iter()
                .filter_map(|id| tables.load_event(id, include_speakers))
                .collect(),
            total_count: page.total_count,
        })
    }

    async fn get_event(&self, id: i32, include_speakers: bool) -> StorageResult<Option<Event>> {
        Ok(self.tables.read().await.load_event(id, include_speakers))
    }

    async fn add_event(&self, event: &Event) -> StorageResult<Event> {
        let mut tables = self.tables.write().await;
        let id = tables.event_seq.next();
        let stored = Event {
            id,
            lots: Vec::new(),
            speakers: Vec::new(),
            ..event.clone()
        };
        tables.events.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_event(&self, event: &Event) -> StorageResult<Option<Event>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.events.get_mut(&event.id) else {
            return Ok(None);
        };
        *row = Event {
            lots: Vec::new(),
            speakers: Vec::new(),
            ..event.clone()
        };
        Ok(tables.load_event(event.id, false))
    }

    async fn delete_event(&self, id: i32) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.events.remove(&id).is_none() {
            return Ok(false);
        }
        tables.lots.retain(|_, l| l.event_id != id);
        tables.event_speakers.retain(|(event_id, _)| *event_id != id);
        Ok(true)
    }

    async fn link_speaker(&self, event_id: i32, speaker_id: i32) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&event_id) {
            return Err(StorageError::MissingRow {
                entity: "event",
                id: event_id,
            });
        }
        if !tables.speakers.contains_key(&speaker_id) {
            return Err(StorageError::MissingRow {
                entity: "speaker",
                id: speaker_id,
            });
        }
        tables.event_speakers.insert((event_id, speaker_id));
        Ok(())
    }

    async fn unlink_speaker(&self, event_id: i32, speaker_id: i32) -> StorageResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .event_speakers
            .remove(&(event_id, speaker_id)))
    }
}

#[async_trait]
impl LotRepository for MemoryStore {
    async fn lots_by_event(&self, event_id: i32) -> StorageResult<Vec<Lot>> {
        Ok(self
            .tables
            .read()
            .await
            .lots
            .values()
            .filter(|l| l.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn get_lot(&self, event_id: i32, lot_id: i32) -> StorageResult<Option<Lot>> {
        Ok(self
            .tables
            .read()
            .await
            .lots
            .get(&lot_id)
            .filter(|l| l.event_id == event_id)
            .cloned())
    }

    async fn add_lot(&self, lot: &Lot) -> StorageResult<Lot> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&lot.event_id) {
            return Err(StorageError::MissingRow {
                entity: "event",
                id: lot.event_id,
            });
        }
        let id = tables.lot_seq.next();
        let stored = Lot { id, ..lot.clone() };
        tables.lots.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save_lots(&self, event_id: i32, lots: &[Lot]) -> StorageResult<Vec<Lot>> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&event_id) {
            return Err(StorageError::MissingRow {
                entity: "event",
                id: event_id,
            });
        }
        // Check every update target before touching anything.
        if let Some(missing) = lots.iter().find(|l| {
            l.id != 0
                && !tables
                    .lots
                    .get(&l.id)
                    .is_some_and(|row| row.event_id == event_id)
        }) {
            return Err(StorageError::MissingRow {
                entity: "lot",
                id: missing.id,
            });
        }

        let mut saved = Vec::with_capacity(lots.len());
        for lot in lots {
            let id = if lot.id == 0 {
                tables.lot_seq.next()
            } else {
                lot.id
            };
            let stored = Lot {
                id,
                event_id,
                ..lot.clone()
            };
            tables.lots.insert(id, stored.clone());
            saved.push(stored);
        }
        Ok(saved)
    }

    async fn delete_lot(&self, event_id: i32, lot_id: i32) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .lots
            .get(&lot_id)
            .is_some_and(|l| l.event_id == event_id);
        if owned {
            tables.lots.remove(&lot_id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl SpeakerRepository for MemoryStore {
    async fn list_speakers(&self, filter: &ListFilter) -> StorageResult<Paged<Speaker>> {
        let tables = self.tables.read().await;
        let ids: Vec<i32> = tables
            .speakers
            .values()
            .filter(|s| filter.matches(&s.name))
            .map(|s| s.id)
            .collect();
        let page = paginate(ids, filter);
        Ok(Paged {
            items: page
                .items
                .into_iter()
                .filter_map(|id| tables.load_speaker(id))
                .collect(),
            total_count: page.total_count,
        })
    }

    async fn get_speaker(&self, id: i32) -> StorageResult<Option<Speaker>> {
        Ok(self.tables.read().await.load_speaker(id))
    }

    async fn add_speaker(&self, speaker: &Speaker) -> StorageResult<Speaker> {
        let mut tables = self.tables.write().await;
        let id = tables.speaker_seq.next();
        tables.speakers.insert(
            id,
            Speaker {
                id,
                social_media: Vec::new(),
                ..speaker.clone()
            },
        );
        tables.insert_social_media(id, &speaker.social_media);
        tables.load_speaker(id).ok_or(StorageError::MissingRow {
            entity: "speaker",
            id,
        })
    }

    async fn update_speaker(&self, speaker: &Speaker) -> StorageResult<Option<Speaker>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.speakers.get_mut(&speaker.id) else {
            return Ok(None);
        };
        *row = Speaker {
            social_media: Vec::new(),
            ..speaker.clone()
        };
        tables.social_media.retain(|_, s| s.speaker_id != speaker.id);
        tables.insert_social_media(speaker.id, &speaker.social_media);
        Ok(tables.load_speaker(speaker.id))
    }

    async fn delete_speaker(&self, id: i32) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.speakers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.social_media.retain(|_, s| s.speaker_id != id);
        tables
            .event_speakers
            .retain(|(_, speaker_id)| *speaker_id != id);
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> StorageResult<User> {
        let mut tables = self.tables.write().await;
        if tables.user_name_or_email_taken(&user.user_name, &user.email, 0) {
            return Err(StorageError::Duplicate("user name or email".to_string()));
        }
        let id = tables.user_seq.next();
        let stored = User {
            id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
        };
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_name(&self, user_name: &str) -> StorageResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| same_name(&u.user_name, user_name))
            .cloned())
    }

    async fn update_user(&self, user: &User) -> StorageResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Ok(None);
        }
        if tables.user_name_or_email_taken(&user.user_name, &user.email, user.id) {
            return Err(StorageError::Duplicate("user name or email".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(Some(user.clone()))
    }

    async fn create_role(&self, name: &str) -> StorageResult<Role> {
        let mut tables = self.tables.write().await;
        if tables.roles.values().any(|r| same_name(&r.name, name)) {
            return Err(StorageError::Duplicate(format!("role {}", name)));
        }
        let id = tables.role_seq.next();
        let role = Role {
            id,
            name: name.to_string(),
        };
        tables.roles.insert(id, role.clone());
        Ok(role)
    }

    async fn find_role(&self, name: &str) -> StorageResult<Option<Role>> {
        Ok(self
            .tables
            .read()
            .await
            .roles
            .values()
            .find(|r| same_name(&r.name, name))
            .cloned())
    }

    async fn add_user_to_role(&self, user_id: i32, role_id: i32) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StorageError::MissingRow {
                entity: "user",
                id: user_id,
            });
        }
        if !tables.roles.contains_key(&role_id) {
            return Err(StorageError::MissingRow {
                entity: "role",
                id: role_id,
            });
        }
        tables.user_roles.insert((user_id, role_id));
        Ok(())
    }

    async fn roles_for_user(&self, user_id: i32) -> StorageResult<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_roles
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, role_id)| tables.roles.get(role_id))
            .map(|r| r.name.clone())
            .collect())
    }
}
