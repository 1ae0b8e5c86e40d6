//! Persisted entities

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Conference or meetup. Owns its lots; linked to speakers many-to-many.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Event {
    pub id: i32,
    pub theme: String,
    pub location: String,
    pub event_date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub people_count: i32,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    #[sqlx(skip)]
    pub lots: Vec<Lot>,
    #[sqlx(skip)]
    pub speakers: Vec<Speaker>,
}

/// Priced ticket batch. `start_date`/`end_date` are stored as given.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Lot {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub quantity: i32,
    pub event_id: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Speaker {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[sqlx(skip)]
    pub social_media: Vec<SocialMedia>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SocialMedia {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub speaker_id: i32,
}

/// Identity user. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i32,
    pub user_name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
}

/// Insert payload for [`User`]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Role {
    pub id: i32,
    pub name: String,
}
