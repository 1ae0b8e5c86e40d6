//! Events: the root aggregate
//!
//! An event owns its lots and is linked to speakers. Reads always load the
//! lots; speakers are loaded on request (`include_speakers`).

pub mod handlers;
pub mod service;
pub mod types;

pub use service::EventService;
pub use types::{EventDto, EventQuery};
