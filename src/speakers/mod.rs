//! Speakers and their social-media links

pub mod handlers;
pub mod service;
pub mod types;

pub use service::SpeakerService;
pub use types::{SocialMediaDto, SpeakerDto, SpeakerQuery};
