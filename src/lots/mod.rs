//! Lots: priced ticket batches of an event

pub mod handlers;
pub mod service;
pub mod types;

pub use service::LotService;
pub use types::LotDto;
