//! ProEventos - Event Management API
//!
//! Events, their ticket lots, speakers and speaker social media behind a
//! JWT-authenticated REST API.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration (`config/{env}.yaml`)
//! - [`logging`] - tracing subscriber with rolling file output
//! - [`persistence`] - Repository traits, PostgreSQL and memory backends
//! - [`events`] - Event service, DTOs and handlers
//! - [`lots`] - Lot service, DTOs and handlers
//! - [`speakers`] - Speaker service, DTOs and handlers
//! - [`user_auth`] - Users, roles, password hashing, bearer tokens
//! - [`gateway`] - axum router, response envelope, error mapping

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;

// Application services
pub mod events;
pub mod lots;
pub mod speakers;
pub mod user_auth;

// HTTP surface
pub mod gateway;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use error::{ServiceError, ServiceResult};
pub use gateway::{build_router, state::AppState};
pub use persistence::{MemoryStore, PgStore};
