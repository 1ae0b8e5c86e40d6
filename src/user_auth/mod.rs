//! Identity: users, roles, password hashing and bearer tokens

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod service;
pub mod types;

pub use error::AuthServiceError;
pub use middleware::jwt_auth_middleware;
pub use service::UserAuthService;
pub use types::Claims;
