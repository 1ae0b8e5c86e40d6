//! Gateway-level handlers. Entity handlers live next to their services
//! (`events::handlers`, `lots::handlers`, ...).

pub mod health;

pub use health::health_check;
