//! Gateway types module
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`PageData<T>`]: Paged listing payload
//! - [`ApiError`]: Error rendered with the same envelope
//!
//! ## Input Types
//! - [`ValidatedJson<T>`]: Axum extractor that rejects invalid DTOs with 400
//! - [`Path<T>`], [`Query<T>`]: URL extractors with enveloped rejections
//!
//! ## Submodules
//! - [`response`]: Response types and error codes
//! - [`error`]: Error type and handler result helpers
//! - [`extract`]: Request extractors

pub mod error;
pub mod extract;
pub mod response;

pub use error::{
    ApiError, ApiResult, FieldErrors, created, expose_details, ok, set_expose_details,
};
pub use extract::{Path, Query, ValidatedJson, validate_each};
pub use response::{ApiResponse, PageData, error_codes};
