//! API response envelope and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `PageData<T>`: Paged listing payload
//! - `error_codes`: Standard error code constants

use serde::Serialize;

use crate::persistence::{PageRequest, Paged};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

/// One page of a listing
#[derive(Debug, Serialize)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PageData<T> {
    /// Map a repository page into DTOs.
    pub fn from_paged<E>(paged: Paged<E>, page: PageRequest, f: impl FnMut(E) -> T) -> Self {
        let page_size = page.page_size.max(1) as u64;
        Self {
            items: paged.items.into_iter().map(f).collect(),
            current_page: page.page_number,
            page_size: page.page_size,
            total_count: paged.total_count,
            total_pages: paged.total_count.div_ceil(page_size),
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;
    pub const CONFLICT: i32 = 4009;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}
