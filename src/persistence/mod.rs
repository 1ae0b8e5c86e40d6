//! Persistence layer
//!
//! Repository traits over the event aggregates plus two backends:
//! - [`PgStore`]: PostgreSQL via sqlx
//! - [`MemoryStore`]: in-process tables, used when no connection string is
//!   configured and by the test suite

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod schema;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use models::{Event, Lot, NewUser, Role, SocialMedia, Speaker, User};
pub use postgres::PgStore;
pub use repository::{
    EventRepository, HealthCheck, LotRepository, SpeakerRepository, Store, UserRepository,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Normalized paging window. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Clamp raw query values: page >= 1, size in 1..=MAX_PAGE_SIZE.
    pub fn new(page_number: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page_number: page_number.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page_number as u64 - 1) * self.page_size as u64
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Listing filter shared by events (matched on theme) and speakers (matched
/// on name). Matching is a case-insensitive substring test.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub term: Option<String>,
    pub page: PageRequest,
}

impl ListFilter {
    pub fn new(term: Option<String>, page: PageRequest) -> Self {
        let term = term
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self { term, page }
    }

    /// `ILIKE` pattern for the term with `\`, `%` and `_` escaped, so the
    /// database matches the same literal substring as [`Self::matches`].
    pub(crate) fn like_pattern(&self) -> Option<String> {
        self.term.as_ref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }

    pub(crate) fn matches(&self, value: &str) -> bool {
        match &self.term {
            Some(term) => value.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// One page of rows plus the unpaged row count.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(Some(0), Some(500));
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);

        let page = PageRequest::new(Some(3), Some(0));
        assert_eq!(page.page_size, 1);
        assert_eq!(page.offset(), 2);
    }

    #[test]
    fn test_filter_blank_term_ignored() {
        let filter = ListFilter::new(Some("   ".to_string()), PageRequest::default());
        assert!(filter.term.is_none());
        assert!(filter.matches("anything"));
    }

    #[test]
    fn test_filter_case_insensitive() {
        let filter = ListFilter::new(Some("angular".to_string()), PageRequest::default());
        assert!(filter.matches("Angular 11 e .NET 5"));
        assert!(!filter.matches("Rust Conf"));
    }

    #[test]
    fn test_wildcards_are_literal() {
        let filter = ListFilter::new(Some("50%_off".to_string()), PageRequest::default());
        assert_eq!(filter.like_pattern().as_deref(), Some(r"%50\%\_off%"));
        assert!(filter.matches("Tickets 50%_off today"));
        assert!(!filter.matches("Tickets 50 off"));

        let filter = ListFilter::new(Some(r"a\b".to_string()), PageRequest::default());
        assert_eq!(filter.like_pattern().as_deref(), Some(r"%a\\b%"));
        assert!(ListFilter::default().like_pattern().is_none());
    }
}
