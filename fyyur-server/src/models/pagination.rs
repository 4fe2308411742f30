//! Pagination for the artist and show listings

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Default items per page
const DEFAULT_PER_PAGE: u32 = 20;

/// Page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Page is clamped to at least 1, per page to 1..=100.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// Wrap one page of items fetched with this request.
    pub fn wrap<T>(&self, items: Vec<T>, total: i64) -> Paginated<T> {
        Paginated {
            items,
            total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of results, serialized with its navigation fields
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn total_pages(&self) -> u32 {
        let total = u32::try_from(self.total.max(0)).unwrap_or(u32::MAX);
        total.div_ceil(self.per_page).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

impl<T: Serialize> Serialize for Paginated<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Paginated", 7)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("per_page", &self.per_page)?;
        state.serialize_field("total_pages", &self.total_pages())?;
        state.serialize_field("has_next", &self.has_next())?;
        state.serialize_field("has_prev", &self.has_prev())?;
        state.end()
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}
