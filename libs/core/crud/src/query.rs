use crate::entity::Predicate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
pub const MAX_PAGE: u64 = 1_000_000;

/// `?page=&limit=` with offset-limit semantics; page is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 1000000, message = "\"page\" must be between 1 and 1000000"))]
    pub page: u64,
    /// Records per page
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "\"limit\" must be between 1 and 100"))]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// What a repository read selects: predicates, then newest first, then the
/// window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FindQuery {
    pub predicates: Vec<Predicate>,
    pub skip: u64,
    pub limit: Option<u64>,
}

impl FindQuery {
    pub fn all(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            skip: 0,
            limit: None,
        }
    }

    pub fn page(predicates: Vec<Predicate>, pagination: Pagination) -> Self {
        Self {
            predicates,
            skip: pagination.skip(),
            limit: Some(pagination.limit),
        }
    }
}
