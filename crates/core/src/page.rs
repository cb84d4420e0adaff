//! Pagination request and response types.
//!
//! List endpoints accept `page` (zero-based), `size` and any number of
//! `sort=property[,property...][,asc|desc]` parameters.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Page size used when the request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the page size; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Errors raised while parsing pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("invalid page number: {0:?}")]
    InvalidPage(String),
    #[error("invalid page size: {0:?}")]
    InvalidSize(String),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    /// Parse a `sort` parameter value.
    ///
    /// `"id,desc"` sorts by id descending; `"title,price,desc"` sorts by both
    /// properties descending; a value without a trailing direction sorts
    /// ascending.
    #[must_use]
    pub fn parse(raw: &str) -> Vec<Self> {
        let mut parts: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        let direction = match parts.last().and_then(|last| Direction::parse(last)) {
            Some(direction) => {
                parts.pop();
                direction
            }
            None => Direction::Asc,
        };

        parts
            .into_iter()
            .map(|property| Self {
                property: property.to_string(),
                direction,
            })
            .collect()
    }
}

/// A page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<Sort>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl Pageable {
    /// Create a page request without sorting.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Vec::new(),
        }
    }

    /// Build a page request from decoded query-string pairs.
    ///
    /// Parameters other than `page`, `size` and `sort` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `PageError` if `page` is not a non-negative integer or `size`
    /// is not a positive integer.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self, PageError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pageable = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "page" => {
                    pageable.page = value
                        .parse()
                        .map_err(|_| PageError::InvalidPage(value.to_string()))?;
                }
                "size" => {
                    let size: u32 = value
                        .parse()
                        .map_err(|_| PageError::InvalidSize(value.to_string()))?;
                    if size == 0 {
                        return Err(PageError::InvalidSize(value.to_string()));
                    }
                    pageable.size = size.min(MAX_PAGE_SIZE);
                }
                "sort" => pageable.sort.extend(Sort::parse(value)),
                _ => {}
            }
        }
        Ok(pageable)
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Maximum number of rows to return.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl fmt::Display for Pageable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} size {}", self.page, self.size)?;
        for sort in &self.sort {
            write!(f, " {} {}", sort.property, sort.direction.as_sql())?;
        }
        Ok(())
    }
}

/// One page of results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Create a page from query results.
    #[must_use]
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        Self {
            content,
            number: pageable.page,
            size: pageable.size,
            total_elements,
        }
    }

    /// Total number of pages (at least one).
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(u64::from(self.size)).max(1)
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.number == 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Convert the page content, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
