//! Pagination and sorting types shared by repositories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum page size accepted by `PageRequest::of`
const MAX_LIMIT: i64 = 1000;

/// Sort direction for a single sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` entry, naming a column of the entity under query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{},{}", self.column, direction)
    }
}

/// Parses `"column"`, `"column,asc"` or `"column,desc"`
impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let column = parts.next().unwrap_or_default().trim();
        if column.is_empty() {
            return Err(format!("Invalid sort key '{}': missing column", s));
        }

        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => Direction::Asc,
            Some(d) if d == "asc" => Direction::Asc,
            Some(d) if d == "desc" => Direction::Desc,
            Some(d) => {
                return Err(format!("Invalid sort direction '{}' in '{}'", d, s));
            }
        };

        Ok(SortKey {
            column: column.to_string(),
            direction,
        })
    }
}

/// A window over an ordered result: zero-based row offset, page size, sort keys
///
/// Deserialized requests must carry `offset >= 0` and `1 <= limit <= 1000`;
/// out-of-range windows are rejected instead of reaching the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
    #[serde(default)]
    pub sort: Vec<SortKey>,
}

impl PageRequest {
    /// Page `page` (zero-based) of `size` rows; size is clamped to 1..=1000
    pub fn of(page: i64, size: i64) -> Self {
        let limit = size.clamp(1, MAX_LIMIT);
        Self {
            offset: page.max(0).saturating_mul(limit),
            limit,
            sort: Vec::new(),
        }
    }

    /// Explicit offset/limit window
    pub fn window(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.clamp(1, MAX_LIMIT),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Zero-based page index this request addresses
    pub fn page_number(&self) -> i64 {
        self.offset.checked_div(self.limit).unwrap_or(0)
    }

    /// Check the window is one the database will accept
    pub fn validate(&self) -> Result<(), String> {
        if self.offset < 0 {
            return Err(format!("Page offset must not be negative, got {}", self.offset));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(format!(
                "Page size must be between 1 and {}, got {}",
                MAX_LIMIT, self.limit
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawPageRequest {
    offset: i64,
    limit: i64,
    #[serde(default)]
    sort: Vec<SortKey>,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = String;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        let request = PageRequest {
            offset: raw.offset,
            limit: raw.limit,
            sort: raw.sort,
        };
        request.validate()?;
        Ok(request)
    }
}

/// One page of results together with the total row count of the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            content,
            total,
            offset: request.offset,
            limit: request.limit,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.total <= 0 || self.limit <= 0 {
            return 0;
        }
        (self.total + self.limit - 1) / self.limit
    }

    pub fn has_next(&self) -> bool {
        self.offset + (self.content.len() as i64) < self.total
    }
}
