//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Query parameters for pagination, filtering and sorting
///
/// # Example
/// ```text
/// GET /orders?page=2&limit=10
/// GET /cargos?filter={"areaId": "0b6f..."}
/// GET /orders?filter={"status": "PENDING"}&sort=createdAt:desc
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Filters as a JSON object; each key must equal the record's field
    pub filter: Option<String>,

    /// Sort field and direction: `field`, `field:asc` or `field:desc`
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            filter: None,
            sort: None,
        }
    }
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, ensuring it stays within 1..=100
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, 100)
    }

    /// Parse filter JSON string into Value
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }

    /// Filter, sort and paginate serialized records
    pub fn apply(&self, mut records: Vec<Value>) -> PaginatedResponse<Value> {
        if let Some(Value::Object(filter)) = self.filter_value() {
            records.retain(|record| {
                filter
                    .iter()
                    .all(|(key, expected)| record.get(key) == Some(expected))
            });
        }

        if let Some(sort) = &self.sort {
            let (field, descending) = match sort.split_once(':') {
                Some((field, direction)) => (field, direction.eq_ignore_ascii_case("desc")),
                None => (sort.as_str(), false),
            };
            records.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                if descending { ordering.reverse() } else { ordering }
            });
        }

        let page = self.page();
        let limit = self.limit();
        let total = records.len();
        let data = records
            .into_iter()
            .skip(offset(page, limit))
            .take(limit)
            .collect();

        PaginatedResponse {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

/// Index of the first record on `page`; saturates for pages past any real total
fn offset(page: usize, limit: usize) -> usize {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Missing values sort first; mismatched types compare equal
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = offset(page, limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
