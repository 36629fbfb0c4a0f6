//! Page and sort specifications.
//!
//! Pages are 0-indexed. A request carries the page number, the page size and
//! an ordered list of sort columns:
//!
//! ```rust
//! use yocoma_query::pagination::{OrderByField, PageRequest};
//!
//! let request = PageRequest::new(2, 25).sort_by(OrderByField::desc("id"));
//! assert_eq!(request.offset(), 50);
//! assert_eq!(request.to_string(), "page=2, size=25, sort=id DESC");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortOrder {
    /// Keyword for this sort order.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a wire direction (`asc`/`desc`, any case).
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort column with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByField {
    /// Wire name of the column.
    pub column: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl OrderByField {
    /// Create a sort column.
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Ascending sort on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortOrder::Asc)
    }

    /// Descending sort on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortOrder::Desc)
    }
}

impl fmt::Display for OrderByField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.order)
    }
}

/// Ordered list of sort columns. Earlier columns take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBy {
    fields: Vec<OrderByField>,
}

impl OrderBy {
    /// No ordering.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if no column is given.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Add a column after the existing ones.
    pub fn then(mut self, field: OrderByField) -> Self {
        self.fields.push(field);
        self
    }

    /// Create from columns in precedence order.
    pub fn from_fields(fields: impl IntoIterator<Item = OrderByField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// The columns in precedence order.
    pub fn fields(&self) -> &[OrderByField] {
        &self.fields
    }

    /// Number of columns.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl From<OrderByField> for OrderBy {
    fn from(field: OrderByField) -> Self {
        Self { fields: vec![field] }
    }
}

impl From<Vec<OrderByField>> for OrderBy {
    fn from(fields: Vec<OrderByField>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

/// Page number, page size and ordering of a paged query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0-based page number.
    pub page: u64,
    /// Maximum number of entities per page.
    pub size: u64,
    /// Sort columns.
    #[serde(default)]
    pub sort: OrderBy,
}

impl PageRequest {
    /// Create an unsorted request.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: OrderBy::none(),
        }
    }

    /// The first page of `size` entities.
    pub fn first(size: u64) -> Self {
        Self::new(0, size)
    }

    /// Append a sort column.
    pub fn sort_by(mut self, field: OrderByField) -> Self {
        self.sort = self.sort.then(field);
        self
    }

    /// Replace the ordering.
    pub fn with_sort(mut self, sort: impl Into<OrderBy>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Number of entities before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={}, size={}", self.page, self.size)?;
        if !self.sort.is_empty() {
            write!(f, ", sort={}", self.sort)?;
        }
        Ok(())
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Entities on this page.
    pub content: Vec<T>,
    /// 0-based page number.
    pub number: u64,
    /// Requested page size.
    pub size: u64,
    /// Number of entities matching across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Number of pages needed for all matching entities.
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    /// Check if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages()
    }

    /// Check if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Check if this page holds no entity.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Transform the entities, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_display() {
        let order = OrderBy::from_fields([OrderByField::desc("lastname"), OrderByField::asc("id")]);
        assert_eq!(order.to_string(), "lastname DESC, id ASC");
        assert_eq!(order.field_count(), 2);
        assert!(OrderBy::none().is_empty());
    }

    #[test]
    fn test_sort_order_from_wire() {
        assert_eq!(SortOrder::from_wire("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::from_wire("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::from_wire("up"), None);
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::new(1, 2);
        let page = Page::new(vec![3, 4], &request, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::new(vec![5], &PageRequest::new(2, 2), 5);
        assert!(!last.has_next());
        assert_eq!(last.map(|n| n * 10).content, vec![50]);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i64> = Page::new(vec![], &PageRequest::first(20), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(page.is_empty());
    }

    #[test]
    fn test_last_possible_page_number() {
        let page: Page<i64> = Page::new(vec![], &PageRequest::new(u64::MAX, 1), 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
        assert_eq!(PageRequest::new(u64::MAX, 1).offset(), u64::MAX);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(vec![1], &PageRequest::first(10), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 1);
    }
}
