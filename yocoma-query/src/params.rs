//! Wire parameter parsing.
//!
//! Filters arrive as `application/x-www-form-urlencoded` query strings with
//! one `field.operation=value` pair per constraint:
//!
//! ```rust
//! use yocoma_query::criteria::ContactCriteria;
//! use yocoma_query::params::QueryParams;
//!
//! let params: QueryParams<ContactCriteria> =
//!     QueryParams::parse("id.greaterThan=5&id.lessThanOrEqual=10&search=Ann&sort=id,desc&size=5").unwrap();
//!
//! assert_eq!(params.criteria.id.as_ref().and_then(|f| f.greater_than), Some(5));
//! assert_eq!(params.page.size, 5);
//! assert_eq!(params.page.to_string(), "page=0, size=5, sort=id DESC");
//! ```
//!
//! Besides filters the reserved keys are:
//!
//! | Key        | Meaning                                           |
//! |------------|---------------------------------------------------|
//! | `search`   | shorthand for `search.contains`                   |
//! | `distinct` | `true` or `false`                                 |
//! | `page`     | 0-based page number                               |
//! | `size`     | page size, at most the configured maximum         |
//! | `sort`     | `column[,column..][,asc\|desc]`, repeatable       |
//!
//! Values of `in` and `notIn` are comma-separated. Keys that are neither
//! reserved nor `field.operation` pairs are rejected rather than ignored.
//!
//! Criteria can also be posted as a JSON document keyed by the same names,
//! see [`criteria_from_json`].

use tracing::trace;

use crate::config::QueryConfig;
use crate::criteria::Criteria;
use crate::error::{QueryError, QueryResult};
use crate::filter::{FilterValue, Operation};
use crate::pagination::{OrderByField, PageRequest, SortOrder};

/// Criteria plus paging decoded from one query string.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams<C> {
    /// Decoded filters.
    pub criteria: C,
    /// Decoded page request, with configured defaults for absent keys.
    pub page: PageRequest,
}

impl<C: Criteria> QueryParams<C> {
    /// Parse with the default configuration.
    pub fn parse(query: &str) -> QueryResult<Self> {
        Self::parse_with(query, &QueryConfig::default())
    }

    /// Parse a query string. A leading `?` is ignored.
    pub fn parse_with(query: &str, config: &QueryConfig) -> QueryResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut criteria = C::default();
        let mut page = PageRequest::first(config.default_page_size);

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            crate::yocoma_trace!(key = %key, value = %value, "query parameter");
            match &*key {
                "" => continue,
                "search" => criteria.apply_param("search", Operation::Contains, &value)?,
                "distinct" => {
                    let distinct = bool::parse_wire(&value)
                        .ok_or_else(|| QueryError::invalid_value("distinct", &*value, bool::EXPECTED))?;
                    criteria.set_distinct(Some(distinct));
                }
                "page" => page.page = parse_number("page", &value)?,
                "size" => page.size = parse_size(&value, config)?,
                "sort" => {
                    for field in parse_sort(&value)? {
                        page = page.sort_by(field);
                    }
                }
                key => {
                    let (field, op) = split_key(key)?;
                    criteria.apply_param(field, op, &value)?;
                }
            }
        }

        Ok(Self { criteria, page })
    }
}

/// Decode criteria from a JSON document such as
/// `{"firstname": {"contains": "Ann"}, "distinct": true}`.
pub fn criteria_from_json<C: Criteria>(json: &str) -> QueryResult<C> {
    let criteria: C = serde_json::from_str(json)?;
    trace!(criteria = %criteria, "criteria document");
    Ok(criteria)
}

fn split_key(key: &str) -> QueryResult<(&str, Operation)> {
    let Some((field, op)) = key.split_once('.') else {
        return Err(QueryError::invalid_value(key, "", "a field.operation key")
            .with_suggestion("Use e.g. firstname.equals=Ann or search=Ann"));
    };
    let op = op
        .parse::<Operation>()
        .map_err(|_| QueryError::unsupported_operation(field, op).with_parameter(key))?;
    Ok((field, op))
}

fn parse_number(name: &str, raw: &str) -> QueryResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| QueryError::invalid_value(name, raw, "a non-negative integer"))
}

fn parse_size(raw: &str, config: &QueryConfig) -> QueryResult<u64> {
    let size = parse_number("size", raw)?;
    if size == 0 || size > config.max_page_size {
        return Err(QueryError::invalid_value(
            "size",
            raw,
            format!("a page size between 1 and {}", config.max_page_size),
        ));
    }
    Ok(size)
}

/// `a,b,desc` sorts by `a` then `b`, both descending.
fn parse_sort(raw: &str) -> QueryResult<Vec<OrderByField>> {
    let mut parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let order = match parts.last().and_then(|last| SortOrder::from_wire(last)) {
        Some(order) => {
            parts.pop();
            order
        }
        None => SortOrder::Asc,
    };
    if parts.is_empty() || parts.iter().any(|column| column.is_empty()) {
        return Err(QueryError::invalid_value("sort", raw, "column[,asc|desc]"));
    }
    Ok(parts.into_iter().map(|column| OrderByField::new(column, order)).collect())
}
