//! Filter value objects.
//!
//! A filter describes the constraints a caller places on one field. Every
//! operation is optional and a filter with no operation set constrains
//! nothing:
//!
//! ```rust
//! use yocoma_query::filter::{FieldFilter, LongFilter, StringFilter};
//!
//! let id = LongFilter::new().greater_than(5).less_than_or_equal(10);
//! assert!(!id.is_empty());
//!
//! let name = StringFilter::new().contains("Ann");
//! assert_eq!(name.to_string(), "StringFilter[contains=Ann]");
//!
//! assert!(StringFilter::new().is_empty());
//! ```
//!
//! Filters never validate combinations of operations. `greaterThan(5)` together
//! with `lessThan(3)` is accepted and simply matches nothing.
//!
//! Every filter lowers into an ordered list of [`Condition`]s, which is what the
//! predicate builder consumes, so all filter types are translated by one rule.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, QueryResult};

/// A scalar value a predicate compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Absent value (SQL NULL).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
    /// Enumeration constant, by name.
    Enum(&'static str),
}

impl Value {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Order two values of the same kind. Null or mixed kinds are incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Enum(a), Self::Enum(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Borrow the text of a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Text(s) => f.write_str(s),
            Self::Enum(name) => f.write_str(name),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// A type that can appear as the operand of a filter.
pub trait FilterValue: Clone + Ord + fmt::Debug + Send + Sync + 'static {
    /// Human readable description of the accepted wire format.
    const EXPECTED: &'static str;

    /// Convert to a predicate value.
    fn to_value(&self) -> Value;

    /// Decode a single wire value.
    fn parse_wire(raw: &str) -> Option<Self>;
}

impl FilterValue for i64 {
    const EXPECTED: &'static str = "a 64-bit integer";

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn parse_wire(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FilterValue for i32 {
    const EXPECTED: &'static str = "a 32-bit integer";

    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }

    fn parse_wire(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FilterValue for bool {
    const EXPECTED: &'static str = "true or false";

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn parse_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl FilterValue for String {
    const EXPECTED: &'static str = "text";

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn parse_wire(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// A filter operation as named on the wire (`field.<operation>=value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `equals`
    Equals,
    /// `notEquals`
    NotEquals,
    /// `in`
    In,
    /// `notIn`
    NotIn,
    /// `specified`
    Specified,
    /// `greaterThan`
    GreaterThan,
    /// `greaterThanOrEqual`
    GreaterThanOrEqual,
    /// `lessThan`
    LessThan,
    /// `lessThanOrEqual`
    LessThanOrEqual,
    /// `contains`
    Contains,
    /// `doesNotContain`
    DoesNotContain,
}

impl Operation {
    /// Every operation, in canonical order.
    pub const ALL: &'static [Operation] = &[
        Self::Equals,
        Self::NotEquals,
        Self::In,
        Self::NotIn,
        Self::Specified,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Contains,
        Self::DoesNotContain,
    ];

    /// The wire name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Specified => "specified",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::Contains => "contains",
            Self::DoesNotContain => "doesNotContain",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|op| op.as_str() == s).ok_or(())
    }
}

/// One lowered filter operation with its operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Field equals the value.
    Equals(Value),
    /// Field differs from the value.
    NotEquals(Value),
    /// Field is one of the values. An empty list matches nothing.
    In(Vec<Value>),
    /// Field is none of the values.
    NotIn(Vec<Value>),
    /// `true`: field is non-null; `false`: field is null.
    Specified(bool),
    /// Field is greater than the value.
    GreaterThan(Value),
    /// Field is greater than or equal to the value.
    GreaterThanOrEqual(Value),
    /// Field is less than the value.
    LessThan(Value),
    /// Field is less than or equal to the value.
    LessThanOrEqual(Value),
    /// Field contains the text.
    Contains(String),
    /// Field does not contain the text.
    DoesNotContain(String),
}

impl Condition {
    /// The wire operation this condition came from.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Equals(_) => Operation::Equals,
            Self::NotEquals(_) => Operation::NotEquals,
            Self::In(_) => Operation::In,
            Self::NotIn(_) => Operation::NotIn,
            Self::Specified(_) => Operation::Specified,
            Self::GreaterThan(_) => Operation::GreaterThan,
            Self::GreaterThanOrEqual(_) => Operation::GreaterThanOrEqual,
            Self::LessThan(_) => Operation::LessThan,
            Self::LessThanOrEqual(_) => Operation::LessThanOrEqual,
            Self::Contains(_) => Operation::Contains,
            Self::DoesNotContain(_) => Operation::DoesNotContain,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.operation())?;
        match self {
            Self::Equals(v)
            | Self::NotEquals(v)
            | Self::GreaterThan(v)
            | Self::GreaterThanOrEqual(v)
            | Self::LessThan(v)
            | Self::LessThanOrEqual(v) => write!(f, "{}", v),
            Self::In(values) | Self::NotIn(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            Self::Specified(b) => write!(f, "{}", b),
            Self::Contains(s) | Self::DoesNotContain(s) => f.write_str(s),
        }
    }
}

/// Object-safe view of any filter, used by the predicate builder and the
/// wire-parameter parser.
pub trait FieldFilter: fmt::Debug + Send + Sync {
    /// The present operations, in canonical order.
    fn conditions(&self) -> Vec<Condition>;

    /// `true` when no operation is set.
    fn is_empty(&self) -> bool;

    /// Set one operation from its raw wire value. `key` is the full parameter
    /// name and only used in error messages.
    fn apply(&mut self, key: &str, op: Operation, raw: &str) -> QueryResult<()>;
}

fn parse_one<T: FilterValue>(key: &str, raw: &str) -> QueryResult<T> {
    T::parse_wire(raw).ok_or_else(|| QueryError::invalid_value(key, raw, T::EXPECTED))
}

fn parse_set<T: FilterValue>(key: &str, raw: &str) -> QueryResult<BTreeSet<T>> {
    if raw.is_empty() {
        return Ok(BTreeSet::new());
    }
    raw.split(',')
        .map(|part| parse_one::<T>(key, part))
        .collect()
}

fn write_conditions(f: &mut fmt::Formatter<'_>, kind: &str, conditions: &[Condition]) -> fmt::Result {
    f.write_str(kind)?;
    f.write_str("[")?;
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", condition)?;
    }
    f.write_str("]")
}

/// Equality, membership and nullability constraints on a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Ord"
))]
pub struct Filter<T> {
    /// Field equals the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,
    /// Field differs from the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,
    /// Field is one of the values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#in: Option<BTreeSet<T>>,
    /// Field is none of the values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_in: Option<BTreeSet<T>>,
    /// Field must (`true`) or must not (`false`) be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

/// Filter over a boolean field.
pub type BooleanFilter = Filter<bool>;

/// Filter over an enumerated field.
pub type EnumFilter<E> = Filter<E>;

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            r#in: None,
            not_in: None,
            specified: None,
        }
    }
}

impl<T: FilterValue> Filter<T> {
    /// Create a filter with every operation absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the field to equal `value`.
    pub fn equals(mut self, value: impl Into<T>) -> Self {
        self.equals = Some(value.into());
        self
    }

    /// Require the field to differ from `value`.
    pub fn not_equals(mut self, value: impl Into<T>) -> Self {
        self.not_equals = Some(value.into());
        self
    }

    /// Require the field to be one of `values`.
    pub fn r#in<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.r#in = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Require the field to be none of `values`.
    pub fn not_in<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.not_in = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Require the field to be set (`true`) or null (`false`).
    pub fn specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    /// Deep copy. Sets are duplicated, never shared.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn push_conditions(&self, out: &mut Vec<Condition>) {
        if let Some(v) = &self.equals {
            out.push(Condition::Equals(v.to_value()));
        }
        if let Some(v) = &self.not_equals {
            out.push(Condition::NotEquals(v.to_value()));
        }
        if let Some(values) = &self.r#in {
            out.push(Condition::In(values.iter().map(FilterValue::to_value).collect()));
        }
        if let Some(values) = &self.not_in {
            out.push(Condition::NotIn(values.iter().map(FilterValue::to_value).collect()));
        }
        if let Some(specified) = self.specified {
            out.push(Condition::Specified(specified));
        }
    }

    fn is_base_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.r#in.is_none()
            && self.not_in.is_none()
            && self.specified.is_none()
    }

    fn apply_base(&mut self, key: &str, op: Operation, raw: &str) -> QueryResult<()> {
        match op {
            Operation::Equals => self.equals = Some(parse_one(key, raw)?),
            Operation::NotEquals => self.not_equals = Some(parse_one(key, raw)?),
            Operation::In => self.r#in = Some(parse_set(key, raw)?),
            Operation::NotIn => self.not_in = Some(parse_set(key, raw)?),
            Operation::Specified => self.specified = Some(parse_one(key, raw)?),
            _ => return Err(QueryError::unsupported_operation(key, op.as_str())),
        }
        Ok(())
    }
}

impl<T: FilterValue> FieldFilter for Filter<T> {
    fn conditions(&self) -> Vec<Condition> {
        let mut out = Vec::new();
        self.push_conditions(&mut out);
        out
    }

    fn is_empty(&self) -> bool {
        self.is_base_empty()
    }

    fn apply(&mut self, key: &str, op: Operation, raw: &str) -> QueryResult<()> {
        self.apply_base(key, op, raw)
    }
}

impl<T: FilterValue> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_conditions(f, "Filter", &self.conditions())
    }
}

/// Generates the base-operation builders on a filter that wraps a `Filter<T>`
/// in its `base` field.
macro_rules! base_builders {
    ($t:ty) => {
        /// Require the field to equal `value`.
        pub fn equals(mut self, value: impl Into<$t>) -> Self {
            self.base.equals = Some(value.into());
            self
        }

        /// Require the field to differ from `value`.
        pub fn not_equals(mut self, value: impl Into<$t>) -> Self {
            self.base.not_equals = Some(value.into());
            self
        }

        /// Require the field to be one of `values`.
        pub fn r#in<I, V>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = V>,
            V: Into<$t>,
        {
            self.base = self.base.r#in(values);
            self
        }

        /// Require the field to be none of `values`.
        pub fn not_in<I, V>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = V>,
            V: Into<$t>,
        {
            self.base = self.base.not_in(values);
            self
        }

        /// Require the field to be set (`true`) or null (`false`).
        pub fn specified(mut self, specified: bool) -> Self {
            self.base.specified = Some(specified);
            self
        }

        /// Deep copy. Sets are duplicated, never shared.
        pub fn copy(&self) -> Self {
            self.clone()
        }
    };
}

/// Filter over an ordered field, adding range comparisons.
///
/// Deserialization rejects keys that are not operations of this filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RangeFilterDoc<T>")]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Ord"
))]
pub struct RangeFilter<T> {
    /// Equality, membership and nullability operations.
    #[serde(flatten)]
    pub base: Filter<T>,
    /// Field is greater than the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,
    /// Field is greater than or equal to the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<T>,
    /// Field is less than the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,
    /// Field is less than or equal to the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<T>,
}

/// Filter over a 64-bit identifier or count.
pub type LongFilter = RangeFilter<i64>;

/// Filter over a 32-bit integer.
pub type IntegerFilter = RangeFilter<i32>;

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: Filter::default(),
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

// Flat decoding form; `flatten` cannot be combined with `deny_unknown_fields`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Ord"))]
struct RangeFilterDoc<T> {
    #[serde(default)]
    equals: Option<T>,
    #[serde(default)]
    not_equals: Option<T>,
    #[serde(default)]
    r#in: Option<BTreeSet<T>>,
    #[serde(default)]
    not_in: Option<BTreeSet<T>>,
    #[serde(default)]
    specified: Option<bool>,
    #[serde(default)]
    greater_than: Option<T>,
    #[serde(default)]
    greater_than_or_equal: Option<T>,
    #[serde(default)]
    less_than: Option<T>,
    #[serde(default)]
    less_than_or_equal: Option<T>,
}

impl<T> From<RangeFilterDoc<T>> for RangeFilter<T> {
    fn from(doc: RangeFilterDoc<T>) -> Self {
        Self {
            base: Filter {
                equals: doc.equals,
                not_equals: doc.not_equals,
                r#in: doc.r#in,
                not_in: doc.not_in,
                specified: doc.specified,
            },
            greater_than: doc.greater_than,
            greater_than_or_equal: doc.greater_than_or_equal,
            less_than: doc.less_than,
            less_than_or_equal: doc.less_than_or_equal,
        }
    }
}

impl<T: FilterValue> RangeFilter<T> {
    /// Create a filter with every operation absent.
    pub fn new() -> Self {
        Self::default()
    }

    base_builders!(T);

    /// Require the field to be greater than `value`.
    pub fn greater_than(mut self, value: impl Into<T>) -> Self {
        self.greater_than = Some(value.into());
        self
    }

    /// Require the field to be greater than or equal to `value`.
    pub fn greater_than_or_equal(mut self, value: impl Into<T>) -> Self {
        self.greater_than_or_equal = Some(value.into());
        self
    }

    /// Require the field to be less than `value`.
    pub fn less_than(mut self, value: impl Into<T>) -> Self {
        self.less_than = Some(value.into());
        self
    }

    /// Require the field to be less than or equal to `value`.
    pub fn less_than_or_equal(mut self, value: impl Into<T>) -> Self {
        self.less_than_or_equal = Some(value.into());
        self
    }
}

impl<T: FilterValue> FieldFilter for RangeFilter<T> {
    fn conditions(&self) -> Vec<Condition> {
        let mut out = Vec::new();
        self.base.push_conditions(&mut out);
        if let Some(v) = &self.greater_than {
            out.push(Condition::GreaterThan(v.to_value()));
        }
        if let Some(v) = &self.greater_than_or_equal {
            out.push(Condition::GreaterThanOrEqual(v.to_value()));
        }
        if let Some(v) = &self.less_than {
            out.push(Condition::LessThan(v.to_value()));
        }
        if let Some(v) = &self.less_than_or_equal {
            out.push(Condition::LessThanOrEqual(v.to_value()));
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.base.is_base_empty()
            && self.greater_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than.is_none()
            && self.less_than_or_equal.is_none()
    }

    fn apply(&mut self, key: &str, op: Operation, raw: &str) -> QueryResult<()> {
        match op {
            Operation::GreaterThan => self.greater_than = Some(parse_one(key, raw)?),
            Operation::GreaterThanOrEqual => self.greater_than_or_equal = Some(parse_one(key, raw)?),
            Operation::LessThan => self.less_than = Some(parse_one(key, raw)?),
            Operation::LessThanOrEqual => self.less_than_or_equal = Some(parse_one(key, raw)?),
            _ => return self.base.apply_base(key, op, raw),
        }
        Ok(())
    }
}

impl<T: FilterValue> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_conditions(f, "RangeFilter", &self.conditions())
    }
}

/// Filter over a text field, adding substring matching.
///
/// Case sensitivity of `contains`/`doesNotContain` is not a property of the
/// filter; it is fixed by the predicate builder's
/// [`TextMatch`](crate::config::TextMatch) policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StringFilterDoc")]
pub struct StringFilter {
    /// Equality, membership and nullability operations.
    #[serde(flatten)]
    pub base: Filter<String>,
    /// Field contains the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    /// Field does not contain the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StringFilterDoc {
    #[serde(default)]
    equals: Option<String>,
    #[serde(default)]
    not_equals: Option<String>,
    #[serde(default)]
    r#in: Option<BTreeSet<String>>,
    #[serde(default)]
    not_in: Option<BTreeSet<String>>,
    #[serde(default)]
    specified: Option<bool>,
    #[serde(default)]
    contains: Option<String>,
    #[serde(default)]
    does_not_contain: Option<String>,
}

impl From<StringFilterDoc> for StringFilter {
    fn from(doc: StringFilterDoc) -> Self {
        Self {
            base: Filter {
                equals: doc.equals,
                not_equals: doc.not_equals,
                r#in: doc.r#in,
                not_in: doc.not_in,
                specified: doc.specified,
            },
            contains: doc.contains,
            does_not_contain: doc.does_not_contain,
        }
    }
}

impl StringFilter {
    /// Create a filter with every operation absent.
    pub fn new() -> Self {
        Self::default()
    }

    base_builders!(String);

    /// Require the field to contain `text`.
    pub fn contains(mut self, text: impl Into<String>) -> Self {
        self.contains = Some(text.into());
        self
    }

    /// Require the field not to contain `text`.
    pub fn does_not_contain(mut self, text: impl Into<String>) -> Self {
        self.does_not_contain = Some(text.into());
        self
    }
}

impl FieldFilter for StringFilter {
    fn conditions(&self) -> Vec<Condition> {
        let mut out = Vec::new();
        self.base.push_conditions(&mut out);
        if let Some(s) = &self.contains {
            out.push(Condition::Contains(s.clone()));
        }
        if let Some(s) = &self.does_not_contain {
            out.push(Condition::DoesNotContain(s.clone()));
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.base.is_base_empty() && self.contains.is_none() && self.does_not_contain.is_none()
    }

    fn apply(&mut self, key: &str, op: Operation, raw: &str) -> QueryResult<()> {
        match op {
            Operation::Contains => self.contains = Some(raw.to_string()),
            Operation::DoesNotContain => self.does_not_contain = Some(raw.to_string()),
            _ => return self.base.apply_base(key, op, raw),
        }
        Ok(())
    }
}

impl fmt::Display for StringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_conditions(f, "StringFilter", &self.conditions())
    }
}
