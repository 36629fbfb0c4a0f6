//! Translation of criteria into specifications.
//!
//! The builder folds a criteria's filter table into one conjunction:
//!
//! 1. the distinct flag, when present, becomes the specification's directive;
//! 2. every non-empty field filter contributes the AND of its operations;
//! 3. every non-empty cross-entity filter contributes an `EXISTS` over the
//!    related identifiers;
//! 4. a non-empty `search` filter contributes the OR, over the entity's search
//!    fields, of the search filter applied to each field.
//!
//! ```rust
//! use yocoma_query::builder::PredicateBuilder;
//! use yocoma_query::criteria::ContactCriteria;
//! use yocoma_query::filter::{LongFilter, StringFilter};
//!
//! let criteria = ContactCriteria::new()
//!     .with_id(LongFilter::new().greater_than(5).less_than_or_equal(10))
//!     .with_search(StringFilter::new().contains("Ann"));
//!
//! let spec = PredicateBuilder::default().build(Some(&criteria));
//! assert_eq!(
//!     spec.to_string(),
//!     "(id > 5 AND id <= 10 AND (firstname CONTAINS 'Ann' OR lastname CONTAINS 'Ann' OR remark CONTAINS 'Ann'))"
//! );
//! ```
//!
//! Building is total: contradictory ranges and empty `in` sets produce
//! predicates that match nothing, never errors.

use tracing::trace;

use crate::config::{QueryConfig, TextMatch};
use crate::criteria::{Criteria, Target};
use crate::filter::{Condition, FieldFilter};
use crate::model::{Field, KeyField, Model, Relation};
use crate::predicate::{KeyPredicate, Predicate, Specification};

/// Builds specifications from criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredicateBuilder {
    text_match: TextMatch,
}

impl PredicateBuilder {
    /// Create a builder using the given case policy for text containment.
    pub fn new(text_match: TextMatch) -> Self {
        Self { text_match }
    }

    /// Create a builder from query configuration.
    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(config.text_match)
    }

    /// The case policy applied to `contains` and `doesNotContain`.
    pub fn text_match(&self) -> TextMatch {
        self.text_match
    }

    /// Translate criteria into a specification. `None` selects everything.
    pub fn build<C: Criteria>(&self, criteria: Option<&C>) -> Specification<C::Model> {
        let mut spec = Specification::all();
        let Some(criteria) = criteria else {
            return spec;
        };

        if let Some(distinct) = criteria.distinct() {
            spec = spec.with_distinct(distinct);
        }

        let mut predicate = Predicate::True;
        for (target, filter) in criteria.filters() {
            if filter.is_empty() {
                continue;
            }
            let term = match target {
                Target::Field(field) => self.field(field, filter),
                Target::Related(relation) => self.related(relation, filter),
            };
            trace!(
                model = <C::Model as Model>::MODEL_NAME,
                field = %target,
                term = %term,
                "criteria term"
            );
            predicate = predicate.and_then(term);
        }

        if let Some(search) = criteria.search().filter(|s| !s.is_empty()) {
            let term = self.search(C::SEARCH_FIELDS, search);
            trace!(model = <C::Model as Model>::MODEL_NAME, term = %term, "search term");
            predicate = predicate.and_then(term);
        }

        spec.predicate = predicate;
        spec
    }

    /// The AND of every operation of `filter` applied to `field`.
    pub fn field<F: Field, R: Relation>(&self, field: F, filter: &dyn FieldFilter) -> Predicate<F, R> {
        Predicate::and(
            filter
                .conditions()
                .into_iter()
                .map(|condition| self.condition(field, condition)),
        )
    }

    /// Existence of a row joined through `relation` whose identifier satisfies
    /// `filter`. Rows without related entities are joined to one null row, so
    /// `specified=false` selects them.
    pub fn related<F: Field, R: Relation>(&self, relation: R, filter: &dyn FieldFilter) -> Predicate<F, R> {
        let key: KeyPredicate = self.field(KeyField::Id, filter);
        match key {
            Predicate::False => Predicate::False,
            key => Predicate::Exists(relation, Box::new(key)),
        }
    }

    /// The OR over `fields` of `search` applied to each field.
    pub fn search<F: Field, R: Relation>(&self, fields: &[F], search: &dyn FieldFilter) -> Predicate<F, R> {
        Predicate::or(fields.iter().map(|&field| self.field(field, search)))
    }

    fn condition<F: Field, R: Relation>(&self, field: F, condition: Condition) -> Predicate<F, R> {
        match condition {
            Condition::Equals(v) => Predicate::Eq(field, v),
            Condition::NotEquals(v) => Predicate::Ne(field, v),
            Condition::In(values) if values.is_empty() => Predicate::False,
            Condition::In(values) => Predicate::In(field, values),
            Condition::NotIn(values) => Predicate::NotIn(field, values),
            Condition::Specified(true) => Predicate::IsNotNull(field),
            Condition::Specified(false) => Predicate::IsNull(field),
            Condition::GreaterThan(v) => Predicate::Gt(field, v),
            Condition::GreaterThanOrEqual(v) => Predicate::Gte(field, v),
            Condition::LessThan(v) => Predicate::Lt(field, v),
            Condition::LessThanOrEqual(v) => Predicate::Lte(field, v),
            Condition::Contains(s) => Predicate::Contains(field, s, self.text_match),
            Condition::DoesNotContain(s) => Predicate::NotContains(field, s, self.text_match),
        }
    }
}
