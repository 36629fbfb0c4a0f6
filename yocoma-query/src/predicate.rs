//! Composable predicates over a model.
//!
//! A [`Predicate`] is a store-agnostic boolean expression over a model's
//! fields and relations. The smart constructors keep expressions small:
//!
//! ```rust
//! use yocoma_query::domain::ContactField;
//! use yocoma_query::filter::Value;
//! use yocoma_query::predicate::Predicate;
//! use yocoma_query::model::NoRelation;
//!
//! type P = Predicate<ContactField, NoRelation>;
//!
//! // TRUE is the identity of AND
//! let p = P::and([P::True, P::Eq(ContactField::Firstname, Value::from("Ann"))]);
//! assert_eq!(p.to_string(), "firstname = 'Ann'");
//!
//! // FALSE absorbs AND
//! let p = P::and([P::False, P::IsNull(ContactField::Email)]);
//! assert!(p.is_false());
//! ```
//!
//! Evaluation against an entity follows SQL three-valued logic: a comparison
//! with a null field is unknown, unknown propagates through `AND`/`OR`/`NOT`,
//! and only a definite `true` matches. Relations are followed with left-join
//! semantics, see [`RelatedKey`].

use std::cmp::Ordering;
use std::fmt;

use crate::config::TextMatch;
use crate::filter::Value;
use crate::model::{Field, KeyField, Model, NoRelation, RelatedKey, Relation};

/// Predicate over the identifier of a joined row.
pub type KeyPredicate = Predicate<KeyField, NoRelation>;

/// Predicate over the fields and relations of model `M`.
pub type PredicateOf<M> = Predicate<<M as Model>::Field, <M as Model>::Relation>;

/// A boolean expression over fields `F` and relations `R`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<F, R> {
    /// Always true.
    True,
    /// Always false.
    False,
    /// `field = value`
    Eq(F, Value),
    /// `field != value`
    Ne(F, Value),
    /// `field < value`
    Lt(F, Value),
    /// `field <= value`
    Lte(F, Value),
    /// `field > value`
    Gt(F, Value),
    /// `field >= value`
    Gte(F, Value),
    /// `field IN (values)`. Matches nothing when `values` is empty.
    In(F, Vec<Value>),
    /// `field NOT IN (values)`
    NotIn(F, Vec<Value>),
    /// `field IS NULL`
    IsNull(F),
    /// `field IS NOT NULL`
    IsNotNull(F),
    /// Substring match under a case policy.
    Contains(F, String, TextMatch),
    /// Negated substring match under a case policy.
    NotContains(F, String, TextMatch),
    /// Some row joined through the relation satisfies the key predicate.
    Exists(R, Box<KeyPredicate>),
    /// Logical AND.
    And(Vec<Predicate<F, R>>),
    /// Logical OR.
    Or(Vec<Predicate<F, R>>),
    /// Logical NOT.
    Not(Box<Predicate<F, R>>),
}

impl<F: Field, R: Relation> Default for Predicate<F, R> {
    fn default() -> Self {
        Self::True
    }
}

impl<F: Field, R: Relation> Predicate<F, R> {
    /// Check if this is the always-true predicate.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Check if this is the always-false predicate.
    pub fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }

    /// Conjunction. `True` operands are dropped, nested `And`s are flattened
    /// and a `False` operand makes the whole conjunction `False`.
    pub fn and(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut terms = Vec::new();
        for predicate in predicates {
            match predicate {
                Self::True => {}
                Self::False => return Self::False,
                Self::And(inner) => terms.extend(inner),
                other => terms.push(other),
            }
        }
        match terms.len() {
            0 => Self::True,
            1 => terms.pop().unwrap_or(Self::True),
            _ => Self::And(terms),
        }
    }

    /// Disjunction. `False` operands are dropped, nested `Or`s are flattened
    /// and a `True` operand makes the whole disjunction `True`.
    pub fn or(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut terms = Vec::new();
        for predicate in predicates {
            match predicate {
                Self::False => {}
                Self::True => return Self::True,
                Self::Or(inner) => terms.extend(inner),
                other => terms.push(other),
            }
        }
        match terms.len() {
            0 => Self::False,
            1 => terms.pop().unwrap_or(Self::False),
            _ => Self::Or(terms),
        }
    }

    /// Negation.
    pub fn not(predicate: Self) -> Self {
        match predicate {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Combine with another predicate using AND.
    pub fn and_then(self, other: Self) -> Self {
        Self::and([self, other])
    }

    /// Combine with another predicate using OR.
    pub fn or_else(self, other: Self) -> Self {
        Self::or([self, other])
    }

    /// Number of leaf terms, counting the terms inside `Exists`.
    pub fn term_count(&self) -> usize {
        match self {
            Self::True | Self::False => 0,
            Self::Exists(_, inner) => inner.term_count().max(1),
            Self::And(terms) | Self::Or(terms) => terms.iter().map(Self::term_count).sum(),
            Self::Not(inner) => inner.term_count(),
            _ => 1,
        }
    }

    /// Three-valued evaluation: `None` is SQL's unknown.
    pub fn evaluate<M>(&self, entity: &M) -> Option<bool>
    where
        M: Model<Field = F, Relation = R>,
    {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Eq(f, v) => compare(&entity.value(*f), v).map(|o| o == Ordering::Equal),
            Self::Ne(f, v) => compare(&entity.value(*f), v).map(|o| o != Ordering::Equal),
            Self::Lt(f, v) => compare(&entity.value(*f), v).map(|o| o == Ordering::Less),
            Self::Lte(f, v) => compare(&entity.value(*f), v).map(|o| o != Ordering::Greater),
            Self::Gt(f, v) => compare(&entity.value(*f), v).map(|o| o == Ordering::Greater),
            Self::Gte(f, v) => compare(&entity.value(*f), v).map(|o| o != Ordering::Less),
            Self::In(f, values) => member(&entity.value(*f), values),
            Self::NotIn(f, values) => member(&entity.value(*f), values).map(|b| !b),
            Self::IsNull(f) => Some(entity.value(*f).is_null()),
            Self::IsNotNull(f) => Some(!entity.value(*f).is_null()),
            Self::Contains(f, needle, policy) => contains(&entity.value(*f), needle, *policy),
            Self::NotContains(f, needle, policy) => {
                contains(&entity.value(*f), needle, *policy).map(|b| !b)
            }
            Self::Exists(relation, inner) => {
                let rows = RelatedKey::left_join(entity.related_ids(*relation));
                Some(rows.iter().any(|row| inner.evaluate(row) == Some(true)))
            }
            Self::And(terms) => {
                let mut unknown = false;
                for term in terms {
                    match term.evaluate(entity) {
                        Some(false) => return Some(false),
                        None => unknown = true,
                        Some(true) => {}
                    }
                }
                if unknown { None } else { Some(true) }
            }
            Self::Or(terms) => {
                let mut unknown = false;
                for term in terms {
                    match term.evaluate(entity) {
                        Some(true) => return Some(true),
                        None => unknown = true,
                        Some(false) => {}
                    }
                }
                if unknown { None } else { Some(false) }
            }
            Self::Not(inner) => inner.evaluate(entity).map(|b| !b),
        }
    }

    /// Whether the entity definitely satisfies this predicate.
    pub fn matches<M>(&self, entity: &M) -> bool
    where
        M: Model<Field = F, Relation = R>,
    {
        self.evaluate(entity) == Some(true)
    }
}

fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    actual.compare(expected)
}

fn member(actual: &Value, values: &[Value]) -> Option<bool> {
    if values.is_empty() {
        return Some(false);
    }
    if actual.is_null() {
        return None;
    }
    let mut unknown = false;
    for value in values {
        match actual.compare(value) {
            Some(Ordering::Equal) => return Some(true),
            None if value.is_null() => unknown = true,
            _ => {}
        }
    }
    if unknown { None } else { Some(false) }
}

fn contains(actual: &Value, needle: &str, policy: TextMatch) -> Option<bool> {
    if actual.is_null() {
        return None;
    }
    match actual.as_text() {
        Some(text) => Some(policy.contains(text, needle)),
        None => Some(policy.contains(&actual.to_string(), needle)),
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        other => write!(f, "{}", other),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_value(f, value)?;
    }
    f.write_str(")")
}

fn binary<F: Field>(f: &mut fmt::Formatter<'_>, field: &F, op: &str, value: &Value) -> fmt::Result {
    write!(f, "{} {} ", field.name(), op)?;
    write_value(f, value)
}

fn contains_keyword(policy: TextMatch) -> &'static str {
    match policy {
        TextMatch::CaseSensitive => "CONTAINS",
        TextMatch::IgnoreCase => "ICONTAINS",
    }
}

impl<F: Field, R: Relation> fmt::Display for Predicate<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::Eq(field, v) => binary(f, field, "=", v),
            Self::Ne(field, v) => binary(f, field, "!=", v),
            Self::Lt(field, v) => binary(f, field, "<", v),
            Self::Lte(field, v) => binary(f, field, "<=", v),
            Self::Gt(field, v) => binary(f, field, ">", v),
            Self::Gte(field, v) => binary(f, field, ">=", v),
            Self::In(field, values) => {
                write!(f, "{} IN ", field.name())?;
                write_list(f, values)
            }
            Self::NotIn(field, values) => {
                write!(f, "{} NOT IN ", field.name())?;
                write_list(f, values)
            }
            Self::IsNull(field) => write!(f, "{} IS NULL", field.name()),
            Self::IsNotNull(field) => write!(f, "{} IS NOT NULL", field.name()),
            Self::Contains(field, needle, policy) => {
                binary(f, field, contains_keyword(*policy), &Value::Text(needle.clone()))
            }
            Self::NotContains(field, needle, policy) => {
                write!(f, "NOT ")?;
                binary(f, field, contains_keyword(*policy), &Value::Text(needle.clone()))
            }
            Self::Exists(relation, inner) => write!(f, "EXISTS {}({})", relation.name(), inner),
            Self::And(terms) | Self::Or(terms) => {
                let sep = if matches!(self, Self::And(_)) { " AND " } else { " OR " };
                f.write_str("(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    write!(f, "{}", term)?;
                }
                f.write_str(")")
            }
            Self::Not(inner) => write!(f, "NOT ({})", inner),
        }
    }
}

/// A predicate plus the distinct directive handed to the executor.
///
/// `distinct` is a directive on the query shape, not a row condition.
/// `None` leaves the executor's default in place.
pub struct Specification<M: Model> {
    /// Row condition.
    pub predicate: PredicateOf<M>,
    /// Deduplicate result rows (`Some(true)`), keep duplicates (`Some(false)`),
    /// or defer to the executor (`None`).
    pub distinct: Option<bool>,
}

impl<M: Model> Specification<M> {
    /// The specification that matches every entity.
    pub fn all() -> Self {
        Self {
            predicate: Predicate::True,
            distinct: None,
        }
    }

    /// Wrap a predicate without a distinct directive.
    pub fn new(predicate: PredicateOf<M>) -> Self {
        Self {
            predicate,
            distinct: None,
        }
    }

    /// Set the distinct directive.
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }

    /// Whether the entity definitely satisfies the predicate.
    pub fn matches(&self, entity: &M) -> bool {
        self.predicate.matches(entity)
    }
}

impl<M: Model> Default for Specification<M> {
    fn default() -> Self {
        Self::all()
    }
}

impl<M: Model> Clone for Specification<M> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            distinct: self.distinct,
        }
    }
}

impl<M: Model> PartialEq for Specification<M> {
    fn eq(&self, other: &Self) -> bool {
        self.predicate == other.predicate && self.distinct == other.distinct
    }
}

impl<M: Model> fmt::Debug for Specification<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("model", &M::MODEL_NAME)
            .field("predicate", &self.predicate)
            .field("distinct", &self.distinct)
            .finish()
    }
}

impl<M: Model> fmt::Display for Specification<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distinct {
            Some(true) => write!(f, "DISTINCT {}", self.predicate),
            _ => write!(f, "{}", self.predicate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationKind;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum RowField {
        Id,
        Name,
    }

    impl Field for RowField {
        const ALL: &'static [Self] = &[Self::Id, Self::Name];

        fn name(self) -> &'static str {
            match self {
                Self::Id => "id",
                Self::Name => "name",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum RowRelation {
        Children,
    }

    impl Relation for RowRelation {
        fn name(self) -> &'static str {
            "children"
        }

        fn kind(self) -> RelationKind {
            RelationKind::OneToMany
        }

        fn related_model(self) -> &'static str {
            "Child"
        }
    }

    #[derive(Debug, Clone)]
    struct Row {
        id: i64,
        name: Option<&'static str>,
        children: Vec<i64>,
    }

    impl Model for Row {
        const MODEL_NAME: &'static str = "Row";
        type Field = RowField;
        type Relation = RowRelation;

        fn id(&self) -> Option<i64> {
            Some(self.id)
        }

        fn value(&self, field: RowField) -> Value {
            match field {
                RowField::Id => self.id.into(),
                RowField::Name => self.name.into(),
            }
        }

        fn related_ids(&self, _relation: RowRelation) -> Vec<i64> {
            self.children.clone()
        }
    }

    type P = Predicate<RowField, RowRelation>;

    fn row(id: i64, name: Option<&'static str>) -> Row {
        Row {
            id,
            name,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_and_or_identities() {
        let eq = P::Eq(RowField::Id, Value::Int(1));
        assert_eq!(P::and([]), P::True);
        assert_eq!(P::or([]), P::False);
        assert_eq!(P::and([P::True, eq.clone()]), eq);
        assert_eq!(P::or([P::False, eq.clone()]), eq);
        assert_eq!(P::or([eq.clone(), P::True]), P::True);
        assert_eq!(P::not(P::not(eq.clone())), eq);
    }

    #[test]
    fn test_and_flattens() {
        let a = P::IsNull(RowField::Name);
        let b = P::Gt(RowField::Id, Value::Int(1));
        let c = P::Lt(RowField::Id, Value::Int(9));
        let nested = P::and([P::and([a.clone(), b.clone()]), c.clone()]);
        assert_eq!(nested, P::And(vec![a, b, c]));
        assert_eq!(nested.term_count(), 3);
    }

    #[test]
    fn test_null_comparisons_are_unknown() {
        let r = row(1, None);
        assert_eq!(P::Eq(RowField::Name, Value::from("x")).evaluate(&r), None);
        assert_eq!(P::Ne(RowField::Name, Value::from("x")).evaluate(&r), None);
        assert_eq!(P::IsNull(RowField::Name).evaluate(&r), Some(true));
        assert!(!P::NotContains(RowField::Name, "x".into(), TextMatch::CaseSensitive).matches(&r));
    }

    #[test]
    fn test_kleene_logic() {
        let r = row(1, None);
        let unknown = P::Eq(RowField::Name, Value::from("x"));
        assert_eq!(P::And(vec![unknown.clone(), P::False]).evaluate(&r), Some(false));
        assert_eq!(P::Or(vec![unknown.clone(), P::True]).evaluate(&r), Some(true));
        assert_eq!(P::Or(vec![unknown.clone(), P::False]).evaluate(&r), None);
        assert_eq!(P::Not(Box::new(unknown)).evaluate(&r), None);
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        assert_eq!(P::In(RowField::Id, vec![]).evaluate(&row(1, None)), Some(false));
        assert_eq!(P::In(RowField::Name, vec![]).evaluate(&row(1, None)), Some(false));
    }

    #[test]
    fn test_in_and_not_in() {
        let r = row(5, Some("ann"));
        let values = vec![Value::Int(5), Value::Int(6)];
        assert!(P::In(RowField::Id, values.clone()).matches(&r));
        assert!(!P::NotIn(RowField::Id, values).matches(&r));
        assert!(P::NotIn(RowField::Id, vec![Value::Int(7)]).matches(&r));
    }

    #[test]
    fn test_exists_left_join() {
        let mut parent = row(1, Some("p"));
        parent.children = vec![10, 11];
        let orphan = row(2, Some("o"));

        let has_ten = P::Exists(RowRelation::Children, Box::new(KeyPredicate::Eq(KeyField::Id, Value::Int(10))));
        assert!(has_ten.matches(&parent));
        assert!(!has_ten.matches(&orphan));

        let no_children = P::Exists(RowRelation::Children, Box::new(KeyPredicate::IsNull(KeyField::Id)));
        assert!(!no_children.matches(&parent));
        assert!(no_children.matches(&orphan));
    }

    #[test]
    fn test_display() {
        let p = P::and([
            P::Gt(RowField::Id, Value::Int(5)),
            P::or([
                P::Contains(RowField::Name, "o'k".into(), TextMatch::CaseSensitive),
                P::IsNull(RowField::Name),
            ]),
            P::Exists(RowRelation::Children, Box::new(KeyPredicate::In(KeyField::Id, vec![Value::Int(1)]))),
        ]);
        assert_eq!(
            p.to_string(),
            "(id > 5 AND (name CONTAINS 'o''k' OR name IS NULL) AND EXISTS children(id IN (1)))"
        );
    }

    #[test]
    fn test_specification_distinct_display() {
        let spec = Specification::<Row>::new(P::IsNotNull(RowField::Name)).with_distinct(true);
        assert_eq!(spec.to_string(), "DISTINCT name IS NOT NULL");
        assert_eq!(Specification::<Row>::all().to_string(), "TRUE");
    }
}
