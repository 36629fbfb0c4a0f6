//! Per-entity criteria aggregates.
//!
//! A criteria bundles one optional filter per filterable field, the
//! cross-entity filters on related identifiers, a free-text `search` filter
//! and the `distinct` flag:
//!
//! ```rust
//! use yocoma_query::criteria::{ContactCriteria, Criteria};
//! use yocoma_query::filter::StringFilter;
//!
//! let mut criteria = ContactCriteria::new()
//!     .with_firstname(StringFilter::new().equals("Ann"))
//!     .with_distinct(true);
//! criteria.team_contact_id_mut().greater_than = Some(6);
//!
//! assert_eq!(criteria.filters().len(), 2);
//! assert_eq!(
//!     criteria.to_string(),
//!     "ContactCriteria{firstname=StringFilter[equals=Ann], teamContactId=RangeFilter[greaterThan=6], distinct=true}"
//! );
//! ```
//!
//! The builder consumes criteria through the [`Criteria`] trait only: an
//! ordered table of `(target, filter)` pairs, so every entity is translated by
//! the same rule.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::{QueryError, QueryResult};
use crate::filter::{FieldFilter, Operation, StringFilter};
use crate::model::{Field, Model, Relation};

/// Generates the lazily-creating accessor and the consuming builder of each
/// filter field of a criteria struct.
macro_rules! filter_accessors {
    ($($field:ident, $field_mut:ident, $with:ident: $ty:ty;)+) => {
        $(
            #[doc = concat!("The `", stringify!($field), "` filter, created empty if absent.")]
            pub fn $field_mut(&mut self) -> &mut $ty {
                self.$field.get_or_insert_with(<$ty>::default)
            }

            #[doc = concat!("Set the `", stringify!($field), "` filter.")]
            pub fn $with(mut self, filter: $ty) -> Self {
                self.$field = Some(filter);
                self
            }
        )+
    };
}

mod contact;
mod team;
mod team_contact;

pub use contact::ContactCriteria;
pub use team::TeamCriteria;
pub use team_contact::TeamContactCriteria;

/// What a criteria filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target<F, R> {
    /// A field of the model itself.
    Field(F),
    /// The identifier of rows reached through a relation.
    Related(R),
}

/// Target over the fields and relations of model `M`.
pub type TargetOf<M> = Target<<M as Model>::Field, <M as Model>::Relation>;

impl<F: Field, R: Relation> fmt::Display for Target<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.name()),
            Self::Related(relation) => write!(f, "{}.id", relation.name()),
        }
    }
}

/// A per-entity bundle of optional filters.
pub trait Criteria:
    Clone + Default + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The entity the criteria selects.
    type Model: Model;

    /// Text fields the free-text `search` filter expands over.
    const SEARCH_FIELDS: &'static [<Self::Model as Model>::Field];

    /// Present filters paired with their targets, in field declaration order.
    /// `search` is not part of the table.
    fn filters(&self) -> Vec<(TargetOf<Self::Model>, &dyn FieldFilter)>;

    /// The free-text search filter.
    fn search(&self) -> Option<&StringFilter>;

    /// The distinct directive.
    fn distinct(&self) -> Option<bool>;

    /// Set or clear the distinct directive.
    fn set_distinct(&mut self, distinct: Option<bool>);

    /// The filter behind a wire field name (`search` included), created empty
    /// if absent. `None` for unknown names.
    fn filter_mut(&mut self, name: &str) -> Option<&mut dyn FieldFilter>;

    /// Apply one `field.op=raw` wire parameter.
    fn apply_param(&mut self, field: &str, op: Operation, raw: &str) -> QueryResult<()> {
        let key = format!("{}.{}", field, op);
        match self.filter_mut(field) {
            Some(filter) => filter.apply(&key, op, raw),
            None => Err(QueryError::unknown_field(<Self::Model as Model>::MODEL_NAME, field)
                .with_parameter(raw)),
        }
    }
}

/// Table entry for a present filter.
fn entry<'a, T, F>(target: T, filter: &'a Option<F>) -> Option<(T, &'a dyn FieldFilter)>
where
    F: FieldFilter + 'a,
{
    filter.as_ref().map(|f| (target, f as &dyn FieldFilter))
}

fn shown<T: fmt::Display>(filter: &Option<T>) -> Option<&dyn fmt::Display> {
    filter.as_ref().map(|f| f as &dyn fmt::Display)
}

/// Renders `Name{field=Filter[..], .., distinct=true}` with absent filters left out.
fn write_criteria(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    filters: &[(&str, Option<&dyn fmt::Display>)],
    distinct: Option<bool>,
) -> fmt::Result {
    write!(f, "{}{{", name)?;
    let mut first = true;
    for (field, filter) in filters {
        if let Some(filter) = filter {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field, filter)?;
            first = false;
        }
    }
    if let Some(distinct) = distinct {
        if !first {
            f.write_str(", ")?;
        }
        write!(f, "distinct={}", distinct)?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactField, ContactRelation, TeamContactRelation};
    use crate::error::ErrorCode;

    #[test]
    fn test_target_display() {
        let field: Target<ContactField, ContactRelation> = Target::Field(ContactField::Lastname);
        assert_eq!(field.to_string(), "lastname");
        let related: Target<ContactField, ContactRelation> = Target::Related(ContactRelation::TeamContacts);
        assert_eq!(related.to_string(), "teamContacts.id");
    }

    #[test]
    fn test_apply_param_unknown_field() {
        let mut criteria = ContactCriteria::new();
        let err = criteria.apply_param("nickname", Operation::Equals, "x").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownField);
        assert_eq!(err.context.parameter.as_deref(), Some("x"));
    }

    #[test]
    fn test_apply_param_sets_filters() {
        let mut criteria = TeamContactCriteria::new();
        criteria.apply_param("roleType", Operation::In, "SCRUM_MASTER,STAKEHOLDER").unwrap();
        criteria.apply_param("teamId", Operation::Equals, "3").unwrap();
        criteria.apply_param("search", Operation::Contains, "lead").unwrap();

        let filters = criteria.filters();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[1].0, Target::Related(TeamContactRelation::Team));
        assert_eq!(criteria.search().and_then(|s| s.contains.as_deref()), Some("lead"));
    }
}
