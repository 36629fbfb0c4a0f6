//! Model traits.
//!
//! A model exposes its filterable fields and its relations as compile-time
//! enumerations, each mapped to accessor functions. Predicates refer to
//! fields through these enums, never through strings.

use std::fmt;
use std::hash::Hash;

use crate::filter::Value;

/// A field of a model.
pub trait Field: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every field, in declaration order.
    const ALL: &'static [Self];

    /// The camelCase name used on the wire and in sort specifications.
    fn name(self) -> &'static str;

    /// Look up a field by its wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Cardinality of a relation, seen from the owning model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The model has many related rows (e.g. Contact has many TeamContacts).
    OneToMany,
    /// The model references at most one related row (e.g. TeamContact belongs to a Team).
    ManyToOne,
}

/// A relation of a model to another model, followed by cross-entity filters.
pub trait Relation: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// The relation's name on the owning model.
    fn name(self) -> &'static str;

    /// Cardinality of the relation.
    fn kind(self) -> RelationKind;

    /// Name of the related model.
    fn related_model(self) -> &'static str;
}

/// An entity that predicates can be evaluated against.
pub trait Model: Clone + Send + Sync + 'static {
    /// Name of the model.
    const MODEL_NAME: &'static str;

    /// The model's filterable fields.
    type Field: Field;

    /// The model's relations.
    type Relation: Relation;

    /// Identifier of the entity, if it has one.
    fn id(&self) -> Option<i64>;

    /// Current value of a field.
    fn value(&self, field: Self::Field) -> Value;

    /// Identifiers of the rows reachable through a relation.
    fn related_ids(&self, relation: Self::Relation) -> Vec<i64>;
}

/// Uninhabited relation type for models without relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoRelation {}

impl Relation for NoRelation {
    fn name(self) -> &'static str {
        match self {}
    }

    fn kind(self) -> RelationKind {
        match self {}
    }

    fn related_model(self) -> &'static str {
        match self {}
    }
}

/// The only field of a [`RelatedKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyField {
    /// The related row's identifier.
    Id,
}

impl Field for KeyField {
    const ALL: &'static [Self] = &[Self::Id];

    fn name(self) -> &'static str {
        "id"
    }
}

/// One row produced by joining a relation: just the related identifier.
///
/// With left-join semantics an entity without related rows still produces a
/// single row whose identifier is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelatedKey {
    /// Identifier of the related row; `None` for the null row of a left join.
    pub id: Option<i64>,
}

impl RelatedKey {
    /// The rows a left join over `ids` produces.
    pub fn left_join(ids: Vec<i64>) -> Vec<RelatedKey> {
        if ids.is_empty() {
            vec![RelatedKey { id: None }]
        } else {
            ids.into_iter().map(|id| RelatedKey { id: Some(id) }).collect()
        }
    }
}

impl Model for RelatedKey {
    const MODEL_NAME: &'static str = "RelatedKey";

    type Field = KeyField;
    type Relation = NoRelation;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn value(&self, field: KeyField) -> Value {
        match field {
            KeyField::Id => self.id.into(),
        }
    }

    fn related_ids(&self, relation: NoRelation) -> Vec<i64> {
        match relation {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_join_without_rows_yields_null_row() {
        assert_eq!(RelatedKey::left_join(vec![]), vec![RelatedKey { id: None }]);
        assert_eq!(
            RelatedKey::left_join(vec![3, 4]),
            vec![RelatedKey { id: Some(3) }, RelatedKey { id: Some(4) }]
        );
    }

    #[test]
    fn test_key_field_lookup() {
        assert_eq!(KeyField::from_name("id"), Some(KeyField::Id));
        assert_eq!(KeyField::from_name("ID"), None);
        assert_eq!(RelatedKey { id: None }.value(KeyField::Id), Value::Null);
    }
}
