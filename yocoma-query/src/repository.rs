//! Storage collaborator contract and an in-memory implementation.
//!
//! A [`Repository`] executes specifications. Passing
//! [`Specification::all`] must be equivalent to not filtering at all.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{QueryError, QueryResult};
use crate::filter::Value;
use crate::model::{Field, Model};
use crate::pagination::{OrderBy, Page, PageRequest, SortOrder};
use crate::predicate::Specification;

/// Executes specifications against stored entities.
#[async_trait]
pub trait Repository<M: Model>: Send + Sync {
    /// Every entity satisfying the specification.
    async fn find_all(&self, spec: &Specification<M>) -> QueryResult<Vec<M>>;

    /// One page of the entities satisfying the specification.
    async fn find_page(&self, spec: &Specification<M>, page: &PageRequest) -> QueryResult<Page<M>>;

    /// Number of entities satisfying the specification.
    async fn count(&self, spec: &Specification<M>) -> QueryResult<u64>;
}

#[async_trait]
impl<M, R> Repository<M> for Arc<R>
where
    M: Model,
    R: Repository<M> + ?Sized,
{
    async fn find_all(&self, spec: &Specification<M>) -> QueryResult<Vec<M>> {
        (**self).find_all(spec).await
    }

    async fn find_page(&self, spec: &Specification<M>, page: &PageRequest) -> QueryResult<Page<M>> {
        (**self).find_page(spec, page).await
    }

    async fn count(&self, spec: &Specification<M>) -> QueryResult<u64> {
        (**self).count(spec).await
    }
}

/// Repository holding entities in memory, keyed by identifier in insertion
/// order.
///
/// Unsorted results come back in insertion order. Sorting places nulls after
/// every value in ascending order and before them in descending order.
pub struct MemoryRepository<M: Model> {
    rows: RwLock<IndexMap<i64, M>>,
}

impl<M: Model> MemoryRepository<M> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(IndexMap::new()),
        }
    }

    /// Create a repository holding `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = M>) -> QueryResult<Self> {
        let repository = Self::new();
        repository.extend(entities)?;
        Ok(repository)
    }

    /// Store an entity, replacing and returning one with the same identifier.
    pub fn insert(&self, entity: M) -> QueryResult<Option<M>> {
        let id = entity.id().ok_or_else(|| {
            QueryError::database(format!("Cannot store a {} without identifier", M::MODEL_NAME))
                .with_model(M::MODEL_NAME)
        })?;
        Ok(self.rows.write().insert(id, entity))
    }

    /// Store several entities.
    pub fn extend(&self, entities: impl IntoIterator<Item = M>) -> QueryResult<()> {
        for entity in entities {
            self.insert(entity)?;
        }
        Ok(())
    }

    /// The entity with the given identifier.
    pub fn get(&self, id: i64) -> Option<M> {
        self.rows.read().get(&id).cloned()
    }

    /// Remove the entity with the given identifier.
    pub fn remove(&self, id: i64) -> Option<M> {
        self.rows.write().shift_remove(&id)
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Check if no entity is stored.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Remove every entity.
    pub fn clear(&self) {
        self.rows.write().clear();
    }

    fn select(&self, spec: &Specification<M>) -> Vec<M> {
        // Rows are unique by identifier and relations are evaluated as
        // existence checks, so the result never holds duplicates.
        if spec.distinct == Some(true) {
            crate::yocoma_debug!(model = M::MODEL_NAME, "distinct requested");
        }
        self.rows
            .read()
            .values()
            .filter(|entity| spec.matches(entity))
            .cloned()
            .collect()
    }
}

impl<M: Model> Default for MemoryRepository<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> fmt::Debug for MemoryRepository<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("model", &M::MODEL_NAME)
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl<M: Model> Repository<M> for MemoryRepository<M> {
    async fn find_all(&self, spec: &Specification<M>) -> QueryResult<Vec<M>> {
        Ok(self.select(spec))
    }

    async fn find_page(&self, spec: &Specification<M>, page: &PageRequest) -> QueryResult<Page<M>> {
        if page.size == 0 {
            return Err(QueryError::invalid_value("size", "0", "a positive page size"));
        }
        let keys = resolve_sort::<M>(&page.sort)?;
        let mut rows = self.select(spec);
        if !keys.is_empty() {
            rows.sort_by(|a, b| compare_rows(a, b, &keys));
        }

        let total = rows.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size).unwrap_or(usize::MAX);
        let content = rows.into_iter().skip(offset).take(size).collect();
        Ok(Page::new(content, page, total))
    }

    async fn count(&self, spec: &Specification<M>) -> QueryResult<u64> {
        let rows = self.rows.read();
        Ok(rows.values().filter(|entity| spec.matches(entity)).count() as u64)
    }
}

fn resolve_sort<M: Model>(sort: &OrderBy) -> QueryResult<Vec<(M::Field, SortOrder)>> {
    sort.fields()
        .iter()
        .map(|field| {
            M::Field::from_name(&field.column)
                .map(|f| (f, field.order))
                .ok_or_else(|| QueryError::invalid_sort(M::MODEL_NAME, field.column.as_str()))
        })
        .collect()
}

fn compare_rows<M: Model>(a: &M, b: &M, keys: &[(M::Field, SortOrder)]) -> Ordering {
    for &(field, order) in keys {
        let ordering = compare_values(&a.value(field), &b.value(field));
        let ordering = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}
