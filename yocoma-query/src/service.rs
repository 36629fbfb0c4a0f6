//! Criteria-driven query services.
//!
//! A [`QueryService`] turns criteria into a specification with a
//! [`PredicateBuilder`] and hands it to a [`Repository`]. Every entry point
//! builds the specification the same way, so a criteria selects the same
//! entities whether they are listed, paged or counted.
//!
//! ```rust
//! use yocoma_query::criteria::ContactCriteria;
//! use yocoma_query::domain::Contact;
//! use yocoma_query::filter::StringFilter;
//! use yocoma_query::repository::MemoryRepository;
//! use yocoma_query::service::ContactQueryService;
//!
//! # tokio_test_block(async {
//! let repository = MemoryRepository::with_entities([
//!     Contact::new(1, "Ann", "Lee"),
//!     Contact::new(2, "Bob", "Ray"),
//! ])?;
//! let service = ContactQueryService::new(repository);
//!
//! let criteria = ContactCriteria::new().with_firstname(StringFilter::new().equals("Ann"));
//! let found = service.find_by_criteria(Some(&criteria)).await?;
//! assert_eq!(found.len(), 1);
//! assert_eq!(service.count_by_criteria(Some(&criteria)).await?, 1);
//! # Ok::<(), yocoma_query::QueryError>(())
//! # }).unwrap();
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

use crate::builder::PredicateBuilder;
use crate::config::QueryConfig;
use crate::criteria::{ContactCriteria, Criteria, TeamContactCriteria, TeamCriteria};
use crate::error::QueryResult;
use crate::model::Model;
use crate::pagination::{Page, PageRequest};
use crate::predicate::Specification;
use crate::repository::Repository;

/// Query service over the entities selected by criteria `C`.
pub struct QueryService<C, R> {
    repository: R,
    builder: PredicateBuilder,
    _criteria: PhantomData<fn() -> C>,
}

/// Query service for contacts.
pub type ContactQueryService<R> = QueryService<ContactCriteria, R>;

/// Query service for teams.
pub type TeamQueryService<R> = QueryService<TeamCriteria, R>;

/// Query service for team memberships.
pub type TeamContactQueryService<R> = QueryService<TeamContactCriteria, R>;

impl<C, R> QueryService<C, R>
where
    C: Criteria,
    R: Repository<C::Model>,
{
    /// Create a service with the default builder.
    pub fn new(repository: R) -> Self {
        Self::with_builder(repository, PredicateBuilder::default())
    }

    /// Create a service with the given builder.
    pub fn with_builder(repository: R, builder: PredicateBuilder) -> Self {
        Self {
            repository,
            builder,
            _criteria: PhantomData,
        }
    }

    /// Create a service whose builder follows the configuration.
    pub fn from_config(repository: R, config: &QueryConfig) -> Self {
        Self::with_builder(repository, PredicateBuilder::from_config(config))
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The builder used for every query.
    pub fn builder(&self) -> &PredicateBuilder {
        &self.builder
    }

    /// The specification every entry point executes for `criteria`.
    pub fn specification(&self, criteria: Option<&C>) -> Specification<C::Model> {
        self.builder.build(criteria)
    }

    /// Every entity matching the criteria.
    pub async fn find_by_criteria(&self, criteria: Option<&C>) -> QueryResult<Vec<C::Model>> {
        debug!(model = <C::Model as Model>::MODEL_NAME, criteria = %Described(criteria), "find by criteria");
        let spec = self.specification(criteria);
        self.repository
            .find_all(&spec)
            .await
            .map_err(|e| e.with_context("find_by_criteria"))
    }

    /// One page of the entities matching the criteria.
    pub async fn find_page_by_criteria(
        &self,
        criteria: Option<&C>,
        page: &PageRequest,
    ) -> QueryResult<Page<C::Model>> {
        debug!(
            model = <C::Model as Model>::MODEL_NAME,
            criteria = %Described(criteria),
            page = %page,
            "find by criteria"
        );
        let spec = self.specification(criteria);
        self.repository
            .find_page(&spec, page)
            .await
            .map_err(|e| e.with_context("find_page_by_criteria"))
    }

    /// Number of entities matching the criteria.
    pub async fn count_by_criteria(&self, criteria: Option<&C>) -> QueryResult<u64> {
        debug!(model = <C::Model as Model>::MODEL_NAME, criteria = %Described(criteria), "count by criteria");
        let spec = self.specification(criteria);
        self.repository
            .count(&spec)
            .await
            .map_err(|e| e.with_context("count_by_criteria"))
    }
}

impl<C, R: fmt::Debug> fmt::Debug for QueryService<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryService")
            .field("repository", &self.repository)
            .field("builder", &self.builder)
            .finish()
    }
}

struct Described<'a, C>(Option<&'a C>);

impl<C: fmt::Display> fmt::Display for Described<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(criteria) => write!(f, "{}", criteria),
            None => f.write_str("none"),
        }
    }
}
