//! # yocoma-query
//!
//! Criteria-to-predicate translation for the contact, team and membership
//! entities of Yocoma.
//!
//! This crate provides:
//! - Typed filter value objects (`LongFilter`, `StringFilter`, `RoleTypeFilter`, ...)
//! - Per-entity criteria aggregates with cross-entity filters and free-text search
//! - A predicate builder translating criteria into composable specifications
//! - Query services delegating specifications to a storage collaborator
//! - Wire parameter parsing (`field.operation=value`)
//!
//! ## Filters and Criteria
//!
//! ```rust
//! use yocoma_query::{ContactCriteria, LongFilter, PredicateBuilder, StringFilter};
//!
//! let criteria = ContactCriteria::new()
//!     .with_firstname(StringFilter::new().equals("Ann"))
//!     .with_team_contact_id(LongFilter::new().equals(7));
//!
//! let spec = PredicateBuilder::default().build(Some(&criteria));
//! assert_eq!(spec.to_string(), "(firstname = 'Ann' AND EXISTS teamContacts(id = 7))");
//! ```
//!
//! ## Evaluating Specifications
//!
//! ```rust
//! use yocoma_query::{Contact, ContactCriteria, PredicateBuilder, StringFilter};
//!
//! let criteria = ContactCriteria::new().with_search(StringFilter::new().contains("nn"));
//! let spec = PredicateBuilder::default().build(Some(&criteria));
//!
//! assert!(spec.matches(&Contact::new(1, "Ann", "Lee")));
//! assert!(!spec.matches(&Contact::new(2, "Bob", "Ray")));
//! ```
//!
//! ## Wire Parameters
//!
//! ```rust
//! use yocoma_query::{QueryParams, TeamContactCriteria};
//!
//! let params: QueryParams<TeamContactCriteria> =
//!     QueryParams::parse("roleType.in=SENIOR_MEMBER,PRODUCT_OWNER&teamId.equals=3").unwrap();
//! assert!(params.criteria.team_id.is_some());
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use yocoma_query::{ContactCriteria, ErrorCode, QueryParams};
//!
//! let err = QueryParams::<ContactCriteria>::parse("id.equals=seven").unwrap_err();
//! assert_eq!(err.code, ErrorCode::InvalidParameter);
//! assert!(err.is_client_error());
//! ```

pub mod builder;
pub mod config;
pub mod criteria;
pub mod domain;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod params;
pub mod predicate;
pub mod repository;
pub mod service;

pub use builder::PredicateBuilder;
pub use config::{EnvSource, MapEnvSource, QueryConfig, StdEnvSource, TextMatch};
pub use criteria::{ContactCriteria, Criteria, Target, TeamContactCriteria, TeamCriteria};
pub use domain::{
    Contact, ContactField, ContactRelation, RoleType, RoleTypeFilter, Team, TeamContact, TeamContactField,
    TeamContactRelation, TeamField, TeamRelation,
};
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult, Suggestion};
pub use filter::{
    BooleanFilter, Condition, EnumFilter, FieldFilter, Filter, FilterValue, IntegerFilter, LongFilter, Operation,
    RangeFilter, StringFilter, Value,
};
pub use model::{Field, Model, Relation, RelationKind};
pub use pagination::{OrderBy, OrderByField, Page, PageRequest, SortOrder};
pub use params::{QueryParams, criteria_from_json};
pub use predicate::{Predicate, PredicateOf, Specification};
pub use repository::{MemoryRepository, Repository};
pub use service::{ContactQueryService, QueryService, TeamContactQueryService, TeamQueryService};

// Re-export logging utilities
pub use logging::{LogFormat, LogSettings, init as init_logging, init_debug, init_with, init_with_level, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::PredicateBuilder;
    pub use crate::criteria::{ContactCriteria, Criteria, TeamContactCriteria, TeamCriteria};
    pub use crate::domain::{Contact, RoleType, RoleTypeFilter, Team, TeamContact};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::filter::{FieldFilter, LongFilter, StringFilter};
    pub use crate::pagination::{OrderByField, Page, PageRequest, SortOrder};
    pub use crate::params::QueryParams;
    pub use crate::predicate::{Predicate, Specification};
    pub use crate::repository::{MemoryRepository, Repository};
    pub use crate::service::QueryService;
}
