//! # Yocoma
//!
//! Criteria-driven querying for contacts, teams and their memberships.
//!
//! Yocoma provides:
//! - Typed per-field filters with equality, membership, nullability, range and
//!   substring operations
//! - Per-entity criteria with cross-entity filters and free-text search
//! - A total predicate builder: every criteria translates, none fails
//! - Query services listing, paging and counting through a storage collaborator
//!
//! ## Quick Start
//!
//! ```rust
//! use yocoma::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), yocoma::QueryError> {
//!     let contacts = MemoryRepository::with_entities([
//!         Contact::new(1, "Ann", "Lee").team_contact(7),
//!         Contact::new(2, "Bob", "Ray"),
//!     ])?;
//!     let service = yocoma::ContactQueryService::new(contacts);
//!
//!     let params: QueryParams<ContactCriteria> = QueryParams::parse("teamContactId.equals=7")?;
//!     let found = service.find_by_criteria(Some(&params.criteria)).await?;
//!
//!     assert_eq!(found.len(), 1);
//!     assert_eq!(found[0].firstname, "Ann");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Filters, criteria, predicates and query services.
pub mod query {
    pub use yocoma_query::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use yocoma_query::prelude::*;
}

// Re-export key types at the crate root
pub use yocoma_query::{
    ContactQueryService, Criteria, ErrorCode, PredicateBuilder, QueryConfig, QueryError, QueryParams, QueryResult,
    Specification, TeamContactQueryService, TeamQueryService, TextMatch,
};

/// Initialize logging from the `YOCOMA_*` environment variables.
pub fn init_logging() {
    yocoma_query::logging::init();
}
