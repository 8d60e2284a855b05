//! cs-console Filter Reconciliation
//!
//! Produces one authoritative filter set for a listing page from three
//! sources: the route's query parameters, a snapshot persisted by an earlier
//! visit, and a declarative schema of allowed keys and types.
//!
//! # Precedence
//!
//! ```text
//! query parameter → persisted snapshot → defaultOption → (omitted)
//! ```
//!
//! Every candidate is interpreted by its field type; an invalid one is
//! skipped, never reported.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use csc_filter::{FilterFieldSpec, FilterSchema, FilterService, QueryParams, RouteQuery};
//! use csc_store::MemoryStore;
//!
//! let route = Arc::new(RouteQuery::new(QueryParams::new().with("spare", "true")));
//! let service = FilterService::new(Arc::new(MemoryStore::new()), route);
//!
//! let schema = FilterSchema::new()
//!     .field("spare", FilterFieldSpec::boolean())
//!     .field("mode", FilterFieldSpec::string().with_options(["grid", "list"]).with_default("grid"));
//!
//! let filters = service.init("vm-list", &schema);
//! assert_eq!(filters.get_bool("spare"), Some(true));
//! assert_eq!(filters.get_str("mode"), Some("grid"));
//!
//! service.update_filters("vm-list", &filters);
//! ```

#![warn(missing_docs)]

pub mod coerce;
pub mod error;
pub mod query;
pub mod reconcile;
pub mod schema;
pub mod service;
pub mod value;

// Re-exports
pub use error::SchemaError;
pub use query::{QueryParams, QuerySource, RouteQuery};
pub use reconcile::{prune_empty_arrays, reconcile};
pub use schema::{FilterFieldSpec, FilterSchema, FilterType};
pub use service::FilterService;
pub use value::{FilterSet, FilterValue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for filter reconciliation
    pub use crate::{
        FilterFieldSpec, FilterSchema, FilterService, FilterSet, FilterType, FilterValue,
        QueryParams, QuerySource, RouteQuery,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
