//! navstack Entity Catalog
//!
//! Closed entity and use case types, plus the declarative relationship
//! catalog the workflow transitions and the URL codec consult.
//!
//! # Core Concepts
//!
//! - [`EntityType`]: Kind of entity a drill-down level shows
//! - [`UseCase`]: Console section scoping a workflow
//! - [`EntityCatalog`]: Slugs, labels and relationships per entity type
//! - [`Relationship`]: Contains / parents / matches classification
//!
//! # Example
//!
//! ```rust
//! use navstack_entity::{EntityCatalog, EntityType, Relationship};
//!
//! let catalog = EntityCatalog::builtin();
//! assert_eq!(
//!     catalog.relationship(EntityType::Deployment, EntityType::Image),
//!     Some(Relationship::Contains)
//! );
//! assert_eq!(catalog.entity_for_list_slug("deployments"), Some(EntityType::Deployment));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod catalog;
mod entity_type;
mod error;
mod relationship;

// Re-exports
pub use catalog::{EntityCatalog, EntityDescriptor, UseCaseDescriptor};
pub use entity_type::{EntityType, UseCase};
pub use error::CatalogError;
pub use relationship::Relationship;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
