//! Error types for the entity catalog
//!
//! Covers:
//! - Token lookups (entity type / use case)
//! - Catalog loading from YAML
//! - Catalog consistency checks

use std::path::PathBuf;

use crate::entity_type::{EntityType, UseCase};

/// Errors raised while loading or validating an [`EntityCatalog`](crate::EntityCatalog)
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Token is not a known entity type or use case
    #[error("unknown token: '{0}'")]
    UnknownToken(String),

    /// YAML document could not be parsed
    #[error("invalid catalog yaml: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// IO error while reading a catalog file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// A relationship or use case references a type with no descriptor
    #[error("{referenced_by} references undescribed entity type {entity_type}")]
    MissingDescriptor {
        /// Type without a descriptor
        entity_type: EntityType,
        /// Where the reference was found
        referenced_by: String,
    },

    /// Two descriptors claim the same URL slug
    #[error("slug '{slug}' is used more than once")]
    DuplicateSlug {
        /// Repeated slug
        slug: String,
    },

    /// Children relationship loops back to the entity itself
    #[error("entity type {0} is its own descendant")]
    CyclicContainment(EntityType),

    /// Use case root is not one of its entity types
    #[error("root {root} of use case {use_case} is not one of its entity types")]
    InvalidRoot {
        /// Use case being checked
        use_case: UseCase,
        /// Declared root entity type
        root: EntityType,
    },
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create missing-descriptor error
    pub fn missing(entity_type: EntityType, referenced_by: impl Into<String>) -> Self {
        Self::MissingDescriptor {
            entity_type,
            referenced_by: referenced_by.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_display() {
        let err = CatalogError::UnknownToken("BOGUS".to_string());
        assert_eq!(err.to_string(), "unknown token: 'BOGUS'");
    }

    #[test]
    fn missing_descriptor_display() {
        let err = CatalogError::missing(EntityType::Role, "use case CONFIG_MANAGEMENT");
        assert_eq!(
            err.to_string(),
            "use case CONFIG_MANAGEMENT references undescribed entity type ROLE"
        );
    }
}
