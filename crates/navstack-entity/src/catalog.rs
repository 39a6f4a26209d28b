//! Declarative entity catalog
//!
//! Maps every [`EntityType`] to its URL slugs, labels and relationships, and
//! every [`UseCase`] to its slug and the entity types it can show.
//!
//! The catalog is plain data. It can be built in code ([`EntityCatalog::builtin`])
//! or loaded from YAML ([`EntityCatalog::from_yaml`]):
//!
//! ```yaml
//! entities:
//!   CLUSTER:
//!     singular: cluster
//!     plural: clusters
//!     label: Cluster
//!     plural_label: Clusters
//!     children: [NAMESPACE]
//! use_cases:
//!   CONFIG_MANAGEMENT:
//!     slug: configmanagement
//!     root: CLUSTER
//!     entities: [CLUSTER, NAMESPACE]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::entity_type::{EntityType, UseCase};
use crate::error::CatalogError;

static BUILTIN: Lazy<EntityCatalog> = Lazy::new(EntityCatalog::builtin_definition);

/// Slugs, labels and relationships of one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Path token of a detail segment, followed by the entity id
    pub singular: String,
    /// Path token of a list segment
    pub plural: String,
    /// Display label
    pub label: String,
    /// Display label for lists
    pub plural_label: String,
    /// Entity types directly contained by this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntityType>,
    /// Entity types associated with this one without containment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<EntityType>,
}

impl EntityDescriptor {
    /// Create descriptor with slugs and labels, no relationships
    #[must_use]
    pub fn new(
        singular: impl Into<String>,
        plural: impl Into<String>,
        label: impl Into<String>,
        plural_label: impl Into<String>,
    ) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
            label: label.into(),
            plural_label: plural_label.into(),
            children: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// With directly contained entity types
    #[must_use]
    pub fn with_children(mut self, children: &[EntityType]) -> Self {
        self.children = children.to_vec();
        self
    }

    /// With matched entity types
    #[must_use]
    pub fn with_matches(mut self, matches: &[EntityType]) -> Self {
        self.matches = matches.to_vec();
        self
    }
}

/// URL slug and entity scope of one use case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseDescriptor {
    /// Canonical path token
    pub slug: String,
    /// Extra path tokens accepted when parsing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Entity type of the root list when a workflow is cleared
    pub root: EntityType,
    /// Entity types reachable in this use case
    pub entities: Vec<EntityType>,
}

/// Entity and use case metadata consumed by transitions and the URL codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCatalog {
    entities: BTreeMap<EntityType, EntityDescriptor>,
    use_cases: BTreeMap<UseCase, UseCaseDescriptor>,
}

impl EntityCatalog {
    /// Create catalog from descriptors
    ///
    /// # Errors
    /// Returns error if the descriptors are inconsistent (see [`Self::validate`])
    pub fn new(
        entities: BTreeMap<EntityType, EntityDescriptor>,
        use_cases: BTreeMap<UseCase, UseCaseDescriptor>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            entities,
            use_cases,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Catalog shipped with the console
    #[inline]
    #[must_use]
    pub fn builtin() -> &'static EntityCatalog {
        &BUILTIN
    }

    /// Parse catalog from a YAML document
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the catalog is inconsistent
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: EntityCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load catalog from a YAML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        Self::from_yaml(&yaml)
    }

    /// Render catalog as YAML
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check internal consistency
    ///
    /// - every referenced entity type has a descriptor
    /// - slugs are unique across all singular and plural tokens
    /// - use case slugs and aliases are unique
    /// - children never loop back to the entity itself
    /// - each use case root belongs to the use case
    ///
    /// # Errors
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut slugs = BTreeSet::new();
        for (entity_type, descriptor) in &self.entities {
            for slug in [&descriptor.singular, &descriptor.plural] {
                if !slugs.insert(slug.as_str()) {
                    return Err(CatalogError::DuplicateSlug { slug: slug.clone() });
                }
            }
            for related in descriptor.children.iter().chain(&descriptor.matches) {
                if !self.entities.contains_key(related) {
                    return Err(CatalogError::missing(*related, entity_type.as_str()));
                }
            }
        }

        let mut use_case_slugs = BTreeSet::new();
        for (use_case, descriptor) in &self.use_cases {
            for slug in std::iter::once(&descriptor.slug).chain(&descriptor.aliases) {
                if !use_case_slugs.insert(slug.as_str()) {
                    return Err(CatalogError::DuplicateSlug { slug: slug.clone() });
                }
            }
            for entity_type in &descriptor.entities {
                if !self.entities.contains_key(entity_type) {
                    return Err(CatalogError::missing(
                        *entity_type,
                        format!("use case {use_case}"),
                    ));
                }
            }
            if !descriptor.entities.contains(&descriptor.root) {
                return Err(CatalogError::InvalidRoot {
                    use_case: *use_case,
                    root: descriptor.root,
                });
            }
        }

        if let Err(cycle) = petgraph::algo::toposort(&self.containment_graph(), None) {
            return Err(CatalogError::CyclicContainment(cycle.node_id()));
        }

        Ok(())
    }

    /// Descriptor of an entity type
    #[inline]
    #[must_use]
    pub fn entity(&self, entity_type: EntityType) -> Option<&EntityDescriptor> {
        self.entities.get(&entity_type)
    }

    /// Descriptor of a use case
    #[inline]
    #[must_use]
    pub fn use_case(&self, use_case: UseCase) -> Option<&UseCaseDescriptor> {
        self.use_cases.get(&use_case)
    }

    /// Described entity types
    pub fn entity_types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.entities.keys().copied()
    }

    /// Entity types available in a use case
    #[must_use]
    pub fn entity_types_for(&self, use_case: UseCase) -> &[EntityType] {
        self.use_cases
            .get(&use_case)
            .map_or(&[], |d| d.entities.as_slice())
    }

    /// Check if a use case can show an entity type
    #[inline]
    #[must_use]
    pub fn supports(&self, use_case: UseCase, entity_type: EntityType) -> bool {
        self.entity_types_for(use_case).contains(&entity_type)
    }

    /// Root list entity type of a use case
    #[inline]
    #[must_use]
    pub fn root_entity_type(&self, use_case: UseCase) -> Option<EntityType> {
        self.use_cases.get(&use_case).map(|d| d.root)
    }

    /// Resolve a use case path token (canonical slug or alias)
    #[must_use]
    pub fn use_case_for_slug(&self, slug: &str) -> Option<UseCase> {
        self.use_cases
            .iter()
            .find(|(_, d)| d.slug == slug || d.aliases.iter().any(|a| a == slug))
            .map(|(u, _)| *u)
    }

    /// Canonical path token of a use case
    #[inline]
    #[must_use]
    pub fn use_case_slug(&self, use_case: UseCase) -> Option<&str> {
        self.use_cases.get(&use_case).map(|d| d.slug.as_str())
    }

    /// Resolve a list path token
    #[must_use]
    pub fn entity_for_list_slug(&self, slug: &str) -> Option<EntityType> {
        self.entities
            .iter()
            .find(|(_, d)| d.plural == slug)
            .map(|(t, _)| *t)
    }

    /// Resolve a detail path token
    #[must_use]
    pub fn entity_for_detail_slug(&self, slug: &str) -> Option<EntityType> {
        self.entities
            .iter()
            .find(|(_, d)| d.singular == slug)
            .map(|(t, _)| *t)
    }

    fn builtin_definition() -> Self {
        use EntityType::*;

        let entities = BTreeMap::from([
            (
                Cluster,
                EntityDescriptor::new("cluster", "clusters", "Cluster", "Clusters")
                    .with_children(&[Namespace, Node, Role, Subject, ClusterCve])
                    .with_matches(&[Policy, Control]),
            ),
            (
                Namespace,
                EntityDescriptor::new("namespace", "namespaces", "Namespace", "Namespaces")
                    .with_children(&[Deployment, Secret, ServiceAccount])
                    .with_matches(&[Policy]),
            ),
            (
                Node,
                EntityDescriptor::new("node", "nodes", "Node", "Nodes")
                    .with_children(&[NodeComponent])
                    .with_matches(&[Control]),
            ),
            (
                Deployment,
                EntityDescriptor::new("deployment", "deployments", "Deployment", "Deployments")
                    .with_children(&[Image])
                    .with_matches(&[Policy, Secret, ServiceAccount, Control]),
            ),
            (
                Image,
                EntityDescriptor::new("image", "images", "Image", "Images")
                    .with_children(&[ImageComponent]),
            ),
            (
                ImageComponent,
                EntityDescriptor::new(
                    "image-component",
                    "image-components",
                    "Image Component",
                    "Image Components",
                )
                .with_children(&[ImageCve]),
            ),
            (
                ImageCve,
                EntityDescriptor::new("image-cve", "image-cves", "Image CVE", "Image CVEs"),
            ),
            (
                NodeComponent,
                EntityDescriptor::new(
                    "node-component",
                    "node-components",
                    "Node Component",
                    "Node Components",
                )
                .with_children(&[NodeCve]),
            ),
            (
                NodeCve,
                EntityDescriptor::new("node-cve", "node-cves", "Node CVE", "Node CVEs"),
            ),
            (
                ClusterCve,
                EntityDescriptor::new("cluster-cve", "cluster-cves", "Platform CVE", "Platform CVEs"),
            ),
            (
                Policy,
                EntityDescriptor::new("policy", "policies", "Policy", "Policies"),
            ),
            (
                Secret,
                EntityDescriptor::new("secret", "secrets", "Secret", "Secrets"),
            ),
            (
                ServiceAccount,
                EntityDescriptor::new(
                    "serviceaccount",
                    "serviceaccounts",
                    "Service Account",
                    "Service Accounts",
                )
                .with_matches(&[Role]),
            ),
            (
                Role,
                EntityDescriptor::new("role", "roles", "Role", "Roles").with_matches(&[Subject]),
            ),
            (
                Subject,
                EntityDescriptor::new("subject", "subjects", "Users & Groups", "Users & Groups"),
            ),
            (
                Control,
                EntityDescriptor::new("control", "controls", "Control", "Controls"),
            ),
        ]);

        let use_cases = BTreeMap::from([
            (
                UseCase::VulnManagement,
                UseCaseDescriptor {
                    slug: "vulnerability-management".to_string(),
                    aliases: vec!["vm".to_string()],
                    root: ImageCve,
                    entities: vec![
                        Cluster,
                        Namespace,
                        Deployment,
                        Image,
                        ImageComponent,
                        ImageCve,
                        Node,
                        NodeComponent,
                        NodeCve,
                        ClusterCve,
                        Policy,
                    ],
                },
            ),
            (
                UseCase::ConfigManagement,
                UseCaseDescriptor {
                    slug: "configmanagement".to_string(),
                    aliases: vec!["cm".to_string(), "config-management".to_string()],
                    root: Cluster,
                    entities: vec![
                        Cluster,
                        Namespace,
                        Node,
                        Deployment,
                        Image,
                        Secret,
                        ServiceAccount,
                        Role,
                        Subject,
                        Policy,
                        Control,
                    ],
                },
            ),
        ]);

        Self {
            entities,
            use_cases,
        }
    }
}

impl Default for EntityCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_consistent() {
        assert!(EntityCatalog::builtin().validate().is_ok());
    }

    #[test]
    fn every_entity_type_is_described() {
        let catalog = EntityCatalog::builtin();
        for entity_type in EntityType::ALL {
            assert!(catalog.entity(entity_type).is_some(), "{entity_type} undescribed");
        }
    }

    #[test]
    fn slug_lookup() {
        let catalog = EntityCatalog::builtin();
        assert_eq!(catalog.entity_for_list_slug("deployments"), Some(EntityType::Deployment));
        assert_eq!(catalog.entity_for_detail_slug("image-cve"), Some(EntityType::ImageCve));
        assert_eq!(catalog.entity_for_list_slug("image-cve"), None);
        assert_eq!(catalog.entity_for_detail_slug("unknown-type"), None);
    }

    #[test]
    fn use_case_aliases_resolve() {
        let catalog = EntityCatalog::builtin();
        assert_eq!(
            catalog.use_case_for_slug("vulnerability-management"),
            Some(UseCase::VulnManagement)
        );
        assert_eq!(catalog.use_case_for_slug("vm"), Some(UseCase::VulnManagement));
        assert_eq!(catalog.use_case_slug(UseCase::VulnManagement), Some("vulnerability-management"));
        assert_eq!(catalog.use_case_for_slug("unknown-type"), None);
    }

    #[test]
    fn use_case_scope() {
        let catalog = EntityCatalog::builtin();
        assert!(catalog.supports(UseCase::VulnManagement, EntityType::ImageCve));
        assert!(!catalog.supports(UseCase::VulnManagement, EntityType::Secret));
        assert!(catalog.supports(UseCase::ConfigManagement, EntityType::Secret));
        assert_eq!(catalog.root_entity_type(UseCase::ConfigManagement), Some(EntityType::Cluster));
    }

    #[test]
    fn duplicate_slug_rejected() {
        let mut entities = BTreeMap::new();
        entities.insert(
            EntityType::Cluster,
            EntityDescriptor::new("cluster", "clusters", "Cluster", "Clusters"),
        );
        entities.insert(
            EntityType::Node,
            EntityDescriptor::new("cluster", "nodes", "Node", "Nodes"),
        );
        let result = EntityCatalog::new(entities, BTreeMap::new());
        assert!(matches!(result, Err(CatalogError::DuplicateSlug { .. })));
    }

    #[test]
    fn cyclic_children_rejected() {
        let mut entities = BTreeMap::new();
        entities.insert(
            EntityType::Cluster,
            EntityDescriptor::new("cluster", "clusters", "Cluster", "Clusters")
                .with_children(&[EntityType::Node]),
        );
        entities.insert(
            EntityType::Node,
            EntityDescriptor::new("node", "nodes", "Node", "Nodes")
                .with_children(&[EntityType::Cluster]),
        );
        let result = EntityCatalog::new(entities, BTreeMap::new());
        assert!(matches!(result, Err(CatalogError::CyclicContainment(_))));
    }

    #[test]
    fn self_containment_rejected() {
        let entities = BTreeMap::from([(
            EntityType::Image,
            EntityDescriptor::new("image", "images", "Image", "Images")
                .with_children(&[EntityType::Image]),
        )]);
        assert!(matches!(
            EntityCatalog::new(entities, BTreeMap::new()),
            Err(CatalogError::CyclicContainment(EntityType::Image))
        ));
    }

    #[test]
    fn root_outside_use_case_rejected() {
        let mut entities = BTreeMap::new();
        entities.insert(
            EntityType::Cluster,
            EntityDescriptor::new("cluster", "clusters", "Cluster", "Clusters"),
        );
        entities.insert(
            EntityType::Node,
            EntityDescriptor::new("node", "nodes", "Node", "Nodes"),
        );
        let use_cases = BTreeMap::from([(
            UseCase::ConfigManagement,
            UseCaseDescriptor {
                slug: "configmanagement".to_string(),
                aliases: Vec::new(),
                root: EntityType::Node,
                entities: vec![EntityType::Cluster],
            },
        )]);
        let result = EntityCatalog::new(entities, use_cases);
        assert!(matches!(result, Err(CatalogError::InvalidRoot { .. })));
    }
}
