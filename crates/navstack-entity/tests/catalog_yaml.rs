use navstack_entity::{CatalogError, EntityCatalog, EntityType, Relationship, UseCase};
use pretty_assertions::assert_eq;
use std::io::Write;

const SMALL_CATALOG: &str = r"
entities:
  CLUSTER:
    singular: cluster
    plural: clusters
    label: Cluster
    plural_label: Clusters
    children: [NAMESPACE]
  NAMESPACE:
    singular: namespace
    plural: namespaces
    label: Namespace
    plural_label: Namespaces
    matches: [POLICY]
  POLICY:
    singular: policy
    plural: policies
    label: Policy
    plural_label: Policies
use_cases:
  CONFIG_MANAGEMENT:
    slug: configmanagement
    aliases: [cm]
    root: CLUSTER
    entities: [CLUSTER, NAMESPACE, POLICY]
";

#[test]
fn builtin_survives_yaml_roundtrip() {
    let yaml = EntityCatalog::builtin().to_yaml().unwrap();
    let reloaded = EntityCatalog::from_yaml(&yaml).unwrap();
    assert_eq!(&reloaded, EntityCatalog::builtin());
}

#[test]
fn small_catalog_from_yaml() {
    let catalog = EntityCatalog::from_yaml(SMALL_CATALOG).unwrap();

    assert_eq!(catalog.use_case_for_slug("cm"), Some(UseCase::ConfigManagement));
    assert_eq!(catalog.use_case_for_slug("vulnerability-management"), None);
    assert_eq!(
        catalog.relationship(EntityType::Policy, EntityType::Namespace),
        Some(Relationship::Matches)
    );
    assert_eq!(
        catalog.relationship(EntityType::Namespace, EntityType::Cluster),
        Some(Relationship::Parents)
    );
    assert!(catalog.entity(EntityType::Deployment).is_none());
}

#[test]
fn yaml_with_dangling_reference_is_rejected() {
    let yaml = SMALL_CATALOG.replace("matches: [POLICY]", "matches: [SECRET]");
    let result = EntityCatalog::from_yaml(&yaml);
    assert!(matches!(
        result,
        Err(CatalogError::MissingDescriptor {
            entity_type: EntityType::Secret,
            ..
        })
    ));
}

#[test]
fn yaml_with_unknown_token_is_rejected() {
    let yaml = SMALL_CATALOG.replace("children: [NAMESPACE]", "children: [GALAXY]");
    let result = EntityCatalog::from_yaml(&yaml);
    assert!(matches!(result, Err(CatalogError::InvalidYaml(_))));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SMALL_CATALOG.as_bytes()).unwrap();

    let catalog = EntityCatalog::load(file.path()).unwrap();
    assert_eq!(catalog.root_entity_type(UseCase::ConfigManagement), Some(EntityType::Cluster));
}

#[test]
fn load_missing_file() {
    let result = EntityCatalog::load("/definitely/not/here.yaml");
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}
