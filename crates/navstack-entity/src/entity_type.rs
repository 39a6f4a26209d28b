//! Closed sets of entity types and use cases
//!
//! Provides [`EntityType`] and [`UseCase`], the tokens a workflow stack is
//! built from. Both serialize as their SCREAMING_SNAKE token.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Kind of entity a stack entry can show
///
/// URL slugs and labels are not part of the type; they live in the
/// [`EntityCatalog`](crate::EntityCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Kubernetes cluster
    Cluster,
    /// Namespace within a cluster
    Namespace,
    /// Cluster node
    Node,
    /// Deployment within a namespace
    Deployment,
    /// Container image
    Image,
    /// Package found in an image
    ImageComponent,
    /// Vulnerability affecting an image component
    ImageCve,
    /// Package installed on a node
    NodeComponent,
    /// Vulnerability affecting a node component
    NodeCve,
    /// Vulnerability affecting the cluster platform
    ClusterCve,
    /// Policy evaluated against deployments
    Policy,
    /// Secret stored in a namespace
    Secret,
    /// Service account of a namespace
    ServiceAccount,
    /// RBAC role
    Role,
    /// User or group bound to roles
    Subject,
    /// Compliance control
    Control,
}

impl EntityType {
    /// Every entity type, in declaration order
    pub const ALL: [EntityType; 16] = [
        EntityType::Cluster,
        EntityType::Namespace,
        EntityType::Node,
        EntityType::Deployment,
        EntityType::Image,
        EntityType::ImageComponent,
        EntityType::ImageCve,
        EntityType::NodeComponent,
        EntityType::NodeCve,
        EntityType::ClusterCve,
        EntityType::Policy,
        EntityType::Secret,
        EntityType::ServiceAccount,
        EntityType::Role,
        EntityType::Subject,
        EntityType::Control,
    ];

    /// Canonical token, e.g. `IMAGE_CVE`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityType::Cluster => "CLUSTER",
            EntityType::Namespace => "NAMESPACE",
            EntityType::Node => "NODE",
            EntityType::Deployment => "DEPLOYMENT",
            EntityType::Image => "IMAGE",
            EntityType::ImageComponent => "IMAGE_COMPONENT",
            EntityType::ImageCve => "IMAGE_CVE",
            EntityType::NodeComponent => "NODE_COMPONENT",
            EntityType::NodeCve => "NODE_CVE",
            EntityType::ClusterCve => "CLUSTER_CVE",
            EntityType::Policy => "POLICY",
            EntityType::Secret => "SECRET",
            EntityType::ServiceAccount => "SERVICE_ACCOUNT",
            EntityType::Role => "ROLE",
            EntityType::Subject => "SUBJECT",
            EntityType::Control => "CONTROL",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownToken(s.to_string()))
    }
}

/// Top-level console section scoping the root of a workflow stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UseCase {
    /// Vulnerability management section
    VulnManagement,
    /// Configuration management section
    ConfigManagement,
}

impl UseCase {
    /// Every use case, in declaration order
    pub const ALL: [UseCase; 2] = [UseCase::VulnManagement, UseCase::ConfigManagement];

    /// Canonical token, e.g. `VULN_MANAGEMENT`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UseCase::VulnManagement => "VULN_MANAGEMENT",
            UseCase::ConfigManagement => "CONFIG_MANAGEMENT",
        }
    }
}

impl Display for UseCase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownToken(s.to_string()))
    }
}
