//! Stack entries
//!
//! One [`StackEntry`] is one drill-down level: a list of an entity type, or a
//! single entity of that type.

use std::collections::BTreeMap;

use navstack_entity::EntityType;
use serde::{Deserialize, Serialize};

/// Search filter of one stack entry, keyed by search field
pub type SearchFilter = BTreeMap<String, String>;

/// One level of drill-down navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackEntry {
    /// Entity type shown at this level
    pub entity_type: EntityType,
    /// Selected entity; `None` for a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Active search filter
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub search: SearchFilter,
}

impl StackEntry {
    /// List view of `entity_type`
    #[inline]
    #[must_use]
    pub fn list(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            entity_id: None,
            search: SearchFilter::new(),
        }
    }

    /// Detail view of one entity
    #[inline]
    #[must_use]
    pub fn entity(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type,
            entity_id: Some(entity_id.into()),
            search: SearchFilter::new(),
        }
    }

    /// With search filter
    #[inline]
    #[must_use]
    pub fn with_search(mut self, search: SearchFilter) -> Self {
        self.search = search;
        self
    }

    /// Check if this entry is a list view
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.entity_id.is_none()
    }

    /// Check if this entry is a detail view
    #[inline]
    #[must_use]
    pub fn is_entity(&self) -> bool {
        self.entity_id.is_some()
    }

    /// Selected entity id, if any
    #[inline]
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }
}
