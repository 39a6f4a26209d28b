//! Relationship queries over the entity catalog
//!
//! Children form a directed containment graph. Parents are its inverse
//! edges, "contains" is reachability and matches are symmetric.

use std::collections::BTreeSet;

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::catalog::EntityCatalog;
use crate::entity_type::EntityType;

/// How a drill-down target relates to the entity it is reached from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    /// Target is a (transitive) child of the source
    Contains,
    /// Target is a (transitive) parent of the source
    Parents,
    /// Target is associated with the source without containment
    Matches,
}

impl EntityCatalog {
    /// Entity types directly contained by `entity_type`
    #[must_use]
    pub fn children(&self, entity_type: EntityType) -> &[EntityType] {
        self.entity(entity_type).map_or(&[], |d| d.children.as_slice())
    }

    /// Entity types directly containing `entity_type`
    #[must_use]
    pub fn parents(&self, entity_type: EntityType) -> Vec<EntityType> {
        let graph = self.containment_graph();
        let mut parents: Vec<EntityType> = graph
            .neighbors_directed(entity_type, Direction::Incoming)
            .collect();
        parents.sort_unstable();
        parents
    }

    /// Entity types matched with `entity_type`, declared from either side
    #[must_use]
    pub fn matches(&self, entity_type: EntityType) -> Vec<EntityType> {
        let declared = self.entity(entity_type).map_or(&[][..], |d| d.matches.as_slice());
        let mut matches: Vec<EntityType> = declared.to_vec();
        for candidate in self.entity_types() {
            let reverse = self
                .entity(candidate)
                .is_some_and(|d| d.matches.contains(&entity_type));
            if reverse && !matches.contains(&candidate) {
                matches.push(candidate);
            }
        }
        matches
    }

    /// All entity types transitively contained by `entity_type`
    #[must_use]
    pub fn descendants(&self, entity_type: EntityType) -> BTreeSet<EntityType> {
        let graph = self.containment_graph();
        if !graph.contains_node(entity_type) {
            return BTreeSet::new();
        }
        let mut dfs = Dfs::new(&graph, entity_type);
        let mut found = BTreeSet::new();
        while let Some(next) = dfs.next(&graph) {
            found.insert(next);
        }
        found.remove(&entity_type);
        found
    }

    /// All entity types transitively containing `entity_type`
    #[must_use]
    pub fn ancestors(&self, entity_type: EntityType) -> BTreeSet<EntityType> {
        let graph = self.containment_graph();
        if !graph.contains_node(entity_type) {
            return BTreeSet::new();
        }
        let reversed = Reversed(&graph);
        let mut dfs = Dfs::new(reversed, entity_type);
        let mut found = BTreeSet::new();
        while let Some(next) = dfs.next(reversed) {
            found.insert(next);
        }
        found.remove(&entity_type);
        found
    }

    /// Directed graph with an edge from every entity type to each child
    pub(crate) fn containment_graph(&self) -> DiGraphMap<EntityType, ()> {
        let mut graph = DiGraphMap::new();
        for entity_type in self.entity_types() {
            graph.add_node(entity_type);
            for child in self.children(entity_type) {
                graph.add_edge(entity_type, *child, ());
            }
        }
        graph
    }

    /// Check if `container` transitively contains `entity_type`
    #[inline]
    #[must_use]
    pub fn contains(&self, container: EntityType, entity_type: EntityType) -> bool {
        let graph = self.containment_graph();
        graph.contains_node(container)
            && graph.contains_node(entity_type)
            && graph
                .neighbors(container)
                .any(|child| petgraph::algo::has_path_connecting(&graph, child, entity_type, None))
    }

    /// Check if `ancestor` transitively contains `entity_type`
    #[inline]
    #[must_use]
    pub fn is_ancestor(&self, ancestor: EntityType, entity_type: EntityType) -> bool {
        self.contains(ancestor, entity_type)
    }

    /// Check if two entity types are matched
    #[inline]
    #[must_use]
    pub fn is_match(&self, a: EntityType, b: EntityType) -> bool {
        self.matches(a).contains(&b)
    }

    /// Classify the step from `from` to `to`
    ///
    /// Checked in order: contains, parents, matches. Returns `None` for
    /// unrelated types and for `from == to`.
    #[must_use]
    pub fn relationship(&self, from: EntityType, to: EntityType) -> Option<Relationship> {
        if from == to {
            None
        } else if self.contains(from, to) {
            Some(Relationship::Contains)
        } else if self.is_ancestor(to, from) {
            Some(Relationship::Parents)
        } else if self.is_match(from, to) {
            Some(Relationship::Matches)
        } else {
            None
        }
    }

    /// Entity types reached from `entity_type` through one kind of relationship
    #[must_use]
    pub fn entity_types_by_relationship(
        &self,
        entity_type: EntityType,
        relationship: Relationship,
    ) -> Vec<EntityType> {
        match relationship {
            Relationship::Contains => self.descendants(entity_type).into_iter().collect(),
            Relationship::Parents => self.ancestors(entity_type).into_iter().collect(),
            Relationship::Matches => self.matches(entity_type),
        }
    }
}
