//! Catalog-aware transitions
//!
//! Pushing a list or a related entity depends on how entity types relate,
//! so these transitions go through a [`Navigator`] bound to a catalog.
//! When a push leaves a stack that no longer reads as one drill-down path,
//! the stack is skimmed down to the entity the user navigated from.

use navstack_entity::{EntityCatalog, EntityType, UseCase};
use tracing::debug;

use crate::entry::StackEntry;
use crate::state::WorkflowState;
use crate::validation::StackValidator;
use crate::view::{Paging, Sorting};

/// Applies catalog-aware transitions to workflow states
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'c> {
    catalog: &'c EntityCatalog,
}

impl Navigator<'static> {
    /// Navigator over the built-in catalog
    #[inline]
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EntityCatalog::builtin())
    }
}

impl Default for Navigator<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'c> Navigator<'c> {
    /// Create navigator over a catalog
    #[inline]
    #[must_use]
    pub fn new(catalog: &'c EntityCatalog) -> Self {
        Self { catalog }
    }

    /// Catalog in use
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'c EntityCatalog {
        self.catalog
    }

    fn supports(&self, state: &WorkflowState, entity_type: EntityType) -> bool {
        state
            .use_case
            .is_some_and(|use_case| self.catalog.supports(use_case, entity_type))
    }

    fn is_related(&self, from: EntityType, to: EntityType) -> bool {
        from == to || self.catalog.relationship(from, to).is_some()
    }

    /// Open the list of `entity_type` from the current entry
    ///
    /// The list is appended above the top entry, list or detail, when the
    /// two types are related. When the resulting stack is not a valid
    /// drill-down it is skimmed to the last selected entity and the new
    /// list, and pagination restarts.
    #[must_use]
    pub fn push_list(&self, state: &WorkflowState, entity_type: EntityType) -> WorkflowState {
        if !self.supports(state, entity_type) {
            debug!(%entity_type, use_case = ?state.use_case, "push_list outside use case ignored");
            return state.clone();
        }

        if let Some(top) = state.stack.last() {
            if top.is_list() && top.entity_type == entity_type {
                return state.clone();
            }
            if !self.is_related(top.entity_type, entity_type) {
                debug!(from = %top.entity_type, to = %entity_type, "push_list to unrelated type ignored");
                return state.clone();
            }
        }

        let validator = StackValidator::new(self.catalog);
        let mut next = state.clone();
        next.stack.push(StackEntry::list(entity_type));
        if validator.is_valid(&next.stack) {
            return next;
        }

        let anchor = state.stack.iter().rev().find(|entry| entry.is_entity()).cloned();
        debug!(%entity_type, depth = next.stack.len(), "skimming stack after push_list");
        next.stack = anchor
            .into_iter()
            .chain(std::iter::once(StackEntry::list(entity_type)))
            .collect();
        if !validator.is_valid(&next.stack) {
            next.stack = vec![StackEntry::list(entity_type)];
        }
        next.paging = Paging::default();
        next
    }

    /// Open one entity related to the current entry
    ///
    /// On a dashboard the entity becomes the root. When the resulting stack
    /// is not a valid drill-down the entity becomes the only entry, and
    /// pagination restarts.
    #[must_use]
    pub fn push_related_entity(
        &self,
        state: &WorkflowState,
        entity_type: EntityType,
        entity_id: &str,
    ) -> WorkflowState {
        if entity_id.is_empty() {
            debug!(%entity_type, "push_related_entity with empty id ignored");
            return state.clone();
        }
        if !self.supports(state, entity_type) {
            debug!(%entity_type, use_case = ?state.use_case, "push_related_entity outside use case ignored");
            return state.clone();
        }

        let mut next = state.clone();
        let entry = StackEntry::entity(entity_type, entity_id);
        match next.stack.last() {
            None => {
                next.stack.push(entry);
                return next;
            }
            Some(top) if top.entity_type == entity_type && top.is_entity() => {
                next.stack.pop();
            }
            Some(top) if !self.is_related(top.entity_type, entity_type) => {
                debug!(from = %top.entity_type, to = %entity_type, "push_related_entity to unrelated type ignored");
                return state.clone();
            }
            Some(_) => {}
        }

        next.stack.push(entry.clone());
        if StackValidator::new(self.catalog).is_valid(&next.stack) {
            return next;
        }

        debug!(%entity_type, depth = next.stack.len(), "skimming stack after push_related_entity");
        next.stack = vec![entry];
        next.paging = Paging::default();
        next
    }

    /// Back to the root list
    ///
    /// The root list has the type of the first entry, or the root entity
    /// type of the use case on a dashboard. The not-found state is returned
    /// unchanged.
    #[must_use]
    pub fn clear(&self, state: &WorkflowState) -> WorkflowState {
        let Some(use_case) = state.use_case else {
            debug!("clear on not-found state ignored");
            return state.clone();
        };
        let root = state
            .base_entry()
            .map(|entry| entry.entity_type)
            .or_else(|| self.catalog.root_entity_type(use_case));

        let mut next = state.clone();
        next.stack = root.into_iter().map(StackEntry::list).collect();
        next.paging = Paging::default();
        next.sort = Sorting::default();
        next
    }

    /// Root list of a use case
    #[must_use]
    pub fn root(&self, use_case: UseCase) -> WorkflowState {
        self.clear(&WorkflowState::dashboard(use_case))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EntityType::*;

    #[test]
    fn root_uses_use_case_root_type() {
        let nav = Navigator::builtin();
        assert_eq!(
            nav.root(UseCase::VulnManagement).stack,
            vec![StackEntry::list(ImageCve)]
        );
        assert_eq!(
            nav.root(UseCase::ConfigManagement).stack,
            vec![StackEntry::list(Cluster)]
        );
    }

    #[test]
    fn push_list_outside_use_case_is_ignored() {
        let nav = Navigator::builtin();
        let state = WorkflowState::new(UseCase::VulnManagement, vec![StackEntry::entity(Cluster, "1")]);
        assert_eq!(nav.push_list(&state, Secret), state);
        assert_eq!(nav.push_list(&WorkflowState::not_found(), Cluster), WorkflowState::not_found());
    }

    #[test]
    fn push_list_stacks_related_list_on_top() {
        let nav = Navigator::builtin();
        let state = WorkflowState::new(
            UseCase::ConfigManagement,
            vec![StackEntry::entity(Cluster, "1"), StackEntry::list(Namespace)],
        );
        assert_eq!(
            nav.push_list(&state, Deployment).stack,
            vec![
                StackEntry::entity(Cluster, "1"),
                StackEntry::list(Namespace),
                StackEntry::list(Deployment),
            ]
        );
        assert_eq!(nav.push_list(&state, Namespace), state);
    }

    #[test]
    fn push_list_unrelated_to_list_on_top_is_ignored() {
        let nav = Navigator::builtin();
        let state = WorkflowState::new(
            UseCase::ConfigManagement,
            vec![StackEntry::entity(Cluster, "1"), StackEntry::list(Namespace)],
        );
        assert_eq!(nav.push_list(&state, Node), state);
    }

    #[test]
    fn push_list_to_unrelated_type_is_ignored() {
        let nav = Navigator::builtin();
        let state = WorkflowState::new(UseCase::ConfigManagement, vec![StackEntry::entity(Image, "1")]);
        assert_eq!(nav.push_list(&state, Policy), state);
    }

    #[test]
    fn push_related_entity_rejects_empty_id() {
        let nav = Navigator::builtin();
        let state = WorkflowState::dashboard(UseCase::ConfigManagement);
        assert_eq!(nav.push_related_entity(&state, Cluster, ""), state);
    }

    #[test]
    fn push_related_entity_of_same_type_swaps_selection() {
        let nav = Navigator::builtin();
        let state = WorkflowState::new(
            UseCase::ConfigManagement,
            vec![StackEntry::list(Deployment), StackEntry::entity(Deployment, "1")],
        );
        assert_eq!(
            nav.push_related_entity(&state, Deployment, "2").stack,
            vec![StackEntry::list(Deployment), StackEntry::entity(Deployment, "2")]
        );
    }

    #[test]
    fn clear_keeps_not_found() {
        let nav = Navigator::builtin();
        assert_eq!(nav.clear(&WorkflowState::not_found()), WorkflowState::not_found());
    }
}
