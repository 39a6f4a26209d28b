//! Testing utilities for navstack workspace
//!
//! Shared fixtures for workflow states with and without an open side panel.

#![allow(missing_docs)]

use navstack_entity::{EntityType, UseCase};
use navstack_state::{Paging, SearchFilter, SortOption, Sorting, StackEntry, WorkflowState};

pub const ENTITY_ID_1: &str = "1234";
pub const ENTITY_ID_2: &str = "5678";
pub const ENTITY_ID_3: &str = "1111";

pub fn search(pairs: &[(&str, &str)]) -> SearchFilter {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn page_search() -> SearchFilter {
    search(&[("sk1", "v1"), ("sk2", "v2")])
}

pub fn side_panel_search() -> SearchFilter {
    search(&[("sk3", "v3"), ("sk4", "v4")])
}

pub fn sort_values() -> Sorting {
    Sorting::new(
        Some(SortOption::ascending("Cluster")),
        Some(SortOption::descending("Deployment")),
    )
}

pub fn paging_values() -> Paging {
    Paging::new(1, 2)
}

pub fn list(entity_type: EntityType) -> StackEntry {
    StackEntry::list(entity_type)
}

pub fn entity(entity_type: EntityType, id: &str) -> StackEntry {
    StackEntry::entity(entity_type, id)
}

/// Config management state on a single cluster, optionally with a deployment open
pub fn entity_state(side_panel_open: bool) -> WorkflowState {
    let mut stack = vec![entity(EntityType::Cluster, ENTITY_ID_1).with_search(page_search())];
    if side_panel_open {
        stack.push(list(EntityType::Deployment));
        stack.push(entity(EntityType::Deployment, ENTITY_ID_2).with_search(side_panel_search()));
    }
    with_view_values(WorkflowState::new(UseCase::ConfigManagement, stack))
}

/// Config management state on the cluster list, optionally with a cluster open
pub fn list_state(side_panel_open: bool) -> WorkflowState {
    let mut stack = vec![list(EntityType::Cluster).with_search(page_search())];
    if side_panel_open {
        stack.push(entity(EntityType::Cluster, ENTITY_ID_1).with_search(side_panel_search()));
    }
    with_view_values(WorkflowState::new(UseCase::ConfigManagement, stack))
}

fn with_view_values(state: WorkflowState) -> WorkflowState {
    state.with_paging(paging_values()).with_sort(sort_values())
}

/// Stack entry types and ids, for compact assertions
pub fn stack_of(state: &WorkflowState) -> Vec<(EntityType, Option<&str>)> {
    state
        .stack
        .iter()
        .map(|entry| (entry.entity_type, entry.entity_id()))
        .collect()
}
