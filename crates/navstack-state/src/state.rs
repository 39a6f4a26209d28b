//! Workflow state
//!
//! [`WorkflowState`] is the drill-down stack of one use case, plus the
//! pagination and sort of the page and the side panel. Every transition here
//! returns a new value; transitions that need the entity catalog live on
//! [`Navigator`](crate::Navigator).
//!
//! # Page and side panel
//!
//! The first entry is rendered as the page, together with the following list
//! when the first entry is a detail. Everything after that is rendered in the
//! side panel.

use std::collections::BTreeMap;

use navstack_entity::{EntityType, UseCase};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::{SearchFilter, StackEntry};
use crate::view::{Paging, Panel, SortOption, Sorting};

/// Drill-down navigation state of one URL
///
/// `WorkflowState::default()` is the not-found state: no use case and an
/// empty stack. A use case with an empty stack is its dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    /// Console section, `None` when the URL was not recognized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<UseCase>,
    /// Drill-down entries, root first
    #[serde(default)]
    pub stack: Vec<StackEntry>,
    /// Page and side-panel pagination
    #[serde(default)]
    pub paging: Paging,
    /// Page and side-panel sort
    #[serde(default)]
    pub sort: Sorting,
    /// Query parameters this state does not manage, in URL order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_params: Vec<(String, String)>,
}

impl WorkflowState {
    /// Create state from a use case and a stack
    #[must_use]
    pub fn new(use_case: UseCase, stack: Vec<StackEntry>) -> Self {
        Self {
            use_case: Some(use_case),
            stack,
            ..Self::default()
        }
    }

    /// Not-found state
    #[inline]
    #[must_use]
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Dashboard of a use case
    #[inline]
    #[must_use]
    pub fn dashboard(use_case: UseCase) -> Self {
        Self::new(use_case, Vec::new())
    }

    /// With pagination
    #[inline]
    #[must_use]
    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    /// With sort
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort: Sorting) -> Self {
        self.sort = sort;
        self
    }

    /// With unmanaged query parameters
    #[inline]
    #[must_use]
    pub fn with_extra_params(mut self, extra_params: Vec<(String, String)>) -> Self {
        self.extra_params = extra_params;
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Check if this is the not-found state
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.use_case.is_none()
    }

    /// Check if this is a use case dashboard
    #[inline]
    #[must_use]
    pub fn is_dashboard(&self) -> bool {
        self.use_case.is_some() && self.stack.is_empty()
    }

    /// Top of the stack
    #[inline]
    #[must_use]
    pub fn current_entry(&self) -> Option<&StackEntry> {
        self.stack.last()
    }

    /// Entity type of the top of the stack
    #[inline]
    #[must_use]
    pub fn current_entity_type(&self) -> Option<EntityType> {
        self.current_entry().map(|entry| entry.entity_type)
    }

    /// Root of the stack
    #[inline]
    #[must_use]
    pub fn base_entry(&self) -> Option<&StackEntry> {
        self.stack.first()
    }

    /// Check if the stack is exactly the list of `entity_type`
    #[must_use]
    pub fn is_base_list(&self, entity_type: EntityType) -> bool {
        match self.stack.as_slice() {
            [only] => only.is_list() && only.entity_type == entity_type,
            _ => false,
        }
    }

    /// Check if the entry below the top has type `entity_type`
    #[must_use]
    pub fn is_preceding(&self, entity_type: EntityType) -> bool {
        self.stack
            .len()
            .checked_sub(2)
            .and_then(|i| self.stack.get(i))
            .is_some_and(|entry| entry.entity_type == entity_type)
    }

    /// First selected entity of type `entity_type`
    #[must_use]
    pub fn single_ancestor_of_type(&self, entity_type: EntityType) -> Option<&StackEntry> {
        self.stack
            .iter()
            .find(|entry| entry.is_entity() && entry.entity_type == entity_type)
    }

    /// Selected entity ids below the top of the stack, by type
    #[must_use]
    pub fn entity_context(&self) -> BTreeMap<EntityType, String> {
        let below_top = self.stack.len().saturating_sub(1);
        self.stack[..below_top]
            .iter()
            .filter_map(|entry| {
                entry
                    .entity_id()
                    .map(|id| (entry.entity_type, id.to_string()))
            })
            .collect()
    }

    fn page_len(&self) -> usize {
        match self.stack.as_slice() {
            [] => 0,
            [first, second, ..] if first.is_entity() && second.is_list() => 2,
            _ => 1,
        }
    }

    /// Entries rendered as the page
    #[inline]
    #[must_use]
    pub fn page_stack(&self) -> &[StackEntry] {
        &self.stack[..self.page_len()]
    }

    /// Entries rendered in the side panel
    #[inline]
    #[must_use]
    pub fn side_panel_stack(&self) -> &[StackEntry] {
        &self.stack[self.page_len()..]
    }

    /// Check if the side panel is open
    #[inline]
    #[must_use]
    pub fn is_side_panel_open(&self) -> bool {
        !self.side_panel_stack().is_empty()
    }

    /// Panel that receives paging and sort changes
    #[inline]
    #[must_use]
    pub fn active_panel(&self) -> Panel {
        if self.is_side_panel_open() {
            Panel::SidePanel
        } else {
            Panel::Page
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Remove the top entry
    ///
    /// The root entry is never removed.
    #[must_use]
    pub fn pop(&self) -> Self {
        let mut next = self.clone();
        if next.stack.len() > 1 {
            next.stack.pop();
        } else {
            debug!(depth = self.stack.len(), "pop at root ignored");
        }
        next
    }

    /// Replace the search filter of the top entry
    #[must_use]
    pub fn set_search(&self, search: SearchFilter) -> Self {
        let mut next = self.clone();
        match next.stack.last_mut() {
            Some(top) => top.search = search,
            None => debug!("set_search on empty stack ignored"),
        }
        next
    }

    /// Set the sort of the active panel
    #[must_use]
    pub fn set_sort(&self, sort: Option<SortOption>) -> Self {
        let mut next = self.clone();
        *next.sort.get_mut(self.active_panel()) = sort;
        next
    }

    /// Set the page index of the active panel
    #[must_use]
    pub fn set_page(&self, page: u32) -> Self {
        let mut next = self.clone();
        *next.paging.get_mut(self.active_panel()) = page;
        next
    }

    /// Select a row of the top list, or swap the selected entity on a detail
    #[must_use]
    pub fn push_list_item(&self, entity_id: &str) -> Self {
        let mut next = self.clone();
        if entity_id.is_empty() {
            debug!("push_list_item with empty id ignored");
            return next;
        }
        match next.stack.last() {
            Some(top) if top.is_list() => {
                let entry = StackEntry::entity(top.entity_type, entity_id);
                next.stack.push(entry);
            }
            Some(top) => {
                let entry = StackEntry::entity(top.entity_type, entity_id);
                next.stack.pop();
                next.stack.push(entry);
            }
            None => debug!("push_list_item on empty stack ignored"),
        }
        next
    }

    /// Start over on a single entity, possibly in another use case
    #[must_use]
    pub fn reset(&self, use_case: UseCase, entity_type: EntityType, entity_id: &str) -> Self {
        Self::new(use_case, vec![StackEntry::entity(entity_type, entity_id)])
            .with_extra_params(self.extra_params.clone())
    }

    /// Close the side panel, keeping the page and its settings
    #[must_use]
    pub fn remove_side_panel_params(&self) -> Self {
        let mut next = self.clone();
        next.stack.truncate(self.page_len());
        next.paging.side_panel = 0;
        next.sort.side_panel = None;
        next
    }

    /// Promote the side panel to the page
    ///
    /// Keeps the last selected entity and the list after it. Side-panel
    /// paging and sort become the page settings.
    #[must_use]
    pub fn skimmed_stack(&self) -> Self {
        let mut next = self.clone();
        if !self.is_side_panel_open() {
            return next;
        }
        if let Some(last_entity) = self.stack.iter().rposition(StackEntry::is_entity) {
            next.stack = self.stack[last_entity..].to_vec();
        }
        next.paging = Paging::new(self.paging.side_panel, 0);
        next.sort = Sorting::new(self.sort.side_panel.clone(), None);
        next
    }
}
