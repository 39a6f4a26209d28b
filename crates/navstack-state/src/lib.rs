//! navstack Workflow State
//!
//! Drill-down navigation stack of the console and the pure transitions that
//! move through it.
//!
//! # Overview
//!
//! - **StackEntry**: One level of drill-down, a list or a selected entity
//! - **WorkflowState**: Stack, paging and sort of one URL
//! - **Navigator**: Catalog-aware pushes (`push_list`, `push_related_entity`, `clear`)
//! - **StackValidator**: Decides when a pushed stack must be skimmed
//!
//! # Example
//!
//! ```rust
//! use navstack_entity::{EntityType, UseCase};
//! use navstack_state::{Navigator, StackEntry, WorkflowState};
//!
//! let nav = Navigator::builtin();
//! let state = WorkflowState::new(UseCase::VulnManagement, vec![StackEntry::list(EntityType::Deployment)]);
//!
//! let state = nav.push_related_entity(&state, EntityType::Image, "img-123");
//! assert_eq!(state.current_entity_type(), Some(EntityType::Image));
//!
//! // Popping never removes the root
//! let root = state.pop().pop().pop();
//! assert_eq!(root.stack, vec![StackEntry::list(EntityType::Deployment)]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod entry;
pub mod navigator;
pub mod state;
pub mod validation;
pub mod view;

// Re-exports
pub use entry::{SearchFilter, StackEntry};
pub use navigator::Navigator;
pub use state::WorkflowState;
pub use validation::{StackValidator, StackViolation};
pub use view::{ByPanel, Paging, Panel, SortOption, Sorting};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for workflow navigation
    pub use crate::{Navigator, Paging, SearchFilter, SortOption, Sorting, StackEntry, WorkflowState};
    pub use navstack_entity::{EntityCatalog, EntityType, UseCase};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
