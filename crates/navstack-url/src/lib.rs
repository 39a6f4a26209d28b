//! navstack URL Codec
//!
//! Encodes a [`WorkflowState`](navstack_state::WorkflowState) into a
//! restorable console URL and decodes it back.
//!
//! # Core Concepts
//!
//! - [`WorkflowCodec`]: Catalog-bound codec (`parse`, `try_parse`, `to_url`)
//! - [`CodecConfig`]: Base path and query key spelling
//! - [`CodecError`]: Why a URL could not be decoded
//!
//! Decoding is total: `parse` turns anything it does not recognize into the
//! not-found state.
//!
//! # Example
//!
//! ```rust
//! use navstack_entity::{EntityType, UseCase};
//! use navstack_state::{Navigator, StackEntry, WorkflowState};
//!
//! let state = WorkflowState::new(UseCase::VulnManagement, vec![StackEntry::list(EntityType::Deployment)]);
//! let state = Navigator::builtin().push_related_entity(&state, EntityType::Image, "img-123");
//!
//! let url = navstack_url::to_url(&state);
//! assert_eq!(url, "/main/vulnerability-management/deployments/image/img-123");
//! assert_eq!(navstack_url::parse(&url, ""), state);
//!
//! assert!(navstack_url::parse("/main/unknown-type/xyz", "").is_not_found());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod codec;
mod config;
mod error;
mod path;
mod query;

// Re-exports
pub use codec::{parse, to_url, WorkflowCodec};
pub use config::CodecConfig;
pub use error::CodecError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
