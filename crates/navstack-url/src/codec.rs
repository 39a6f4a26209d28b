//! Workflow state ⇄ URL codec
//!
//! [`WorkflowCodec::parse`] never fails: any URL it cannot make sense of
//! becomes the not-found state, which the console renders as a placeholder.
//! [`WorkflowCodec::try_parse`] exposes the reason instead.

use navstack_entity::EntityCatalog;
use navstack_state::WorkflowState;
use tracing::{debug, warn};
use url::Url;

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::path::{decode_path, encode_path};
use crate::query::{decode_query, encode_query};

/// Bidirectional codec between workflow states and URLs
#[derive(Debug, Clone)]
pub struct WorkflowCodec<'c> {
    catalog: &'c EntityCatalog,
    config: CodecConfig,
}

impl WorkflowCodec<'static> {
    /// Codec over the built-in catalog with default configuration
    #[inline]
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EntityCatalog::builtin(), CodecConfig::default())
    }
}

impl Default for WorkflowCodec<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'c> WorkflowCodec<'c> {
    /// Create codec
    #[inline]
    #[must_use]
    pub fn new(catalog: &'c EntityCatalog, config: CodecConfig) -> Self {
        Self { catalog, config }
    }

    /// Catalog in use
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'c EntityCatalog {
        self.catalog
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a URL path and query string
    ///
    /// Unrecognized input yields [`WorkflowState::default`], the not-found
    /// state.
    #[must_use]
    pub fn parse(&self, path: &str, query: &str) -> WorkflowState {
        self.try_parse(path, query).unwrap_or_else(|err| {
            warn!(path, query, error = %err, "unrecognized workflow url");
            WorkflowState::default()
        })
    }

    /// Decode a URL path and query string, reporting why it failed
    ///
    /// Only entity slugs, ids and query syntax are checked. The stack is not
    /// required to be a valid drill-down, so bookmarked URLs keep working
    /// when relationships change.
    ///
    /// # Errors
    /// Returns the first [`CodecError`] met in the path, then in the query
    pub fn try_parse(&self, path: &str, query: &str) -> Result<WorkflowState, CodecError> {
        let (use_case, mut stack) = decode_path(self.catalog, &self.config, path)?;
        let query = decode_query(&self.config, query)?;

        if !query.search.is_empty() && stack.is_empty() {
            return Err(CodecError::EmptyStack);
        }
        for (index, search) in query.search {
            let entry = stack.get_mut(index).ok_or_else(|| {
                CodecError::query(
                    format!("{}[{index}]", self.config.search_key),
                    "no stack entry at this index",
                )
            })?;
            entry.search = search;
        }

        debug!(?use_case, depth = stack.len(), "parsed workflow url");
        Ok(WorkflowState {
            use_case,
            stack,
            paging: query.paging,
            sort: query.sort,
            extra_params: query.extra_params,
        })
    }

    /// Decode a whole href: an absolute URL, or a path with optional query
    /// and fragment
    #[must_use]
    pub fn parse_href(&self, href: &str) -> WorkflowState {
        self.try_parse_href(href).unwrap_or_else(|err| {
            warn!(href, error = %err, "unrecognized workflow url");
            WorkflowState::default()
        })
    }

    /// Decode a whole href, reporting why it failed
    ///
    /// # Errors
    /// Same as [`Self::try_parse`]
    pub fn try_parse_href(&self, href: &str) -> Result<WorkflowState, CodecError> {
        if let Ok(url) = Url::parse(href) {
            return self.try_parse(url.path(), url.query().unwrap_or_default());
        }
        let without_fragment = href.split('#').next().unwrap_or_default();
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        self.try_parse(path, query)
    }

    /// Encode a state as `path[?query]`
    ///
    /// A state the catalog cannot express is logged and encoded as the base
    /// path, which parses back to not-found.
    #[must_use]
    pub fn to_url(&self, state: &WorkflowState) -> String {
        self.try_to_url(state).unwrap_or_else(|err| {
            warn!(error = %err, "workflow state has no url");
            if self.config.base_path.is_empty() {
                "/".to_string()
            } else {
                self.config.base_path.clone()
            }
        })
    }

    /// Encode a state as `path[?query]`, reporting why it failed
    ///
    /// # Errors
    /// Returns [`CodecError`] when a use case or entity type has no slug, or
    /// an entity id is empty
    pub fn try_to_url(&self, state: &WorkflowState) -> Result<String, CodecError> {
        let mut url = encode_path(self.catalog, &self.config, state.use_case, &state.stack)?;
        let query = encode_query(&self.config, state);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }
}

/// Decode with the built-in catalog and default configuration
#[must_use]
pub fn parse(path: &str, query: &str) -> WorkflowState {
    WorkflowCodec::builtin().parse(path, query)
}

/// Encode with the built-in catalog and default configuration
#[must_use]
pub fn to_url(state: &WorkflowState) -> String {
    WorkflowCodec::builtin().to_url(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navstack_entity::{EntityType, UseCase};
    use navstack_state::StackEntry;

    #[test]
    fn search_attaches_to_its_entry() {
        let state = parse(
            "/main/vm/deployments/deployment/d-1",
            "s[1][Severity]=CRITICAL",
        );
        assert!(state.stack[0].search.is_empty());
        assert_eq!(state.stack[1].search["Severity"], "CRITICAL");
    }

    #[test]
    fn search_out_of_range_is_rejected() {
        let codec = WorkflowCodec::builtin();
        assert!(matches!(
            codec.try_parse("/main/vm/deployments", "s[3][k]=v"),
            Err(CodecError::MalformedQuery { .. })
        ));
        assert_eq!(
            codec.try_parse("/main/vm", "s[0][k]=v"),
            Err(CodecError::EmptyStack)
        );
    }

    #[test]
    fn parse_href_forms() {
        let codec = WorkflowCodec::builtin();
        let expected = WorkflowState::new(
            UseCase::ConfigManagement,
            vec![StackEntry::list(EntityType::Cluster)],
        )
        .with_paging(navstack_state::Paging::new(2, 0));

        assert_eq!(codec.parse_href("/main/configmanagement/clusters?p=2#top"), expected);
        assert_eq!(
            codec.parse_href("https://console.example.com/main/cm/clusters?p=2"),
            expected
        );
    }

    #[test]
    fn unencodable_state_falls_back_to_base() {
        let state = WorkflowState {
            stack: vec![StackEntry::list(EntityType::Cluster)],
            ..WorkflowState::default()
        };
        assert_eq!(to_url(&state), "/main");
    }
}
