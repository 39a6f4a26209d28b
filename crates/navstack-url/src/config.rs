//! Codec configuration

use serde::{Deserialize, Serialize};

/// Where workflow URLs live and how their query keys are spelled
///
/// Side-panel keys are the page keys with a `2` suffix (`p2`, `sort2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Path prefix before the use case, without trailing slash
    pub base_path: String,
    /// Stack entry search key (`s[{index}][{field}]`)
    pub search_key: String,
    /// Page index key
    pub page_key: String,
    /// Sort key (`sort[id]`, `sort[desc]`)
    pub sort_key: String,
}

impl CodecConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With base path
    ///
    /// A leading slash is added and trailing slashes are dropped, so `main/`
    /// and `/main` are the same base.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl AsRef<str>) -> Self {
        let trimmed = base_path.as_ref().trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// With search key
    #[inline]
    #[must_use]
    pub fn with_search_key(mut self, key: impl Into<String>) -> Self {
        self.search_key = key.into();
        self
    }

    /// With page key
    #[inline]
    #[must_use]
    pub fn with_page_key(mut self, key: impl Into<String>) -> Self {
        self.page_key = key.into();
        self
    }

    /// With sort key
    #[inline]
    #[must_use]
    pub fn with_sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = key.into();
        self
    }

    /// Non-empty components of the base path
    pub(crate) fn base_components(&self) -> impl Iterator<Item = &str> {
        self.base_path.split('/').filter(|c| !c.is_empty())
    }

    pub(crate) fn side_panel_key(key: &str) -> String {
        format!("{key}2")
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            base_path: "/main".to_string(),
            search_key: "s".to_string(),
            page_key: "p".to_string(),
            sort_key: "sort".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_path() {
        let config = CodecConfig::default();
        assert_eq!(config.base_path, "/main");
        assert_eq!(config.base_components().collect::<Vec<_>>(), vec!["main"]);
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(CodecConfig::new().with_base_path("console/").base_path, "/console");
        assert_eq!(CodecConfig::new().with_base_path("/a/b").base_path, "/a/b");
        assert_eq!(CodecConfig::new().with_base_path("/").base_path, "");
    }
}
