//! Page and side-panel view settings

use serde::{Deserialize, Serialize};

/// Area of the screen a setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Panel {
    /// Main page
    Page,
    /// Side panel opened over the page
    SidePanel,
}

/// One value per [`Panel`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByPanel<T> {
    /// Main page value
    pub page: T,
    /// Side panel value
    pub side_panel: T,
}

impl<T> ByPanel<T> {
    /// Create from both values
    #[inline]
    #[must_use]
    pub fn new(page: T, side_panel: T) -> Self {
        Self { page, side_panel }
    }

    /// Value for a panel
    #[inline]
    #[must_use]
    pub fn get(&self, panel: Panel) -> &T {
        match panel {
            Panel::Page => &self.page,
            Panel::SidePanel => &self.side_panel,
        }
    }

    /// Mutable value for a panel
    #[inline]
    pub fn get_mut(&mut self, panel: Panel) -> &mut T {
        match panel {
            Panel::Page => &mut self.page,
            Panel::SidePanel => &mut self.side_panel,
        }
    }
}

/// Table sort of one panel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOption {
    /// Sort field
    pub id: String,
    /// Descending order
    #[serde(default)]
    pub desc: bool,
}

impl SortOption {
    /// Ascending sort on a field
    #[inline]
    #[must_use]
    pub fn ascending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Descending sort on a field
    #[inline]
    #[must_use]
    pub fn descending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

/// Zero-based page index per panel
pub type Paging = ByPanel<u32>;

/// Optional sort per panel
pub type Sorting = ByPanel<Option<SortOption>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_panel_access() {
        let mut paging = Paging::new(1, 2);
        assert_eq!(*paging.get(Panel::Page), 1);
        assert_eq!(*paging.get(Panel::SidePanel), 2);

        *paging.get_mut(Panel::SidePanel) = 0;
        assert_eq!(paging, Paging::new(1, 0));
    }

    #[test]
    fn default_sorting_is_empty() {
        let sorting = Sorting::default();
        assert!(sorting.page.is_none());
        assert!(sorting.side_panel.is_none());
    }
}
