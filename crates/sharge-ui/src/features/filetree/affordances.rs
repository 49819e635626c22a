//! Derived enabled/disabled state and targets for the toolbar actions.

use crate::core::endpoints::Endpoints;
use crate::features::filetree::selection::SelectionStore;

/// Enabled state and optional navigation target of one action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Affordance {
    /// Whether the action can be invoked.
    pub enabled: bool,
    /// Navigation target for link-style actions; `None` while disabled.
    pub href: Option<String>,
}

impl Affordance {
    /// Inert action.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            href: None,
        }
    }

    /// Enabled button-style action.
    #[must_use]
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            href: None,
        }
    }

    /// Enabled link-style action.
    #[must_use]
    pub const fn link(href: String) -> Self {
        Self {
            enabled: true,
            href: Some(href),
        }
    }

    fn when(enabled: bool) -> Self {
        if enabled {
            Self::enabled()
        } else {
            Self::disabled()
        }
    }
}

/// Affordances for every selection-driven toolbar action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionAffordances {
    /// Open (view) the single selected file.
    pub open: Affordance,
    /// Download every selected entry.
    pub download: Affordance,
    /// Rename the single selected entry.
    pub rename: Affordance,
    /// Delete every selected entry.
    pub delete: Affordance,
}

/// Recompute affordances from the selection and entry metadata.
///
/// `is_container` returns `None` for identifiers that are not rendered; such
/// an entry never enables Open.
#[must_use]
pub fn derive_affordances(
    selection: &SelectionStore,
    is_container: impl Fn(&str) -> Option<bool>,
    endpoints: &Endpoints,
) -> ActionAffordances {
    let open = match selection.single() {
        Some(id) if is_container(id) == Some(false) => Affordance::link(endpoints.view_href(id)),
        _ => Affordance::disabled(),
    };
    let download = if selection.is_empty() {
        Affordance::disabled()
    } else {
        Affordance::link(endpoints.download_href(&selection.selected()))
    };
    ActionAffordances {
        open,
        download,
        rename: Affordance::when(selection.len() == 1),
        delete: Affordance::when(!selection.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::endpoints::DOWNLOAD_SEPARATOR;

    fn container_lookup(id: &str) -> Option<bool> {
        match id {
            "folder" => Some(true),
            "a.txt" | "b/c.txt" | "d.txt" => Some(false),
            _ => None,
        }
    }

    #[test]
    fn empty_selection_disables_everything() {
        let selection = SelectionStore::new();
        let derived = derive_affordances(&selection, container_lookup, &Endpoints::default());
        assert_eq!(derived, ActionAffordances::default());
    }

    #[test]
    fn single_file_enables_open_with_view_href() {
        let mut selection = SelectionStore::new();
        selection.select_only("a.txt");
        let derived = derive_affordances(&selection, container_lookup, &Endpoints::default());
        assert_eq!(derived.open, Affordance::link("/view/a.txt".into()));
        assert!(derived.rename.enabled);
        assert!(derived.delete.enabled);
        assert_eq!(derived.download.href.as_deref(), Some("/dl?f=a.txt"));
    }

    #[test]
    fn single_folder_disables_open_only() {
        let mut selection = SelectionStore::new();
        selection.select_only("folder");
        let derived = derive_affordances(&selection, container_lookup, &Endpoints::default());
        assert_eq!(derived.open, Affordance::disabled());
        assert!(derived.rename.enabled);
        assert!(derived.download.enabled);
    }

    #[test]
    fn unknown_entry_never_enables_open() {
        let mut selection = SelectionStore::new();
        selection.select_only("ghost");
        let derived = derive_affordances(&selection, container_lookup, &Endpoints::default());
        assert!(!derived.open.enabled);
    }

    #[test]
    fn multi_selection_joins_download_and_disables_single_actions() {
        let mut selection = SelectionStore::new();
        selection.toggle("b/c.txt");
        selection.toggle("a.txt");
        let derived = derive_affordances(&selection, container_lookup, &Endpoints::default());
        assert!(!derived.open.enabled);
        assert!(!derived.rename.enabled);
        assert!(derived.delete.enabled);
        assert_eq!(
            derived.download.href.as_deref(),
            Some("/dl?f=a.txt&f=b%2Fc.txt")
        );
    }

    #[test]
    fn download_segment_count_is_order_independent() {
        let mut forward = SelectionStore::new();
        let mut backward = SelectionStore::new();
        for id in ["a.txt", "b/c.txt", "d.txt"] {
            forward.toggle(id);
        }
        for id in ["d.txt", "b/c.txt", "a.txt"] {
            backward.toggle(id);
        }
        let endpoints = Endpoints::default();
        let first = derive_affordances(&forward, container_lookup, &endpoints);
        let second = derive_affordances(&backward, container_lookup, &endpoints);
        let href = first.download.href.unwrap_or_default();
        assert_eq!(href.matches(DOWNLOAD_SEPARATOR).count() + 1, 3);
        assert_eq!(Some(href), second.download.href);
    }
}
