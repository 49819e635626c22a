//! Selection store for the file tree.
//!
//! Membership in `selected` is the only source of truth for "is this entry
//! selected"; rendered highlighting is derived from it.

use std::collections::BTreeSet;

/// Selected entry identifiers plus the most recently selected one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionStore {
    selected: BTreeSet<String>,
    last_selected: Option<String>,
}

impl SelectionStore {
    /// Empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
            last_selected: None,
        }
    }

    /// Replace the selection with `id` alone.
    pub fn select_only(&mut self, id: &str) {
        self.selected.clear();
        self.selected.insert(id.to_string());
        self.last_selected = Some(id.to_string());
    }

    /// Add `id` when absent, remove it when present.
    pub fn toggle(&mut self, id: &str) {
        if self.selected.remove(id) {
            if self.last_selected.as_deref() == Some(id) {
                self.last_selected = None;
            }
        } else {
            self.selected.insert(id.to_string());
            self.last_selected = Some(id.to_string());
        }
    }

    /// Drop `id` without touching the rest of the selection.
    pub fn remove(&mut self, id: &str) {
        self.selected.remove(id);
        if self.last_selected.as_deref() == Some(id) {
            self.last_selected = None;
        }
    }

    /// Keep only identifiers accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.selected.retain(|id| keep(id));
        if let Some(last) = &self.last_selected
            && !self.selected.contains(last)
        {
            self.last_selected = None;
        }
    }

    /// Empty the selection and the last-selected pointer.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_selected = None;
    }

    /// Current selection; ordering carries no meaning.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The single selected identifier, when exactly one is selected.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        if self.selected.len() == 1 {
            self.selected.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Most recently selected identifier.
    #[must_use]
    pub fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn select_only_resets_to_singleton() {
        let mut store = SelectionStore::new();
        store.toggle("a");
        store.toggle("b");
        store.select_only("c");
        assert_eq!(store.selected(), vec!["c".to_string()]);
        assert_eq!(store.last_selected(), Some("c"));
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut store = SelectionStore::new();
        store.toggle("a");
        assert!(store.is_selected("a"));
        assert_eq!(store.last_selected(), Some("a"));
        store.toggle("a");
        assert!(store.is_empty());
        assert_eq!(store.last_selected(), None);
    }

    #[test]
    fn toggling_other_entry_keeps_last_selected() {
        let mut store = SelectionStore::new();
        store.toggle("a");
        store.toggle("b");
        store.toggle("a");
        assert_eq!(store.selected(), vec!["b".to_string()]);
        assert_eq!(store.last_selected(), Some("b"));
    }

    #[test]
    fn selection_matches_model_for_mixed_sequences() {
        let ops: [(bool, &str); 9] = [
            (false, "a"),
            (true, "b"),
            (true, "c"),
            (true, "b"),
            (true, "d"),
            (false, "e"),
            (true, "e"),
            (true, "f"),
            (true, "a"),
        ];
        let mut store = SelectionStore::new();
        let mut model = BTreeSet::new();
        for (additive, id) in ops {
            if additive {
                store.toggle(id);
                if !model.remove(id) {
                    model.insert(id);
                }
            } else {
                store.select_only(id);
                model.clear();
                model.insert(id);
            }
            let expected: Vec<String> = model.iter().map(ToString::to_string).collect();
            assert_eq!(store.selected(), expected);
        }
    }

    #[test]
    fn clear_and_retain_prune_last_selected() {
        let mut store = SelectionStore::new();
        store.toggle("keep");
        store.toggle("drop");
        store.retain(|id| id != "drop");
        assert_eq!(store.selected(), vec!["keep".to_string()]);
        assert_eq!(store.last_selected(), None);
        assert_eq!(store.single(), Some("keep"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
