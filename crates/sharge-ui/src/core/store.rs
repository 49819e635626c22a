//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store so the tree, upload rows and toasts
//!   re-render from a single source.
//! - Reducers are plain functions over the slices so they run off-browser.

use crate::core::error::RequestError;
use crate::core::notify::{Notification, ToastQueue};
use crate::features::filetree::state::TreeState;
use crate::features::uploads::state::{UploadEvent, UploadQueue, apply_upload_event};
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Rendered tree and its selection.
    pub tree: TreeState,
    /// Upload queue rows.
    pub uploads: UploadQueue,
    /// Live toasts.
    pub toasts: ToastQueue,
}

impl AppStore {
    /// Store seeded with a listing and toast lifetime.
    #[must_use]
    pub fn with_tree(tree: TreeState, toast_timeout_ms: u32) -> Self {
        Self {
            tree,
            uploads: UploadQueue::default(),
            toasts: ToastQueue::new(toast_timeout_ms),
        }
    }

    /// Display a notification as a toast created at `now_ms`.
    pub fn push_toast(&mut self, notification: Notification, now_ms: f64) -> u64 {
        self.toasts.expire(now_ms);
        self.toasts.push(notification, now_ms)
    }

    /// Apply an upload pipeline transition.
    pub fn apply_upload(&mut self, event: UploadEvent) {
        apply_upload_event(&mut self.uploads, event);
    }

    /// Drop the row of an entry the server deleted.
    pub fn remove_entry(&mut self, id: &str) {
        self.tree.remove_entry(id);
    }

    /// Apply one settled delete; rejected entries stay rendered.
    pub fn settle_delete(&mut self, id: &str, result: Result<(), &RequestError>) {
        if result.is_ok() {
            self.remove_entry(id);
        }
    }

    /// Reset the selection once a multi-delete has fully settled.
    pub fn finish_batch(&mut self) {
        self.tree.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NotificationKind;
    use crate::features::filetree::state::FileNode;

    #[test]
    fn toasts_prune_expired_entries_on_push() {
        let mut store = AppStore::default();
        store.push_toast(Notification::info("first"), 0.0);
        store.push_toast(Notification::error("second"), 6_000.0);
        let toasts = store.toasts.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
    }

    #[test]
    fn upload_events_reveal_queue() {
        let mut store = AppStore::default();
        assert!(!store.uploads.visible);
        store.apply_upload(UploadEvent::Opened);
        assert!(store.uploads.visible);
    }

    #[test]
    fn removing_entries_updates_tree() {
        let tree = TreeState::from_nodes(vec![FileNode {
            path: "a.txt".into(),
            name: "a.txt".into(),
            size: "1 B".into(),
            is_dir: false,
            children: None,
        }]);
        let mut store = AppStore::with_tree(tree, 1_000);
        store.tree.click("a.txt", false);
        store.remove_entry("a.txt");
        assert!(store.tree.is_empty());
        assert!(store.tree.selection().is_empty());
    }

    #[test]
    fn finished_delete_batch_clears_survivors_from_selection() {
        let node = |path: &str| FileNode {
            path: path.into(),
            name: path.into(),
            size: "1 B".into(),
            is_dir: false,
            children: None,
        };
        let tree = TreeState::from_nodes(vec![node("a.txt"), node("b.txt")]);
        let mut store = AppStore::with_tree(tree, 1_000);
        store.tree.click("a.txt", true);
        store.tree.click("b.txt", true);
        store.settle_delete("a.txt", Ok(()));
        store.settle_delete("b.txt", Err(&RequestError::transport("offline")));
        assert_eq!(store.tree.selection().selected(), vec!["b.txt".to_string()]);
        store.finish_batch();
        assert!(store.tree.selection().is_empty());
        assert!(store.tree.entry("b.txt").is_some());
        assert!(store.tree.entry("a.txt").is_none());
    }
}
