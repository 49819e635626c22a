//! Rendered file tree and pure state transformations for testing outside wasm.

use crate::core::endpoints::Endpoints;
use crate::features::filetree::affordances::{ActionAffordances, derive_affordances};
use crate::features::filetree::selection::SelectionStore;
use serde::Deserialize;
use std::collections::HashMap;
use std::rc::Rc;

/// Listing node supplied by the host page (server `FileInfo` shape).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileNode {
    /// Normalized path relative to the shared root; unique within the tree.
    pub path: String,
    /// Display name.
    pub name: String,
    /// Preformatted size label (`-` for folders).
    #[serde(default)]
    pub size: String,
    /// Whether the node is a folder.
    #[serde(default)]
    pub is_dir: bool,
    /// Child nodes for folders.
    #[serde(default)]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Child nodes (empty for files and unexpanded folders).
    #[must_use]
    pub fn child_nodes(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Flattened entry used for selection validation and affordance lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Entry identifier (path).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the entry is a folder.
    pub is_container: bool,
    /// Identifier of the parent folder, if any.
    pub parent: Option<String>,
}

/// Current tree slice stored in the app state.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TreeState {
    nodes: Vec<FileNode>,
    by_id: HashMap<String, Rc<Entry>>,
    selection: SelectionStore,
}

impl TreeState {
    /// Build a tree from a listing.
    #[must_use]
    pub fn from_nodes(nodes: Vec<FileNode>) -> Self {
        let mut state = Self::default();
        state.set_nodes(nodes);
        state
    }

    /// Replace the listing; selections that are no longer rendered are dropped.
    pub fn set_nodes(&mut self, nodes: Vec<FileNode>) {
        let mut by_id = HashMap::new();
        index_nodes(&nodes, None, &mut by_id);
        self.nodes = nodes;
        self.by_id = by_id;
        let by_id = &self.by_id;
        self.selection.retain(|id| by_id.contains_key(id));
    }

    /// Nested listing in display order.
    #[must_use]
    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    /// Look up a rendered entry.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<Rc<Entry>> {
        self.by_id.get(id).cloned()
    }

    /// Whether `id` is a rendered folder; `None` when not rendered.
    #[must_use]
    pub fn is_container(&self, id: &str) -> Option<bool> {
        self.by_id.get(id).map(|entry| entry.is_container)
    }

    /// Number of rendered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Plain click selects only `id`; a ctrl/meta click toggles it.
    ///
    /// Returns `false` (and leaves the selection untouched) for unrendered ids.
    pub fn click(&mut self, id: &str, additive: bool) -> bool {
        if !self.by_id.contains_key(id) {
            tracing::debug!(id, "ignoring click on unrendered entry");
            return false;
        }
        if additive {
            self.selection.toggle(id);
        } else {
            self.selection.select_only(id);
        }
        true
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove an entry row (and, for folders, its descendants).
    pub fn remove_entry(&mut self, id: &str) {
        if self.by_id.remove(id).is_none() {
            return;
        }
        let prefix = format!("{id}/");
        self.by_id.retain(|path, _| !path.starts_with(&prefix));
        remove_node(&mut self.nodes, id);
        let by_id = &self.by_id;
        self.selection.retain(|path| by_id.contains_key(path));
    }

    /// Derived action affordances for the current selection.
    #[must_use]
    pub fn affordances(&self, endpoints: &Endpoints) -> ActionAffordances {
        derive_affordances(&self.selection, |id| self.is_container(id), endpoints)
    }
}

fn index_nodes(nodes: &[FileNode], parent: Option<&str>, by_id: &mut HashMap<String, Rc<Entry>>) {
    for node in nodes {
        by_id.insert(
            node.path.clone(),
            Rc::new(Entry {
                id: node.path.clone(),
                name: node.name.clone(),
                is_container: node.is_dir,
                parent: parent.map(ToString::to_string),
            }),
        );
        index_nodes(node.child_nodes(), Some(&node.path), by_id);
    }
}

fn remove_node(nodes: &mut Vec<FileNode>, id: &str) -> bool {
    let before = nodes.len();
    nodes.retain(|node| node.path != id);
    if nodes.len() != before {
        return true;
    }
    nodes.iter_mut().any(|node| {
        node.children
            .as_mut()
            .is_some_and(|children| remove_node(children, id))
    })
}

/// Parse the listing JSON embedded by the host page.
///
/// # Errors
/// Returns the `serde_json` error when the payload is not a listing array.
pub fn parse_listing(raw: &str) -> Result<Vec<FileNode>, serde_json::Error> {
    serde_json::from_str(raw)
}
