//! Recursive tree view; highlighting is derived from the selection store.

use crate::features::filetree::selection::SelectionStore;
use crate::features::filetree::state::FileNode;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct FileTreeProps {
    pub nodes: Vec<FileNode>,
    pub selection: SelectionStore,
    /// Emits `(id, additive)` for each entry click.
    pub on_select: Callback<(String, bool)>,
}

#[function_component(FileTree)]
pub(crate) fn file_tree(props: &FileTreeProps) -> Html {
    html! {
        <ul class="filetree" role="tree">
            {render_nodes(&props.nodes, &props.selection, &props.on_select)}
        </ul>
    }
}

fn render_nodes(
    nodes: &[FileNode],
    selection: &SelectionStore,
    on_select: &Callback<(String, bool)>,
) -> Html {
    nodes
        .iter()
        .map(|node| render_node(node, selection, on_select))
        .collect()
}

fn render_node(
    node: &FileNode,
    selection: &SelectionStore,
    on_select: &Callback<(String, bool)>,
) -> Html {
    let selected = selection.is_selected(&node.path);
    let onclick = {
        let on_select = on_select.clone();
        let id = node.path.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_select.emit((id.clone(), event.ctrl_key() || event.meta_key()));
        })
    };
    let class = classes!(
        "entry",
        if node.is_dir { "folder" } else { "file" },
        selected.then_some("selected")
    );

    if node.is_dir {
        html! {
            <li class={class} data-path={node.path.clone()} aria-selected={selected.to_string()}>
                <details>
                    <summary onclick={onclick}>
                        <span class="name">{node.name.clone()}</span>
                    </summary>
                    <ul>{render_nodes(node.child_nodes(), selection, on_select)}</ul>
                </details>
            </li>
        }
    } else {
        html! {
            <li class={class} data-path={node.path.clone()} aria-selected={selected.to_string()} onclick={onclick}>
                <span class="name">{node.name.clone()}</span>
                <span class="size">{node.size.clone()}</span>
            </li>
        }
    }
}
