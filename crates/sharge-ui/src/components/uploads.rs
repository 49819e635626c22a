//! Drop zone / file picker and the upload queue table.

use crate::features::uploads::state::{QUEUE_COLUMNS, UploadItem, UploadQueue, UploadStatus};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use wasm_bindgen::JsCast;
use web_sys::{File, FileList, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DropZoneProps {
    /// Files from either a drop or the picker, in their original order.
    pub on_files: Callback<Vec<File>>,
}

#[function_component(DropZone)]
pub(crate) fn drop_zone(props: &DropZoneProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let file_input = use_node_ref();
    let drag_over = use_state(|| false);

    let on_drop = {
        let drag_over = drag_over.clone();
        let on_files = props.on_files.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_over.set(false);
            if let Some(files) = event.data_transfer().and_then(|dt| dt.files()) {
                emit_files(&on_files, &files);
            }
        })
    };
    let on_drag_over = {
        let drag_over = drag_over.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_over.set(true);
        })
    };
    let on_drag_leave = {
        let drag_over = drag_over.clone();
        Callback::from(move |_event: DragEvent| drag_over.set(false))
    };
    let on_pick = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let on_change = {
        let on_files = props.on_files.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if let Some(files) = input.files() {
                emit_files(&on_files, &files);
            }
            input.set_value("");
        })
    };

    html! {
        <>
            <input
                ref={file_input}
                class="file-input-hidden"
                type="file"
                multiple=true
                onchange={on_change}
            />
            <div
                class={classes!("drop-zone", (*drag_over).then_some("drag-over"))}
                role="button"
                onclick={on_pick}
                ondrop={on_drop}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
            >
                <p>{bundle.text("uploads.drop_help", "")}</p>
            </div>
        </>
    }
}

fn emit_files(on_files: &Callback<Vec<File>>, list: &FileList) {
    let files: Vec<File> = (0..list.length()).filter_map(|idx| list.get(idx)).collect();
    if !files.is_empty() {
        on_files.emit(files);
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct UploadQueueTableProps {
    pub queue: UploadQueue,
}

#[function_component(UploadQueueTable)]
pub(crate) fn upload_queue_table(props: &UploadQueueTableProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    if !props.queue.visible {
        return html! {};
    }

    html! {
        <table class="upload-queue">
            <thead>
                <tr>
                    {for QUEUE_COLUMNS.iter().map(|key| html! { <th>{bundle.text(key, "")}</th> })}
                </tr>
            </thead>
            <tbody>
                {for props.queue.items.iter().map(|item| render_row(item, bundle))}
            </tbody>
        </table>
    }
}

fn render_row(item: &UploadItem, bundle: TranslationBundle) -> Html {
    let state = match item.status {
        UploadStatus::Waiting => "waiting",
        UploadStatus::Uploading => "uploading",
        UploadStatus::Succeeded => "succeeded",
        UploadStatus::Failed => "failed",
        UploadStatus::Errored => "errored",
    };
    let label = item.label(bundle);
    // Cell order follows QUEUE_COLUMNS.
    html! {
        <tr key={item.id.to_string()} class={classes!("upload-row", state)}>
            <td>{item.name.clone()}</td>
            <td>{label}</td>
            <td>
                <div class="progress">
                    <div class="progress-bar" style={format!("width: {}", item.bar_width())}></div>
                </div>
            </td>
        </tr>
    }
}
