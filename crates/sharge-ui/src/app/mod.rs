//! Root component wiring the tree, toolbar, uploads and toasts.

mod preferences;

use crate::components::action_bar::ActionBar;
use crate::components::filetree::FileTree;
use crate::components::modals::PromptModal;
use crate::components::toast::ToastHost;
use crate::components::uploads::{DropZone, UploadQueueTable};
use crate::core::logging::{ConsoleLevel, init_logging};
use crate::core::notify::{
    Notification, NotificationReceiver, NotificationSender, Notifier, ToastQueue,
    notification_channel,
};
use crate::core::store::AppStore;
use crate::features::filetree::actions::{ActionOutcome, BatchDispatcher};
use crate::features::uploads::pipeline::{UploadPipeline, UploadSink};
use crate::i18n::TranslationBundle;
use crate::services::api::ApiClient;
use futures::StreamExt;
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::document;
use preferences::{load_config, load_listing, now_ms, reload_view};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{CustomEvent, File};
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

type AppNotifier = Rc<NotificationSender>;

/// Open prompt, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Prompt {
    Rename { old_path: String },
    MakeDirectory,
}

struct Services {
    notifier: AppNotifier,
    inbox: RefCell<Option<NotificationReceiver>>,
    dispatcher: Rc<BatchDispatcher<ApiClient, AppNotifier>>,
    uploads: Rc<UploadPipeline<ApiClient, AppNotifier>>,
}

#[function_component(FileManagerApp)]
fn file_manager_app() -> Html {
    let config = use_memo(|_| load_config(), ());
    let bundle = use_memo(|locale| TranslationBundle::new(*locale), config.locale);
    let services = {
        let config = config.clone();
        let bundle = bundle.clone();
        use_memo(
            move |_| {
                let (tx, rx) = notification_channel();
                let notifier = Rc::new(tx);
                let endpoints = config.endpoints();
                Services {
                    notifier: notifier.clone(),
                    inbox: RefCell::new(Some(rx)),
                    dispatcher: Rc::new(BatchDispatcher::new(
                        ApiClient::new(),
                        notifier.clone(),
                        endpoints.clone(),
                        *bundle,
                    )),
                    uploads: Rc::new(UploadPipeline::new(
                        ApiClient::new(),
                        notifier,
                        endpoints,
                        *bundle,
                    )),
                }
            },
            (),
        )
    };
    let dispatch = Dispatch::<AppStore>::new();
    let prompt = use_state(|| None::<Prompt>);

    {
        let dispatch = dispatch.clone();
        let services = services.clone();
        let timeout_ms = config.toast_timeout_ms;
        use_effect_with_deps(
            move |_| {
                let nodes = load_listing();
                dispatch.reduce_mut(|store| {
                    store.tree.set_nodes(nodes);
                    store.toasts = ToastQueue::new(timeout_ms);
                });
                if let Some(mut inbox) = services.inbox.borrow_mut().take() {
                    spawn_local(async move {
                        while let Some(notification) = inbox.next().await {
                            dispatch.reduce_mut(|store| {
                                store.push_toast(notification, now_ms());
                            });
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    {
        let notifier = services.notifier.clone();
        use_effect_with_deps(
            move |_| {
                let listener = document().body().map(|body| {
                    EventListener::new(&body, "showMessage", move |event| {
                        match show_message_text(event) {
                            Some(text) => notifier.notify(Notification::info(text)),
                            None => console::warn!("showMessage event without detail.value"),
                        }
                    })
                });
                move || drop(listener)
            },
            (),
        );
    }

    let tree = use_selector(|store: &AppStore| store.tree.clone());
    let uploads = use_selector(|store: &AppStore| store.uploads.clone());
    let toasts = use_selector(|store: &AppStore| store.toasts.toasts().to_vec());
    let affordances = tree.affordances(&config.endpoints());

    let on_select = {
        let dispatch = dispatch.clone();
        Callback::from(move |(id, additive): (String, bool)| {
            dispatch.reduce_mut(|store| {
                store.tree.click(&id, additive);
            });
        })
    };

    let on_rename = {
        let dispatch = dispatch.clone();
        let services = services.clone();
        let prompt = prompt.clone();
        Callback::from(move |()| {
            let selected = dispatch.get().tree.selection().selected();
            if let Some(old_path) = services.dispatcher.prepare_rename(&selected) {
                prompt.set(Some(Prompt::Rename { old_path }));
            }
        })
    };

    let on_mkdir = {
        let prompt = prompt.clone();
        Callback::from(move |()| prompt.set(Some(Prompt::MakeDirectory)))
    };

    let on_delete = {
        let dispatch = dispatch.clone();
        let services = services.clone();
        Callback::from(move |()| {
            let selected = dispatch.get().tree.selection().selected();
            let dispatcher = services.dispatcher.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                dispatcher
                    .delete(&selected, |id, result| {
                        dispatch.reduce_mut(|store| store.settle_delete(id, result));
                    })
                    .await;
                dispatch.reduce_mut(AppStore::finish_batch);
            });
        })
    };

    let on_prompt_submit = {
        let dispatch = dispatch.clone();
        let services = services.clone();
        let prompt = prompt.clone();
        Callback::from(move |value: String| {
            let Some(current) = (*prompt).clone() else {
                return;
            };
            let dispatcher = services.dispatcher.clone();
            let selected = dispatch.get().tree.selection().selected();
            let prompt = prompt.clone();
            yew::platform::spawn_local(async move {
                let outcome = match current {
                    Prompt::Rename { .. } => dispatcher.rename(&selected, &value).await,
                    Prompt::MakeDirectory => dispatcher.make_directory(&value).await,
                };
                if outcome == ActionOutcome::Reload {
                    reload_view();
                } else if outcome.dismisses_prompt() {
                    prompt.set(None);
                }
            });
        })
    };

    let on_prompt_cancel = {
        let prompt = prompt.clone();
        Callback::from(move |()| prompt.set(None))
    };

    let on_files = {
        let dispatch = dispatch.clone();
        let services = services.clone();
        Callback::from(move |files: Vec<File>| {
            let pipeline = services.uploads.clone();
            let dispatch = dispatch.clone();
            let sink: UploadSink = Rc::new(move |event| {
                dispatch.reduce_mut(|store| store.apply_upload(event));
            });
            yew::platform::spawn_local(async move {
                pipeline.run(files, sink).await;
            });
        })
    };

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| {
            dispatch.reduce_mut(|store| store.toasts.dismiss(id));
        })
    };

    let modal = match &*prompt {
        Some(Prompt::Rename { old_path }) => html! {
            <PromptModal
                title={bundle.text("modal.rename_title", "")}
                label={bundle.text("modal.rename_label", "")}
                initial={old_path.clone()}
                on_submit={on_prompt_submit.clone()}
                on_cancel={on_prompt_cancel.clone()}
            />
        },
        Some(Prompt::MakeDirectory) => html! {
            <PromptModal
                title={bundle.text("modal.mkdir_title", "")}
                label={bundle.text("modal.mkdir_label", "")}
                on_submit={on_prompt_submit.clone()}
                on_cancel={on_prompt_cancel.clone()}
            />
        },
        None => html! {},
    };

    html! {
        <ContextProvider<TranslationBundle> context={*bundle}>
            <div class="file-manager">
                <ActionBar
                    affordances={affordances}
                    on_rename={on_rename}
                    on_delete={on_delete}
                    on_mkdir={on_mkdir}
                />
                <FileTree
                    nodes={tree.nodes().to_vec()}
                    selection={tree.selection().clone()}
                    on_select={on_select}
                />
                <DropZone on_files={on_files} />
                <UploadQueueTable queue={(*uploads).clone()} />
                {modal}
                <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
            </div>
        </ContextProvider<TranslationBundle>>
    }
}

fn show_message_text(event: &web_sys::Event) -> Option<String> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    js_sys::Reflect::get(&detail, &JsValue::from_str("value"))
        .ok()?
        .as_string()
}

fn emit_to_console(level: ConsoleLevel, line: &str) {
    match level {
        ConsoleLevel::Debug => console::debug!(line),
        ConsoleLevel::Info => console::log!(line),
        ConsoleLevel::Warn => console::warn!(line),
        ConsoleLevel::Error => console::error!(line),
    }
}

/// Mount the file manager under `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&load_config().log_level, emit_to_console) {
        console::error!(format!("failed to install tracing subscriber: {err}"));
    }
    if let Some(root) = document().get_element_by_id("root") {
        yew::Renderer::<FileManagerApp>::with_root(root).render();
    } else {
        yew::Renderer::<FileManagerApp>::new().render();
    }
}
