//! Single-field prompt used for rename and make-directory.

use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PromptModalProps {
    pub title: String,
    pub label: String,
    #[prop_or_default]
    pub initial: String,
    pub on_submit: Callback<String>,
    pub on_cancel: Callback<()>,
}

#[function_component(PromptModal)]
pub(crate) fn prompt_modal(props: &PromptModalProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let value = use_state(|| props.initial.clone());

    let on_input = {
        let value = value.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            {
                value.set(input.value());
            }
        })
    };
    let submit = {
        let value = value.clone();
        let on_submit = props.on_submit.clone();
        move || on_submit.emit((*value).clone())
    };
    let on_apply = {
        let submit = submit.clone();
        Callback::from(move |_: MouseEvent| submit())
    };
    let on_keydown = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |event: KeyboardEvent| match event.key().as_str() {
            "Enter" => {
                event.prevent_default();
                submit();
            }
            "Escape" => on_cancel.emit(()),
            _ => {}
        })
    };
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true" aria-label={props.title.clone()}>
                <h3>{props.title.clone()}</h3>
                <label>
                    <span>{props.label.clone()}</span>
                    <input
                        type="text"
                        value={(*value).clone()}
                        oninput={on_input}
                        onkeydown={on_keydown}
                    />
                </label>
                <div class="modal-actions">
                    <button class="ghost" type="button" onclick={on_cancel}>{t("modal.cancel")}</button>
                    <button class="solid" type="button" onclick={on_apply}>{t("modal.apply")}</button>
                </div>
            </div>
        </div>
    }
}
