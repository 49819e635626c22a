//! Toolbar whose buttons mirror the derived action affordances.

use crate::features::filetree::affordances::{ActionAffordances, Affordance};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ActionBarProps {
    pub affordances: ActionAffordances,
    pub on_rename: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_mkdir: Callback<()>,
}

#[function_component(ActionBar)]
pub(crate) fn action_bar(props: &ActionBarProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let derived = &props.affordances;

    html! {
        <div class="action-bar" role="toolbar">
            {link_action(&derived.open, t("toolbar.open"), "open")}
            {link_action(&derived.download, t("toolbar.download"), "download")}
            {button_action(&derived.rename, t("toolbar.rename"), "rename", &props.on_rename)}
            {button_action(&derived.delete, t("toolbar.delete"), "delete", &props.on_delete)}
            <button class="mkdir" type="button" onclick={props.on_mkdir.reform(|_| ())}>
                {t("toolbar.mkdir")}
            </button>
        </div>
    }
}

fn link_action(affordance: &Affordance, label: String, class: &'static str) -> Html {
    match affordance.href.as_ref().filter(|_| affordance.enabled) {
        Some(href) => html! {
            <a class={classes!("action", class)} href={href.clone()}>{label}</a>
        },
        None => html! {
            <a class={classes!("action", class, "disabled")} aria-disabled="true" tabindex="-1">
                {label}
            </a>
        },
    }
}

fn button_action(
    affordance: &Affordance,
    label: String,
    class: &'static str,
    on_click: &Callback<()>,
) -> Html {
    html! {
        <button
            class={classes!("action", class)}
            type="button"
            disabled={!affordance.enabled}
            onclick={on_click.reform(|_| ())}
        >
            {label}
        </button>
    }
}
