use crate::core::notify::{NotificationKind, Toast};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

/// Stacked toasts; each one dismisses itself when its own expiry passes.
#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    {
        let toasts = props.toasts.clone();
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                let now = js_sys::Date::now();
                let handles: Vec<Timeout> = list
                    .iter()
                    .map(|toast| {
                        let on_dismiss = on_dismiss.clone();
                        let id = toast.id;
                        Timeout::new(toast.remaining_ms(now), move || on_dismiss.emit(id))
                    })
                    .collect();
                move || drop(handles)
            },
            toasts,
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| render_toast(
                toast,
                props.on_dismiss.clone(),
                &t("toast.title"),
                t("toast.dismiss"),
            ))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: Callback<u64>, title: &str, dismiss_label: String) -> Html {
    let class = match toast.kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
    };
    let id = toast.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));

    html! {
        <div class={classes!("toast", class)} role="status">
            <div class="toast-header">
                <strong>{title}</strong>
                <button class="ghost" aria-label={dismiss_label} onclick={on_close}>{"✕"}</button>
            </div>
            <div class="toast-body">{toast.message.clone()}</div>
        </div>
    }
}
