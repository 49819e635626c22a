//! Persistence and environment helpers for the app shell.

use crate::core::config::UiConfig;
use crate::features::filetree::state::{FileNode, parse_listing};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};

pub(crate) const BASE_URL_KEY: &str = "sharge.base_url";
pub(crate) const LOCALE_KEY: &str = "sharge.locale";
pub(crate) const LOG_LEVEL_KEY: &str = "sharge.log_level";
pub(crate) const LISTING_ELEMENT_ID: &str = "filetree-data";

pub(crate) fn load_config() -> UiConfig {
    let base_url = LocalStorage::get::<String>(BASE_URL_KEY).ok();
    let stored_locale = LocalStorage::get::<String>(LOCALE_KEY).ok();
    let browser_language = window().navigator().language();
    let mut config = UiConfig::resolve(
        base_url,
        stored_locale.as_deref(),
        browser_language.as_deref(),
    );
    if let Ok(level) = LocalStorage::get::<String>(LOG_LEVEL_KEY) {
        config.log_level = level;
    }
    config
}

/// Listing embedded by the host page; empty when missing or malformed.
pub(crate) fn load_listing() -> Vec<FileNode> {
    let Some(element) = document().get_element_by_id(LISTING_ELEMENT_ID) else {
        console::warn!("no #filetree-data element; rendering an empty tree");
        return Vec::new();
    };
    let raw = element.text_content().unwrap_or_default();
    match parse_listing(&raw) {
        Ok(nodes) => nodes,
        Err(err) => {
            console::error!(format!("invalid file listing: {err}"));
            Vec::new()
        }
    }
}

pub(crate) fn reload_view() {
    if let Err(err) = window().location().reload() {
        console::error!("failed to reload view", err);
    }
}

pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}
