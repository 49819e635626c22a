//! Runtime configuration for the file-manager controller.
//!
//! # Design
//! - Defaults target a same-origin deployment (relative URLs, English, 5 s toasts).
//! - Resolution from stored overrides is pure so it can be tested off-browser.

use crate::core::endpoints::Endpoints;
use crate::core::logging::DEFAULT_LOG_LEVEL;
use crate::core::notify::TOAST_TIMEOUT_MS;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use serde::Deserialize;

/// Controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Base URL prepended to every endpoint (empty for same-origin).
    pub base_url: String,
    /// Locale used for notification and label text.
    pub locale: LocaleCode,
    /// Toast lifetime in milliseconds.
    pub toast_timeout_ms: u32,
    /// Tracing filter directive for console output.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            locale: DEFAULT_LOCALE,
            toast_timeout_ms: TOAST_TIMEOUT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl UiConfig {
    /// Resolve configuration from optional stored overrides and the browser language.
    ///
    /// A stored locale wins over the browser language; unknown tags fall back to the default.
    #[must_use]
    pub fn resolve(
        base_url: Option<String>,
        stored_locale: Option<&str>,
        browser_language: Option<&str>,
    ) -> Self {
        let locale = stored_locale
            .and_then(LocaleCode::from_lang_tag)
            .or_else(|| browser_language.and_then(LocaleCode::from_lang_tag))
            .unwrap_or(DEFAULT_LOCALE);
        let base_url = base_url
            .map(|value| value.trim().to_string())
            .unwrap_or_default();
        Self {
            base_url,
            locale,
            ..Self::default()
        }
    }

    /// Endpoint builder for this configuration.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.clone())
    }
}
