//! JSON message catalogs for every label and notification text.

use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    #[default]
    En,
    /// German.
    De,
}

impl LocaleCode {
    #[must_use]
    /// All supported locales in display order.
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::De]
    }

    /// Two-letter code for the locale.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Map an arbitrary browser language tag to a supported locale, falling back to None.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split('-').next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Message catalog for one locale.
///
/// Catalogs are parsed once per process; a bundle is only a locale handle, so it
/// is cheap to copy into every dispatcher and component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslationBundle {
    /// Locale whose catalog is consulted first.
    pub locale: LocaleCode,
}

impl TranslationBundle {
    /// Bundle for `locale`; missing keys resolve against the English catalog.
    #[must_use]
    pub const fn new(locale: LocaleCode) -> Self {
        Self { locale }
    }

    /// Resolve a dotted key (`toast.rename_success`), then English, then `default`.
    #[must_use]
    pub fn text(&self, key: &str, default: &str) -> String {
        lookup(catalog(self.locale), key)
            .or_else(|| lookup(catalog(DEFAULT_LOCALE), key))
            .map_or_else(|| default.to_string(), ToString::to_string)
    }

    /// Message `key` followed by a detail such as an entry path or request error.
    #[must_use]
    pub fn with_detail(&self, key: &str, detail: impl Display) -> String {
        format!("{} {detail}", self.text(key, ""))
    }
}

static EN_CATALOG: LazyLock<Value> = LazyLock::new(|| parse_catalog(include_str!("../../i18n/en.json")));
static DE_CATALOG: LazyLock<Value> = LazyLock::new(|| parse_catalog(include_str!("../../i18n/de.json")));

fn catalog(locale: LocaleCode) -> &'static Value {
    match locale {
        LocaleCode::En => &EN_CATALOG,
        LocaleCode::De => &DE_CATALOG,
    }
}

fn parse_catalog(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::error!(error = %err, "message catalog is not valid JSON");
        Value::Null
    })
}

fn lookup<'a>(catalog: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(catalog, |node, segment| node.get(segment))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::De);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn lang_tags_map_to_base_locale() {
        assert_eq!(LocaleCode::from_lang_tag("de-AT"), Some(LocaleCode::De));
        assert_eq!(LocaleCode::from_lang_tag("EN-us"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
    }

    #[test]
    fn bundles_load_all_locales() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            assert!(!bundle.text("toast.rename_success", "").is_empty());
            assert!(!bundle.text("uploads.waiting", "").is_empty());
        }
    }

    #[test]
    fn section_keys_resolve_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::De);
        assert_eq!(bundle.text("toast.rename_success", ""), "Umbenennen erfolgreich");
        assert_eq!(bundle.text("toast", "fallback"), "fallback");
        assert_eq!(TranslationBundle::default().locale, DEFAULT_LOCALE);
    }

    #[test]
    fn detail_is_appended_after_message() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(
            bundle.with_detail("toast.delete_success", "docs/a.md"),
            "Delete successful: docs/a.md"
        );
    }

    #[test]
    fn english_messages_match_notifier_copy() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(bundle.text("toast.rename_success", ""), "Rename successful");
        assert_eq!(bundle.text("toast.rename_unchanged", ""), "Name unchanged.");
    }
}
