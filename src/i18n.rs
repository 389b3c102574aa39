//! Built-in UI labels and their per-locale translations.

use std::collections::HashMap;

/// Keys for labels the tab layer renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    /// Title of the capture manager tab
    CaptureManager,
}

impl LabelKey {
    fn builtin(self, locale: &str) -> &'static str {
        match (self, locale) {
            (LabelKey::CaptureManager, "de") => "Aufnahme-Manager",
            (LabelKey::CaptureManager, "fr") => "Gestionnaire de captures",
            (LabelKey::CaptureManager, _) => "Capture Manager",
        }
    }
}

/// Resolves `LabelKey`s to strings for one locale.
///
/// Only the language part of the tag is used (`de-AT` resolves as `de`);
/// unknown languages fall back to English.
#[derive(Debug, Clone)]
pub struct Localizer {
    locale: String,
    overrides: HashMap<LabelKey, String>,
}

impl Localizer {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Replace the text for `key`, e.g. from a user translation file.
    pub fn with_label(mut self, key: LabelKey, text: impl Into<String>) -> Self {
        self.overrides.insert(key, text.into());
        self
    }

    pub fn label(&self, key: LabelKey) -> String {
        if let Some(text) = self.overrides.get(&key) {
            return text.clone();
        }
        let language = self
            .locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        key.builtin(&language).to_string()
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new("en")
    }
}
