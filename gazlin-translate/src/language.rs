//! Language registry
//!
//! The set of target languages the service accepts. It is fixed when the
//! registry is built and never changes afterwards, so lookups need no locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A supported language, identified by its lowercase code (e.g. `en`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// The languages the catalog is published in
pub fn default_languages() -> Vec<Language> {
    vec![
        Language::new("ru", "Русский"),
        Language::new("en", "English"),
        Language::new("es", "Español"),
        Language::new("fr", "Français"),
        Language::new("de", "Deutsch"),
    ]
}

/// Read-only lookup of supported language codes
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    // Kept in insertion order for listing; `index` maps code -> position.
    languages: Vec<Language>,
    index: HashMap<String, usize>,
}

impl LanguageRegistry {
    /// Build a registry from a list of languages.
    ///
    /// Duplicate codes keep the first entry.
    pub fn new(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut list = Vec::new();
        let mut index = HashMap::new();
        for language in languages {
            if index.contains_key(&language.code) {
                continue;
            }
            index.insert(language.code.clone(), list.len());
            list.push(language);
        }
        Self {
            languages: list,
            index,
        }
    }

    /// True iff `code` is one of the registered codes (exact, case-sensitive match)
    pub fn is_supported(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All registered languages. Callers must not rely on the order.
    pub fn list_supported(&self) -> &[Language] {
        &self.languages
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.index.get(code).map(|&i| &self.languages[i])
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new(default_languages())
    }
}
