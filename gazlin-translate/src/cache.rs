//! In-memory translation cache.
//! Key: (source language, target language, source text), compared exactly.
//! No capacity bound and no expiry: the catalog text corpus is small and
//! entries live for the life of the process.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Composite cache key. No trimming or case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source_lang: String,
    pub target_lang: String,
    pub text: String,
}

impl CacheKey {
    pub fn new(text: &str, source_lang: &str, target_lang: &str) -> Self {
        Self {
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            text: text.to_string(),
        }
    }
}

/// Concurrency-safe memo of successful translations.
///
/// Concurrent `put`s on the same key resolve last-write-wins.
#[derive(Debug, Default)]
pub struct TranslationCache {
    inner: RwLock<HashMap<CacheKey, String>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached translation.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.inner.read().get(key).cloned()
    }

    /// Insert a translation, replacing any previous value for the key.
    pub fn put(&self, key: CacheKey, translated_text: String) {
        self.inner.write().insert(key, translated_text);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
