//! Translation orchestrator
//!
//! `TranslationService` is the entry point HTTP handlers call. For one
//! `(text, source, target)` request it:
//!
//! 1. returns [`TranslateError::EmptyInput`] for empty text, touching neither cache nor network;
//! 2. serves a cached translation if there is one;
//! 3. rejects a target language missing from the registry;
//! 4. delegates to the backend and caches the result on success only.
//!
//! The cache is consulted before the registry so that translations already
//! served stay servable even if the registry is narrowed.
//!
//! Concurrent misses on the same key may each reach the backend. Translations
//! are deterministic, so the cache simply keeps the last write.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::TranslationBackend;
use crate::cache::{CacheKey, TranslationCache};
use crate::client::HttpTranslationClient;
use crate::config::TranslationConfig;
use crate::error::{ConfigError, TranslateError, TranslateResult};
use crate::language::{Language, LanguageRegistry};

pub struct TranslationService {
    registry: LanguageRegistry,
    cache: Arc<TranslationCache>,
    backend: Arc<dyn TranslationBackend>,
}

impl TranslationService {
    /// Assemble a service from its parts.
    ///
    /// The cache is passed in so callers control its lifetime (and tests can
    /// inspect it).
    pub fn new(
        registry: LanguageRegistry,
        cache: Arc<TranslationCache>,
        backend: Arc<dyn TranslationBackend>,
    ) -> Self {
        Self {
            registry,
            cache,
            backend,
        }
    }

    /// Build a service talking to the HTTP translation server, with an empty cache.
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ConfigError> {
        let client = HttpTranslationClient::new(config)?;
        Ok(Self::new(
            LanguageRegistry::new(config.languages.clone()),
            Arc::new(TranslationCache::new()),
            Arc::new(client),
        ))
    }

    pub fn is_language_supported(&self, code: &str) -> bool {
        self.registry.is_supported(code)
    }

    pub fn supported_languages(&self) -> &[Language] {
        self.registry.list_supported()
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn backend(&self) -> &Arc<dyn TranslationBackend> {
        &self.backend
    }

    /// Translate `text` from `source_lang` to `target_lang`.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String> {
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let key = CacheKey::new(text, source_lang, target_lang);
        if let Some(cached) = self.cache.get(&key) {
            debug!(source_lang, target_lang, "translation cache hit");
            return Ok(cached);
        }

        if !self.registry.is_supported(target_lang) {
            debug!(target_lang, "unsupported target language");
            return Err(TranslateError::UnsupportedLanguage(target_lang.to_string()));
        }

        debug!(
            source_lang,
            target_lang,
            backend = self.backend.backend_name(),
            "translation cache miss"
        );

        match self.backend.translate(text, source_lang, target_lang).await {
            Ok(translated) => {
                self.cache.put(key, translated.clone());
                Ok(translated)
            }
            Err(err) => {
                warn!(
                    source_lang,
                    target_lang,
                    kind = err.kind(),
                    error = %err,
                    "translation failed"
                );
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("languages", &self.registry.len())
            .field("cached", &self.cache.len())
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}
