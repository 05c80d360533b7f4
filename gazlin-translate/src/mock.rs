//! Mock translation backend for testing
//!
//! A deterministic, network-free backend. It counts every call it receives
//! and can be switched off at runtime to simulate an unreachable server,
//! which is how the cache and failure paths are exercised in tests.
//!
//! # Example
//!
//! ```ignore
//! use gazlin_translate::{MockBackend, MockMode, TranslationBackend};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockBackend::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(result, "hello_fr");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use crate::backend::TranslationBackend;
use crate::error::{TranslateError, TranslateResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append target suffix: "hello" → "hello_fr"
    Suffix,

    /// Predefined mappings: (text, target) → translation.
    /// Unknown pairs fall back to `Suffix`.
    Mappings(HashMap<(String, String), String>),

    /// Always fail with this error
    Error(TranslateError),

    /// Return an empty translation, as a misbehaving server would
    Empty,
}

/// Mock backend that simulates the translation server
#[derive(Debug)]
pub struct MockBackend {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: AtomicUsize,
    available: AtomicBool,
}

impl MockBackend {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Create a mock with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Build a mapping mock from `(text, target, translation)` triples
    pub fn with_mappings<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    ) -> Self {
        let map = entries
            .into_iter()
            .map(|(text, target, translated)| {
                ((text.to_string(), target.to_string()), translated.to_string())
            })
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// Number of translate/availability calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Simulate the server going away (`false`) or coming back (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(err) => Err(err.clone()),
            MockMode::Empty => Err(TranslateError::TranslationFailed(
                "empty translation received".to_string(),
            )),
        }
    }

    fn ensure_available(&self) -> TranslateResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TranslateError::ServiceUnavailable(
                "mock backend disabled".to_string(),
            ))
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.ensure_available()?;
        self.apply_translation(text, target_lang)
    }

    async fn check_availability(&self) -> TranslateResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.ensure_available()
    }

    fn backend_name(&self) -> &str {
        "Mock Backend"
    }
}
