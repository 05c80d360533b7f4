//! Translation settings
//!
//! Read from the environment by [`TranslationConfig::from_env`]:
//!
//! * `TRANSLATE_BASE_URL` - base address of the translation server
//! * `TRANSLATE_TIMEOUT_SECS` - per-request timeout in seconds
//! * `DOCKER_ENV` - when `true` and no base URL is given, use the compose service name

use std::time::Duration;

use crate::error::ConfigError;
use crate::language::{Language, default_languages};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";
pub const DOCKER_BASE_URL: &str = "http://translate:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the translation client and registry
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub languages: Vec<Language>,
    /// Language pair and text used by the availability probe
    pub probe_source: String,
    pub probe_target: String,
    pub probe_text: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            languages: default_languages(),
            probe_source: "ru".to_string(),
            probe_target: "en".to_string(),
            probe_text: "test".to_string(),
        }
    }
}

impl TranslationConfig {
    /// Build a config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup("TRANSLATE_BASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => config.base_url = url.trim().to_string(),
            None => {
                if lookup("DOCKER_ENV").as_deref() == Some("true") {
                    config.base_url = DOCKER_BASE_URL.to_string();
                }
            }
        }

        if let Some(raw) = lookup("TRANSLATE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "TRANSLATE_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "TRANSLATE_TIMEOUT_SECS".to_string(),
                    value: raw,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }
}
