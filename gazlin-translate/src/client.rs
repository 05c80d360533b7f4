//! HTTP client for the external translation server
//!
//! The server exposes a single path-style endpoint:
//!
//! ```text
//! GET {base}/api/v1/{source}/{target}/{escaped text}
//! -> {"translation": "...", "info": {"sourceLanguage": "...", "targetLanguage": "..."}}
//! ```
//!
//! Each call is exactly one request/response cycle, bounded by the configured
//! timeout. There are no retries; failures are classified and handed back to
//! the caller.
//!
//! # Example
//!
//! ```ignore
//! use gazlin_translate::{HttpTranslationClient, TranslationBackend, TranslationConfig};
//!
//! let client = HttpTranslationClient::new(&TranslationConfig::default())?;
//! let result = client.translate("Кварц", "ru", "en").await?;
//! ```

use crate::backend::TranslationBackend;
use crate::config::TranslationConfig;
use crate::error::{ConfigError, TranslateError, TranslateResult};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{debug, warn};

/// Everything except the RFC 3986 unreserved characters is escaped, and
/// spaces come out as `%20` rather than `+`.
const PATH_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Body returned by the translation server
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    // A missing field reads as empty and is rejected like an empty translation.
    #[serde(default)]
    translation: String,
    #[serde(default)]
    info: Option<TranslateInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateInfo {
    #[serde(default)]
    source_language: Option<String>,
    #[serde(default)]
    target_language: Option<String>,
}

/// Client for the path-style translation API
#[derive(Clone)]
pub struct HttpTranslationClient {
    /// HTTP client for async requests, carries the timeout
    client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
    probe_source: String,
    probe_target: String,
    probe_text: String,
}

impl HttpTranslationClient {
    /// Create a client from the given settings
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New client instance
    /// * `Err(ConfigError)` - If the base URL is empty or the HTTP client cannot be built
    pub fn new(config: &TranslationConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Missing("TRANSLATE_BASE_URL".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            probe_source: config.probe_source.clone(),
            probe_target: config.probe_target.clone(),
            probe_text: config.probe_text.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL, escaping every path segment
    pub fn request_url(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        format!(
            "{}/api/v1/{}/{}/{}",
            self.base_url,
            escape_segment(source_lang),
            escape_segment(target_lang),
            escape_segment(text)
        )
    }

    async fn send(&self, url: &str) -> TranslateResult<reqwest::Response> {
        self.client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                let cause = if e.is_timeout() {
                    format!("request timed out: {}", e)
                } else {
                    e.to_string()
                };
                TranslateError::ServiceUnavailable(cause)
            })
    }
}

/// Percent-encode one path segment
pub fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_ESCAPE_SET).to_string()
}

/// Classify a raw response into a translation outcome
fn parse_translation(body: &[u8]) -> TranslateResult<String> {
    let parsed: TranslateResponse = serde_json::from_slice(body)
        .map_err(|e| TranslateError::InvalidResponse(format!("error decoding response: {}", e)))?;

    if parsed.translation.is_empty() {
        return Err(TranslateError::TranslationFailed(
            "empty translation received".to_string(),
        ));
    }

    if let Some(info) = &parsed.info {
        debug!(
            source = info.source_language.as_deref().unwrap_or("?"),
            target = info.target_language.as_deref().unwrap_or("?"),
            "translation server reported languages"
        );
    }

    Ok(parsed.translation)
}

impl std::fmt::Debug for HttpTranslationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranslationClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslationClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String> {
        let url = self.request_url(text, source_lang, target_lang);
        debug!(%url, "sending translation request");

        let response = self.send(&url).await?;
        let status = response.status();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TranslateError::ServiceUnavailable(format!("timed out reading response: {}", e))
            } else {
                TranslateError::InvalidResponse(format!("error reading response body: {}", e))
            }
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "translation server returned an error status");
            return Err(TranslateError::TranslationFailed(format!(
                "unexpected status code: {}",
                status.as_u16()
            )));
        }

        parse_translation(&body)
    }

    async fn check_availability(&self) -> TranslateResult<()> {
        let url = self.request_url(&self.probe_text, &self.probe_source, &self.probe_target);
        let response = self.send(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::TranslationFailed(format!(
                "service returned status code: {}",
                status.as_u16()
            )));
        }
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "HTTP translation server"
    }
}
