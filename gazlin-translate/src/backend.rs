//! Translation backend trait
//!
//! `TranslationBackend` is the seam between the orchestrating service and
//! whatever actually performs a translation: the HTTP client talking to the
//! external translation server, or the in-process mock used by tests.
//!
//! # Example
//!
//! ```ignore
//! use gazlin_translate::{HttpTranslationClient, TranslationBackend, TranslationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpTranslationClient::new(&TranslationConfig::default())?;
//!     client.check_availability().await?;
//!
//!     let result = client.translate("Кварц", "ru", "en").await?;
//!     println!("{}", result); // "Quartz"
//!     Ok(())
//! }
//! ```

use crate::error::TranslateResult;
use async_trait::async_trait;

/// Performs a single translation round trip
///
/// Implementations do no caching and no language validation; the
/// [`TranslationService`](crate::TranslationService) owns both.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` from `source_lang` to `target_lang`
    ///
    /// # Arguments
    ///
    /// * `text` - Non-empty text to translate
    /// * `source_lang` - Source language code (e.g., "ru")
    /// * `target_lang` - Target language code, already checked by the caller
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text, never empty
    /// * `Err(TranslateError)` - Classified failure; see [`TranslateError`](crate::TranslateError)
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String>;

    /// Issue a lightweight request to check that the backend answers
    async fn check_availability(&self) -> TranslateResult<()>;

    /// Name of this backend, for logging
    fn backend_name(&self) -> &str;
}
