/// Failure outcomes of a translation request.
///
/// `Ok(text)` on a [`TranslateResult`] is the success outcome; every other
/// outcome is one of these variants. None of them is ever cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The source text was the empty string
    EmptyInput,
    /// The target language is not in the registry
    UnsupportedLanguage(String),
    /// Network error, timeout or unreachable backend
    ServiceUnavailable(String),
    /// Non-success HTTP status, or an empty translation in a valid response
    TranslationFailed(String),
    /// The response body could not be parsed
    InvalidResponse(String),
}

impl TranslateError {
    /// Stable snake_case tag, used in logs and JSON payloads
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::EmptyInput => "empty_input",
            TranslateError::UnsupportedLanguage(_) => "unsupported_language",
            TranslateError::ServiceUnavailable(_) => "service_unavailable",
            TranslateError::TranslationFailed(_) => "translation_failed",
            TranslateError::InvalidResponse(_) => "invalid_response",
        }
    }

    /// True when the backend could not be reached at all.
    ///
    /// Batch callers treat this as fatal: every following item would fail the same way.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TranslateError::ServiceUnavailable(_))
    }

    /// True for failures scoped to a single item, where a batch caller may
    /// fall back to the original text and keep going.
    pub fn is_item_recoverable(&self) -> bool {
        matches!(
            self,
            TranslateError::TranslationFailed(_) | TranslateError::InvalidResponse(_)
        )
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::EmptyInput => write!(f, "empty text provided for translation"),
            TranslateError::UnsupportedLanguage(code) => {
                write!(f, "language not supported: {}", code)
            }
            TranslateError::ServiceUnavailable(msg) => {
                write!(f, "translation service is unavailable: {}", msg)
            }
            TranslateError::TranslationFailed(msg) => write!(f, "translation failed: {}", msg),
            TranslateError::InvalidResponse(msg) => {
                write!(f, "invalid response from translation service: {}", msg)
            }
        }
    }
}

impl std::error::Error for TranslateError {}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Error raised while reading translation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    InvalidValue { key: String, value: String },
    /// A required setting was missing or empty
    Missing(String),
    /// The HTTP client could not be built
    Client(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {}: '{}'", key, value)
            }
            ConfigError::Missing(key) => write!(f, "{} is not set", key),
            ConfigError::Client(msg) => write!(f, "failed to create HTTP client: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
