//! Cached translation proxy for the GazlinGO mineral catalog
//!
//! Forwards text to an external translation server, memoizes successful
//! results and classifies failures so HTTP handlers can map them to the right
//! response.
//!
//! # Example
//!
//! ```ignore
//! use gazlin_translate::{TranslateError, TranslationConfig, TranslationService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = TranslationService::from_config(&TranslationConfig::from_env()?)?;
//!
//!     match service.translate("Кварц", "ru", "en").await {
//!         Ok(text) => println!("{}", text),
//!         Err(TranslateError::EmptyInput) => println!(""),
//!         Err(e) => eprintln!("{}", e),
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod mock;
pub mod probe;
pub mod service;


// Re-export main types for convenient access
pub use backend::TranslationBackend;
pub use cache::{CacheKey, TranslationCache};
pub use client::HttpTranslationClient;
pub use config::TranslationConfig;
pub use error::{ConfigError, TranslateError, TranslateResult};
pub use language::{Language, LanguageRegistry, default_languages};
pub use mock::{MockBackend, MockMode};
pub use probe::{Availability, AvailabilityProber};
pub use service::TranslationService;
