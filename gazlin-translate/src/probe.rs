//! Availability prober
//!
//! Runs the backend's lightweight availability request and reports the
//! result. Used once at startup and on demand from a health endpoint; a
//! failed probe is logged, never fatal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::backend::TranslationBackend;
use crate::error::TranslateError;

/// Outcome of one availability check
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub available: bool,
    pub backend: String,
    #[serde(serialize_with = "serialize_millis")]
    pub latency: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub failure: Option<TranslateError>,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[derive(Clone)]
pub struct AvailabilityProber {
    backend: Arc<dyn TranslationBackend>,
}

impl AvailabilityProber {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Probe the backend once.
    pub async fn check(&self) -> Availability {
        let start = Instant::now();
        let result = self.backend.check_availability().await;
        let latency = start.elapsed();
        let backend = self.backend.backend_name().to_string();

        match result {
            Ok(()) => Availability {
                available: true,
                backend,
                latency,
                error: None,
                failure: None,
            },
            Err(err) => Availability {
                available: false,
                backend,
                latency,
                error: Some(err.to_string()),
                failure: Some(err),
            },
        }
    }

    /// Probe once and log the result. Never fails.
    pub async fn log_startup(&self) -> Availability {
        let availability = self.check().await;
        if availability.available {
            info!(
                backend = %availability.backend,
                latency_ms = availability.latency.as_millis() as u64,
                "translation service is available"
            );
        } else {
            warn!(
                backend = %availability.backend,
                error = availability.error.as_deref().unwrap_or("unknown"),
                "translation service is not available"
            );
        }
        availability
    }
}
