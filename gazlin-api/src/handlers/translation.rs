//! Translated views of the catalog.
//!
//! Batch endpoints fail fast when the translation server is unreachable and
//! otherwise degrade item by item to the original text. The single-mineral
//! endpoint surfaces the precise failure kind.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use gazlin_translate::{Language, TranslateError, TranslationService};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{Envelope, parse_id, success};
use crate::error::ApiError;
use crate::models::Mineral;
use crate::state::AppState;

pub const DEFAULT_LANGUAGE: &str = "ru";

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
}

fn or_default(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

/// Resolve `(source, target)`, rejecting an unsupported target
fn resolve_languages(
    translator: &TranslationService,
    lang: Option<&str>,
    source_lang: Option<&str>,
) -> Result<(String, String), ApiError> {
    let target = or_default(lang);
    if !translator.is_language_supported(&target) {
        return Err(ApiError::invalid_input(format!(
            "language not supported: {}",
            target
        )));
    }
    Ok((or_default(source_lang), target))
}

/// Translate one field of a batch item.
///
/// `Ok(None)` means "keep the original"; only an unreachable backend is an error.
async fn translate_batch_field(
    translator: &TranslationService,
    mineral_id: i64,
    text: &str,
    source: &str,
    target: &str,
    failures: &mut usize,
) -> Result<Option<String>, ApiError> {
    match translator.translate(text, source, target).await {
        Ok(translated) => Ok(Some(translated)),
        Err(TranslateError::EmptyInput) => Ok(None),
        Err(err) if err.is_unavailable() => Err(ApiError::from(err)),
        Err(err) => {
            warn!(mineral_id, kind = err.kind(), error = %err, "falling back to original text");
            *failures += 1;
            Ok(None)
        }
    }
}

pub async fn list_languages(State(state): State<AppState>) -> Json<Envelope<Vec<Language>>> {
    let languages = state.translator.supported_languages();
    if languages.is_empty() {
        warn!("supported language list is empty");
    }
    success(languages.to_vec())
}

pub async fn list_translated(
    State(state): State<AppState>,
    Query(params): Query<LangQuery>,
) -> Result<Json<Envelope<Vec<Mineral>>>, ApiError> {
    let translator = &state.translator;
    let (source, target) =
        resolve_languages(translator, params.lang.as_deref(), params.source_lang.as_deref())?;

    let minerals = state.minerals.all().await?;
    let mut failures = 0;
    let mut translated = Vec::with_capacity(minerals.len());

    for mineral in minerals {
        let title = translate_batch_field(
            translator,
            mineral.id,
            &mineral.title,
            &source,
            &target,
            &mut failures,
        )
        .await?
        .unwrap_or_else(|| mineral.title.clone());
        let description = translate_batch_field(
            translator,
            mineral.id,
            &mineral.description,
            &source,
            &target,
            &mut failures,
        )
        .await?
        .unwrap_or_else(|| mineral.description.clone());

        translated.push(mineral.translated(title, description));
    }

    if failures > 0 {
        warn!(failures, source = %source, target = %target, "translation errors in batch");
    }
    Ok(success(translated))
}

pub async fn get_translated(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LangQuery>,
) -> Result<Json<Envelope<Mineral>>, ApiError> {
    let id = parse_id(&id)?;
    let translator = &state.translator;
    let (source, target) =
        resolve_languages(translator, params.lang.as_deref(), params.source_lang.as_deref())?;

    let mineral = state.minerals.get(id).await?;

    let title = match translator.translate(&mineral.title, &source, &target).await {
        Ok(title) => title,
        Err(TranslateError::EmptyInput) => mineral.title.clone(),
        Err(err) => return Err(err.into()),
    };
    let description = match translator
        .translate(&mineral.description, &source, &target)
        .await
    {
        Ok(description) => description,
        Err(TranslateError::EmptyInput) => mineral.description.clone(),
        Err(err) => return Err(err.into()),
    };

    Ok(success(mineral.translated(title, description)))
}

/// Minerals whose translated title starts with `query`, case-insensitively.
pub async fn find_minerals(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Envelope<Vec<Mineral>>>, ApiError> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Ok(success(Vec::new()));
    }

    let translator = &state.translator;
    let (source, target) =
        resolve_languages(translator, params.lang.as_deref(), params.source_lang.as_deref())?;
    let needle = query.to_lowercase();

    let mut results = Vec::new();
    for mineral in state.minerals.all().await? {
        let title = match translator.translate(&mineral.title, &source, &target).await {
            Ok(title) => title,
            Err(err) if err.is_unavailable() => return Err(err.into()),
            Err(err) => {
                debug!(mineral_id = mineral.id, kind = err.kind(), "skipping mineral in search");
                continue;
            }
        };
        if !title.to_lowercase().starts_with(&needle) {
            continue;
        }

        let description = match translator
            .translate(&mineral.description, &source, &target)
            .await
        {
            Ok(description) => description,
            Err(err) if err.is_unavailable() => return Err(err.into()),
            Err(_) => mineral.description.clone(),
        };
        results.push(mineral.translated(title, description));
    }

    Ok(success(results))
}

/// Probe the translation server on demand.
pub async fn translation_health(State(state): State<AppState>) -> impl IntoResponse {
    let availability = state.prober.check().await;
    let (status, label) = if availability.available {
        (StatusCode::OK, "success")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "error")
    };
    (
        status,
        Json(json!({
            "status": label,
            "data": {
                "availability": availability,
                "cached_translations": state.translator.cache().len(),
            },
        })),
    )
}
