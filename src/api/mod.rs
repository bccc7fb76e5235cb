// API Layer
// Request validation, single and batch analysis, service info.
// Transport (HTTP routing, CORS, headers) sits outside this crate and calls in here.

pub mod error;

pub use error::{ApiError, ValidationError};

use std::collections::HashMap;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::models::{
    AnalysisResult, AnalysisSettings, AnalyzeTextRequest, AnalyzeTextResponse, BatchAnalyzeRequest,
    BatchAnalyzeResponse, BatchItemResult, BatchSummary, ContentType, HealthStatus, ResponseMetadata,
    ServiceInfo, SettingsOverrides,
};
use crate::services::detection::is_valid_sensitivity;
use crate::services::{AnalysisError, AppConfig, RequestLimits, ScoringEngine};

pub(crate) const ANALYSIS_FAILED: &str = "Analysis failed";
const SERVICE_NAME: &str = "DeepShield API";
const METHOD: &str = "heuristic_analysis";

/// Check one text against the configured length limits (in chars).
pub fn validate_text(text: &str, limits: &RequestLimits) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let actual = text.chars().count();
    if actual < limits.min_text_chars {
        return Err(ValidationError::TextTooShort {
            min: limits.min_text_chars,
            actual,
        });
    }
    if actual > limits.max_text_chars {
        return Err(ValidationError::TextTooLong {
            max: limits.max_text_chars,
            actual,
        });
    }
    Ok(())
}

pub fn validate_settings(overrides: Option<&SettingsOverrides>) -> Result<(), ValidationError> {
    match overrides.and_then(|o| o.sensitivity) {
        Some(s) if !is_valid_sensitivity(s) => Err(ValidationError::SensitivityOutOfRange(s)),
        _ => Ok(()),
    }
}

pub fn validate_batch(request: &BatchAnalyzeRequest, limits: &RequestLimits) -> Result<(), ValidationError> {
    if request.texts.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if request.texts.len() > limits.max_batch_items {
        return Err(ValidationError::TooManyTexts {
            max: limits.max_batch_items,
            actual: request.texts.len(),
        });
    }
    validate_settings(request.settings.as_ref())
}

/// Analyze a single text and render the response.
pub fn analyze_text(
    engine: &ScoringEngine,
    request: &AnalyzeTextRequest,
    config: &AppConfig,
) -> Result<AnalyzeTextResponse, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let text_length = request.text.chars().count();

    if let Err(e) = validate_text(&request.text, &config.limits)
        .and_then(|_| validate_settings(request.settings.as_ref()))
    {
        info!(request_id = %request_id, text_length, error = %e, "[API] rejected text request");
        return Err(e.into());
    }

    let settings = AnalysisSettings::resolve(&config.analysis, request.settings.as_ref());
    let result = engine.analyze(&request.text, &settings).map_err(|e| {
        warn!(request_id = %request_id, error = %e, "[API] analysis failed");
        ApiError::from(e)
    })?;

    info!(
        request_id = %request_id,
        text_length,
        text_hash = %result.analysis_details.text_hash,
        confidence = result.confidence,
        is_ai = result.is_ai,
        elapsed_ms = result.processing_time_ms,
        "[API] text analyzed"
    );

    Ok(render_text_response(result, settings, text_length, request_id))
}

fn render_text_response(
    result: AnalysisResult,
    settings: AnalysisSettings,
    text_length: usize,
    request_id: String,
) -> AnalyzeTextResponse {
    AnalyzeTextResponse {
        success: true,
        content_type: ContentType::Text,
        is_ai: result.is_ai,
        confidence: result.confidence,
        reasons: result.reasons,
        metadata: ResponseMetadata {
            text_length,
            word_count: result.text_metadata.word_count,
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            processing_time_ms: result.processing_time_ms,
            request_id,
        },
        analysis_details: result.analysis_details,
        settings,
    }
}

/// Analyze up to `max_batch_items` texts. One bad item never fails the batch;
/// only a malformed batch (empty, too many texts, bad settings) is rejected.
pub async fn analyze_batch(
    engine: &ScoringEngine,
    request: BatchAnalyzeRequest,
    config: &AppConfig,
) -> Result<BatchAnalyzeResponse, ApiError> {
    let started = Instant::now();
    validate_batch(&request, &config.limits)?;

    let settings = AnalysisSettings::resolve(&config.analysis, request.settings.as_ref());
    let total = request.texts.len();
    info!(items = total, sensitivity = settings.sensitivity, "[API] starting batch");

    let mut results: Vec<BatchItemResult> = Vec::with_capacity(total);
    let mut join_set: JoinSet<BatchItemResult> = JoinSet::new();
    let mut task_index = HashMap::new();

    for (index, text) in request.texts.into_iter().enumerate() {
        if let Err(e) = validate_text(&text, &config.limits) {
            results.push(BatchItemResult::failed(index, e.to_string()));
            continue;
        }

        let engine = engine.clone();
        let settings = settings.clone();
        let development = config.development;
        let handle = join_set.spawn_blocking(move || {
            match engine.analyze(&text, &settings) {
                Ok(result) => BatchItemResult::scored(index, &result),
                Err(e) => analysis_failure(index, &e, development),
            }
        });
        task_index.insert(handle.id(), index);
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(item) => results.push(item),
            Err(e) => {
                let index = task_index.get(&e.id()).copied();
                warn!(?index, error = %e, "[API] batch item task failed");
                if let Some(index) = index {
                    results.push(BatchItemResult::failed(index, ANALYSIS_FAILED));
                }
            }
        }
    }

    results.sort_by_key(|r| r.index);
    for item in results.iter().filter(|r| !r.success) {
        warn!(index = item.index, error = ?item.error, "[API] batch item failed");
    }

    let summary = summarize(&results);
    info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "[API] batch done"
    );

    Ok(BatchAnalyzeResponse {
        success: true,
        results,
        summary,
        processing_time_ms: started.elapsed().as_millis() as u64,
    })
}

/// Batch item for an engine failure. Internal details only leave the process in development mode.
fn analysis_failure(index: usize, error: &AnalysisError, development: bool) -> BatchItemResult {
    warn!(index, error = %error, "[API] batch item analysis failed");
    if development {
        BatchItemResult::failed(index, error.to_string())
    } else {
        BatchItemResult::failed(index, ANALYSIS_FAILED)
    }
}

fn summarize(results: &[BatchItemResult]) -> BatchSummary {
    let confidences: Vec<f64> = results
        .iter()
        .filter_map(|r| r.confidence)
        .map(f64::from)
        .collect();
    let successful = results.iter().filter(|r| r.success).count();

    BatchSummary {
        total: results.len(),
        successful,
        failed: results.len() - successful,
        avg_confidence: if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
        },
    }
}

pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        method: METHOD.to_string(),
        content_types: vec![ContentType::Text],
        status: "healthy".to_string(),
    }
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy".to_string(),
        method: METHOD.to_string(),
    }
}
