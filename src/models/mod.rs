// DeepShield Data Models
// Wire and engine types shared by the detection services and the api layer

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ============ Analysis Settings ============

/// Resolved, immutable settings for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u32,
    #[serde(default = "default_true")]
    pub enable_pattern_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_structural_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_vocabulary_analysis: bool,
    /// Caller-supplied fields we don't interpret; echoed back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            enable_pattern_analysis: true,
            enable_structural_analysis: true,
            enable_vocabulary_analysis: true,
            extra: Map::new(),
        }
    }
}

impl AnalysisSettings {
    /// Build the settings for one call: configured defaults, then any
    /// per-request overrides on top. Extra fields from the request win over
    /// extra fields carried by the defaults.
    pub fn resolve(defaults: &AnalysisSettings, overrides: Option<&SettingsOverrides>) -> Self {
        let Some(overrides) = overrides else {
            return defaults.clone();
        };

        let mut extra = defaults.extra.clone();
        for (key, value) in &overrides.extra {
            extra.insert(key.clone(), value.clone());
        }

        Self {
            sensitivity: overrides
                .sensitivity
                .map(|s| s.clamp(0, i64::from(u32::MAX)) as u32)
                .unwrap_or(defaults.sensitivity),
            enable_pattern_analysis: overrides
                .enable_pattern_analysis
                .unwrap_or(defaults.enable_pattern_analysis),
            enable_structural_analysis: overrides
                .enable_structural_analysis
                .unwrap_or(defaults.enable_structural_analysis),
            enable_vocabulary_analysis: overrides
                .enable_vocabulary_analysis
                .unwrap_or(defaults.enable_vocabulary_analysis),
            extra,
        }
    }
}

/// Per-request settings as they arrive on the wire. Every field is optional;
/// sensitivity is signed so out-of-range input can be rejected rather than
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pattern_analysis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_structural_analysis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_vocabulary_analysis: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============ Analyzer Output ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerResult {
    /// Combined score in [0, 100].
    pub score: f64,
    /// Named sub-scores, each already capped to its own range.
    pub details: BTreeMap<String, f64>,
    pub description: String,
}

impl AnalyzerResult {
    /// Sum the sub-scores, cap at 100 and wrap them up.
    pub fn from_details(details: BTreeMap<String, f64>, description: &str) -> Self {
        let total: f64 = details.values().sum();
        Self {
            score: total.clamp(0.0, 100.0),
            details,
            description: description.to_string(),
        }
    }

    /// Result for an analyzer the caller switched off: zero score, all
    /// sub-scores present and zero.
    pub fn disabled(keys: &[&str], description: &str) -> Self {
        Self {
            score: 0.0,
            details: keys.iter().map(|k| (k.to_string(), 0.0)).collect(),
            description: description.to_string(),
        }
    }

    /// Sub-score by name; missing keys read as zero.
    pub fn detail(&self, key: &str) -> f64 {
        self.details.get(key).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerBreakdown {
    pub patterns: AnalyzerResult,
    pub structure: AnalyzerResult,
    pub vocabulary: AnalyzerResult,
}

// ============ Metadata ============

/// Informational counts of human-leaning style markers. Never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMarkers {
    pub contractions: usize,
    pub first_person_pronouns: usize,
    pub expressive_punctuation: usize,
    pub hedging_words: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_words_per_sentence: usize,
    pub readability_estimate: f64,
    pub style_markers: StyleMarkers,
}

// ============ Engine Output ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub pattern_score: f64,
    pub structure_score: f64,
    pub vocabulary_score: f64,
    pub text_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    pub confidence: u8,
    pub reasons: Vec<String>,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
    pub analysis_details: AnalysisDetails,
    pub breakdown: AnalyzerBreakdown,
    pub text_metadata: Metadata,
}

// ============ Single Text Request / Response ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextRequest {
    pub text: String,
    #[serde(default)]
    pub settings: Option<SettingsOverrides>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub text_length: usize,
    pub word_count: usize,
    pub analyzed_at: String,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextResponse {
    pub success: bool,
    pub content_type: ContentType,
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub metadata: ResponseMetadata,
    pub analysis_details: AnalysisDetails,
    pub settings: AnalysisSettings,
}

// ============ Batch ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalyzeRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub settings: Option<SettingsOverrides>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    pub success: bool,
    #[serde(rename = "isAI", default, skip_serializing_if = "Option::is_none")]
    pub is_ai: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    pub fn scored(index: usize, result: &AnalysisResult) -> Self {
        Self {
            index,
            success: true,
            is_ai: Some(result.is_ai),
            confidence: Some(result.confidence),
            reasons: Some(result.reasons.clone()),
            error: None,
        }
    }

    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            success: false,
            is_ai: None,
            confidence: None,
            reasons: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub avg_confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalyzeResponse {
    pub success: bool,
    pub results: Vec<BatchItemResult>,
    pub summary: BatchSummary,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
}

// ============ Errors on the wire ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// ============ Service Info ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub method: String,
    pub content_types: Vec<ContentType>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub method: String,
}

// ============ Default Value Functions ============

fn default_true() -> bool { true }
fn default_sensitivity() -> u32 { 70 }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_without_overrides_returns_defaults() {
        let defaults = AnalysisSettings::default();
        let resolved = AnalysisSettings::resolve(&defaults, None);
        assert_eq!(resolved, defaults);
        assert_eq!(resolved.sensitivity, 70);
    }

    #[test]
    fn test_resolve_merges_overrides_and_extra_fields() {
        let defaults = AnalysisSettings::default();
        let overrides: SettingsOverrides = serde_json::from_value(json!({
            "sensitivity": 85,
            "enableVocabularyAnalysis": false,
            "language": "en"
        }))
        .unwrap();

        let resolved = AnalysisSettings::resolve(&defaults, Some(&overrides));
        assert_eq!(resolved.sensitivity, 85);
        assert!(resolved.enable_pattern_analysis);
        assert!(!resolved.enable_vocabulary_analysis);
        assert_eq!(resolved.extra.get("language"), Some(&json!("en")));

        // Defaults are untouched.
        assert!(defaults.extra.is_empty());
        assert!(defaults.enable_vocabulary_analysis);
    }

    #[test]
    fn test_settings_echo_keeps_extra_fields_flat() {
        let mut settings = AnalysisSettings::default();
        settings.extra.insert("clientVersion".to_string(), json!("1.2"));
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["clientVersion"], json!("1.2"));
        assert_eq!(value["sensitivity"], json!(70));
    }

    #[test]
    fn test_batch_item_failure_omits_score_fields() {
        let item = BatchItemResult::failed(0, "too short");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"index": 0, "success": false, "error": "too short"}));
    }

    #[test]
    fn test_analyzer_result_caps_total() {
        let details: BTreeMap<String, f64> = [("a", 70.0), ("b", 60.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let result = AnalyzerResult::from_details(details, "test");
        assert_eq!(result.score, 100.0);
        assert_eq!(result.detail("missing"), 0.0);
    }
}
