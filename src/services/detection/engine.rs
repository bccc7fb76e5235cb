// Scoring Engine
// Runs the analyzers over one immutable text and assembles the result

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::models::{AnalysisDetails, AnalysisResult, AnalysisSettings, AnalyzerBreakdown, AnalyzerResult};
use crate::services::text_processor::text_hash;

use super::aggregation::aggregate;
use super::lexicon::Lexicon;
use super::metadata::extract_metadata;
use super::pattern::{self, analyze_patterns};
use super::structure::{self, analyze_structure};
use super::vocabulary::{self, analyze_vocabulary};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{analyzer} analyzer failed: {message}")]
    AnalyzerFailed { analyzer: &'static str, message: String },
    #[error("{analyzer} analyzer produced a non-finite score")]
    NonFiniteScore { analyzer: &'static str },
}

/// Stateless apart from the shared lexicon; cheap to clone into tasks.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    lexicon: Arc<Lexicon>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            lexicon: Arc::new(Lexicon::standard().clone()),
        }
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn analyze(&self, text: &str, settings: &AnalysisSettings) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let lexicon = self.lexicon.as_ref();

        let patterns = run_analyzer(
            "pattern",
            settings.enable_pattern_analysis,
            pattern::DETAIL_KEYS,
            || analyze_patterns(text, lexicon),
        )?;
        let structure = run_analyzer(
            "structure",
            settings.enable_structural_analysis,
            structure::DETAIL_KEYS,
            || analyze_structure(text, lexicon),
        )?;
        let vocabulary = run_analyzer(
            "vocabulary",
            settings.enable_vocabulary_analysis,
            vocabulary::DETAIL_KEYS,
            || analyze_vocabulary(text, lexicon),
        )?;
        let text_metadata = guarded("metadata", || extract_metadata(text, lexicon))?;

        let breakdown = AnalyzerBreakdown {
            patterns,
            structure,
            vocabulary,
        };
        let verdict = aggregate(&breakdown, settings.sensitivity);

        let analysis_details = AnalysisDetails {
            pattern_score: breakdown.patterns.score,
            structure_score: breakdown.structure.score,
            vocabulary_score: breakdown.vocabulary.score,
            text_hash: text_hash(text),
        };

        debug!(
            text_hash = %analysis_details.text_hash,
            weighted = verdict.weighted_score,
            confidence = verdict.confidence,
            is_ai = verdict.is_ai,
            "engine.analyzed"
        );

        Ok(AnalysisResult {
            is_ai: verdict.is_ai,
            confidence: verdict.confidence,
            reasons: verdict.reasons,
            processing_time_ms: started.elapsed().as_millis() as u64,
            analysis_details,
            breakdown,
            text_metadata,
        })
    }
}

fn run_analyzer<F>(
    name: &'static str,
    enabled: bool,
    keys: &[&str],
    analyze: F,
) -> Result<AnalyzerResult, AnalysisError>
where
    F: FnOnce() -> AnalyzerResult,
{
    if !enabled {
        return Ok(AnalyzerResult::disabled(keys, &format!("{} analysis disabled", name)));
    }

    let result = guarded(name, analyze)?;
    if !result.score.is_finite() || result.details.values().any(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFiniteScore { analyzer: name });
    }
    Ok(result)
}

/// Turn a panic inside an analyzer into an error naming that analyzer.
fn guarded<T, F>(name: &'static str, f: F) -> Result<T, AnalysisError>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        AnalysisError::AnalyzerFailed {
            analyzer: name,
            message,
        }
    })
}
