// Aggregation Logic
// Weighted combination of analyzer scores, verdict and reason compilation

use crate::models::AnalyzerBreakdown;

use super::pattern::{GENERIC_PHRASES, PERFECT_GRAMMAR, REPETITIVE_WORDS};
use super::sensitivity::{adjusted_confidence, decide, reported_confidence};
use super::structure::{PARAGRAPH_BALANCE, SENTENCE_LENGTH_CONSISTENCY};
use super::vocabulary::{DIVERSITY_RATIO, FORMALITY_LEVEL};

pub const PATTERN_WEIGHT: f64 = 0.40;
pub const STRUCTURE_WEIGHT: f64 = 0.35;
pub const VOCABULARY_WEIGHT: f64 = 0.25;

pub const MAX_REASONS: usize = 4;

pub const FALLBACK_AI_REASON: &str = "Multiple subtle indicators suggest AI generation";
pub const FALLBACK_HUMAN_REASON: &str = "Text appears to be human-written";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Analyzer {
    Patterns,
    Structure,
    Vocabulary,
}

struct ReasonRule {
    analyzer: Analyzer,
    key: &'static str,
    threshold: f64,
    reason: &'static str,
}

/// Evaluated in this order; the first four hits are reported.
const REASON_RULES: &[ReasonRule] = &[
    ReasonRule {
        analyzer: Analyzer::Patterns,
        key: REPETITIVE_WORDS,
        threshold: 5.0,
        reason: "Repetitive word usage detected",
    },
    ReasonRule {
        analyzer: Analyzer::Patterns,
        key: GENERIC_PHRASES,
        threshold: 10.0,
        reason: "Generic transitional phrases commonly used by AI",
    },
    ReasonRule {
        analyzer: Analyzer::Patterns,
        key: PERFECT_GRAMMAR,
        threshold: 15.0,
        reason: "Unusually perfect grammar and punctuation",
    },
    ReasonRule {
        analyzer: Analyzer::Structure,
        key: SENTENCE_LENGTH_CONSISTENCY,
        threshold: 20.0,
        reason: "Highly consistent sentence lengths",
    },
    ReasonRule {
        analyzer: Analyzer::Structure,
        key: PARAGRAPH_BALANCE,
        threshold: 15.0,
        reason: "Uniform paragraph structure",
    },
    ReasonRule {
        analyzer: Analyzer::Vocabulary,
        key: FORMALITY_LEVEL,
        threshold: 15.0,
        reason: "Overly formal vocabulary",
    },
    ReasonRule {
        analyzer: Analyzer::Vocabulary,
        key: DIVERSITY_RATIO,
        threshold: 10.0,
        reason: "Limited vocabulary diversity",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub weighted_score: f64,
    pub confidence: u8,
    pub is_ai: bool,
    pub reasons: Vec<String>,
}

pub fn weighted_score(breakdown: &AnalyzerBreakdown) -> f64 {
    breakdown.patterns.score * PATTERN_WEIGHT
        + breakdown.structure.score * STRUCTURE_WEIGHT
        + breakdown.vocabulary.score * VOCABULARY_WEIGHT
}

pub fn aggregate(breakdown: &AnalyzerBreakdown, sensitivity: u32) -> Verdict {
    let weighted = weighted_score(breakdown);
    let confidence = adjusted_confidence(weighted, sensitivity);

    Verdict {
        weighted_score: weighted,
        confidence: reported_confidence(confidence),
        is_ai: decide(confidence, sensitivity),
        reasons: compile_reasons(breakdown, confidence),
    }
}

/// Triggered rule messages in priority order, at most [`MAX_REASONS`].
/// Never empty: falls back to a single statement keyed on the unrounded confidence.
pub fn compile_reasons(breakdown: &AnalyzerBreakdown, confidence: f64) -> Vec<String> {
    let mut reasons: Vec<String> = REASON_RULES
        .iter()
        .filter(|rule| {
            let result = match rule.analyzer {
                Analyzer::Patterns => &breakdown.patterns,
                Analyzer::Structure => &breakdown.structure,
                Analyzer::Vocabulary => &breakdown.vocabulary,
            };
            result.detail(rule.key) > rule.threshold
        })
        .map(|rule| rule.reason.to_string())
        .take(MAX_REASONS)
        .collect();

    if reasons.is_empty() {
        let fallback = if confidence > 50.0 {
            FALLBACK_AI_REASON
        } else {
            FALLBACK_HUMAN_REASON
        };
        reasons.push(fallback.to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalyzerResult;
    use crate::services::detection::{pattern, structure, vocabulary};

    fn result(keys: &[&str], values: &[(&str, f64)], score: f64) -> AnalyzerResult {
        let mut r = AnalyzerResult::disabled(keys, "test");
        for (k, v) in values {
            r.details.insert(k.to_string(), *v);
        }
        r.score = score;
        r
    }

    fn breakdown(p: &[(&str, f64)], s: &[(&str, f64)], v: &[(&str, f64)], scores: (f64, f64, f64)) -> AnalyzerBreakdown {
        AnalyzerBreakdown {
            patterns: result(pattern::DETAIL_KEYS, p, scores.0),
            structure: result(structure::DETAIL_KEYS, s, scores.1),
            vocabulary: result(vocabulary::DETAIL_KEYS, v, scores.2),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((PATTERN_WEIGHT + STRUCTURE_WEIGHT + VOCABULARY_WEIGHT - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_score() {
        let b = breakdown(&[], &[], &[], (50.0, 40.0, 20.0));
        assert!((weighted_score(&b) - 39.0).abs() < 1e-9);
    }

    #[test]
    fn test_reasons_keep_priority_order_and_truncate() {
        let b = breakdown(
            &[(REPETITIVE_WORDS, 6.0), (GENERIC_PHRASES, 20.0), (PERFECT_GRAMMAR, 16.0)],
            &[(SENTENCE_LENGTH_CONSISTENCY, 25.0), (PARAGRAPH_BALANCE, 20.0)],
            &[(FORMALITY_LEVEL, 20.0)],
            (0.0, 0.0, 0.0),
        );
        let reasons = compile_reasons(&b, 90.0);
        assert_eq!(
            reasons,
            vec![
                "Repetitive word usage detected",
                "Generic transitional phrases commonly used by AI",
                "Unusually perfect grammar and punctuation",
                "Highly consistent sentence lengths",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let b = breakdown(&[(REPETITIVE_WORDS, 5.0)], &[], &[(DIVERSITY_RATIO, 10.0)], (0.0, 0.0, 0.0));
        assert_eq!(compile_reasons(&b, 10.0), vec![FALLBACK_HUMAN_REASON]);
    }

    #[test]
    fn test_fallback_reason_depends_on_confidence() {
        let b = breakdown(&[], &[], &[], (0.0, 0.0, 0.0));
        assert_eq!(compile_reasons(&b, 51.0), vec![FALLBACK_AI_REASON]);
        assert_eq!(compile_reasons(&b, 50.0), vec![FALLBACK_HUMAN_REASON]);
        assert_eq!(compile_reasons(&b, 50.4), vec![FALLBACK_AI_REASON]);
    }

    #[test]
    fn test_aggregate_verdict() {
        let b = breakdown(&[], &[], &[], (100.0, 75.0, 60.0));
        // 40 + 26.25 + 15 = 81.25
        let verdict = aggregate(&b, 70);
        assert_eq!(verdict.confidence, 81);
        assert!(verdict.is_ai);
        assert_eq!(verdict.reasons, vec![FALLBACK_AI_REASON]);

        let verdict = aggregate(&b, 0);
        assert_eq!(verdict.confidence, 0);
    }

    #[test]
    fn test_verdict_uses_unrounded_confidence() {
        let b = breakdown(&[], &[], &[], (69.6, 69.6, 69.6));
        let verdict = aggregate(&b, 70);
        assert_eq!(verdict.confidence, 70);
        assert!(!verdict.is_ai);
        assert_eq!(verdict.reasons, vec![FALLBACK_AI_REASON]);

        let b = breakdown(&[], &[], &[], (50.4, 50.4, 50.4));
        let verdict = aggregate(&b, 70);
        assert_eq!(verdict.confidence, 50);
        assert_eq!(verdict.reasons, vec![FALLBACK_AI_REASON]);
    }
}
