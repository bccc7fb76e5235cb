// Vocabulary Analyzer
// Type/token diversity, long-word ratio and formal-word density

use std::collections::{BTreeMap, HashSet};

use crate::models::AnalyzerResult;
use crate::services::text_processor::alpha_tokens;

use super::lexicon::Lexicon;

pub const DIVERSITY_RATIO: &str = "diversityRatio";
pub const COMPLEXITY_SCORE: &str = "complexityScore";
pub const FORMALITY_LEVEL: &str = "formalityLevel";

pub const DETAIL_KEYS: &[&str] = &[DIVERSITY_RATIO, COMPLEXITY_SCORE, FORMALITY_LEVEL];

const DIVERSITY_FLOOR: f64 = 0.3;
const COMPLEX_WORD_LEN: usize = 8;
const COMPLEXITY_FLOOR: f64 = 0.15;
const FORMALITY_CAP: f64 = 20.0;

const DESCRIPTION: &str = "Vocabulary diversity, complexity and formality";

pub fn analyze_vocabulary(text: &str, lexicon: &Lexicon) -> AnalyzerResult {
    let tokens = alpha_tokens(text);
    let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let lower = text.to_lowercase();

    let mut details = BTreeMap::new();
    details.insert(DIVERSITY_RATIO.to_string(), diversity_score(tokens.len(), unique.len()));
    details.insert(COMPLEXITY_SCORE.to_string(), complexity_score(&unique));
    details.insert(FORMALITY_LEVEL.to_string(), formality_score(&lower, tokens.len(), lexicon));

    AnalyzerResult::from_details(details, DESCRIPTION)
}

fn diversity_score(total: usize, unique: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let diversity = unique as f64 / total as f64;
    if diversity < DIVERSITY_FLOOR {
        (DIVERSITY_FLOOR - diversity) * 100.0
    } else {
        0.0
    }
}

fn complexity_score(unique: &HashSet<&str>) -> f64 {
    if unique.is_empty() {
        return 0.0;
    }
    let long = unique.iter().filter(|w| w.len() > COMPLEX_WORD_LEN).count();
    let ratio = long as f64 / unique.len() as f64;
    if ratio > COMPLEXITY_FLOOR {
        (ratio - COMPLEXITY_FLOOR) * 200.0
    } else {
        0.0
    }
}

/// Formal words present anywhere in the text, per hundred tokens.
fn formality_score(lower: &str, total: usize, lexicon: &Lexicon) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let present = lexicon
        .formal_words
        .iter()
        .filter(|w| lower.contains(w.as_str()))
        .count();
    (present as f64 / (total as f64 / 100.0) * 15.0).min(FORMALITY_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> AnalyzerResult {
        analyze_vocabulary(text, Lexicon::standard())
    }

    #[test]
    fn test_zero_tokens_are_guarded() {
        let result = analyze("1234 5678 !!!");
        assert_eq!(result.detail(DIVERSITY_RATIO), 0.0);
        assert_eq!(result.detail(COMPLEXITY_SCORE), 0.0);
        assert_eq!(result.detail(FORMALITY_LEVEL), 0.0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_low_diversity() {
        // 2 unique of 10 tokens -> 0.2
        let result = analyze("go stop go stop go stop go stop go stop");
        assert!((result.detail(DIVERSITY_RATIO) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_diverse_text_has_no_diversity_signal() {
        let result = analyze("Every word in this line is different from the rest");
        assert_eq!(result.detail(DIVERSITY_RATIO), 0.0);
    }

    #[test]
    fn test_long_words_raise_complexity() {
        // 2 of 4 unique words exceed eight letters -> (0.5 - 0.15) * 200 = 70
        let result = analyze("extraordinary circumstances need care");
        assert!((result.detail(COMPLEXITY_SCORE) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_formal_words_are_capped() {
        let result = analyze("We utilize a comprehensive and substantial approach to demonstrate value.");
        assert_eq!(result.detail(FORMALITY_LEVEL), FORMALITY_CAP);
        assert!(result.score <= 100.0);
    }
}
