// Structure Analyzer
// Sentence-length consistency, paragraph balance and logical-flow density

use std::collections::BTreeMap;

use crate::models::AnalyzerResult;
use crate::services::text_processor::{mean_and_std_dev, split_paragraphs, split_sentences};

use super::lexicon::Lexicon;

pub const SENTENCE_LENGTH_CONSISTENCY: &str = "sentenceLengthConsistency";
pub const PARAGRAPH_BALANCE: &str = "paragraphBalance";
pub const LOGICAL_FLOW: &str = "logicalFlow";

pub const DETAIL_KEYS: &[&str] = &[SENTENCE_LENGTH_CONSISTENCY, PARAGRAPH_BALANCE, LOGICAL_FLOW];

const SENTENCE_CAP: f64 = 30.0;
const PARAGRAPH_CAP: f64 = 25.0;
const FLOW_CAP: f64 = 20.0;

const DESCRIPTION: &str = "Structural regularity of sentences and paragraphs";

pub fn analyze_structure(text: &str, lexicon: &Lexicon) -> AnalyzerResult {
    let sentences = split_sentences(text);

    let mut details = BTreeMap::new();
    details.insert(SENTENCE_LENGTH_CONSISTENCY.to_string(), sentence_consistency_score(&sentences));
    details.insert(PARAGRAPH_BALANCE.to_string(), paragraph_balance_score(text));
    details.insert(LOGICAL_FLOW.to_string(), logical_flow_score(&sentences, lexicon));

    AnalyzerResult::from_details(details, DESCRIPTION)
}

/// Low spread in words per sentence scores high.
fn sentence_consistency_score(sentences: &[&str]) -> f64 {
    if sentences.len() < 2 {
        return 0.0;
    }
    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let (_, std_dev) = mean_and_std_dev(&lengths);
    (SENTENCE_CAP - std_dev * 2.0).max(0.0)
}

/// Paragraphs of near-equal character length score high.
fn paragraph_balance_score(text: &str) -> f64 {
    let paragraphs = split_paragraphs(text);
    if paragraphs.len() < 2 {
        return 0.0;
    }
    let lengths: Vec<f64> = paragraphs.iter().map(|p| p.chars().count() as f64).collect();
    // sqrt(variance) is the std dev
    let (_, std_dev) = mean_and_std_dev(&lengths);
    (PARAGRAPH_CAP - std_dev / 100.0).max(0.0)
}

/// Distinct flow words that show up in any sentence, relative to sentence count.
fn logical_flow_score(sentences: &[&str], lexicon: &Lexicon) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let lowered: Vec<String> = sentences.iter().map(|s| s.to_lowercase()).collect();
    let matched = lexicon
        .flow_words
        .iter()
        .filter(|word| lowered.iter().any(|s| s.contains(word.as_str())))
        .count();
    (matched as f64 / sentences.len() as f64 * 60.0).min(FLOW_CAP)
}
