// Pattern Analyzer
// Lexical repetition, stock phrases, transition overuse and grammar perfection

use std::collections::{BTreeMap, HashMap};

use crate::models::AnalyzerResult;
use crate::services::text_processor::{count_occurrences, split_sentences, whitespace_words};

use super::lexicon::Lexicon;

pub const REPETITIVE_WORDS: &str = "repetitiveWords";
pub const GENERIC_PHRASES: &str = "genericPhrases";
pub const TRANSITION_OVERUSE: &str = "transitionOveruse";
pub const PERFECT_GRAMMAR: &str = "perfectGrammar";

pub const DETAIL_KEYS: &[&str] = &[REPETITIVE_WORDS, GENERIC_PHRASES, TRANSITION_OVERUSE, PERFECT_GRAMMAR];

const REPETITIVE_CAP: f64 = 30.0;
const GENERIC_CAP: f64 = 25.0;
const TRANSITION_CAP: f64 = 20.0;
const GRAMMAR_CAP: f64 = 25.0;

/// Words need more than this many chars to count toward repetition.
const REPEAT_MIN_WORD_LEN: usize = 4;
/// ...and must occur more than this many times.
const REPEAT_MIN_OCCURRENCES: usize = 3;
/// One human slip expected per this many characters.
const CHARS_PER_EXPECTED_ERROR: f64 = 1000.0;

const DESCRIPTION: &str = "Lexical patterns: repetition, stock phrases, transitions and grammar";

pub fn analyze_patterns(text: &str, lexicon: &Lexicon) -> AnalyzerResult {
    let lower = text.to_lowercase();
    let sentence_count = split_sentences(text).len().max(1) as f64;

    let mut details = BTreeMap::new();
    details.insert(REPETITIVE_WORDS.to_string(), repetitive_words_score(text));
    details.insert(
        GENERIC_PHRASES.to_string(),
        phrase_density_score(&lower, &lexicon.generic_phrases, sentence_count, 40.0, GENERIC_CAP),
    );
    details.insert(
        TRANSITION_OVERUSE.to_string(),
        phrase_density_score(&lower, &lexicon.transition_words, sentence_count, 30.0, TRANSITION_CAP),
    );
    details.insert(PERFECT_GRAMMAR.to_string(), perfect_grammar_score(text, lexicon));

    AnalyzerResult::from_details(details, DESCRIPTION)
}

fn repetitive_words_score(text: &str) -> f64 {
    let words = whitespace_words(text);
    if words.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for word in words.iter().filter(|w| w.chars().count() > REPEAT_MIN_WORD_LEN) {
        *freq.entry(word.as_str()).or_insert(0) += 1;
    }
    let repeated = freq.values().filter(|&&n| n > REPEAT_MIN_OCCURRENCES).count();

    (repeated as f64 / words.len() as f64 * 100.0).min(REPETITIVE_CAP)
}

fn phrase_density_score(lower: &str, phrases: &[String], sentence_count: f64, factor: f64, cap: f64) -> f64 {
    let matches: usize = phrases.iter().map(|p| count_occurrences(lower, p)).sum();
    (matches as f64 / sentence_count * factor).min(cap)
}

/// Fewer slips than a human would make for this length reads as machine-clean.
fn perfect_grammar_score(text: &str, lexicon: &Lexicon) -> f64 {
    let expected = text.chars().count() as f64 / CHARS_PER_EXPECTED_ERROR;
    let observed: usize = lexicon
        .human_error_patterns()
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum();
    ((expected - observed as f64) * 5.0).clamp(0.0, GRAMMAR_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> AnalyzerResult {
        analyze_patterns(text, Lexicon::standard())
    }

    #[test]
    fn test_stock_phrases_score() {
        let text = "furthermore, it is important to note that the system works efficiently. ".repeat(5);
        let result = analyze(&text);
        // Ten phrase hits over five sentences saturates the cap.
        assert_eq!(result.detail(GENERIC_PHRASES), GENERIC_CAP);
        // furthermore, important, system, works, efficiently. -> 5 of 55 words
        let repetitive = result.detail(REPETITIVE_WORDS);
        assert!((repetitive - 5.0 / 55.0 * 100.0).abs() < 1e-9);
        assert_eq!(result.detail(TRANSITION_OVERUSE), 0.0);
    }

    #[test]
    fn test_transition_overuse() {
        let text = "The plan failed. However, we tried again. Therefore we won. Nevertheless it hurt.";
        let result = analyze(text);
        // 3 hits over 4 sentences * 30 = 22.5, capped at 20
        assert_eq!(result.detail(TRANSITION_OVERUSE), TRANSITION_CAP);
    }

    #[test]
    fn test_human_slips_keep_grammar_score_low() {
        let result = analyze("i like dogs.  they   are great!!  i walk mine every day.");
        assert_eq!(result.detail(PERFECT_GRAMMAR), 0.0);
    }

    #[test]
    fn test_clean_long_text_raises_grammar_score() {
        let text = "The committee reviewed every proposal with care. ".repeat(120);
        let result = analyze(&text);
        assert_eq!(result.detail(PERFECT_GRAMMAR), GRAMMAR_CAP);
    }

    #[test]
    fn test_scores_are_bounded() {
        let text = "moreover moreover moreover moreover however however. ".repeat(50);
        let result = analyze(&text);
        assert!(result.score <= 100.0);
        assert!(result.detail(REPETITIVE_WORDS) <= REPETITIVE_CAP);
        for key in DETAIL_KEYS {
            assert!(result.details.contains_key(*key));
            assert!(result.detail(key) >= 0.0);
        }
    }

    #[test]
    fn test_empty_text() {
        let result = analyze("");
        assert_eq!(result.score, 0.0);
    }
}
