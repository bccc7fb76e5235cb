// Metadata Extractor
// Descriptive counts and a readability estimate; informational only, never scored

use crate::models::{Metadata, StyleMarkers};
use crate::services::text_processor::{
    alpha_tokens, count_syllables, split_paragraphs, split_sentences, whitespace_words,
};

use super::lexicon::Lexicon;

const NEUTRAL_READABILITY: f64 = 50.0;
const CONTRACTION_SUFFIXES: &[&str] = &["n't", "'ll", "'re", "'ve", "'d", "'m", "'s"];
const FIRST_PERSON: &[&str] = &["i", "me", "my", "mine", "myself"];

pub fn extract_metadata(text: &str, lexicon: &Lexicon) -> Metadata {
    let word_count = whitespace_words(text).len();
    let sentence_count = split_sentences(text).len();
    let paragraph_count = split_paragraphs(text).len();

    let avg_words_per_sentence = if sentence_count == 0 {
        0
    } else {
        (word_count as f64 / sentence_count as f64).round() as usize
    };

    Metadata {
        word_count,
        sentence_count,
        paragraph_count,
        avg_words_per_sentence,
        readability_estimate: readability_estimate(text, word_count, sentence_count),
        style_markers: style_markers(text, lexicon),
    }
}

/// Simplified Flesch Reading Ease, clamped to [0, 100].
pub fn readability_estimate(text: &str, word_count: usize, sentence_count: usize) -> f64 {
    if word_count == 0 || sentence_count == 0 {
        return NEUTRAL_READABILITY;
    }
    let words = word_count as f64;
    let syllables = count_syllables(text) as f64;
    let score = 206.835 - 1.015 * (words / sentence_count as f64) - 84.6 * (syllables / words);
    score.clamp(0.0, 100.0)
}

fn style_markers(text: &str, lexicon: &Lexicon) -> StyleMarkers {
    let normalized = text.replace('\u{2019}', "'").to_lowercase();
    let tokens = alpha_tokens(text);

    StyleMarkers {
        contractions: CONTRACTION_SUFFIXES
            .iter()
            .map(|suffix| normalized.matches(suffix).count())
            .sum(),
        first_person_pronouns: tokens
            .iter()
            .filter(|t| FIRST_PERSON.contains(&t.as_str()))
            .count(),
        expressive_punctuation: text.chars().filter(|c| matches!(c, '!' | '?')).count(),
        hedging_words: tokens
            .iter()
            .filter(|t| lexicon.hedging_words.iter().any(|h| h == *t))
            .count(),
    }
}
