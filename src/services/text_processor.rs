// Text Processing Service
// Splitting, tokenizing and fingerprint helpers shared by every analyzer

use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Length of the debugging fingerprint returned by [`text_hash`].
pub const TEXT_HASH_LEN: usize = 8;

fn sentence_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence break regex"))
}

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"))
}

fn alpha_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]+").expect("alpha word regex"))
}

fn vowel_group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[aeiouy]+").expect("vowel group regex"))
}

/// Split on runs of terminal punctuation; whitespace-only fragments are dropped.
/// Fragments are returned untrimmed.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_break_re()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Split on blank lines. Fragments are trimmed; empty ones are dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break_re()
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Whitespace tokens, lowercased. Punctuation stays attached.
pub fn whitespace_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Alphabetic tokens of the lowercased text.
pub fn alpha_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    alpha_word_re()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Non-overlapping occurrences of `needle` in `haystack`. Both sides are
/// expected to be lowercased already.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Syllable approximation: vowel groups in the lowercased text.
pub fn count_syllables(text: &str) -> usize {
    vowel_group_re().find_iter(&text.to_lowercase()).count()
}

/// Deterministic short fingerprint of the input, for log correlation only.
pub fn text_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(TEXT_HASH_LEN);
    digest
}

/// Population mean and standard deviation.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_drops_empty_fragments() {
        let sentences = split_sentences("One. Two!! Three?  ...  ");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[1].trim(), "Two");
    }

    #[test]
    fn test_split_sentences_without_terminal_punctuation() {
        assert_eq!(split_sentences("no punctuation here").len(), 1);
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_split_paragraphs_on_blank_lines() {
        let text = "First paragraph.\n\nSecond paragraph.\n  \n\nThird.";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph.", "Third."]);
        assert_eq!(split_paragraphs("single\nline break").len(), 1);
    }

    #[test]
    fn test_tokenizers() {
        assert_eq!(whitespace_words("Hello  World,\tAgain"), vec!["hello", "world,", "again"]);
        assert_eq!(alpha_tokens("It's 2024, OK?"), vec!["it", "s", "ok"]);
        assert!(alpha_tokens("1234 !!").is_empty());
    }

    #[test]
    fn test_count_occurrences_is_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("however, however", "however"), 2);
        assert_eq!(count_occurrences("text", ""), 0);
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("Beautiful day"), 4);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_text_hash_is_stable_and_short() {
        let a = text_hash("same text");
        let b = text_hash("same text");
        assert_eq!(a, b);
        assert_eq!(a.len(), TEXT_HASH_LEN);
        assert_ne!(a, text_hash("other text"));
    }

    #[test]
    fn test_mean_and_std_dev() {
        let (mean, std) = mean_and_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mean, 5.0);
        assert_eq!(std, 2.0);
        assert_eq!(mean_and_std_dev(&[]), (0.0, 0.0));
    }
}
