// Lexicon
// Fixed word lists and human-error patterns consumed by the analyzers

use regex::Regex;
use std::sync::OnceLock;

/// Stock transitional and hedging phrases.
pub const GENERIC_PHRASES: &[&str] = &[
    "in conclusion",
    "furthermore",
    "moreover",
    "additionally",
    "it is important to note",
    "it should be noted",
    "it is worth noting",
    "in summary",
    "to summarize",
    "in addition",
    "consequently",
    "as a result",
    "on the other hand",
    "in today's world",
    "plays a crucial role",
    "overall",
];

pub const TRANSITION_WORDS: &[&str] = &[
    "however",
    "therefore",
    "meanwhile",
    "subsequently",
    "nevertheless",
];

pub const FORMAL_WORDS: &[&str] = &[
    "utilize",
    "demonstrate",
    "significant",
    "appropriate",
    "comprehensive",
    "substantial",
];

pub const FLOW_WORDS: &[&str] = &[
    "first", "second", "third", "finally", "next", "then", "therefore", "thus",
];

/// Hedging words counted as an informational style marker.
pub const HEDGING_WORDS: &[&str] = &["may", "might", "could", "possibly", "perhaps", "generally"];

/// Slips people make and generators rarely do.
/// Order: lowercase "i", doubled spaces, stacked terminal punctuation,
/// space before punctuation.
pub const HUMAN_ERROR_PATTERNS: &[&str] = &[r"\bi\b", r" {2,}", r"[.!?]{2,}", r" [.,;:!?]"];

/// Word tables and compiled patterns handed to each analyzer.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub generic_phrases: Vec<String>,
    pub transition_words: Vec<String>,
    pub formal_words: Vec<String>,
    pub flow_words: Vec<String>,
    pub hedging_words: Vec<String>,
    human_error_patterns: Vec<Regex>,
}

impl Lexicon {
    /// Shared instance built from the constant tables.
    pub fn standard() -> &'static Lexicon {
        static LEXICON: OnceLock<Lexicon> = OnceLock::new();
        LEXICON.get_or_init(|| {
            let patterns = HUMAN_ERROR_PATTERNS
                .iter()
                .map(|p| Regex::new(p).expect("human error regex"))
                .collect();
            Lexicon {
                generic_phrases: to_owned(GENERIC_PHRASES),
                transition_words: to_owned(TRANSITION_WORDS),
                formal_words: to_owned(FORMAL_WORDS),
                flow_words: to_owned(FLOW_WORDS),
                hedging_words: to_owned(HEDGING_WORDS),
                human_error_patterns: patterns,
            }
        })
    }

    /// Copy of this lexicon with a different set of human-error patterns.
    pub fn with_human_error_patterns(&self, patterns: &[&str]) -> Result<Lexicon, regex::Error> {
        let compiled = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Lexicon {
            human_error_patterns: compiled,
            ..self.clone()
        })
    }

    pub fn human_error_patterns(&self) -> &[Regex] {
        &self.human_error_patterns
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
