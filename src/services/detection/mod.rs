// Detection Module
// Heuristic AI-authorship scoring organized into independent analyzers:
// - lexicon: fixed word tables and human-error patterns
// - pattern: repetition, stock phrases, transitions, grammar perfection
// - structure: sentence/paragraph regularity and logical-flow words
// - vocabulary: diversity, long-word ratio, formality
// - metadata: descriptive counts and readability (not scored)
// - sensitivity / aggregation: weighting, verdict and reasons
// - engine: runs everything over one text

pub mod lexicon;
pub mod pattern;
pub mod structure;
pub mod vocabulary;
pub mod metadata;
pub mod sensitivity;
pub mod aggregation;
pub mod engine;

pub use lexicon::Lexicon;
pub use pattern::analyze_patterns;
pub use structure::analyze_structure;
pub use vocabulary::analyze_vocabulary;
pub use metadata::{extract_metadata, readability_estimate};
pub use sensitivity::{adjusted_confidence, decide, is_valid_sensitivity, reported_confidence, sensitivity_multiplier};
pub use aggregation::{aggregate, compile_reasons, weighted_score, Verdict};
pub use engine::{AnalysisError, ScoringEngine};
