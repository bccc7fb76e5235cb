// DeepShield Core Services

pub mod text_processor;
pub mod config_store;
pub mod detection;

pub use text_processor::*;
pub use config_store::*;

pub use detection::{
    aggregate,
    analyze_patterns,
    analyze_structure,
    analyze_vocabulary,
    compile_reasons,
    extract_metadata,
    AnalysisError,
    Lexicon,
    ScoringEngine,
    Verdict,
};
