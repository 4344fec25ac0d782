//! Acrolign Shortform Alignment Library
//!
//! Alignment-based scoring of candidate longforms for a shortform
//! (abbreviation). Candidates are pulled out of defining sentences, the
//! ones that carry the parenthesized shortform, and ranked by how well
//! the shortform's letters align in order with their characters.
//!
//! # Example
//!
//! ```
//! use acrolign::prelude::*;
//!
//! let text = "Signaling through the estrogen receptor (ER) controls growth. \
//!             Levels of ER vary across tissues.";
//! let params = ScoringParams {
//!     exclude: vec!["the".to_string()],
//!     ..Default::default()
//! };
//!
//! let report = score_document(text, "ER", &params, false);
//!
//! assert_eq!(report.candidates[0].longform, "estrogen receptor");
//! assert!(report.other_mentions.contains("Levels of ER"));
//! ```
//!
//! # Scoring a Single Candidate
//!
//! ```
//! use acrolign::prelude::*;
//!
//! let words: Vec<String> = ["integrated", "pest", "management"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let result = score_phrase(&words, "IPM", &ScoringParams::default()).unwrap();
//!
//! assert_eq!(result.matched_positions().len(), 3);
//! ```

pub mod align;
pub mod encode;
pub mod extract;
pub mod models;
pub mod oracle;
pub mod output;
pub mod scorer;
pub mod tokenize;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::align::{
        optimize, quick_match_check, score_alignment, validate, AlignError,
    };
    pub use crate::encode::{encode_candidate, EncodeError};
    pub use crate::extract::{Extraction, Processor};
    pub use crate::models::{
        AlignmentResult, CandidateArrays, ScoredLongform, ScoringParams, ScoringReport,
        ScoringSummary,
    };
    pub use crate::oracle::{exhaustive_search, self_check};
    pub use crate::output::{
        format_candidate, print_candidates, print_summary, write_csv, write_csv_file,
        write_json, write_json_file, OutputError,
    };
    pub use crate::scorer::{score_document, score_phrase, ScoreError};
    pub use crate::tokenize::{split_sentences, tokenize_words};
}

// Re-export commonly used types at the crate root
pub use models::{
    AlignmentResult, CandidateArrays, ScoredLongform, ScoringParams, ScoringReport,
};
