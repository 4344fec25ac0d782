use serde::{Deserialize, Serialize};

/// Numeric encoding of one candidate longform, ready for alignment.
///
/// Positions alternate between gap slots (even indices) and real-character
/// slots (odd indices), starting with a leading gap. `x[i]` holds the index
/// of the shortform letter the character at position `i` can satisfy, or -1
/// for gaps and characters that match no letter. Word boundaries point at
/// the trailing gap of each word.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateArrays {
    pub x: Vec<i32>,
    pub prizes: Vec<f64>,
    pub word_boundaries: Vec<usize>,
    pub word_prizes: Vec<f64>,
}

impl CandidateArrays {
    /// Number of positions in the sequence.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of words the sequence was built from.
    pub fn word_count(&self) -> usize {
        self.word_boundaries.len()
    }

    /// Copy with character prizes scaled by `alpha` and word prizes by
    /// `1 - alpha`. The optimizer maximizes whatever it is given, so the
    /// blend is applied here rather than inside the inner loop.
    pub fn blended(&self, alpha: f64) -> CandidateArrays {
        CandidateArrays {
            x: self.x.clone(),
            prizes: self.prizes.iter().map(|p| p * alpha).collect(),
            word_boundaries: self.word_boundaries.clone(),
            word_prizes: self.word_prizes.iter().map(|w| w * (1.0 - alpha)).collect(),
        }
    }
}

/// Result of aligning a shortform against one encoded candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Total prize minus penalties for the best alignment found.
    pub score: f64,
    /// Matched `(letter, position)` pairs, both strictly increasing.
    pub matches: Vec<(usize, usize)>,
}

impl AlignmentResult {
    /// Matched positions in increasing order.
    pub fn matched_positions(&self) -> Vec<usize> {
        self.matches.iter().map(|&(_, position)| position).collect()
    }

    /// Matched shortform letter indices in increasing order.
    pub fn matched_letters(&self) -> Vec<usize> {
        self.matches.iter().map(|&(letter, _)| letter).collect()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Tunable parameters for the scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Blend between character prizes (weight `alpha`) and word prizes
    /// (weight `1 - alpha`). Must lie in [0, 1].
    pub alpha: f64,
    /// Penalty charged for leaving the first shortform letter unmatched.
    pub base_penalty: f64,
    /// Multiplier applied to the penalty for each subsequent letter.
    pub penalty_decay: f64,
    /// Words that cut a candidate on the left during extraction.
    pub exclude: Vec<String>,
    /// Drop ranked candidates scoring below this value.
    pub min_score: Option<f64>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringParams {
            alpha: 0.5,
            base_penalty: 0.4,
            penalty_decay: 0.5,
            exclude: Vec::new(),
            min_score: None,
        }
    }
}

impl ScoringParams {
    /// Per-letter penalties for a shortform of `letters` characters:
    /// `base_penalty`, decayed once per letter.
    pub fn penalties_for(&self, letters: usize) -> Vec<f64> {
        let mut penalties = Vec::with_capacity(letters);
        let mut penalty = self.base_penalty;
        for _ in 0..letters {
            penalties.push(penalty);
            penalty *= self.penalty_decay;
        }
        penalties
    }
}

/// One candidate longform with its optimized score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredLongform {
    /// Candidate words joined with single spaces.
    pub longform: String,
    pub words: Vec<String>,
    /// How many defining sentences produced this exact candidate.
    pub occurrences: usize,
    pub score: f64,
    /// Positions in the encoded sequence matched by shortform letters.
    pub matched_positions: Vec<usize>,
}

/// Aggregate statistics over the ranked candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub candidate_count: usize,
    pub occurrence_total: usize,
    pub best_score: Option<f64>,
    pub avg_score: f64,
}

/// Full output of a scoring run, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringReport {
    pub version: String,
    pub shortform: String,
    pub parameters: ScoringParams,
    pub summary: ScoringSummary,
    /// Candidates ranked best-first.
    pub candidates: Vec<ScoredLongform>,
    /// Sentences that mention the shortform without defining it.
    pub other_mentions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ScoringParams::default();
        assert_eq!(params.alpha, 0.5);
        assert_eq!(params.base_penalty, 0.4);
        assert_eq!(params.penalty_decay, 0.5);
        assert!(params.exclude.is_empty());
        assert!(params.min_score.is_none());
    }

    #[test]
    fn test_penalties_decay_per_letter() {
        let params = ScoringParams::default();
        assert_eq!(params.penalties_for(2), vec![0.4, 0.2]);
        assert_eq!(params.penalties_for(4), vec![0.4, 0.2, 0.1, 0.05]);
        assert!(params.penalties_for(0).is_empty());
    }

    #[test]
    fn test_blended_scales_both_prize_kinds() {
        let arrays = CandidateArrays {
            x: vec![-1, 0, -1],
            prizes: vec![0.0, 1.0, 0.0],
            word_boundaries: vec![2],
            word_prizes: vec![1.0],
        };
        let blended = arrays.blended(0.25);
        assert_eq!(blended.prizes, vec![0.0, 0.25, 0.0]);
        assert_eq!(blended.word_prizes, vec![0.75]);
        assert_eq!(blended.x, arrays.x);
        assert_eq!(blended.word_boundaries, arrays.word_boundaries);
    }

    #[test]
    fn test_alignment_result_accessors() {
        let result = AlignmentResult {
            score: 4.0,
            matches: vec![(0, 1), (1, 3)],
        };
        assert_eq!(result.matched_positions(), vec![1, 3]);
        assert_eq!(result.matched_letters(), vec![0, 1]);
        assert_eq!(result.match_count(), 2);
    }
}
