//! Brute-force alignment search.
//!
//! Enumerates every valid alignment of a candidate against the shortform
//! and keeps the best one, pricing each alignment with
//! [`crate::align::score_alignment`]. Runtime is exponential in the number
//! of labeled slots, so this is a validation tool for test-sized inputs,
//! not a production path. [`crate::align::optimize`] must agree with it
//! exactly, ties included.

use crate::align::{self, score_alignment, AlignError};
use crate::models::{AlignmentResult, CandidateArrays};

/// Find the best alignment by exhaustive enumeration.
///
/// Applies the same tie-break as the optimizer: among equal-scoring
/// alignments the lexicographically earliest matched positions win, and a
/// longer alignment beats any strict prefix of itself.
pub fn exhaustive_search(
    arrays: &CandidateArrays,
    penalties: &[f64],
    alpha: f64,
) -> Result<AlignmentResult, AlignError> {
    align::validate(arrays, penalties, alpha)?;

    let mut best = Vec::new();
    let mut best_score = score_alignment(arrays, penalties, &best);
    let mut current = Vec::new();
    extend(
        arrays,
        penalties,
        0,
        0,
        &mut current,
        &mut best,
        &mut best_score,
    );

    Ok(AlignmentResult {
        score: best_score,
        matches: best,
    })
}

/// Grow the current alignment with every legal next match.
///
/// Each recursion level tries all positions at or after `start` whose
/// label is at least `next_letter`; every node of the search tree is
/// itself a complete alignment and gets scored.
fn extend(
    arrays: &CandidateArrays,
    penalties: &[f64],
    start: usize,
    next_letter: usize,
    current: &mut Vec<(usize, usize)>,
    best: &mut Vec<(usize, usize)>,
    best_score: &mut f64,
) {
    for position in start..arrays.len() {
        let label = arrays.x[position];
        if label < next_letter as i32 || label < 0 {
            continue;
        }
        let letter = label as usize;
        current.push((letter, position));
        let score = score_alignment(arrays, penalties, current);
        if score > *best_score || (score == *best_score && earlier(current, best)) {
            *best_score = score;
            best.clear();
            best.extend_from_slice(current);
        }
        extend(
            arrays,
            penalties,
            position + 1,
            letter + 1,
            current,
            best,
            best_score,
        );
        current.pop();
    }
}

/// Whether `a`'s matched positions beat `b`'s under the tie-break.
fn earlier(a: &[(usize, usize)], b: &[(usize, usize)]) -> bool {
    for (&(_, pa), &(_, pb)) in a.iter().zip(b.iter()) {
        if pa != pb {
            return pa < pb;
        }
    }
    a.len() > b.len()
}

/// Run the search on a fixed two-letter example and return its score.
///
/// The example aligns both letters at full prize, so a healthy build
/// returns exactly 4.0.
pub fn self_check() -> Result<f64, AlignError> {
    let arrays = CandidateArrays {
        x: vec![-1, 0, -1, 1, -1, 0, -1],
        prizes: vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.5, 0.0],
        word_boundaries: vec![2, 6],
        word_prizes: vec![1.0, 1.0],
    };
    let penalties = [0.4, 0.2];
    let result = exhaustive_search(&arrays, &penalties, 0.5)?;
    Ok(result.score)
}
