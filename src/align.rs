//! Shortform-to-candidate alignment scoring.
//!
//! This is the HOT PATH - every extracted candidate passes through
//! [`optimize`], so the value table is a single flat allocation and the
//! inner loop touches nothing else.

use thiserror::Error;

use crate::models::{AlignmentResult, CandidateArrays};

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("position sequence is empty")]
    EmptyPositions,
    #[error("prizes length {prizes} does not match position count {positions}")]
    PrizeLength { positions: usize, prizes: usize },
    #[error("no word boundaries given")]
    NoBoundaries,
    #[error("word prize count {word_prizes} does not match boundary count {boundaries}")]
    WordPrizeLength {
        boundaries: usize,
        word_prizes: usize,
    },
    #[error("word boundaries must increase strictly at index {0}")]
    UnsortedBoundaries(usize),
    #[error("final word boundary {found} must equal the last position {expected}")]
    FinalBoundary { found: usize, expected: usize },
    #[error("position {position} labels shortform letter {label} but only {letters} letters exist")]
    LabelOutOfRange {
        position: usize,
        label: i32,
        letters: usize,
    },
    #[error("{array}[{index}] is {value}, expected a finite non-negative number")]
    InvalidValue {
        array: &'static str,
        index: usize,
        value: f64,
    },
    #[error("alpha is {0}, expected a value in [0, 1]")]
    AlphaOutOfRange(f64),
}

/// Check a candidate encoding and penalty vector for shape and domain
/// errors before alignment.
pub fn validate(
    arrays: &CandidateArrays,
    penalties: &[f64],
    alpha: f64,
) -> Result<(), AlignError> {
    let n = arrays.x.len();
    let m = penalties.len();
    if n == 0 {
        return Err(AlignError::EmptyPositions);
    }
    if arrays.prizes.len() != n {
        return Err(AlignError::PrizeLength {
            positions: n,
            prizes: arrays.prizes.len(),
        });
    }
    if arrays.word_boundaries.is_empty() {
        return Err(AlignError::NoBoundaries);
    }
    if arrays.word_prizes.len() != arrays.word_boundaries.len() {
        return Err(AlignError::WordPrizeLength {
            boundaries: arrays.word_boundaries.len(),
            word_prizes: arrays.word_prizes.len(),
        });
    }
    for (i, pair) in arrays.word_boundaries.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(AlignError::UnsortedBoundaries(i + 1));
        }
    }
    let last = arrays.word_boundaries[arrays.word_boundaries.len() - 1];
    if last != n - 1 {
        return Err(AlignError::FinalBoundary {
            found: last,
            expected: n - 1,
        });
    }
    for (position, &label) in arrays.x.iter().enumerate() {
        if label < -1 || (label >= 0 && label as usize >= m) {
            return Err(AlignError::LabelOutOfRange {
                position,
                label,
                letters: m,
            });
        }
    }
    check_values("prizes", &arrays.prizes)?;
    check_values("word_prizes", &arrays.word_prizes)?;
    check_values("penalties", penalties)?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(AlignError::AlphaOutOfRange(alpha));
    }
    Ok(())
}

fn check_values(array: &'static str, values: &[f64]) -> Result<(), AlignError> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(AlignError::InvalidValue {
                array,
                index,
                value,
            });
        }
    }
    Ok(())
}

/// Containing word index for every position.
fn word_index_table(word_boundaries: &[usize], n: usize) -> Vec<usize> {
    let mut table = vec![0usize; n];
    let mut word = 0;
    for (position, slot) in table.iter_mut().enumerate() {
        *slot = word;
        if position == word_boundaries[word] {
            word += 1;
        }
    }
    table
}

// Value of permanently dropping letter `k` while standing at position `i`.
#[inline(always)]
fn drop_value(table: &[f64], width: usize, i: usize, k: usize, penalties: &[f64]) -> f64 {
    table[i * width + k + 1] - penalties[k]
}

// Value of matching letter `k` to position `i`. Only meaningful when
// `x[i] == k`.
#[inline(always)]
fn match_value(
    table: &[f64],
    width: usize,
    i: usize,
    k: usize,
    prizes: &[f64],
    word_prizes: &[f64],
    words: &[usize],
) -> f64 {
    prizes[i] + word_prizes[words[i]] + table[(i + 1) * width + k + 1]
}

/// Find the highest-scoring alignment of the shortform letters against the
/// encoded candidate.
///
/// Each position may satisfy at most one letter, matched letters must keep
/// their order, and every unmatched letter costs its penalty. Ties on score
/// resolve to the alignment whose matched positions come earliest, with a
/// longer alignment preferred over any strict prefix of it. `alpha` is
/// validated here but applied by [`CandidateArrays::blended`]; the arrays
/// are maximized exactly as given.
#[inline]
pub fn optimize(
    arrays: &CandidateArrays,
    penalties: &[f64],
    alpha: f64,
) -> Result<AlignmentResult, AlignError> {
    validate(arrays, penalties, alpha)?;

    let n = arrays.x.len();
    let m = penalties.len();
    let words = word_index_table(&arrays.word_boundaries, n);

    // table[i * width + k] = best value over positions i.. with letters k..
    // still undecided. Row n and column m stay reachable as bases.
    let width = m + 1;
    let mut table = vec![0.0f64; (n + 1) * width];
    for k in (0..m).rev() {
        let value = drop_value(&table, width, n, k, penalties);
        table[n * width + k] = value;
    }
    for i in (0..n).rev() {
        for k in (0..m).rev() {
            let skip = table[(i + 1) * width + k];
            let dropped = drop_value(&table, width, i, k, penalties);
            let mut best = if dropped > skip { dropped } else { skip };
            if arrays.x[i] == k as i32 {
                let matched = match_value(
                    &table,
                    width,
                    i,
                    k,
                    &arrays.prizes,
                    &arrays.word_prizes,
                    &words,
                );
                if matched > best {
                    best = matched;
                }
            }
            table[i * width + k] = best;
        }
    }

    // Front-to-back reconstruction: match position i whenever some optimal
    // completion from the current state does. The comparisons reuse the
    // exact expressions of the fill, so equality is bitwise and needs no
    // tolerance.
    let mut matches = Vec::new();
    let mut i = 0;
    let mut k = 0;
    while i < n && k < m {
        let label = arrays.x[i];
        if label >= k as i32 {
            let target = label as usize;
            let mut on_path = true;
            let mut j = k;
            while j < target {
                if table[i * width + j] != drop_value(&table, width, i, j, penalties) {
                    on_path = false;
                    break;
                }
                j += 1;
            }
            if on_path {
                let matched = match_value(
                    &table,
                    width,
                    i,
                    target,
                    &arrays.prizes,
                    &arrays.word_prizes,
                    &words,
                );
                if table[i * width + target] == matched {
                    matches.push((target, i));
                    k = target + 1;
                }
            }
        }
        i += 1;
    }

    Ok(AlignmentResult {
        score: table[0],
        matches,
    })
}

/// Price a concrete alignment under the same model [`optimize`] maximizes:
/// prize plus containing word prize per match, minus the penalty of every
/// letter left unmatched.
///
/// `matches` must index into `arrays` and `penalties`; pairs produced by
/// [`optimize`] or [`crate::oracle::exhaustive_search`] always do.
#[inline]
pub fn score_alignment(
    arrays: &CandidateArrays,
    penalties: &[f64],
    matches: &[(usize, usize)],
) -> f64 {
    let words = word_index_table(&arrays.word_boundaries, arrays.x.len());
    let mut matched = vec![false; penalties.len()];
    let mut score = 0.0;
    for &(letter, position) in matches {
        matched[letter] = true;
        score += arrays.prizes[position] + arrays.word_prizes[words[position]];
    }
    for (letter, &penalty) in penalties.iter().enumerate() {
        if !matched[letter] {
            score -= penalty;
        }
    }
    score
}

/// Cheap guard to skip the full alignment: true when any candidate
/// character appears in the shortform at all (case-insensitive). When this
/// returns false the best score is exactly the sum of all penalties,
/// negated.
pub fn quick_match_check(words: &[String], shortform: &str) -> bool {
    let letters: Vec<char> = shortform.to_lowercase().chars().collect();
    words
        .iter()
        .any(|word| word.to_lowercase().chars().any(|c| letters.contains(&c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_word_case() -> (CandidateArrays, Vec<f64>) {
        let arrays = CandidateArrays {
            x: vec![-1, 0, -1, 1, -1, 0, -1],
            prizes: vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.5, 0.0],
            word_boundaries: vec![2, 6],
            word_prizes: vec![1.0, 1.0],
        };
        let penalties = vec![0.4, 0.2];
        (arrays, penalties)
    }

    #[test]
    fn test_optimize_two_word_case() {
        let (arrays, penalties) = two_word_case();
        let result = optimize(&arrays, &penalties, 0.5).unwrap();
        assert_eq!(result.score, 4.0);
        assert_eq!(result.matches, vec![(0, 1), (1, 3)]);
        assert_eq!(result.matched_positions(), vec![1, 3]);
    }

    #[test]
    fn test_no_match_score_is_negated_penalty_sum() {
        let arrays = CandidateArrays {
            x: vec![-1, -1, -1, -1, -1],
            prizes: vec![0.0, 1.0, 0.0, 0.5, 0.0],
            word_boundaries: vec![4],
            word_prizes: vec![1.0],
        };
        let penalties = vec![0.4, 0.2];
        let result = optimize(&arrays, &penalties, 0.5).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.score, -penalties.iter().sum::<f64>());
    }

    #[test]
    fn test_skips_early_match_when_later_scores_higher() {
        // Matching letter 0 at position 1 would forfeit the better match
        // at position 3, so the traceback must pass position 1 by.
        let arrays = CandidateArrays {
            x: vec![-1, 0, -1, 0, -1],
            prizes: vec![0.0, 0.25, 0.0, 1.0, 0.0],
            word_boundaries: vec![4],
            word_prizes: vec![0.5],
        };
        let penalties = vec![0.4, 0.2];
        let result = optimize(&arrays, &penalties, 0.5).unwrap();
        assert_eq!(result.matched_positions(), vec![3]);
        assert_eq!(result.score, 1.0 + 0.5 - 0.2);
    }

    #[test]
    fn test_tied_score_prefers_earliest_position() {
        let arrays = CandidateArrays {
            x: vec![-1, 0, -1, 0, -1],
            prizes: vec![0.0, 1.0, 0.0, 1.0, 0.0],
            word_boundaries: vec![4],
            word_prizes: vec![1.0],
        };
        let penalties = vec![0.1];
        let result = optimize(&arrays, &penalties, 0.5).unwrap();
        assert_eq!(result.score, 2.0);
        assert_eq!(result.matched_positions(), vec![1]);
    }

    #[test]
    fn test_letters_must_match_in_order() {
        // Letter 1 appears before letter 0, so at most one of them can be
        // matched and the optimizer picks the more valuable.
        let arrays = CandidateArrays {
            x: vec![-1, 1, -1, 0, -1],
            prizes: vec![0.0, 0.5, 0.0, 1.0, 0.0],
            word_boundaries: vec![4],
            word_prizes: vec![0.0],
        };
        let penalties = vec![0.4, 0.2];
        let result = optimize(&arrays, &penalties, 0.5).unwrap();
        assert_eq!(result.matches, vec![(0, 3)]);
        assert_eq!(result.score, 1.0 - 0.2);
    }

    #[test]
    fn test_score_alignment_matches_optimizer_score() {
        let (arrays, penalties) = two_word_case();
        let result = optimize(&arrays, &penalties, 0.5).unwrap();
        assert_eq!(
            score_alignment(&arrays, &penalties, &result.matches),
            result.score
        );
    }

    #[test]
    fn test_empty_shortform_scores_zero() {
        let arrays = CandidateArrays {
            x: vec![-1, -1, -1],
            prizes: vec![0.0, 1.0, 0.0],
            word_boundaries: vec![2],
            word_prizes: vec![1.0],
        };
        let result = optimize(&arrays, &[], 0.5).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_rejects_empty_positions() {
        let arrays = CandidateArrays {
            x: vec![],
            prizes: vec![],
            word_boundaries: vec![],
            word_prizes: vec![],
        };
        assert!(matches!(
            optimize(&arrays, &[0.4], 0.5),
            Err(AlignError::EmptyPositions)
        ));
    }

    #[test]
    fn test_rejects_shape_mismatches() {
        let (mut arrays, penalties) = two_word_case();
        arrays.prizes.pop();
        assert!(matches!(
            optimize(&arrays, &penalties, 0.5),
            Err(AlignError::PrizeLength { .. })
        ));

        let (mut arrays, penalties) = two_word_case();
        arrays.word_prizes.pop();
        assert!(matches!(
            optimize(&arrays, &penalties, 0.5),
            Err(AlignError::WordPrizeLength { .. })
        ));

        let (mut arrays, penalties) = two_word_case();
        arrays.word_boundaries = vec![6, 2];
        assert!(matches!(
            optimize(&arrays, &penalties, 0.5),
            Err(AlignError::UnsortedBoundaries(1))
        ));

        let (mut arrays, penalties) = two_word_case();
        arrays.word_boundaries = vec![2, 5];
        assert!(matches!(
            optimize(&arrays, &penalties, 0.5),
            Err(AlignError::FinalBoundary {
                found: 5,
                expected: 6
            })
        ));
    }

    #[test]
    fn test_rejects_label_outside_shortform() {
        let (mut arrays, penalties) = two_word_case();
        arrays.x[3] = 2;
        assert!(matches!(
            optimize(&arrays, &penalties, 0.5),
            Err(AlignError::LabelOutOfRange {
                position: 3,
                label: 2,
                letters: 2
            })
        ));
    }

    #[test]
    fn test_rejects_bad_numeric_values() {
        let (mut arrays, penalties) = two_word_case();
        arrays.prizes[1] = -1.0;
        assert!(matches!(
            optimize(&arrays, &penalties, 0.5),
            Err(AlignError::InvalidValue { array: "prizes", .. })
        ));

        let (arrays, _) = two_word_case();
        assert!(matches!(
            optimize(&arrays, &[0.4, f64::NAN], 0.5),
            Err(AlignError::InvalidValue {
                array: "penalties",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_alpha_outside_unit_interval() {
        let (arrays, penalties) = two_word_case();
        assert!(matches!(
            optimize(&arrays, &penalties, 1.5),
            Err(AlignError::AlphaOutOfRange(_))
        ));
        assert!(matches!(
            optimize(&arrays, &penalties, f64::NAN),
            Err(AlignError::AlphaOutOfRange(_))
        ));
        assert!(optimize(&arrays, &penalties, 0.0).is_ok());
        assert!(optimize(&arrays, &penalties, 1.0).is_ok());
    }

    #[test]
    fn test_quick_match_check() {
        let words = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(quick_match_check(&words(&["estrogen", "receptor"]), "ER"));
        assert!(!quick_match_check(&words(&["bulk", "djinn"]), "er"));
        assert!(!quick_match_check(&[], "er"));
    }

    #[test]
    fn test_optimize_is_deterministic() {
        let (arrays, penalties) = two_word_case();
        let first = optimize(&arrays, &penalties, 0.5).unwrap();
        let second = optimize(&arrays, &penalties, 0.5).unwrap();
        assert_eq!(first, second);
    }
}
