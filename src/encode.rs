//! Candidate array construction.
//!
//! Turns a candidate phrase (ordered, lower-cased, punctuation-free words)
//! and a shortform into the numeric arrays the optimizer consumes. The
//! layout is fixed: a leading gap slot, then for every character a real
//! slot followed by a gap slot, with each word's boundary pointing at its
//! trailing gap.

use thiserror::Error;

use crate::models::CandidateArrays;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("candidate has no words")]
    NoWords,
    #[error("candidate word {0} is empty")]
    EmptyWord(usize),
    #[error("shortform is empty")]
    EmptyShortform,
}

/// Encode a candidate phrase against a shortform.
///
/// Character prizes halve with each character of a word (`1.0, 0.5, 0.25,
/// ...`) and reset at the next word; every character consumes a decay step
/// whether or not it matches a shortform letter. Word prizes start at `1.0`
/// each. The shortform is lowercased before matching, so callers must pass
/// lower-cased words as the extraction layer produces them.
pub fn encode_candidate(words: &[String], shortform: &str) -> Result<CandidateArrays, EncodeError> {
    if words.is_empty() {
        return Err(EncodeError::NoWords);
    }
    let letters: Vec<char> = shortform.to_lowercase().chars().collect();
    if letters.is_empty() {
        return Err(EncodeError::EmptyShortform);
    }

    let char_total: usize = words.iter().map(|w| w.chars().count()).sum();
    let n = 2 * char_total + 1;

    let mut x = Vec::with_capacity(n);
    let mut prizes = Vec::with_capacity(n);
    let mut word_boundaries = Vec::with_capacity(words.len());

    // Leading gap, then (real, gap) pairs: real slots land on odd indices.
    x.push(-1);
    prizes.push(0.0);
    for (index, word) in words.iter().enumerate() {
        if word.is_empty() {
            return Err(EncodeError::EmptyWord(index));
        }
        let mut prize = 1.0f64;
        for c in word.chars() {
            x.push(label_for(c, &letters));
            prizes.push(prize);
            x.push(-1);
            prizes.push(0.0);
            prize /= 2.0;
        }
        word_boundaries.push(x.len() - 1);
    }

    Ok(CandidateArrays {
        x,
        prizes,
        word_boundaries,
        word_prizes: vec![1.0; words.len()],
    })
}

/// Letter index a character can satisfy, or -1.
///
/// When the shortform repeats a letter the smallest index wins; the
/// optimizer is still free to decline the match.
fn label_for(c: char, letters: &[char]) -> i32 {
    match letters.iter().position(|&letter| letter == c) {
        Some(k) => k as i32,
        None => -1,
    }
}
