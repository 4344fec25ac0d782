//! Candidate extraction from raw text.
//!
//! Finds defining sentences, ones that carry the parenthesized shortform,
//! and turns each into a candidate phrase for scoring. Sentences that talk
//! about the shortform without defining it are collected separately as
//! "other mentions".

use std::collections::HashSet;

use crate::tokenize::{split_sentences, tokenize_words};

/// Everything extraction produces for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// One candidate phrase per defining sentence, in document order.
    /// Duplicates are preserved; the scorer counts them as occurrences.
    pub candidates: Vec<Vec<String>>,
    /// Non-defining sentences mentioning the shortform, joined by spaces.
    pub other_mentions: String,
}

/// Extracts longform candidates for one shortform.
pub struct Processor {
    shortform: String,
    defining_pattern: String,
    exclude: HashSet<String>,
}

impl Processor {
    /// Processor with no stop words.
    pub fn new(shortform: &str) -> Processor {
        Processor::with_exclusions(shortform, std::iter::empty::<String>())
    }

    /// Processor that cuts candidates after the last excluded stop word.
    pub fn with_exclusions<I, S>(shortform: &str, exclude: I) -> Processor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Processor {
            shortform: shortform.to_string(),
            defining_pattern: format!("({})", shortform),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn shortform(&self) -> &str {
        &self.shortform
    }

    /// Pull candidates and other mentions out of a document.
    ///
    /// A sentence is defining when it contains the literal parenthesized
    /// shortform. Defining sentences whose token stream does not exhibit
    /// the `(`, shortform, `)` triple are skipped, as are candidates left
    /// empty after stop-word cutting.
    pub fn extract(&self, text: &str) -> Extraction {
        let mut candidates = Vec::new();
        let mut other = Vec::new();
        for sentence in split_sentences(text) {
            if sentence.contains(&self.defining_pattern) {
                if let Some(candidate) = self.candidate_from(&sentence) {
                    if !candidate.is_empty() {
                        candidates.push(candidate);
                    }
                }
            } else if sentence.contains(&self.shortform) {
                other.push(sentence);
            }
        }
        Extraction {
            candidates,
            other_mentions: other.join(" "),
        }
    }

    /// Candidate phrase preceding the first parenthesized shortform.
    ///
    /// Tokens before the triple are kept, minus punctuation, lower-cased,
    /// then cut just after the last stop word so only the tail survives.
    fn candidate_from(&self, sentence: &str) -> Option<Vec<String>> {
        let tokens = tokenize_words(sentence);
        let at = tokens.windows(3).position(|w| {
            w[0] == "(" && w[1] == self.shortform && w[2] == ")"
        })?;
        let mut candidate: Vec<String> = tokens[..at]
            .iter()
            .filter(|token| !is_punctuation(token))
            .map(|token| token.to_lowercase())
            .collect();
        if let Some(cut) = candidate.iter().rposition(|t| self.exclude.contains(t)) {
            candidate.drain(..=cut);
        }
        Some(candidate)
    }
}

/// Single-character non-alphanumeric tokens, as the tokenizer emits them.
fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric(),
        _ => false,
    }
}
