//! Document scoring orchestration.
//!
//! This module coordinates the full scoring pipeline for one document:
//! extraction, deduplication, encoding, alignment, and ranking.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

use crate::align::{optimize, quick_match_check, AlignError};
use crate::encode::{encode_candidate, EncodeError};
use crate::extract::Processor;
use crate::models::*;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Align(#[from] AlignError),
}

/// Score one candidate phrase against a shortform.
pub fn score_phrase(
    words: &[String],
    shortform: &str,
    params: &ScoringParams,
) -> Result<AlignmentResult, ScoreError> {
    let penalties = params.penalties_for(shortform.chars().count());
    let arrays = encode_candidate(words, shortform)?.blended(params.alpha);
    Ok(optimize(&arrays, &penalties, params.alpha)?)
}

/// Extract, score, and rank every candidate longform in a document.
pub fn score_document(
    text: &str,
    shortform: &str,
    params: &ScoringParams,
    show_progress: bool,
) -> ScoringReport {
    let processor = Processor::with_exclusions(shortform, params.exclude.iter().cloned());
    if show_progress {
        eprintln!("Extracting candidates for ({})...", shortform);
    }
    let extraction = processor.extract(text);
    let unique = dedupe_candidates(extraction.candidates);

    if show_progress {
        let occurrences: usize = unique.iter().map(|(_, count)| count).sum();
        eprintln!(
            "  Candidates: {} unique ({} defining sentences)",
            unique.len(),
            occurrences
        );
    }

    let penalties = params.penalties_for(shortform.chars().count());
    let no_match_score = -penalties.iter().sum::<f64>();

    let progress = if show_progress {
        let pb = ProgressBar::new(unique.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut candidates: Vec<ScoredLongform> = unique
        .par_iter()
        .filter_map(|(words, occurrences)| {
            let result = if quick_match_check(words, shortform) {
                match score_phrase(words, shortform, params) {
                    Ok(result) => result,
                    Err(err) => {
                        if show_progress {
                            eprintln!("  Skipping \"{}\": {}", words.join(" "), err);
                        }
                        if let Some(ref pb) = progress {
                            pb.inc(1);
                        }
                        return None;
                    }
                }
            } else {
                // No character matches any letter; the alignment is known.
                AlignmentResult {
                    score: no_match_score,
                    matches: Vec::new(),
                }
            };

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            Some(ScoredLongform {
                longform: words.join(" "),
                words: words.clone(),
                occurrences: *occurrences,
                score: result.score,
                matched_positions: result.matched_positions(),
            })
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    // Stable sort: equal scores keep extraction order.
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(min_score) = params.min_score {
        candidates.retain(|c| c.score >= min_score);
    }

    if show_progress {
        eprintln!("  Ranked candidates: {}", candidates.len());
    }

    let summary = ScoringSummary {
        candidate_count: candidates.len(),
        occurrence_total: candidates.iter().map(|c| c.occurrences).sum(),
        best_score: candidates.first().map(|c| c.score),
        avg_score: if candidates.is_empty() {
            0.0
        } else {
            candidates.iter().map(|c| c.score).sum::<f64>() / candidates.len() as f64
        },
    };

    ScoringReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        shortform: shortform.to_string(),
        parameters: params.clone(),
        summary,
        candidates,
        other_mentions: extraction.other_mentions,
    }
}

/// Collapse repeated candidates, keeping first-occurrence order and counts.
fn dedupe_candidates(candidates: Vec<Vec<String>>) -> Vec<(Vec<String>, usize)> {
    let mut order: Vec<(Vec<String>, usize)> = Vec::new();
    let mut index: HashMap<Vec<String>, usize> = HashMap::new();
    for words in candidates {
        match index.get(&words) {
            Some(&at) => order[at].1 += 1,
            None => {
                index.insert(words.clone(), order.len());
                order.push((words, 1));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_order() {
        let deduped = dedupe_candidates(vec![
            words(&["b", "c"]),
            words(&["a"]),
            words(&["b", "c"]),
            words(&["b", "c"]),
        ]);
        assert_eq!(
            deduped,
            vec![(words(&["b", "c"]), 3), (words(&["a"]), 1)]
        );
    }

    #[test]
    fn test_score_phrase_two_word_candidate() {
        // Unblended these arrays score 4.0; alpha 0.5 halves both parts.
        let result =
            score_phrase(&words(&["a", "ba"]), "ab", &ScoringParams::default()).unwrap();
        assert_eq!(result.score, 2.0);
        assert_eq!(result.matched_positions(), vec![1, 3]);
    }

    #[test]
    fn test_hopeless_candidate_scores_negated_penalty_sum() {
        let params = ScoringParams::default();
        let report = score_document("Qqq zzz (ER) was found.", "ER", &params, false);
        assert_eq!(report.candidates.len(), 1);
        let penalties = params.penalties_for(2);
        assert_eq!(
            report.candidates[0].score,
            -penalties.iter().sum::<f64>()
        );
        assert!(report.candidates[0].matched_positions.is_empty());
    }

    #[test]
    fn test_report_counts_occurrences() {
        let params = ScoringParams {
            exclude: vec!["the".to_string()],
            ..Default::default()
        };
        let text = "The estrogen receptor (ER) was assayed. \
                    Samples show the estrogen receptor (ER) is active.";
        let report = score_document(text, "ER", &params, false);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].occurrences, 2);
        assert_eq!(report.summary.occurrence_total, 2);
        assert_eq!(report.summary.candidate_count, 1);
    }

    #[test]
    fn test_min_score_drops_low_candidates() {
        let params = ScoringParams {
            min_score: Some(0.0),
            ..Default::default()
        };
        let text = "Qqq zzz (ER) was found. The estrogen receptor (ER) was assayed.";
        let report = score_document(text, "ER", &params, false);
        assert_eq!(report.candidates.len(), 1);
        assert!(report.candidates[0].longform.contains("estrogen"));
    }

    #[test]
    fn test_ranking_is_descending() {
        let text = "The estrogen receptor (ER) was assayed. \
                    The evoked response (ER) appeared. \
                    The zzz qqq (ER) was found.";
        let report = score_document(text, "ER", &ScoringParams::default(), false);
        assert_eq!(report.candidates.len(), 3);
        for pair in report.candidates.windows(2) {
            assert!(
                pair[0].score >= pair[1].score,
                "candidates out of order: {} before {}",
                pair[0].score,
                pair[1].score
            );
        }
    }

    #[test]
    fn test_report_carries_version_and_parameters() {
        let report = score_document("Nothing here.", "ER", &ScoringParams::default(), false);
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.shortform, "ER");
        assert!(report.candidates.is_empty());
        assert_eq!(report.summary.best_score, None);
        assert_eq!(report.summary.avg_score, 0.0);
    }
}
