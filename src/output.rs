//! Output formatting for scoring reports (JSON, CSV, console).

use crate::models::{ScoredLongform, ScoringReport};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a scoring report as JSON.
pub fn write_json<W: Write>(report: &ScoringReport, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a scoring report as JSON to a file.
pub fn write_json_file(report: &ScoringReport, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(report, &mut file)
}

/// Write ranked candidates as CSV.
///
/// Longforms are lower-cased words joined by spaces, so no quoting is
/// needed; matched positions are space-separated inside their field.
pub fn write_csv<W: Write>(report: &ScoringReport, writer: &mut W) -> Result<(), OutputError> {
    writeln!(writer, "rank,longform,score,occurrences,matched_positions")?;

    for (index, candidate) in report.candidates.iter().enumerate() {
        writeln!(
            writer,
            "{},{},{},{},{}",
            index + 1,
            candidate.longform,
            candidate.score,
            candidate.occurrences,
            join_positions(&candidate.matched_positions)
        )?;
    }

    Ok(())
}

/// Write ranked candidates as CSV to a file.
pub fn write_csv_file(report: &ScoringReport, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(report, &mut file)
}

/// Write a summary report to stdout.
pub fn print_summary(report: &ScoringReport) {
    println!("\n=== Scoring Summary ===");
    println!("Version: {}", report.version);
    println!("Shortform: {}", report.shortform);
    println!();
    println!("Parameters:");
    println!("  Alpha: {}", report.parameters.alpha);
    println!("  Base penalty: {}", report.parameters.base_penalty);
    println!("  Penalty decay: {}", report.parameters.penalty_decay);
    match report.parameters.min_score {
        Some(min_score) => println!("  Min score: {}", min_score),
        None => println!("  Min score: (none)"),
    }
    println!("  Excluded words: {}", report.parameters.exclude.len());
    println!();
    println!("Results:");
    println!("  Candidates: {}", report.summary.candidate_count);
    println!("  Defining occurrences: {}", report.summary.occurrence_total);
    match report.summary.best_score {
        Some(best) => println!("  Best score: {:.3}", best),
        None => println!("  Best score: (none)"),
    }
    println!("  Average score: {:.3}", report.summary.avg_score);
}

/// Format a ranked candidate as a human-readable string.
pub fn format_candidate(rank: usize, candidate: &ScoredLongform) -> String {
    format!(
        "{}. {}  score={:.3} occurrences={} positions=[{}]",
        rank,
        candidate.longform,
        candidate.score,
        candidate.occurrences,
        join_positions(&candidate.matched_positions)
    )
}

/// Print ranked candidates in a human-readable format.
pub fn print_candidates(candidates: &[ScoredLongform], limit: Option<usize>) {
    let to_print = match limit {
        Some(n) => &candidates[..n.min(candidates.len())],
        None => candidates,
    };

    for (index, candidate) in to_print.iter().enumerate() {
        println!("{}", format_candidate(index + 1, candidate));
    }

    if let Some(n) = limit {
        if candidates.len() > n {
            println!("... and {} more candidates", candidates.len() - n);
        }
    }
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
