//! Acrolign Shortform Alignment Pipeline
//!
//! Extracts candidate longforms for a shortform (abbreviation) from text
//! and ranks them by character alignment score.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod align;
mod encode;
mod extract;
mod models;
mod oracle;
mod output;
mod scorer;
mod tokenize;

use encode::encode_candidate;
use models::ScoringParams;
use output::{print_candidates, print_summary, write_csv_file, write_json_file};

#[derive(Parser)]
#[command(name = "acrolign")]
#[command(about = "Alignment-based longform scoring for shortforms in text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for scoring reports
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Full report as pretty-printed JSON
    Json,
    /// Ranked candidates as CSV
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Score candidate longforms for a shortform in a document
    ///
    /// All parameters default to ScoringParams::default(). Override any
    /// parameter explicitly to customize behavior.
    Score {
        /// Path to a UTF-8 text document
        #[arg(long)]
        input: PathBuf,

        /// Shortform whose longform candidates are scored
        #[arg(long)]
        shortform: String,

        /// Output file path
        #[arg(long)]
        output: PathBuf,

        /// Output format: json or csv
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        // === Parameters that inherit from ScoringParams::default() ===
        // All use Option<T> so we can detect "user didn't specify" vs "user set explicitly"
        /// Blend between character and word prizes, in [0, 1] [default: 0.5]
        #[arg(long)]
        alpha: Option<f64>,

        /// Penalty for leaving the first letter unmatched [default: 0.4]
        #[arg(long)]
        base_penalty: Option<f64>,

        /// Multiplier applied to the penalty per letter [default: 0.5]
        #[arg(long)]
        penalty_decay: Option<f64>,

        /// Comma-separated stop words; candidates are cut after the last one
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Drop candidates scoring below this value
        #[arg(long)]
        min_score: Option<f64>,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,

        /// Print first N ranked candidates to console
        #[arg(long)]
        show_candidates: Option<usize>,
    },

    /// Extract candidates without scoring them
    Extract {
        /// Path to a UTF-8 text document
        #[arg(long)]
        input: PathBuf,

        /// Shortform whose defining sentences are sought
        #[arg(long)]
        shortform: String,

        /// Comma-separated stop words; candidates are cut after the last one
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Benchmark alignment performance
    Benchmark {
        /// Number of alignment iterations
        #[arg(long, default_value = "1000")]
        iterations: usize,

        /// Candidate size in words
        #[arg(long, default_value = "10")]
        words: usize,

        /// Shortform size in letters
        #[arg(long, default_value = "5")]
        letters: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            shortform,
            output,
            format,
            alpha,
            base_penalty,
            penalty_decay,
            exclude,
            min_score,
            quiet,
            show_candidates,
        } => {
            // Start with library defaults
            let defaults = ScoringParams::default();

            // Build params by overlaying user-specified values onto defaults
            let params = ScoringParams {
                alpha: alpha.unwrap_or(defaults.alpha),
                base_penalty: base_penalty.unwrap_or(defaults.base_penalty),
                penalty_decay: penalty_decay.unwrap_or(defaults.penalty_decay),
                exclude: if exclude.is_empty() {
                    defaults.exclude
                } else {
                    exclude
                },
                min_score: min_score.or(defaults.min_score),
            };

            if !(0.0..=1.0).contains(&params.alpha) {
                return Err(format!("alpha must lie in [0, 1], got {}", params.alpha).into());
            }

            let text = std::fs::read_to_string(&input)?;
            let report = scorer::score_document(&text, &shortform, &params, !quiet);

            // Write output
            match format {
                OutputFormat::Json => {
                    write_json_file(&report, &output)?;
                }
                OutputFormat::Csv => {
                    write_csv_file(&report, &output)?;
                }
            }

            // Print summary
            if !quiet {
                print_summary(&report);
                eprintln!("\nOutput: {}", output.display());
            }

            // Show candidates if requested
            if let Some(limit) = show_candidates {
                println!("\n=== Ranked Candidates ===");
                print_candidates(&report.candidates, Some(limit));
            }
        }

        Commands::Extract {
            input,
            shortform,
            exclude,
        } => {
            let text = std::fs::read_to_string(&input)?;
            let processor = extract::Processor::with_exclusions(&shortform, exclude);
            let extraction = processor.extract(&text);

            println!("=== Candidates ({}) ===", extraction.candidates.len());
            for candidate in &extraction.candidates {
                println!("  {}", candidate.join(" "));
            }

            if !extraction.other_mentions.is_empty() {
                println!("\n=== Other Mentions ===");
                println!("{}", extraction.other_mentions);
            }
        }

        Commands::Benchmark {
            iterations,
            words,
            letters,
        } => {
            run_benchmark(iterations, words, letters)?;
        }
    }

    Ok(())
}

/// Run alignment benchmark to measure performance.
fn run_benchmark(
    iterations: usize,
    words: usize,
    letters: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Instant;

    println!("=== Alignment Benchmark ===");
    println!("Iterations: {}", iterations);
    println!("Candidate words: {}", words);
    println!("Shortform letters: {}", letters);

    // Confirm the optimizer's model before timing it
    println!("Oracle self-check: {}", oracle::self_check()?);

    // Keep the filler character 'z' out of the shortform
    let letters = letters.clamp(1, 20);
    let shortform: String = ('a'..='z').take(letters).collect();
    let params = ScoringParams::default();
    let penalties = params.penalties_for(letters);

    // Create test candidates
    let dense: Vec<String> = (0..words)
        .map(|i| format!("{}zzz", letter_at(i % letters)))
        .collect();
    let sparse: Vec<String> = (0..words)
        .map(|i| {
            if i % 3 == 0 {
                format!("{}zzz", letter_at((i / 3) % letters))
            } else {
                "zzzz".to_string()
            }
        })
        .collect();
    let no_match: Vec<String> = (0..words).map(|_| "zzzz".to_string()).collect();

    let arrays_dense = encode_candidate(&dense, &shortform)?.blended(params.alpha);
    let arrays_sparse = encode_candidate(&sparse, &shortform)?.blended(params.alpha);
    let arrays_no_match = encode_candidate(&no_match, &shortform)?.blended(params.alpha);

    // Benchmark dense matches
    println!("\nEvery word leads with a letter:");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = align::optimize(&arrays_dense, &penalties, params.alpha);
    }
    let elapsed = start.elapsed();
    let per_alignment = elapsed.as_secs_f64() / iterations as f64;
    let alignments_per_sec = 1.0 / per_alignment;
    println!("  Total time: {:.3}s", elapsed.as_secs_f64());
    println!("  Per alignment: {:.3}ms", per_alignment * 1000.0);
    println!("  Alignments/sec: {:.0}", alignments_per_sec);

    // Benchmark sparse matches
    println!("\nEvery third word leads with a letter:");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = align::optimize(&arrays_sparse, &penalties, params.alpha);
    }
    let elapsed = start.elapsed();
    let per_alignment = elapsed.as_secs_f64() / iterations as f64;
    let alignments_per_sec = 1.0 / per_alignment;
    println!("  Total time: {:.3}s", elapsed.as_secs_f64());
    println!("  Per alignment: {:.3}ms", per_alignment * 1000.0);
    println!("  Alignments/sec: {:.0}", alignments_per_sec);

    // Benchmark no match
    println!("\nNo word contains a letter:");
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = align::optimize(&arrays_no_match, &penalties, params.alpha);
    }
    let elapsed = start.elapsed();
    let per_alignment = elapsed.as_secs_f64() / iterations as f64;
    let alignments_per_sec = 1.0 / per_alignment;
    println!("  Total time: {:.3}s", elapsed.as_secs_f64());
    println!("  Per alignment: {:.3}ms", per_alignment * 1000.0);
    println!("  Alignments/sec: {:.0}", alignments_per_sec);

    Ok(())
}

fn letter_at(index: usize) -> char {
    (b'a' + index as u8) as char
}
