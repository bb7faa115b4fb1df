//! This program extracts the ngrams you are interested in from the first
//! version of the Google Books Ngram dataset, whose general documentation you
//! can find at
//! <https://storage.googleapis.com/books/ngrams/books/datasetsv2.html>.
//!
//! It expects the 1-gram data files for corpus version 20090715 to have been
//! downloaded, decompressed and concatenated into a single file beforehand,
//! e.g. `cat googlebooks-eng-all-1gram-20090715-* > data/2009-1gram.csv`.

mod config;
mod extract;
mod progress;
mod terms;

use crate::{config::Config, progress::ProgressReport};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Extract all yearly records for a set of target ngrams from a concatenated
/// Google Books 1-gram data file
///
/// Matching records are copied to the results file unmodified, in the order
/// in which they appear in the data file. The results file is opened in
/// append mode, so the output of successive runs accumulates.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Path to the concatenated 1-gram data file
    ///
    /// This should be the decompressed concatenation of the per-letter data
    /// files from the Google Books Ngram distribution, in their original
    /// tab-separated format.
    #[arg(short, long, default_value = "data/2009-1gram.csv")]
    input: PathBuf,

    /// Path to the results file
    ///
    /// Matching records are appended after any pre-existing content, and the
    /// file is created if it does not exist yet.
    #[arg(short, long, default_value = "data/results.csv")]
    output: PathBuf,

    /// Ngram to extract records for
    ///
    /// May be specified multiple times. A record matches when its first
    /// tab-separated field is exactly equal to one of the target ngrams: the
    /// target "1910" selects the record "1910<TAB>..." but not the record
    /// "19100<TAB>...".
    #[arg(short, long = "term", default_values = ["1880", "1910", "1950"])]
    terms: Vec<String>,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        let args = Args::parse();
        args.check()?;
        Ok(args)
    }

    /// Check CLI arguments for basic sanity
    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            !self.terms.is_empty(),
            "at least one target ngram must be specified"
        );
        for term in &self.terms {
            anyhow::ensure!(!term.is_empty(), "target ngrams must not be empty");
            anyhow::ensure!(
                !term.contains('\t'),
                "target ngram {term:?} contains the tab field separator"
            );
        }
        Ok(())
    }
}
//
fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let args = Args::parse_and_check()?;

    // Set up progress reporting
    let report = ProgressReport::new();

    // Scan the data file and append matching records to the results file
    let config = Config::new(args);
    let stats = extract::scan_and_append(&config, &report)?;

    // Report on the completed scan
    log::info!(
        "Scanned {} records, appended {} matches ({} bytes) to {}",
        stats.lines_scanned,
        stats.lines_matched,
        stats.bytes_copied,
        config.output_path.display()
    );
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
