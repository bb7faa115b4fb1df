//! Extraction of matching records from the data file

use crate::{config::Config, progress::ProgressReport, Result};
use anyhow::Context;
use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
};

/// Cumulative knowledge about a completed scan
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScanStats {
    /// Number of records read from the data file
    pub lines_scanned: u64,

    /// Number of records whose first field was a target ngram
    pub lines_matched: u64,

    /// Number of bytes appended to the results file
    pub bytes_copied: u64,
}

/// Scan the data file and append matching records to the results file
///
/// Records are copied byte-for-byte, including their own trailing newline, in
/// the order in which they appear in the data file. Pre-existing content of
/// the results file is preserved, new matches land after it.
///
/// The first I/O error aborts the scan. Matches that were already appended at
/// that point stay in the results file.
pub fn scan_and_append(config: &Config, report: &ProgressReport) -> Result<ScanStats> {
    // Acquire the input and output streams
    let input = File::open(&config.input_path)
        .with_context(|| format!("opening data file {}", config.input_path.display()))?;
    let input_len = input
        .metadata()
        .with_context(|| format!("querying the size of {}", config.input_path.display()))?
        .len();
    let mut records = BufReader::new(input);
    let results = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.output_path)
        .with_context(|| {
            format!(
                "opening results file {} for appending",
                config.output_path.display()
            )
        })?;
    let mut results = BufWriter::new(results);

    // Track scan progress
    let progress = report.add("Scanning the data file", input_len);

    // Sequential pass over the data file, one record at a time
    let mut stats = ScanStats::default();
    let mut record = Vec::new();
    loop {
        record.clear();
        let record_len = records
            .read_until(b'\n', &mut record)
            .with_context(|| format!("reading a record from {}", config.input_path.display()))?;
        if record_len == 0 {
            break;
        }
        if config.terms.matches(&record) {
            results.write_all(&record).with_context(|| {
                format!("appending a record to {}", config.output_path.display())
            })?;
            stats.lines_matched += 1;
            stats.bytes_copied += record_len as u64;
            log::trace!("Accepted record {:?}", String::from_utf8_lossy(&record));
        }
        stats.lines_scanned += 1;
        progress.make_progress(record_len as u64);
    }

    // Make sure every match reached the results file before reporting success
    results
        .flush()
        .with_context(|| format!("flushing results file {}", config.output_path.display()))?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::TermSet;
    use std::fs;
    use tempfile::TempDir;

    const DATASET: &str = "1880\t1\t10\t2\n1881\t1\t5\t1\n1910\tX\t3\t1\n";
    const MATCHES: &str = "1880\t1\t10\t2\n1910\tX\t3\t1\n";

    fn test_config(dir: &TempDir) -> Config {
        Config {
            input_path: dir.path().join("1gram.csv"),
            output_path: dir.path().join("results.csv"),
            terms: TermSet::new(["1880", "1910", "1950"]),
        }
    }

    fn run_scan(config: &Config) -> Result<ScanStats> {
        scan_and_append(config, &ProgressReport::hidden())
    }

    #[test]
    fn matching_records_are_copied_in_input_order() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, DATASET).unwrap();

        let stats = run_scan(&config).unwrap();

        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), MATCHES);
        assert_eq!(
            stats,
            ScanStats {
                lines_scanned: 3,
                lines_matched: 2,
                bytes_copied: MATCHES.len() as u64,
            }
        );
    }

    #[test]
    fn longer_first_field_is_not_a_match() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, "19100\t1\t3\t1\n1910\t1\t3\t1\n").unwrap();

        let stats = run_scan(&config).unwrap();

        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "1910\t1\t3\t1\n"
        );
        assert_eq!(stats.lines_matched, 1);
    }

    #[test]
    fn final_record_without_newline_is_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, "1881\t1\t5\t1\n1950\t9\t9\t9").unwrap();

        run_scan(&config).unwrap();

        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "1950\t9\t9\t9"
        );
    }

    #[test]
    fn pre_existing_results_are_preserved() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, DATASET).unwrap();
        fs::write(&config.output_path, "1950\tfrom an earlier run\n").unwrap();

        run_scan(&config).unwrap();

        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            format!("1950\tfrom an earlier run\n{MATCHES}")
        );
    }

    #[test]
    fn reruns_accumulate_matches() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, DATASET).unwrap();

        run_scan(&config).unwrap();
        run_scan(&config).unwrap();

        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            format!("{MATCHES}{MATCHES}")
        );
    }

    #[test]
    fn truncating_between_runs_gives_identical_results() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, DATASET).unwrap();

        let first_stats = run_scan(&config).unwrap();
        let first_output = fs::read(&config.output_path).unwrap();
        fs::write(&config.output_path, b"").unwrap();
        let second_stats = run_scan(&config).unwrap();

        assert_eq!(fs::read(&config.output_path).unwrap(), first_output);
        assert_eq!(first_stats, second_stats);
    }

    #[test]
    fn scan_without_matches_only_creates_the_results_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, "1881\t1\t5\t1\npiano\t1910\t3\t1\n").unwrap();

        let stats = run_scan(&config).unwrap();

        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "");
        assert_eq!(
            stats,
            ScanStats {
                lines_scanned: 2,
                lines_matched: 0,
                bytes_copied: 0,
            }
        );
    }

    #[test]
    fn missing_data_file_is_a_resource_error() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let error = run_scan(&config).unwrap_err();

        assert!(error.to_string().contains("opening data file"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn unopenable_results_file_is_a_resource_error() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(&config.input_path, DATASET).unwrap();
        fs::create_dir(&config.output_path).unwrap();

        let error = run_scan(&config).unwrap_err();

        assert!(error.to_string().contains("for appending"));
    }
}
