//! Scraper for the declared input read count in a run-configuration file.
//!
//! The pipeline writes a YAML-style configuration with one
//! `input_read_count: <N>` entry. Only that single scalar is needed here, so
//! the file is scanned line by line instead of parsed as a full YAML
//! document; indentation and surrounding structure are irrelevant.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parsing::fasta::ParseError;

/// Configuration key carrying the declared number of input reads
pub const INPUT_READ_COUNT_KEY: &str = "input_read_count";

/// Scan a configuration file for the first line starting with `key` and
/// return the last whitespace-separated token of that line as an integer.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if no line starts with `key` or its value is
/// not an unsigned integer.
pub fn parse_read_count(path: &Path, key: &str) -> Result<u64, ParseError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if !trimmed.starts_with(key) {
            continue;
        }

        let value = trimmed.split_whitespace().last().ok_or_else(|| {
            ParseError::InvalidFormat(format!("No value found for '{key}'"))
        })?;

        return value.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Value for '{key}' is not an unsigned integer: '{value}'"
            ))
        });
    }

    Err(ParseError::InvalidFormat(format!(
        "No line starting with '{key}' found"
    )))
}
