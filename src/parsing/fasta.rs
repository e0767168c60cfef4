//! Parser and rewriter for FASTA files using noodles.
//!
//! Extracts contig names and lengths from assembly FASTA files, and rewrites
//! FASTA files into the upper-case single-line-per-sequence layout expected
//! by downstream k-mer tools.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use noodles::fasta;
use thiserror::Error;
use tracing::warn;

use crate::core::contig::ContigIndex;
use crate::parsing::is_gzipped;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Duplicate contig name: {0}")]
    DuplicateContig(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Parse a FASTA file and index contig names and lengths.
///
/// Contig names are taken from the definition line up to the first
/// whitespace. Zero-length sequences are skipped with a warning and never
/// indexed.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, `ParseError::DuplicateContig` if a name occurs twice, or
/// `ParseError::InvalidFormat` if no non-empty contigs are found.
pub fn index_contig_lengths(path: &Path) -> Result<ContigIndex, ParseError> {
    if is_gzipped(path) {
        index_fasta_gzipped(path)
    } else {
        index_fasta_uncompressed(path)
    }
}

/// Index an uncompressed FASTA file
fn index_fasta_uncompressed(path: &Path) -> Result<ContigIndex, ParseError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut fasta_reader = fasta::io::Reader::new(reader);

    index_fasta_reader(&mut fasta_reader)
}

/// Index a gzip-compressed FASTA file
fn index_fasta_gzipped(path: &Path) -> Result<ContigIndex, ParseError> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(file);
    let reader = BufReader::new(decoder);
    let mut fasta_reader = fasta::io::Reader::new(reader);

    index_fasta_reader(&mut fasta_reader)
}

/// Index from a noodles FASTA reader
fn index_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<ContigIndex, ParseError> {
    let mut contigs = ContigIndex::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let length = record.sequence().len() as u64;

        // Zero-length contigs cannot carry coverage and are not indexed
        if length == 0 {
            warn!(contig = %name, "Zero-length contig, skipping");
            continue;
        }

        if contigs.insert(name.clone(), length).is_some() {
            return Err(ParseError::DuplicateContig(name));
        }
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No non-empty sequences found in FASTA file".to_string(),
        ));
    }

    Ok(contigs)
}

/// Check if the output path should be gzip-compressed (write side is `.gz` only)
fn is_gzip_output(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("gz")
    )
}

/// Rewrite a FASTA file with each sequence upper-cased on a single line.
///
/// Definition lines are preserved verbatim, wrapped sequence lines are
/// concatenated, and blank lines are dropped. Output is gzip-compressed when
/// the output path ends in `.gz`. Returns the number of records written.
///
/// # Errors
///
/// Returns `ParseError::Io` if either file cannot be accessed, or
/// `ParseError::InvalidFormat` if sequence data precedes the first header or
/// the input contains no records.
pub fn linearize(input: &Path, output: &Path) -> Result<usize, ParseError> {
    let reader = crate::parsing::open_text(input)?;
    let file = File::create(output)?;

    if is_gzip_output(output) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        let records = linearize_records(reader, &mut encoder)?;
        let mut inner = encoder.finish()?;
        inner.flush()?;
        Ok(records)
    } else {
        let mut writer = BufWriter::new(file);
        let records = linearize_records(reader, &mut writer)?;
        writer.flush()?;
        Ok(records)
    }
}

/// Stream records from a line-oriented FASTA reader into `writer`
fn linearize_records<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<usize, ParseError> {
    let mut records = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            // Terminate the previous sequence line before the next header
            if records > 0 {
                writer.write_all(b"\n")?;
            }
            writeln!(writer, "{line}")?;
            records += 1;
        } else if records == 0 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {}: sequence data before the first FASTA header",
                index + 1
            )));
        } else {
            writer.write_all(line.to_ascii_uppercase().as_bytes())?;
        }
    }

    if records == 0 {
        return Err(ParseError::InvalidFormat(
            "No records found in FASTA file".to_string(),
        ));
    }

    writer.write_all(b"\n")?;
    Ok(records)
}
