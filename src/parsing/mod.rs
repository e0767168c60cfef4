//! Parsers for the file formats consumed by the QC pipeline.
//!
//! This module provides parsers for:
//!
//! - **FASTA files**: Index contig names and lengths from an assembly FASTA
//! - **PAF lines**: Parse 12-column pairwise mapping format records
//! - **Run configuration**: Scrape the declared input read count from a YAML-style file
//! - **Profile TSV files**: Header-addressed tables emitted by sequence profilers
//!
//! File-based parsers accept gzip/bgzip compressed input transparently; the
//! compression is detected from the `.gz`/`.bgz` file extension.
//!
//! ## Example
//!
//! ```rust,no_run
//! use asm_qc::parsing::fasta::index_contig_lengths;
//! use std::path::Path;
//!
//! let contigs = index_contig_lengths(Path::new("assembly.fasta.gz")).unwrap();
//! println!("{} contigs, {} bp total", contigs.len(), contigs.total_length());
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

pub mod fasta;
pub mod paf;
pub mod profile;
pub mod readcount;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a file for buffered line-oriented reading, decompressing gzip/bgzip
/// input based on the file extension.
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened.
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
