//! Streaming coverage aggregation over read-to-assembly alignments.
//!
//! The depth pipeline runs in two stages:
//!
//! 1. [`aggregate_alignments`]: stream a PAF file line by line, validate
//!    every record against the contig index, and accumulate aligned bases
//!    per contig plus the set of distinct mapped read identifiers.
//! 2. [`assemble_report`]: combine the aggregate with the declared input
//!    read count into a [`CoverageReport`](crate::core::report::CoverageReport).
//!
//! Validation is strict: the first malformed or inconsistent alignment line
//! aborts the run. A report computed from inputs that disagree with each
//! other would be silently wrong, which is worse than no report.
//!
//! [`aggregate_alignments`]: aggregate::aggregate_alignments
//! [`assemble_report`]: summary::assemble_report

use thiserror::Error;

use crate::parsing::fasta::ParseError;

pub mod aggregate;
pub mod summary;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid alignment record: {0}")]
    Parse(#[from] ParseError),

    #[error("Alignment does not match assembly: {0}")]
    ContigMismatch(String),

    #[error("Read accounting conflict: {0}")]
    ReadCountMismatch(String),
}
