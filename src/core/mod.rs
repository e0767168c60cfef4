//! Core data types for assembly coverage reporting.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`ContigRecord`]: A single assembled contig with its name and length
//! - [`ContigIndex`]: Name-addressable index over the contigs of one assembly
//! - [`CoverageReport`]: The JSON report emitted by the depth pipeline
//! - [`InputMetrics`], [`ContigDepth`]: Sections of the coverage report
//!
//! ## Contig Naming
//!
//! Contig identifiers are taken from the FASTA definition line up to the
//! first whitespace, so `>ctg1 length=5000` and alignment lines targeting
//! `ctg1` refer to the same contig. Matching is by **exact name**; no
//! normalization or aliasing is applied.
//!
//! [`ContigRecord`]: contig::ContigRecord
//! [`ContigIndex`]: contig::ContigIndex
//! [`CoverageReport`]: report::CoverageReport
//! [`InputMetrics`]: report::InputMetrics
//! [`ContigDepth`]: report::ContigDepth

pub mod contig;
pub mod report;
