//! # asm-qc
//!
//! A library for QC reporting on genome assembly pipeline outputs.
//!
//! After reads are assembled and mapped back against the resulting contigs,
//! two questions decide whether the assembly is usable: how deeply is each
//! contig covered, and what fraction of the input reads mapped at all?
//! `asm-qc` answers both from the assembly FASTA, the read-to-assembly PAF
//! alignments, and the run configuration, and emits a deterministic JSON
//! report.
//!
//! It also carries the surrounding pipeline chores: normalizing FASTA files
//! for k-mer sketching, loading GTDB taxonomy metadata into a local SQLite
//! database, annotating genome profiles against it, and folding the top
//! profile hit into the run's metadata document.
//!
//! ## Features
//!
//! - **Streaming aggregation**: Alignments are validated and accumulated one
//!   line at a time; the PAF file is never held in memory
//! - **Strict cross-validation**: Every alignment must target an indexed
//!   contig with a matching length, or the run aborts
//! - **Deterministic reports**: Identical inputs produce byte-identical
//!   output files
//! - **Transparent compression**: FASTA, PAF, and metadata inputs may be
//!   gzip-compressed
//!
//! ## Example
//!
//! ```rust,no_run
//! use asm_qc::coverage::aggregate::aggregate_alignments;
//! use asm_qc::coverage::summary::assemble_report;
//! use asm_qc::parsing::fasta::index_contig_lengths;
//! use std::path::Path;
//!
//! let contigs = index_contig_lengths(Path::new("assembly.fasta.gz")).unwrap();
//! let totals = aggregate_alignments(Path::new("reads.paf.gz"), &contigs).unwrap();
//! let report = assemble_report(&contigs, &totals, 100_000).unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for contigs and coverage reports
//! - [`coverage`]: Streaming alignment aggregation and report assembly
//! - [`parsing`]: Parsers for FASTA, PAF, profile, and configuration files
//! - [`taxonomy`]: GTDB metadata store and lineage string handling
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod coverage;
pub mod parsing;
pub mod taxonomy;

// Re-export commonly used types for convenience
pub use core::contig::{ContigIndex, ContigRecord};
pub use core::report::{ContigDepth, CoverageReport, InputMetrics};
pub use coverage::aggregate::{aggregate_alignments, AlignmentTotals};
pub use coverage::summary::assemble_report;
