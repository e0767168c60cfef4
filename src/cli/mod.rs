//! Command-line interface for asm-qc.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **depth**: Compute per-contig depth and mapping rate from FASTA + PAF
//! - **linearize**: Rewrite a FASTA with upper-case single-line sequences
//! - **prepare-db**: Load GTDB metadata into a local SQLite taxonomy database
//! - **annotate**: Join a genome profile against the taxonomy database
//! - **update-meta**: Patch a pipeline metadata JSON with the top profile hit
//!
//! ## Usage
//!
//! ```text
//! # Coverage report for an assembly
//! asm-qc depth --yaml run.yaml --fasta assembly.fasta.gz --paf reads.paf.gz -o report.json
//!
//! # Normalize a FASTA before k-mer sketching
//! asm-qc linearize assembly.fasta assembly_single_line.fasta.gz
//!
//! # One-time taxonomy database build
//! asm-qc prepare-db --metadata bac120_metadata.tsv.gz --output taxonomy.db --sanity-check
//!
//! # Annotate a profile and fold its top hit into the run metadata
//! asm-qc annotate --profile profile.tsv --database taxonomy.db --output annotated.tsv
//! asm-qc update-meta --meta meta.json --sylph annotated.tsv --output meta.updated.json
//! ```

use clap::{Parser, Subcommand};

pub mod annotate;
pub mod depth;
pub mod linearize;
pub mod prepare_db;
pub mod update_meta;

#[derive(Parser)]
#[command(name = "asm-qc")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Coverage and taxonomy QC for genome assembly pipelines")]
#[command(
    long_about = "asm-qc post-processes genome assembly pipeline outputs.\n\nIt computes per-contig sequencing depth and run-level mapping rates from read-to-assembly alignments, and annotates genome profiles with GTDB taxonomy via a local SQLite database. All reports are deterministic: the same inputs always produce byte-identical output files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute per-contig depth and mapping rate from an assembly and its alignments
    Depth(depth::DepthArgs),

    /// Rewrite a FASTA with each sequence upper-cased on a single line
    Linearize(linearize::LinearizeArgs),

    /// Load GTDB metadata into a local SQLite taxonomy database
    PrepareDb(prepare_db::PrepareDbArgs),

    /// Annotate a genome profile with taxonomy columns from the database
    Annotate(annotate::AnnotateArgs),

    /// Patch a pipeline metadata JSON with the top hit of a genome profile
    UpdateMeta(update_meta::UpdateMetaArgs),
}
