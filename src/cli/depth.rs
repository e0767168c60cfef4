use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::core::report::CoverageReport;
use crate::coverage::aggregate::aggregate_alignments;
use crate::coverage::summary::assemble_report;
use crate::parsing::{fasta, readcount};

#[derive(Args)]
pub struct DepthArgs {
    /// Run-configuration YAML carrying the input_read_count entry
    #[arg(long, value_name = "FILE")]
    pub yaml: PathBuf,

    /// Assembly FASTA, optionally gzip-compressed
    #[arg(long, value_name = "FILE")]
    pub fasta: PathBuf,

    /// Read-to-assembly alignments in PAF format, optionally gzip-compressed
    #[arg(long, value_name = "FILE")]
    pub paf: PathBuf,

    /// Output JSON report path
    #[arg(short, long, default_value = "coverage_report.json")]
    pub output: PathBuf,
}

/// Execute depth subcommand
///
/// # Errors
///
/// Returns an error if any input cannot be parsed, an alignment disagrees
/// with the assembly, or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DepthArgs, verbose: bool) -> anyhow::Result<()> {
    let input_reads_total = readcount::parse_read_count(&args.yaml, readcount::INPUT_READ_COUNT_KEY)
        .with_context(|| {
            format!(
                "reading '{}' from {}",
                readcount::INPUT_READ_COUNT_KEY,
                args.yaml.display()
            )
        })?;

    if verbose {
        eprintln!("Declared input reads: {input_reads_total}");
    }

    // The contig index must be complete before any alignment is accepted
    let contigs = fasta::index_contig_lengths(&args.fasta)
        .with_context(|| format!("indexing contigs from {}", args.fasta.display()))?;

    if verbose {
        eprintln!(
            "Indexed {} contigs ({} bp) from {}",
            contigs.len(),
            contigs.total_length(),
            args.fasta.display()
        );
    }

    let totals = aggregate_alignments(&args.paf, &contigs)
        .with_context(|| format!("aggregating alignments from {}", args.paf.display()))?;

    if verbose {
        eprintln!("Observed {} distinct mapped reads", totals.mapped_reads);
    }

    let report = assemble_report(&contigs, &totals, input_reads_total)?;
    write_report(&report, &args.output)?;

    println!("Report saved to {}", args.output.display());
    Ok(())
}

fn write_report(report: &CoverageReport, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing report to {}", path.display()))?;
    Ok(())
}
