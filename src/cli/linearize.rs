use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::parsing::fasta;

#[derive(Args)]
pub struct LinearizeArgs {
    /// Input FASTA file, optionally gzip-compressed
    #[arg(required = true)]
    pub fasta_in: PathBuf,

    /// Output FASTA file; a .gz extension enables compression
    #[arg(required = true)]
    pub fasta_out: PathBuf,
}

/// Execute linearize subcommand
///
/// # Errors
///
/// Returns an error if the input is not valid FASTA or either file cannot
/// be accessed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LinearizeArgs, verbose: bool) -> anyhow::Result<()> {
    let records = fasta::linearize(&args.fasta_in, &args.fasta_out)
        .with_context(|| format!("linearizing {}", args.fasta_in.display()))?;

    if verbose {
        eprintln!("Rewrote {records} records");
    }

    println!(
        "Processed {} -> {}",
        args.fasta_in.display(),
        args.fasta_out.display()
    );
    Ok(())
}
