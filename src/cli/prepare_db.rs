use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::taxonomy::store::TaxonomyDb;

#[derive(Args)]
pub struct PrepareDbArgs {
    /// GTDB metadata TSV, optionally gzip-compressed
    #[arg(long, value_name = "FILE")]
    pub metadata: PathBuf,

    /// SQLite database to create; an existing file is replaced
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Require every accession to carry a GB_/RS_ source prefix
    #[arg(long)]
    pub sanity_check: bool,
}

/// Execute prepare-db subcommand
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the database cannot
/// be built.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PrepareDbArgs, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        eprintln!("Reading metadata from {}", args.metadata.display());
    }

    let rows = TaxonomyDb::create(&args.metadata, &args.output, args.sanity_check)
        .with_context(|| {
            format!(
                "building taxonomy database from {}",
                args.metadata.display()
            )
        })?;

    println!("Wrote {rows} metadata rows to {}", args.output.display());
    Ok(())
}
