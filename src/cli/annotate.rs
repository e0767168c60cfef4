use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use crate::parsing::profile::ProfileTable;
use crate::taxonomy::gtdb;
use crate::taxonomy::store::{TaxonomyDb, TaxonomyRecord};

/// Taxonomy columns appended to every annotated profile
const TAXONOMY_COLUMNS: [&str; 4] = [
    "ncbi_taxid",
    "ncbi_species_taxid",
    "ncbi_taxonomy",
    "ncbi_taxonomy_unfiltered",
];

/// Profile column holding the genome file path of each hit
const GENOME_FILE_COLUMN: &str = "Genome_file";

/// Suffix dropped from genome file names to recover the accession
const GENOME_FILE_SUFFIX: &str = "_genomic.fna.gz";

#[derive(Args)]
pub struct AnnotateArgs {
    /// Genome profile TSV to annotate
    #[arg(long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Taxonomy SQLite database built by prepare-db
    #[arg(long, value_name = "FILE")]
    pub database: PathBuf,

    /// Output annotated TSV path
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the profile is malformed, the database cannot be
/// queried, none of the profile accessions are known, or the output cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, verbose: bool) -> anyhow::Result<()> {
    let profile = ProfileTable::read_from(&args.profile)
        .with_context(|| format!("reading profile {}", args.profile.display()))?;

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);

    // A header-only profile means nothing was detected; still emit the
    // annotated column layout so downstream consumers see a uniform schema
    if profile.is_empty() {
        let mut columns: Vec<&str> = profile.columns().iter().map(String::as_str).collect();
        columns.extend(TAXONOMY_COLUMNS);
        writeln!(writer, "{}", columns.join("\t"))?;
        writer.flush()?;

        println!("Annotated profile written to {}", args.output.display());
        return Ok(());
    }

    let genome_file = profile
        .require_column(GENOME_FILE_COLUMN)
        .with_context(|| format!("reading profile {}", args.profile.display()))?;

    let keys: Vec<String> = profile
        .rows()
        .iter()
        .map(|row| accession_key(&row[genome_file]))
        .collect();

    let mut unique: Vec<String> = keys
        .iter()
        .cloned()
        .collect::<HashSet<String>>()
        .into_iter()
        .collect();
    unique.sort_unstable();

    if verbose {
        eprintln!(
            "Resolving {} unique accessions against {}",
            unique.len(),
            args.database.display()
        );
    }

    let database = TaxonomyDb::open(&args.database)
        .with_context(|| format!("opening taxonomy database {}", args.database.display()))?;
    let records = database.lookup(&unique)?;

    if records.is_empty() {
        bail!(
            "no accession from {} matched in {}",
            args.profile.display(),
            args.database.display()
        );
    }

    if verbose {
        eprintln!("Matched {} of {} accessions", records.len(), unique.len());
    }

    let by_accession: HashMap<&str, &TaxonomyRecord> = records
        .iter()
        .map(|record| (record.accession.as_str(), record))
        .collect();

    let mut columns: Vec<&str> = profile.columns().iter().map(String::as_str).collect();
    columns.push("accession");
    columns.extend(TAXONOMY_COLUMNS);
    columns.push("genome_species");
    writeln!(writer, "{}", columns.join("\t"))?;

    for (row, key) in profile.rows().iter().zip(&keys) {
        let mut fields: Vec<String> = row.clone();

        match by_accession.get(key.as_str()) {
            Some(record) => {
                fields.push(record.accession.clone());
                fields.push(record.ncbi_taxid.clone());
                fields.push(record.ncbi_species_taxid.clone());
                fields.push(record.ncbi_taxonomy.clone());
                fields.push(record.ncbi_taxonomy_unfiltered.clone());
                fields.push(gtdb::genus_species(&record.ncbi_taxonomy));
            }
            None => {
                // Left join: rows without a database match keep empty fields
                for _ in 0..6 {
                    fields.push(String::new());
                }
            }
        }

        writeln!(writer, "{}", fields.join("\t"))?;
    }
    writer.flush()?;

    println!("Annotated profile written to {}", args.output.display());
    Ok(())
}

/// Recover an assembly accession from a profile genome file path
fn accession_key(genome_file: &str) -> String {
    let name = genome_file.rsplit('/').next().unwrap_or(genome_file);
    name.strip_suffix(GENOME_FILE_SUFFIX).unwrap_or(name).to_string()
}
