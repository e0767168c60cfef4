use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Args;
use serde_json::{json, Value};

use crate::parsing::profile::ProfileTable;

#[derive(Args)]
pub struct UpdateMetaArgs {
    /// Pipeline metadata JSON to patch
    #[arg(long, value_name = "FILE")]
    pub meta: PathBuf,

    /// Annotated genome profile TSV; omit to pass the metadata through
    #[arg(long, value_name = "FILE")]
    pub sylph: Option<PathBuf>,

    /// Output JSON path
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

/// Values from the top profile row, gathered before any key is written so
/// the patch is all-or-nothing
struct TopHit {
    abundance: f64,
    coverage: f64,
    ani: Value,
    taxid: String,
    species: String,
    species_taxid: Option<String>,
}

/// Execute update-meta subcommand
///
/// # Errors
///
/// Returns an error if the metadata JSON cannot be read, parsed, patched,
/// or written. Profile problems are reported as a warning instead: the
/// metadata must still ship when profiling failed upstream.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: UpdateMetaArgs, verbose: bool) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.meta)
        .with_context(|| format!("reading {}", args.meta.display()))?;
    let mut meta: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.meta.display()))?;

    if let Some(profile_path) = &args.sylph {
        match read_top_hit(profile_path) {
            Ok(Some(hit)) => {
                apply_top_hit(&mut meta, &hit)
                    .with_context(|| format!("patching {}", args.meta.display()))?;
                if verbose {
                    eprintln!("Applied top hit: {}", hit.species);
                }
            }
            Ok(None) => {
                if verbose {
                    eprintln!(
                        "Profile {} has no hits, nothing to apply",
                        profile_path.display()
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "Warning: could not read profile {}: {e:#}",
                    profile_path.display()
                );
            }
        }
    }

    let json = serde_json::to_string_pretty(&meta)?;
    fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Metadata written to {}", args.output.display());
    Ok(())
}

/// Read the first data row of an annotated profile
fn read_top_hit(path: &Path) -> anyhow::Result<Option<TopHit>> {
    let profile = ProfileTable::read_from(path)?;
    if profile.is_empty() {
        return Ok(None);
    }

    let abundance: f64 = required(&profile, "Taxonomic_abundance")?
        .parse()
        .context("parsing Taxonomic_abundance")?;
    let coverage: f64 = required(&profile, "Eff_cov")?
        .parse()
        .context("parsing Eff_cov")?;

    // Some profiler versions report ANI as a non-numeric placeholder;
    // carry the raw string through in that case
    let ani_raw = required(&profile, "Adjusted_ANI")?;
    let ani = match ani_raw.parse::<f64>() {
        Ok(number) => json!(number),
        Err(_) => json!(ani_raw),
    };

    let taxid = required(&profile, "ncbi_taxid")?.to_string();
    let species = required(&profile, "genome_species")?.to_string();
    let species_taxid = profile.get(0, "ncbi_species_taxid").map(str::to_string);

    Ok(Some(TopHit {
        abundance,
        coverage,
        ani,
        taxid,
        species,
        species_taxid,
    }))
}

fn required<'a>(profile: &'a ProfileTable, column: &str) -> anyhow::Result<&'a str> {
    profile
        .get(0, column)
        .ok_or_else(|| anyhow!("profile is missing column '{column}'"))
}

fn apply_top_hit(meta: &mut Value, hit: &TopHit) -> anyhow::Result<()> {
    let document = meta
        .as_object_mut()
        .ok_or_else(|| anyhow!("metadata root is not a JSON object"))?;

    document.insert("sylph_abundance".to_string(), json!(hit.abundance));
    document.insert("sylph_coverage".to_string(), json!(hit.coverage));
    document.insert("sylph_ani".to_string(), hit.ani.clone());
    document.insert("sylph_taxid".to_string(), json!(hit.taxid));
    document.insert("sylph_species".to_string(), json!(hit.species));
    if let Some(species_taxid) = &hit.species_taxid {
        document.insert("sylph_species_taxid".to_string(), json!(species_taxid));
    }

    Ok(())
}
