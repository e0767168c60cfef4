use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use crate::core::contig::ContigIndex;
use crate::coverage::CoverageError;
use crate::parsing::open_text;
use crate::parsing::paf::PafRecord;

/// Running coverage for one contig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContigCoverage {
    /// Contig length from the assembly index
    pub length: u64,

    /// Aligned bases accumulated so far
    pub aligned_bases: u64,
}

/// The result of streaming one alignment file against one assembly
#[derive(Debug, Clone)]
pub struct AlignmentTotals {
    /// Coverage per contig; every indexed contig has an entry, aligned or not
    pub per_contig: HashMap<String, ContigCoverage>,

    /// Number of distinct query identifiers seen in the alignment file
    pub mapped_reads: u64,
}

/// Stream a PAF file and accumulate aligned bases per contig.
///
/// Every record is validated against `contigs` before it contributes:
/// the target must be indexed and its declared length must equal the
/// indexed length. A read counts as mapped if it has at least one
/// alignment line, regardless of quality or multiplicity.
///
/// # Errors
///
/// Returns `CoverageError::Io` if the file cannot be read,
/// `CoverageError::Parse` on a malformed line, or
/// `CoverageError::ContigMismatch` when a record disagrees with the index.
pub fn aggregate_alignments(
    path: &Path,
    contigs: &ContigIndex,
) -> Result<AlignmentTotals, CoverageError> {
    // Contigs with no alignments must still appear in the report
    let mut per_contig: HashMap<String, ContigCoverage> = contigs
        .iter()
        .map(|(name, length)| {
            (
                name.to_string(),
                ContigCoverage {
                    length,
                    aligned_bases: 0,
                },
            )
        })
        .collect();

    let mut mapped_reads: HashSet<String> = HashSet::new();

    let reader = open_text(path)?;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        let record = PafRecord::parse(&line, line_number)?;

        let indexed_length = contigs.get(&record.target_name).ok_or_else(|| {
            CoverageError::ContigMismatch(format!(
                "Line {line_number}: target '{}' not found among assembly contigs",
                record.target_name
            ))
        })?;

        if record.target_length != indexed_length {
            return Err(CoverageError::ContigMismatch(format!(
                "Line {line_number}: target '{}' declares length {}, assembly has {indexed_length}",
                record.target_name, record.target_length
            )));
        }

        if let Some(coverage) = per_contig.get_mut(&record.target_name) {
            coverage.aligned_bases += record.aligned_target_bases();
        }

        mapped_reads.insert(record.query_name);
    }

    Ok(AlignmentTotals {
        per_contig,
        mapped_reads: mapped_reads.len() as u64,
    })
}
