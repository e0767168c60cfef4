use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Type tag carried by every coverage report document
pub const ANALYSIS_TYPE: &str = "coverage_report";

/// The full coverage report emitted by the depth pipeline.
///
/// Serialized as pretty-printed JSON. Contig entries are keyed by name in a
/// sorted map so identical inputs always produce byte-identical reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Always [`ANALYSIS_TYPE`]; identifies the document type for consumers
    pub analysis_type: String,

    /// Run-level read accounting and assembly size
    pub input_metrics: InputMetrics,

    /// Per-contig coverage, keyed by contig name
    pub contig_coverage: BTreeMap<String, ContigDepth>,
}

/// Run-level metrics over the whole read set and assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMetrics {
    /// Reads declared by the run configuration
    pub input_reads_total: u64,

    /// Distinct read identifiers seen in the alignment file
    pub reads_mapped_count: u64,

    /// `input_reads_total - reads_mapped_count`
    pub reads_unmapped_count: u64,

    /// Unmapped fraction as a percentage, rounded to two decimals
    pub reads_unmapped_percent: f64,

    /// Sum of indexed contig lengths in bases
    pub total_assembly_length_bp: u64,
}

/// Coverage summary for a single contig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContigDepth {
    /// Contig length in bases
    pub length_bp: u64,

    /// Total aligned bases accumulated from all alignments to this contig
    pub total_aligned_bases: u64,

    /// `total_aligned_bases / length_bp`, rounded to two decimals
    pub average_depth: f64,
}
