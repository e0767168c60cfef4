use std::collections::BTreeMap;

use crate::core::contig::ContigIndex;
use crate::core::report::{ContigDepth, CoverageReport, InputMetrics, ANALYSIS_TYPE};
use crate::coverage::aggregate::AlignmentTotals;
use crate::coverage::CoverageError;

/// Helper function to convert u64 count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Round to two decimal places, the precision used for reported ratios
#[inline]
fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assemble the final coverage report from the aggregation result and the
/// declared input read count.
///
/// Ratios are rounded to two decimals; the underlying integer tallies are
/// reported unrounded. A zero declared read count yields an unmapped
/// percentage of 0.0 rather than a division error.
///
/// # Errors
///
/// Returns `CoverageError::ReadCountMismatch` if more distinct mapped reads
/// were observed than the configuration declares.
pub fn assemble_report(
    contigs: &ContigIndex,
    totals: &AlignmentTotals,
    input_reads_total: u64,
) -> Result<CoverageReport, CoverageError> {
    if totals.mapped_reads > input_reads_total {
        return Err(CoverageError::ReadCountMismatch(format!(
            "{} distinct mapped reads exceed the declared input total {input_reads_total}",
            totals.mapped_reads
        )));
    }

    let reads_unmapped_count = input_reads_total - totals.mapped_reads;
    let reads_unmapped_percent = if input_reads_total == 0 {
        0.0
    } else {
        round_two(count_to_f64(reads_unmapped_count) / count_to_f64(input_reads_total) * 100.0)
    };

    let mut contig_coverage = BTreeMap::new();
    for (name, coverage) in &totals.per_contig {
        let average_depth = if coverage.length == 0 {
            0.0
        } else {
            round_two(count_to_f64(coverage.aligned_bases) / count_to_f64(coverage.length))
        };

        contig_coverage.insert(
            name.clone(),
            ContigDepth {
                length_bp: coverage.length,
                total_aligned_bases: coverage.aligned_bases,
                average_depth,
            },
        );
    }

    Ok(CoverageReport {
        analysis_type: ANALYSIS_TYPE.to_string(),
        input_metrics: InputMetrics {
            input_reads_total,
            reads_mapped_count: totals.mapped_reads,
            reads_unmapped_count,
            reads_unmapped_percent,
            total_assembly_length_bp: contigs.total_length(),
        },
        contig_coverage,
    })
}
