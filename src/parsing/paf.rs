//! Parser for PAF (Pairwise mApping Format) alignment lines.
//!
//! Each PAF line carries 12 mandatory tab-separated fields describing one
//! alignment of a query read against a target contig. Optional SAM-style
//! tags after column 12 are not part of the mandatory record and are
//! rejected here; the aligners feeding this pipeline emit bare 12-column
//! output.

use crate::parsing::fasta::ParseError;

/// Number of mandatory fields in a PAF line
pub const PAF_FIELD_COUNT: usize = 12;

/// One parsed PAF alignment line.
///
/// Aligned bases on the target are `target_end.abs_diff(target_start)`.
/// The block length in column 11 is not used for coverage: some aligners
/// fill it with values that include clipped or unaligned stretches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PafRecord {
    /// Query sequence name (the read identifier)
    pub query_name: String,
    /// Query sequence length
    pub query_length: u64,
    /// Query start coordinate (0-based)
    pub query_start: u64,
    /// Query end coordinate (0-based, exclusive)
    pub query_end: u64,
    /// Relative strand: `+` or `-`
    pub strand: char,
    /// Target sequence name (the contig identifier)
    pub target_name: String,
    /// Target sequence length as declared by the aligner
    pub target_length: u64,
    /// Target start coordinate (0-based)
    pub target_start: u64,
    /// Target end coordinate (0-based, exclusive)
    pub target_end: u64,
    /// Number of matching residues in the alignment
    pub residue_matches: u64,
    /// Alignment block length as declared by the aligner
    pub block_length: u64,
    /// Mapping quality (0-255)
    pub mapping_quality: u8,
}

impl PafRecord {
    /// Parse one PAF line. `line_number` is 1-based and used in error
    /// messages only.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if the line does not have exactly
    /// 12 fields or any numeric field fails to parse.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() != PAF_FIELD_COUNT {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_number} has {} fields, expected {PAF_FIELD_COUNT}",
                fields.len()
            )));
        }

        Ok(PafRecord {
            query_name: fields[0].to_string(),
            query_length: parse_field(fields[1], "query length", line_number)?,
            query_start: parse_field(fields[2], "query start", line_number)?,
            query_end: parse_field(fields[3], "query end", line_number)?,
            strand: parse_strand(fields[4], line_number)?,
            target_name: fields[5].to_string(),
            target_length: parse_field(fields[6], "target length", line_number)?,
            target_start: parse_field(fields[7], "target start", line_number)?,
            target_end: parse_field(fields[8], "target end", line_number)?,
            residue_matches: parse_field(fields[9], "residue matches", line_number)?,
            block_length: parse_field(fields[10], "block length", line_number)?,
            mapping_quality: parse_field(fields[11], "mapping quality", line_number)?,
        })
    }

    /// Bases covered on the target contig by this alignment
    #[must_use]
    pub fn aligned_target_bases(&self) -> u64 {
        self.target_end.abs_diff(self.target_start)
    }
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    column: &str,
    line_number: usize,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| {
        ParseError::InvalidFormat(format!("Invalid {column} on line {line_number}: '{value}'"))
    })
}

fn parse_strand(value: &str, line_number: usize) -> Result<char, ParseError> {
    match value {
        "+" => Ok('+'),
        "-" => Ok('-'),
        _ => Err(ParseError::InvalidFormat(format!(
            "Invalid strand on line {line_number}: '{value}'"
        ))),
    }
}
