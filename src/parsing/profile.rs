//! Reader for header-addressed TSV profiles.
//!
//! Sequence profilers emit tab-separated tables whose column set varies
//! between versions, so columns are addressed by header name rather than
//! position. The whole table is held in memory; profiles are small
//! (one row per detected genome).

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::parsing::fasta::ParseError;
use crate::parsing::open_text;

/// An in-memory TSV table with named columns
#[derive(Debug, Clone)]
pub struct ProfileTable {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl ProfileTable {
    /// Read a TSV table from `path`, decompressing gzip input by extension.
    ///
    /// The first line is the header. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or
    /// `ParseError::InvalidFormat` if the file has no header line or a data
    /// row has a different field count than the header.
    pub fn read_from(path: &Path) -> Result<Self, ParseError> {
        let reader = open_text(path)?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(ParseError::InvalidFormat(
                    "Profile file is empty".to_string(),
                ))
            }
        };

        let columns: Vec<String> = header.split('\t').map(str::to_string).collect();
        let mut positions = HashMap::new();
        for (index, name) in columns.iter().enumerate() {
            // First occurrence wins for duplicated header names
            positions.entry(name.clone()).or_insert(index);
        }

        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
            if fields.len() != columns.len() {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {} has {} fields, expected {}",
                    index + 2,
                    fields.len(),
                    columns.len()
                )));
            }

            rows.push(fields);
        }

        Ok(Self {
            columns,
            positions,
            rows,
        })
    }

    /// Column names in file order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of the named column, if present
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of the named column, or `ParseError::MissingColumn`
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingColumn` if the header lacks `name`.
    pub fn require_column(&self, name: &str) -> Result<usize, ParseError> {
        self.column(name)
            .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
    }

    /// Data rows in file order
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// True when the table has a header but no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` in the named column, if both exist
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let position = self.column(column)?;
        self.rows
            .get(row)
            .and_then(|fields| fields.get(position))
            .map(String::as_str)
    }
}
