//! SQLite-backed taxonomy metadata store.
//!
//! GTDB release metadata ships as a multi-gigabyte TSV with one row per
//! assembly. Only five columns matter for annotation, so they are loaded
//! into a single indexed SQLite table once and queried by accession
//! afterwards. Accessions are stored without their `GB_`/`RS_` source
//! prefix to match the bare accessions used in genome file names.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::debug;

use crate::parsing::fasta::ParseError;
use crate::parsing::open_text;
use crate::taxonomy::TaxonomyError;

/// Metadata columns loaded into the database, in table order
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "accession",
    "ncbi_taxid",
    "ncbi_species_taxid",
    "ncbi_taxonomy",
    "ncbi_taxonomy_unfiltered",
];

/// Rows inserted per transaction while loading metadata
const INSERT_BATCH_SIZE: usize = 50_000;

/// One row of taxonomy metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyRecord {
    /// Assembly accession with the source prefix stripped (e.g. `GCF_000005845.2`)
    pub accession: String,
    pub ncbi_taxid: String,
    pub ncbi_species_taxid: String,
    pub ncbi_taxonomy: String,
    pub ncbi_taxonomy_unfiltered: String,
}

/// Handle to an on-disk taxonomy database
pub struct TaxonomyDb {
    connection: Connection,
}

impl TaxonomyDb {
    /// Build a taxonomy database from a GTDB metadata TSV.
    ///
    /// An existing database file at `database` is replaced. With
    /// `sanity_check` set, every accession must start with `GB_` or `RS_`
    /// before stripping; otherwise the first three characters are dropped
    /// unconditionally. Returns the number of rows loaded.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Parse` if the metadata header lacks a
    /// required column or a row is malformed, `TaxonomyError::BadAccession`
    /// if the sanity check fails, or `TaxonomyError::Database` on SQLite
    /// failures.
    pub fn create(
        metadata: &Path,
        database: &Path,
        sanity_check: bool,
    ) -> Result<usize, TaxonomyError> {
        if database.exists() {
            fs::remove_file(database)?;
        }

        let mut connection = Connection::open(database)?;
        connection.execute(
            "CREATE TABLE metadata (
                accession TEXT,
                ncbi_taxid TEXT,
                ncbi_species_taxid TEXT,
                ncbi_taxonomy TEXT,
                ncbi_taxonomy_unfiltered TEXT
            )",
            (),
        )?;

        let reader = open_text(metadata)?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(ParseError::InvalidFormat(
                    "Metadata file is empty".to_string(),
                )
                .into())
            }
        };
        let positions = required_column_positions(&header)?;

        let mut batch: Vec<TaxonomyRecord> = Vec::with_capacity(INSERT_BATCH_SIZE);
        let mut total = 0usize;

        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            // Header is line 1
            let line_number = index + 2;
            let record = extract_record(&line, &positions, line_number, sanity_check)?;

            batch.push(record);
            if batch.len() == INSERT_BATCH_SIZE {
                total += flush_batch(&mut connection, &mut batch)?;
            }
        }

        if !batch.is_empty() {
            total += flush_batch(&mut connection, &mut batch)?;
        }

        connection.execute("CREATE INDEX idx_accession ON metadata (accession)", ())?;

        Ok(total)
    }

    /// Open an existing taxonomy database read-only.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Database` if the file cannot be opened as a
    /// SQLite database.
    pub fn open(database: &Path) -> Result<Self, TaxonomyError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(database, flags)?;
        Ok(Self { connection })
    }

    /// Fetch the metadata rows matching any of `accessions`.
    ///
    /// Queries with one `IN` list; absent accessions simply produce no row.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Database` on SQLite failures.
    pub fn lookup(&self, accessions: &[String]) -> Result<Vec<TaxonomyRecord>, TaxonomyError> {
        if accessions.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; accessions.len()].join(", ");
        let sql = format!(
            "SELECT accession, ncbi_taxid, ncbi_species_taxid, ncbi_taxonomy, \
             ncbi_taxonomy_unfiltered FROM metadata WHERE accession IN ({placeholders})"
        );

        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement.query_map(params_from_iter(accessions), |row| {
            Ok(TaxonomyRecord {
                accession: row.get(0)?,
                ncbi_taxid: row.get(1)?,
                ncbi_species_taxid: row.get(2)?,
                ncbi_taxonomy: row.get(3)?,
                ncbi_taxonomy_unfiltered: row.get(4)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

/// Resolve the positions of the required columns in the metadata header
fn required_column_positions(header: &str) -> Result<[usize; 5], ParseError> {
    let names: Vec<&str> = header.split('\t').collect();
    let mut positions = [0usize; 5];

    for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
        positions[slot] = names
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| ParseError::MissingColumn((*column).to_string()))?;
    }

    Ok(positions)
}

/// Pull the required columns out of one metadata line
fn extract_record(
    line: &str,
    positions: &[usize; 5],
    line_number: usize,
    sanity_check: bool,
) -> Result<TaxonomyRecord, TaxonomyError> {
    let fields: Vec<&str> = line.split('\t').collect();

    let rightmost = positions.iter().copied().max().unwrap_or(0);
    if fields.len() <= rightmost {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_number} has {} fields, expected at least {}",
            fields.len(),
            rightmost + 1
        ))
        .into());
    }

    let raw_accession = fields[positions[0]];
    if sanity_check && !(raw_accession.starts_with("GB_") || raw_accession.starts_with("RS_")) {
        return Err(TaxonomyError::BadAccession(format!(
            "Line {line_number}: accession '{raw_accession}' does not start with GB_ or RS_"
        )));
    }

    Ok(TaxonomyRecord {
        accession: raw_accession.get(3..).unwrap_or_default().to_string(),
        ncbi_taxid: fields[positions[1]].to_string(),
        ncbi_species_taxid: fields[positions[2]].to_string(),
        ncbi_taxonomy: fields[positions[3]].to_string(),
        ncbi_taxonomy_unfiltered: fields[positions[4]].to_string(),
    })
}

/// Insert the batch in one transaction and clear it
fn flush_batch(
    connection: &mut Connection,
    batch: &mut Vec<TaxonomyRecord>,
) -> Result<usize, TaxonomyError> {
    let transaction = connection.transaction()?;
    {
        let mut insert = transaction.prepare(
            "INSERT INTO metadata (accession, ncbi_taxid, ncbi_species_taxid, \
             ncbi_taxonomy, ncbi_taxonomy_unfiltered) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for record in batch.iter() {
            insert.execute((
                &record.accession,
                &record.ncbi_taxid,
                &record.ncbi_species_taxid,
                &record.ncbi_taxonomy,
                &record.ncbi_taxonomy_unfiltered,
            ))?;
        }
    }
    transaction.commit()?;

    let inserted = batch.len();
    debug!("Committed {inserted} metadata rows");
    batch.clear();
    Ok(inserted)
}
