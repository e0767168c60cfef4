//! Taxonomy metadata storage and GTDB string handling.
//!
//! Genome profiles reference assemblies by accession only. To report which
//! organism an accession belongs to, GTDB release metadata is loaded once
//! into a local SQLite database ([`store::TaxonomyDb`]) and joined against
//! profiles by accession. GTDB lineage strings are reduced to a readable
//! genus/species name by [`gtdb::genus_species`].

use thiserror::Error;

use crate::parsing::fasta::ParseError;

pub mod gtdb;
pub mod store;

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid metadata: {0}")]
    Parse(#[from] ParseError),

    #[error("Accession sanity check failed: {0}")]
    BadAccession(String),
}
