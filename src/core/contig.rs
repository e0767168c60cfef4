use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single contig/sequence in an assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigRecord {
    /// Sequence name (FASTA definition line up to the first whitespace)
    pub name: String,

    /// Sequence length in bases
    pub length: u64,
}

impl ContigRecord {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// The contigs of one assembly, addressable by name and iterable in
/// input order.
///
/// Built once from the assembly FASTA and treated as read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ContigIndex {
    /// All contigs, in the order they appeared in the FASTA
    contigs: Vec<ContigRecord>,

    /// Index: contig name -> index in contigs vec
    name_to_index: HashMap<String, usize>,
}

impl ContigIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self {
            contigs: Vec::new(),
            name_to_index: HashMap::new(),
        }
    }

    /// Add a contig to the index.
    ///
    /// Returns the previously indexed length if the name is already present;
    /// the existing entry is left unchanged in that case.
    pub fn insert(&mut self, name: impl Into<String>, length: u64) -> Option<u64> {
        let name = name.into();

        if let Some(&index) = self.name_to_index.get(&name) {
            return Some(self.contigs[index].length);
        }

        self.name_to_index.insert(name.clone(), self.contigs.len());
        self.contigs.push(ContigRecord::new(name, length));
        None
    }

    /// Length of the named contig, if indexed
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.name_to_index
            .get(name)
            .map(|&index| self.contigs[index].length)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    /// Iterate over `(name, length)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.contigs
            .iter()
            .map(|contig| (contig.name.as_str(), contig.length))
    }

    /// Total assembly length in bases
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|contig| contig.length).sum()
    }
}
