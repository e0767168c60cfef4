//! Helpers for GTDB lineage strings.
//!
//! GTDB taxonomy strings look like
//! `d__Bacteria;p__Pseudomonadota;...;g__Escherichia;s__Escherichia coli`:
//! semicolon-separated ranks, each tagged with a one-letter rank prefix and
//! a double underscore. Rank names may be empty when the classification is
//! unresolved at that level.

/// Reduce a GTDB lineage string to a display name.
///
/// Returns the species name when the `s__` rank is non-empty, otherwise the
/// genus name, otherwise an empty string. Segments without a rank prefix are
/// ignored.
#[must_use]
pub fn genus_species(taxonomy: &str) -> String {
    let mut genus = "";
    let mut species = "";

    for rank in taxonomy.split(';') {
        if let Some((prefix, name)) = rank.trim().split_once("__") {
            match prefix {
                "g" => genus = name,
                "s" => species = name,
                _ => {}
            }
        }
    }

    if species.is_empty() {
        genus.to_string()
    } else {
        species.to_string()
    }
}
