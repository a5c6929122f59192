//! Taxon label module for compatibility tree representation.
//!
//! - `TaxonLabelMap`: Joined storage and lookup of taxon names, indexed like matrix rows.

use crate::model::character::TaxonIndex;
use std::collections::HashMap;
use std::fmt;

// =#========================================================================#=
// TAXON LABEL MAP
// =#========================================================================#=
/// Maps taxon names (strings) to row indices and back.
///
/// Taxa of a matrix are identified by their row index throughout the crate;
/// this map only attaches human-readable names for output.
///
/// # Example
/// ```
/// use perfphylo::model::TaxonLabelMap;
///
/// let mut labels = TaxonLabelMap::new(3);
///
/// let idx_kea = labels.get_or_insert("Nestor notabilis");  // idx_kea = 0
/// let idx_kaka = labels.get_or_insert("Nestor meridionalis"); // idx_kaka = 1
/// let idx_kea2 = labels.get_or_insert("Nestor notabilis"); // idx_kea2 = 0 (deduplicated)
///
/// assert_eq!(idx_kea, idx_kea2);
/// assert_eq!(labels.get_label(idx_kaka), Some("Nestor meridionalis"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonLabelMap {
    /// List of unique labels
    labels: Vec<String>,
    /// Map from label to its index
    map: HashMap<String, TaxonIndex>,
}

impl TaxonLabelMap {
    /// Creates a new, empty map with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `num_taxa` - Expected number of taxa
    pub fn new(num_taxa: usize) -> Self {
        TaxonLabelMap {
            labels: Vec::with_capacity(num_taxa),
            map: HashMap::with_capacity(num_taxa),
        }
    }

    /// Creates a map naming the taxa `t1`, `t2`, ..., `t<num_taxa>`.
    pub fn numbered(num_taxa: usize) -> Self {
        let mut map = Self::new(num_taxa);
        for taxon in 0..num_taxa {
            map.get_or_insert(&format!("t{}", taxon + 1));
        }
        map
    }

    /// Gets the index for a label, inserting it if it doesn't exist.
    ///
    /// # Returns
    /// The index associated with this label
    pub fn get_or_insert(&mut self, s: &str) -> TaxonIndex {
        if let Some(&index) = self.map.get(s) {
            index
        } else {
            let idx = self.labels.len();
            self.labels.push(s.to_string());
            self.map.insert(s.to_string(), idx);
            idx
        }
    }

    /// Retrieves the index for a given label.
    pub fn get_index(&self, s: &str) -> Option<TaxonIndex> {
        self.map.get(s).copied()
    }

    /// Retrieves the label for a given index.
    pub fn get_label(&self, index: TaxonIndex) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Checks if a label exists in the map.
    pub fn contains_label(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    /// Returns the number of labels currently stored.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Returns the labels in taxon order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for TaxonLabelMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "TaxonLabelMap ({} labels):", self.labels.len())?;
        for (idx, label) in self.labels.iter().enumerate() {
            writeln!(f, "  [{}] {}", idx, label)?;
        }
        Ok(())
    }
}

impl std::ops::Index<TaxonIndex> for TaxonLabelMap {
    type Output = str;

    fn index(&self, index: TaxonIndex) -> &Self::Output {
        &self.labels[index]
    }
}
