//! Incremental construction of a compatibility tree, one taxon at a time.
//!
//! # Extending by one taxon
//! ```text
//! WALK ──→ EXTEND ──→ ATTACH ──→ done
//!            │
//!            └──→ Conflict (character already used elsewhere)
//! ```
//! * **WALK**: From the root, follow edges whose character the taxon has,
//!   reusing the longest existing path consistent with its genotype.
//! * **EXTEND**: Append one new edge per remaining character, in sorted
//!   column order. A character that already labels an edge anywhere in the
//!   tree is a [Conflict].
//! * **ATTACH**: Hang the taxon's leaf below the current vertex via a
//!   terminal edge.
//!
//! A builder whose `extend` failed holds a partially extended tree and must
//! be dropped; there is no rollback.

use crate::compat::Conflict;
use crate::model::character::{CharacterIndex, TaxonIndex};
use crate::model::matrix::CharacterMatrix;
use crate::model::tree::{BinaryTree, VertexIndex};
use std::collections::{BTreeSet, HashSet};
use tracing::trace;

// =#========================================================================#=
// COMPATIBILITY TREE BUILDER
// =#========================================================================#=
/// Grows a [BinaryTree] for a two-state matrix whose columns are already
/// sorted by descending weight.
///
/// Edge labels of the built tree are *sorted* column positions; translating
/// them back to original characters is up to the caller
/// (see [ColumnOrder](crate::compat::ColumnOrder)).
///
/// # Example
/// ```
/// use perfphylo::compat::CompatibilityTreeBuilder;
/// use perfphylo::model::CharacterMatrix;
///
/// let matrix = CharacterMatrix::from_rows(vec![vec![1, 0], vec![1, 1]]).unwrap();
/// let mut builder = CompatibilityTreeBuilder::new(&matrix);
/// builder.extend(0).unwrap();
/// builder.extend(1).unwrap();
///
/// let tree = builder.finish();
/// assert_eq!(tree.num_internal(), 2);
/// ```
pub struct CompatibilityTreeBuilder<'m> {
    /// Matrix with columns sorted by descending weight
    matrix: &'m CharacterMatrix,
    /// Tree under construction
    tree: BinaryTree,
    /// Characters labeling some edge of the tree
    used: HashSet<CharacterIndex>,
}

impl<'m> CompatibilityTreeBuilder<'m> {
    /// Creates a builder holding a root-only tree for the taxa of `matrix`.
    ///
    /// # Arguments
    /// * `matrix` - Two-state matrix with columns sorted by descending weight
    pub fn new(matrix: &'m CharacterMatrix) -> Self {
        CompatibilityTreeBuilder {
            matrix,
            tree: BinaryTree::new(matrix.num_taxa()),
            used: HashSet::with_capacity(matrix.num_characters()),
        }
    }

    /// Extends the tree by the leaf of `taxon`.
    ///
    /// # Returns
    /// * `Ok(VertexIndex)` - Index of the new leaf
    /// * `Err(Conflict)` - A character of `taxon` already labels another edge;
    ///   the tree is left partially extended
    ///
    /// # Panics
    /// Panics if `taxon` is out of bounds or was already added.
    pub fn extend(&mut self, taxon: TaxonIndex) -> Result<VertexIndex, Conflict> {
        let mut remaining: BTreeSet<CharacterIndex> =
            self.matrix.derived_characters(taxon).into_iter().collect();

        // WALK
        let mut current = self.tree.root_index();
        while let Some(next) = self
            .tree
            .child_with_character(current, |c| remaining.contains(c))
        {
            if let Some(character) = self.tree[next].character() {
                remaining.remove(character);
            }
            current = next;
        }

        trace!(
            taxon,
            shared_depth = self.tree.path_to_root(current).len() - 1,
            new_edges = remaining.len(),
            "extending tree"
        );

        // EXTEND
        for character in remaining {
            if !self.used.insert(character) {
                return Err(Conflict { taxon, character });
            }
            current = self.tree.add_internal(current, character);
        }

        // ATTACH
        Ok(self.tree.add_leaf(current, taxon))
    }

    /// Returns the tree built so far.
    pub fn tree(&self) -> &BinaryTree {
        &self.tree
    }

    /// Returns `true` if `character` already labels an edge.
    pub fn is_used(&self, character: CharacterIndex) -> bool {
        self.used.contains(&character)
    }

    /// Consumes the builder and returns the tree.
    pub fn finish(self) -> BinaryTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<u8>>) -> CharacterMatrix {
        CharacterMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_shared_prefix_is_reused() {
        let m = matrix(vec![vec![1, 1, 0], vec![1, 1, 1]]);
        let mut builder = CompatibilityTreeBuilder::new(&m);
        let first = builder.extend(0).unwrap();
        let second = builder.extend(1).unwrap();

        let tree = builder.finish();
        // c0 -> c1 shared, c2 new
        assert_eq!(tree.num_internal(), 3);
        assert_eq!(tree.path_to_root(first).len(), 4);
        assert_eq!(tree.path_to_root(second).len(), 5);
    }

    #[test]
    fn test_duplicate_taxon_attaches_without_new_edges() {
        let m = matrix(vec![vec![1, 0], vec![1, 0]]);
        let mut builder = CompatibilityTreeBuilder::new(&m);
        let first = builder.extend(0).unwrap();
        let second = builder.extend(1).unwrap();

        let tree = builder.finish();
        assert_eq!(tree.num_internal(), 1);
        assert_eq!(tree[first].parent_index(), tree[second].parent_index());
    }

    #[test]
    fn test_conflict_on_character_reuse() {
        let m = matrix(vec![vec![1, 0], vec![0, 1], vec![1, 1]]);
        let mut builder = CompatibilityTreeBuilder::new(&m);
        builder.extend(0).unwrap();
        builder.extend(1).unwrap();

        assert_eq!(builder.extend(2), Err(Conflict { taxon: 2, character: 1 }));
        assert!(builder.is_used(0));
        assert!(builder.is_used(1));
    }

    #[test]
    fn test_walk_stops_at_first_mismatch() {
        let m = matrix(vec![vec![1, 1], vec![1, 0]]);
        let mut builder = CompatibilityTreeBuilder::new(&m);
        builder.extend(0).unwrap();
        let leaf = builder.extend(1).unwrap();

        let tree = builder.tree();
        let parent = tree[leaf].parent_index().unwrap();
        assert_eq!(tree[parent].character(), Some(&0));
        assert_eq!(tree.num_internal(), 2);
    }
}
