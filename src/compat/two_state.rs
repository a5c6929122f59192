//! Two-state compatibility engine.
//!
//! Decides whether a matrix with states {0, 1} admits a perfect phylogeny
//! and, if so, returns a witnessing [BinaryTree] whose edges carry the
//! original character indices.

use crate::compat::column_order::sort_by_weight;
use crate::compat::tree_builder::CompatibilityTreeBuilder;
use crate::compat::{Conflict, Incompatibility, Verdict};
use crate::model::matrix::{CharacterMatrix, MatrixError, StateCount};
use crate::model::tree::BinaryTree;
use tracing::debug;

/// Decides whether a two-state `matrix` admits a perfect phylogeny.
///
/// Characters are sorted by descending weight, then the tree is extended by
/// every taxon in row order. The first [Conflict] ends the decision.
///
/// # Returns
/// * [Verdict::Compatible] with a tree labeled by original character indices
/// * [Verdict::Incompatible] with the [Conflict] that proved it, the
///   character reported by its original index
///
/// # Errors
/// [MatrixError::StateOutOfRange] if the matrix contains states other than 0 and 1.
///
/// # Example
/// ```
/// use perfphylo::compat::two_state;
/// use perfphylo::model::CharacterMatrix;
///
/// let compatible = CharacterMatrix::from_rows(vec![vec![1, 1, 0], vec![0, 0, 1]]).unwrap();
/// assert!(two_state::decide(&compatible).unwrap().is_compatible());
///
/// let crossing = CharacterMatrix::from_rows(vec![vec![1, 0], vec![0, 1], vec![1, 1]]).unwrap();
/// assert!(!two_state::decide(&crossing).unwrap().is_compatible());
/// ```
pub fn decide(matrix: &CharacterMatrix) -> Result<Verdict<BinaryTree>, MatrixError> {
    matrix.validate(StateCount::Two)?;
    Ok(decide_unchecked(matrix))
}

/// Same as [decide], for matrices known to be two-state.
pub(crate) fn decide_unchecked(matrix: &CharacterMatrix) -> Verdict<BinaryTree> {
    let (sorted, order) = sort_by_weight(matrix);
    let mut builder = CompatibilityTreeBuilder::new(&sorted);

    for taxon in 0..sorted.num_taxa() {
        if let Err(conflict) = builder.extend(taxon) {
            let conflict = Conflict {
                taxon: conflict.taxon,
                character: order.original_index(conflict.character),
            };
            debug!(taxon = conflict.taxon, character = conflict.character, "conflict");
            return Verdict::Incompatible(Incompatibility::Conflict(conflict));
        }
    }

    let tree = builder
        .finish()
        .map_characters(|sorted_index| order.original_index(sorted_index));
    Verdict::Compatible(tree)
}
