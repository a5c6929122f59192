//! Column preprocessing: characters sorted by descending weight.
//!
//! In a perfect phylogeny the taxa sharing a derived state of one character
//! are nested within, or disjoint from, those of any other character.
//! Processing heavier characters first places every character above the
//! characters nested in it, so a single greedy pass over the taxa suffices.

use crate::model::character::CharacterIndex;
use crate::model::matrix::{CharacterMatrix, MatrixError};
use std::cmp::Reverse;

/// Permutation from sorted column position to original character index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    permutation: Vec<CharacterIndex>,
}

impl ColumnOrder {
    /// Orders the characters of `matrix` by descending weight (number of
    /// taxa with a non-root state); ties keep their original order.
    pub fn by_descending_weight(matrix: &CharacterMatrix) -> Self {
        let weights: Vec<usize> = (0..matrix.num_characters())
            .map(|c| matrix.column_weight(c))
            .collect();

        let mut permutation: Vec<CharacterIndex> = (0..matrix.num_characters()).collect();
        // Stable sort
        permutation.sort_by_key(|&c| Reverse(weights[c]));

        ColumnOrder { permutation }
    }

    /// Returns the original index of the character at sorted position `sorted`.
    ///
    /// # Panics
    /// Panics if `sorted` is out of bounds.
    pub fn original_index(&self, sorted: CharacterIndex) -> CharacterIndex {
        self.permutation[sorted]
    }

    /// Returns the permutation (sorted position to original index).
    pub fn as_slice(&self) -> &[CharacterIndex] {
        &self.permutation
    }

    /// Returns the number of characters.
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    /// Returns `true` if there are no characters.
    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Returns a copy of `matrix` with its columns in this order.
    ///
    /// # Errors
    /// [MatrixError::InvalidPermutation] if `matrix` has a different number
    /// of characters than this order.
    pub fn apply(&self, matrix: &CharacterMatrix) -> Result<CharacterMatrix, MatrixError> {
        matrix.with_columns_permuted(&self.permutation)
    }
}

/// Returns a copy of `matrix` with columns sorted by descending weight,
/// together with the [ColumnOrder] used.
///
/// # Example
/// ```
/// use perfphylo::compat::sort_by_weight;
/// use perfphylo::model::CharacterMatrix;
///
/// let matrix = CharacterMatrix::from_rows(vec![vec![0, 1], vec![1, 1]]).unwrap();
/// let (sorted, order) = sort_by_weight(&matrix);
/// assert_eq!(order.as_slice(), &[1, 0]);
/// assert_eq!(sorted.row(0), &[1, 0]);
/// ```
pub fn sort_by_weight(matrix: &CharacterMatrix) -> (CharacterMatrix, ColumnOrder) {
    let order = ColumnOrder::by_descending_weight(matrix);
    (matrix.select_columns(&order.permutation), order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_weight() {
        let matrix = CharacterMatrix::from_rows(vec![
            vec![0, 1, 1, 0],
            vec![0, 1, 0, 0],
            vec![1, 1, 1, 0],
        ])
        .unwrap();
        let (sorted, order) = sort_by_weight(&matrix);

        assert_eq!(order.as_slice(), &[1, 2, 0, 3]);
        assert_eq!(sorted.row(2), &[1, 1, 1, 0]);
        assert_eq!(order.original_index(1), 2);
    }

    #[test]
    fn test_ties_keep_column_order() {
        let matrix = CharacterMatrix::from_rows(vec![vec![1, 0, 1], vec![0, 1, 1]]).unwrap();
        let order = ColumnOrder::by_descending_weight(&matrix);
        assert_eq!(order.as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn test_weight_counts_all_derived_states() {
        let matrix = CharacterMatrix::from_rows(vec![vec![0, 2], vec![0, 1], vec![2, 0]]).unwrap();
        let order = ColumnOrder::by_descending_weight(&matrix);
        assert_eq!(order.as_slice(), &[1, 0]);
    }
}
