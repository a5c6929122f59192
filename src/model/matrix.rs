//! Character matrix of taxa (rows) and characters (columns).
//!
//! - [CharacterMatrix]: dense, rectangular and immutable once built
//! - [StateCount]: number of states a solver accepts per character
//! - [MatrixError]: malformed input rejected at the boundary

use crate::model::character::{CharacterIndex, ROOT_STATE, State, TaxonIndex};
use std::fmt;
use thiserror::Error;

// =#========================================================================#=
// MATRIX ERROR
// =#========================================================================#=
/// Malformed character matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A row has a different length than the first one
    #[error("row of taxon {taxon} has {found} entries, expected {expected}")]
    RaggedRow {
        taxon: TaxonIndex,
        expected: usize,
        found: usize,
    },

    /// An entry exceeds the largest state allowed
    #[error("taxon {taxon} has state {state} for character {character}, but states must be at most {max}")]
    StateOutOfRange {
        taxon: TaxonIndex,
        character: CharacterIndex,
        state: State,
        max: State,
    },

    /// A permutation is not a permutation of the expected length
    #[error("invalid permutation of length {found}, expected a permutation of 0..{expected}")]
    InvalidPermutation { expected: usize, found: usize },
}

// =#========================================================================#=
// STATE COUNT
// =#========================================================================#=
/// Number of states per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCount {
    /// States {0, 1}
    Two,
    /// States {0, 1, 2}
    Three,
}

impl StateCount {
    /// Returns the largest allowed state.
    pub fn max_state(&self) -> State {
        match self {
            StateCount::Two => 1,
            StateCount::Three => 2,
        }
    }
}

// =#========================================================================#=
// CHARACTER MATRIX
// =#========================================================================#=
/// A rectangular matrix of character states, stored row-major.
///
/// # Example
/// ```
/// use perfphylo::model::CharacterMatrix;
///
/// let matrix = CharacterMatrix::from_rows(vec![vec![1, 0], vec![1, 1]]).unwrap();
/// assert_eq!(matrix.num_taxa(), 2);
/// assert_eq!(matrix.column_weight(0), 2);
/// assert_eq!(matrix.derived_characters(1), vec![0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterMatrix {
    num_taxa: usize,
    num_characters: usize,
    states: Vec<State>,
}

impl CharacterMatrix {
    /// Creates a matrix from its rows.
    ///
    /// # Errors
    /// [MatrixError::RaggedRow] if rows differ in length.
    pub fn from_rows(rows: Vec<Vec<State>>) -> Result<Self, MatrixError> {
        let num_characters = rows.first().map_or(0, |row| row.len());
        let mut states = Vec::with_capacity(rows.len() * num_characters);

        for (taxon, row) in rows.iter().enumerate() {
            if row.len() != num_characters {
                return Err(MatrixError::RaggedRow {
                    taxon,
                    expected: num_characters,
                    found: row.len(),
                });
            }
            states.extend_from_slice(row);
        }

        Ok(CharacterMatrix {
            num_taxa: rows.len(),
            num_characters,
            states,
        })
    }

    /// Creates a matrix in which every taxon has the root state everywhere.
    pub fn zeros(num_taxa: usize, num_characters: usize) -> Self {
        CharacterMatrix {
            num_taxa,
            num_characters,
            states: vec![ROOT_STATE; num_taxa * num_characters],
        }
    }

    /// Returns the number of taxa (rows).
    pub fn num_taxa(&self) -> usize {
        self.num_taxa
    }

    /// Returns the number of characters (columns).
    pub fn num_characters(&self) -> usize {
        self.num_characters
    }

    /// Returns `true` if the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state of `taxon` for `character`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, taxon: TaxonIndex, character: CharacterIndex) -> State {
        assert!(character < self.num_characters, "character {character} out of bounds");
        self.states[taxon * self.num_characters + character]
    }

    /// Sets the state of `taxon` for `character`.
    pub(crate) fn set(&mut self, taxon: TaxonIndex, character: CharacterIndex, state: State) {
        self.states[taxon * self.num_characters + character] = state;
    }

    /// Returns the row of `taxon`.
    pub fn row(&self, taxon: TaxonIndex) -> &[State] {
        let start = taxon * self.num_characters;
        &self.states[start..start + self.num_characters]
    }

    /// Returns an iterator over all rows in taxon order.
    pub fn rows(&self) -> impl Iterator<Item = &[State]> {
        (0..self.num_taxa).map(|taxon| self.row(taxon))
    }

    /// Returns the number of taxa with a non-root state for `character`.
    pub fn column_weight(&self, character: CharacterIndex) -> usize {
        self.rows().filter(|row| row[character] != ROOT_STATE).count()
    }

    /// Returns the characters for which `taxon` has a derived state, ascending.
    pub fn derived_characters(&self, taxon: TaxonIndex) -> Vec<CharacterIndex> {
        self.row(taxon)
            .iter()
            .enumerate()
            .filter(|(_, state)| **state != ROOT_STATE)
            .map(|(character, _)| character)
            .collect()
    }

    /// Checks that all states are in range for the given [StateCount].
    ///
    /// # Errors
    /// [MatrixError::StateOutOfRange] for the first offending entry (row-major).
    pub fn validate(&self, state_count: StateCount) -> Result<(), MatrixError> {
        let max = state_count.max_state();
        for (taxon, row) in self.rows().enumerate() {
            if let Some((character, &state)) = row.iter().enumerate().find(|(_, s)| **s > max) {
                return Err(MatrixError::StateOutOfRange {
                    taxon,
                    character,
                    state,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Returns a copy whose column `i` is column `permutation[i]` of this matrix.
    ///
    /// # Errors
    /// [MatrixError::InvalidPermutation] if `permutation` is not a
    /// permutation of `0..num_characters`.
    pub fn with_columns_permuted(&self, permutation: &[CharacterIndex]) -> Result<Self, MatrixError> {
        check_permutation(permutation, self.num_characters)?;
        Ok(self.select_columns(permutation))
    }

    /// Returns a copy consisting of the given columns, in the given order.
    ///
    /// # Panics
    /// Panics if a column is out of bounds.
    pub(crate) fn select_columns(&self, columns: &[CharacterIndex]) -> Self {
        let mut states = Vec::with_capacity(self.num_taxa * columns.len());
        for row in self.rows() {
            states.extend(columns.iter().map(|&c| row[c]));
        }

        CharacterMatrix {
            num_taxa: self.num_taxa,
            num_characters: columns.len(),
            states,
        }
    }

    /// Returns a copy whose row `i` is row `permutation[i]` of this matrix.
    ///
    /// # Errors
    /// [MatrixError::InvalidPermutation] if `permutation` is not a
    /// permutation of `0..num_taxa`.
    pub fn with_rows_permuted(&self, permutation: &[TaxonIndex]) -> Result<Self, MatrixError> {
        check_permutation(permutation, self.num_taxa)?;

        let mut states = Vec::with_capacity(self.states.len());
        for &taxon in permutation {
            states.extend_from_slice(self.row(taxon));
        }

        Ok(CharacterMatrix {
            num_taxa: self.num_taxa,
            num_characters: self.num_characters,
            states,
        })
    }

    /// Appends the rows of `other` below the rows of this matrix.
    ///
    /// # Errors
    /// [MatrixError::RaggedRow] if the number of characters differs.
    pub fn append_rows(&mut self, other: &CharacterMatrix) -> Result<(), MatrixError> {
        if other.num_taxa > 0 && other.num_characters != self.num_characters {
            return Err(MatrixError::RaggedRow {
                taxon: self.num_taxa,
                expected: self.num_characters,
                found: other.num_characters,
            });
        }
        self.states.extend_from_slice(&other.states);
        self.num_taxa += other.num_taxa;
        Ok(())
    }
}

fn check_permutation(permutation: &[usize], expected: usize) -> Result<(), MatrixError> {
    let invalid = MatrixError::InvalidPermutation {
        expected,
        found: permutation.len(),
    };
    if permutation.len() != expected {
        return Err(invalid);
    }

    let mut seen = vec![false; expected];
    for &i in permutation {
        if i >= expected || seen[i] {
            return Err(invalid);
        }
        seen[i] = true;
    }
    Ok(())
}

impl fmt::Display for CharacterMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|s| s.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_rejected() {
        let result = CharacterMatrix::from_rows(vec![vec![0, 1], vec![1]]);
        assert_eq!(
            result,
            Err(MatrixError::RaggedRow { taxon: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_validate_reports_first_offending_entry() {
        let matrix = CharacterMatrix::from_rows(vec![vec![0, 1], vec![2, 3]]).unwrap();
        assert!(matrix.validate(StateCount::Three).is_err());
        assert_eq!(
            matrix.validate(StateCount::Two),
            Err(MatrixError::StateOutOfRange { taxon: 1, character: 0, state: 2, max: 1 })
        );
    }

    #[test]
    fn test_permutations() {
        let matrix = CharacterMatrix::from_rows(vec![vec![1, 0, 2], vec![0, 1, 1]]).unwrap();

        let columns = matrix.with_columns_permuted(&[2, 0, 1]).unwrap();
        assert_eq!(columns.row(0), &[2, 1, 0]);
        assert_eq!(columns.row(1), &[1, 0, 1]);

        let rows = matrix.with_rows_permuted(&[1, 0]).unwrap();
        assert_eq!(rows.row(0), matrix.row(1));

        assert!(matrix.with_columns_permuted(&[0, 0, 1]).is_err());
        assert!(matrix.with_rows_permuted(&[0]).is_err());
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = CharacterMatrix::from_rows(vec![]).unwrap();
        assert_eq!(matrix.num_taxa(), 0);
        assert_eq!(matrix.num_characters(), 0);
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_display() {
        let matrix = CharacterMatrix::from_rows(vec![vec![1, 0], vec![2, 1]]).unwrap();
        assert_eq!(matrix.to_string(), "1 0\n2 1\n");
    }
}
