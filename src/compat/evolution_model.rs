//! Evolutionary models of three-state characters and their enumeration.
//!
//! Every three-state character evolves under one of three [EvolutionModel]s.
//! Under a chosen model, the character splits into two binary
//! sub-characters, A (column `2c`) and B (column `2c + 1`):
//!
//! | Model | A = 1 iff | B = 1 iff | A edge | B edge |
//! |-------|-----------|-----------|--------|--------|
//! | [Linear12](EvolutionModel::Linear12) `0→1→2` | state ∈ {1,2} | state = 2 | 0→1 | 1→2 |
//! | [Linear21](EvolutionModel::Linear21) `0→2→1` | state = 1 | state ∈ {1,2} | 2→1 | 0→2 |
//! | [Branching](EvolutionModel::Branching) `0→1, 0→2` | state = 1 | state = 2 | 0→1 | 0→2 |
//!
//! A [ModelAssignment] picks one model per character. [ModelAssignments]
//! lazily enumerates all `3^c` assignments in depth-first order: the first
//! character's model changes slowest, and per character the order is
//! `Linear12`, `Linear21`, `Branching`.

use crate::model::character::{CharacterIndex, State, StateTransition};
use crate::model::matrix::CharacterMatrix;
use std::fmt;

// =#========================================================================#=
// EVOLUTION MODEL
// =#========================================================================#=
/// Shape of the state changes of one three-state character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvolutionModel {
    /// `0 → 1 → 2`
    Linear12,
    /// `0 → 2 → 1`
    Linear21,
    /// `0 → 1` and `0 → 2` independently
    Branching,
}

impl EvolutionModel {
    /// All models in enumeration order.
    pub const ALL: [EvolutionModel; 3] = [
        EvolutionModel::Linear12,
        EvolutionModel::Linear21,
        EvolutionModel::Branching,
    ];

    /// Returns the position of this model in [EvolutionModel::ALL].
    pub fn ordinal(&self) -> usize {
        match self {
            EvolutionModel::Linear12 => 0,
            EvolutionModel::Linear21 => 1,
            EvolutionModel::Branching => 2,
        }
    }

    /// Encodes `state` as the pair of sub-characters `(A, B)`.
    pub fn encode(&self, state: State) -> (State, State) {
        let derived = (state == 1 || state == 2) as State;
        let is_one = (state == 1) as State;
        let is_two = (state == 2) as State;
        match self {
            EvolutionModel::Linear12 => (derived, is_two),
            EvolutionModel::Linear21 => (is_one, derived),
            EvolutionModel::Branching => (is_one, is_two),
        }
    }

    /// Returns the transitions introduced by sub-characters A and B of `character`.
    pub fn transitions(&self, character: CharacterIndex) -> (StateTransition, StateTransition) {
        let (a_from, b_from) = match self {
            EvolutionModel::Linear12 => (0, 1),
            EvolutionModel::Linear21 => (2, 0),
            EvolutionModel::Branching => (0, 0),
        };
        (
            StateTransition::new(character, a_from, 1),
            StateTransition::new(character, b_from, 2),
        )
    }
}

impl fmt::Display for EvolutionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvolutionModel::Linear12 => write!(f, "0>1>2"),
            EvolutionModel::Linear21 => write!(f, "0>2>1"),
            EvolutionModel::Branching => write!(f, "0>1,0>2"),
        }
    }
}

// =#========================================================================#=
// MODEL ASSIGNMENT
// =#========================================================================#=
/// One [EvolutionModel] per character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelAssignment {
    models: Vec<EvolutionModel>,
}

impl ModelAssignment {
    /// Creates an assignment from one model per character.
    pub fn new(models: Vec<EvolutionModel>) -> Self {
        ModelAssignment { models }
    }

    /// Returns the assignment at position `rank` of the enumeration order
    /// for `num_characters` characters, i.e. `rank` written in base 3 with
    /// the first character as most significant digit.
    ///
    /// Ranks beyond `3^num_characters - 1` wrap around.
    pub fn from_rank(mut rank: usize, num_characters: usize) -> Self {
        let mut models = vec![EvolutionModel::Linear12; num_characters];
        for model in models.iter_mut().rev() {
            *model = EvolutionModel::ALL[rank % 3];
            rank /= 3;
        }
        ModelAssignment { models }
    }

    /// Returns the position of this assignment in the enumeration order,
    /// or `None` if it does not fit in `usize`.
    pub fn rank(&self) -> Option<usize> {
        self.models.iter().try_fold(0usize, |rank, model| {
            rank.checked_mul(3)?.checked_add(model.ordinal())
        })
    }

    /// Returns the model of `character`.
    pub fn model(&self, character: CharacterIndex) -> EvolutionModel {
        self.models[character]
    }

    /// Returns the models in character order.
    pub fn models(&self) -> &[EvolutionModel] {
        &self.models
    }

    /// Returns the number of characters.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if the assignment covers no characters.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Encodes a three-state `matrix` as the equivalent two-state matrix
    /// with two columns per character (A at `2c`, B at `2c + 1`).
    ///
    /// # Panics
    /// Panics if the assignment covers fewer characters than `matrix` has.
    ///
    /// # Example
    /// ```
    /// use perfphylo::compat::{EvolutionModel, ModelAssignment};
    /// use perfphylo::model::CharacterMatrix;
    ///
    /// let matrix = CharacterMatrix::from_rows(vec![vec![2], vec![1]]).unwrap();
    /// let linear = ModelAssignment::new(vec![EvolutionModel::Linear12]);
    /// let binary = linear.encode(&matrix);
    /// assert_eq!(binary.row(0), &[1, 1]);
    /// assert_eq!(binary.row(1), &[1, 0]);
    /// ```
    pub fn encode(&self, matrix: &CharacterMatrix) -> CharacterMatrix {
        let mut binary = CharacterMatrix::zeros(matrix.num_taxa(), 2 * matrix.num_characters());
        for (taxon, row) in matrix.rows().enumerate() {
            for (character, &state) in row.iter().enumerate() {
                let (a, b) = self.models[character].encode(state);
                binary.set(taxon, 2 * character, a);
                binary.set(taxon, 2 * character + 1, b);
            }
        }
        binary
    }

    /// Translates binary column `column` of an encoded matrix to the state
    /// transition it stands for.
    pub fn transition(&self, column: usize) -> StateTransition {
        let character = column / 2;
        let (a, b) = self.models[character].transitions(character);
        if column % 2 == 0 { a } else { b }
    }
}

impl fmt::Display for ModelAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (character, model) in self.models.iter().enumerate() {
            if character > 0 {
                write!(f, " ")?;
            }
            write!(f, "c{}:{}", character + 1, model)?;
        }
        Ok(())
    }
}

/// Returns the number of model assignments for `num_characters`
/// characters, or `None` if it does not fit in `usize`.
pub fn count_assignments(num_characters: usize) -> Option<usize> {
    u32::try_from(num_characters)
        .ok()
        .and_then(|exp| 3usize.checked_pow(exp))
}

// =#========================================================================#=
// MODEL ASSIGNMENTS (Iterator)
// =#========================================================================#=
/// Lazy iterator over all model assignments of a number of characters, in
/// enumeration order.
///
/// Works as an odometer over the character models and therefore needs no
/// recursion and no upfront materialization; [reset](Self::reset) restarts
/// the enumeration.
///
/// # Example
/// ```
/// use perfphylo::compat::{EvolutionModel::*, ModelAssignments};
///
/// let mut assignments = ModelAssignments::new(2);
/// assert_eq!(assignments.next().unwrap().models(), &[Linear12, Linear12]);
/// assert_eq!(assignments.next().unwrap().models(), &[Linear12, Linear21]);
/// assert_eq!(assignments.next().unwrap().models(), &[Linear12, Branching]);
/// assert_eq!(assignments.next().unwrap().models(), &[Linear21, Linear12]);
/// assert_eq!(assignments.count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ModelAssignments {
    /// Digits of the next assignment to yield
    digits: Vec<usize>,
    /// Whether all assignments were yielded
    exhausted: bool,
}

impl ModelAssignments {
    /// Creates the enumeration for `num_characters` characters.
    ///
    /// With no characters, the single empty assignment is yielded.
    pub fn new(num_characters: usize) -> Self {
        ModelAssignments {
            digits: vec![0; num_characters],
            exhausted: false,
        }
    }

    /// Restarts the enumeration at the first assignment.
    pub fn reset(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = 0);
        self.exhausted = false;
    }

    /// Advances the odometer; returns `false` once it wrapped around.
    fn advance(&mut self) -> bool {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < EvolutionModel::ALL.len() {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

impl Iterator for ModelAssignments {
    type Item = ModelAssignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let assignment = ModelAssignment::new(
            self.digits.iter().map(|&d| EvolutionModel::ALL[d]).collect(),
        );
        self.exhausted = !self.advance();
        Some(assignment)
    }
}
