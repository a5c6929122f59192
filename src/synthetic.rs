//! Random character matrices with known answer.
//!
//! Compatible matrices are read off a random rooted tree whose edges carry
//! state transitions: every taxon sits at a random vertex and has, per
//! character, the state of the deepest transition of that character on its
//! path to the root. Each character is introduced on exactly one edge (two
//! edges for the two steps of a three-state character), so the matrix has a
//! perfect phylogeny by construction.
//!
//! Incompatible matrices additionally carry a crossing pattern
//! `(1,0), (0,1), (1,1)` in the last two characters of the last three taxa,
//! with all other taxa at state 0 there. No model assignment resolves it.

use crate::compat::EvolutionModel;
use crate::model::character::{CharacterIndex, State};
use crate::model::matrix::{CharacterMatrix, StateCount};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertex of the hidden tree: parent and the transition on the edge above.
struct Node {
    parent: usize,
    transition: (CharacterIndex, State),
}

// =#========================================================================#=
// SYNTHETIC MATRIX BUILDER
// =#========================================================================#=
/// Configures and generates a random character matrix.
///
/// # Example
/// ```
/// use perfphylo::compat::two_state;
/// use perfphylo::model::StateCount;
/// use perfphylo::synthetic::SyntheticMatrixBuilder;
///
/// let matrix = SyntheticMatrixBuilder::new(20, 8).with_seed(7).build();
/// assert!(two_state::decide(&matrix).unwrap().is_compatible());
///
/// let three_state = SyntheticMatrixBuilder::new(10, 4)
///     .with_states(StateCount::Three)
///     .with_seed(7)
///     .incompatible()
///     .build();
/// assert_eq!(three_state.num_characters(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticMatrixBuilder {
    num_taxa: usize,
    num_characters: usize,
    states: StateCount,
    seed: Option<u64>,
    incompatible: bool,
}

impl SyntheticMatrixBuilder {
    /// Creates a builder for a compatible two-state matrix of the given size.
    pub fn new(num_taxa: usize, num_characters: usize) -> Self {
        Self {
            num_taxa,
            num_characters,
            states: StateCount::Two,
            seed: None,
            incompatible: false,
        }
    }

    /// Sets the number of states per character.
    pub fn with_states(mut self, states: StateCount) -> Self {
        self.states = states;
        self
    }

    /// Seeds the generator for reproducible matrices.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Plants a crossing pattern so that the matrix has no perfect phylogeny.
    pub fn incompatible(mut self) -> Self {
        self.incompatible = true;
        self
    }

    /// Generates the matrix.
    ///
    /// # Panics
    /// Panics for an incompatible matrix with fewer than 3 taxa or fewer
    /// than 2 characters.
    pub fn build(&self) -> CharacterMatrix {
        assert!(
            !self.incompatible || (self.num_taxa >= 3 && self.num_characters >= 2),
            "Incompatible matrix needs at least 3 taxa and 2 characters"
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let nodes = self.random_tree(&mut rng);
        let mut matrix = CharacterMatrix::zeros(self.num_taxa, self.num_characters);
        for taxon in 0..self.num_taxa {
            let row = genotype_at(&nodes, rng.random_range(0..=nodes.len()), self.num_characters);
            for (character, state) in row.into_iter().enumerate() {
                matrix.set(taxon, character, state);
            }
        }

        if self.incompatible {
            self.plant_crossing(&mut matrix);
        }
        matrix
    }

    /// Grows the hidden tree; the root is implicit (vertex `0`), node `i`
    /// is vertex `i + 1`.
    fn random_tree(&self, rng: &mut StdRng) -> Vec<Node> {
        // Returns the vertex number of the new node
        fn push(nodes: &mut Vec<Node>, parent: usize, transition: (CharacterIndex, State)) -> usize {
            nodes.push(Node { parent, transition });
            nodes.len()
        }

        let mut nodes = Vec::with_capacity(2 * self.num_characters);

        for character in 0..self.num_characters {
            let parent = rng.random_range(0..=nodes.len());
            match self.states {
                StateCount::Two => {
                    push(&mut nodes, parent, (character, 1));
                }
                StateCount::Three => {
                    let model = EvolutionModel::ALL[rng.random_range(0..EvolutionModel::ALL.len())];
                    match model {
                        EvolutionModel::Linear12 => {
                            let first = push(&mut nodes, parent, (character, 1));
                            push(&mut nodes, first, (character, 2));
                        }
                        EvolutionModel::Linear21 => {
                            let first = push(&mut nodes, parent, (character, 2));
                            push(&mut nodes, first, (character, 1));
                        }
                        EvolutionModel::Branching => {
                            let first = push(&mut nodes, parent, (character, 1));
                            // Anywhere but below the 0>1 edge
                            let other = rng.random_range(0..first);
                            push(&mut nodes, other, (character, 2));
                        }
                    }
                }
            }
        }
        nodes
    }

    fn plant_crossing(&self, matrix: &mut CharacterMatrix) {
        let (x, y) = (self.num_characters - 2, self.num_characters - 1);
        for taxon in 0..self.num_taxa {
            matrix.set(taxon, x, 0);
            matrix.set(taxon, y, 0);
        }
        let first = self.num_taxa - 3;
        for (offset, (a, b)) in [(1, 0), (0, 1), (1, 1)].into_iter().enumerate() {
            matrix.set(first + offset, x, a);
            matrix.set(first + offset, y, b);
        }
    }
}

/// Returns the genotype of a taxon sitting at `vertex` of the hidden tree.
fn genotype_at(nodes: &[Node], mut vertex: usize, num_characters: usize) -> Vec<State> {
    let mut row = vec![0; num_characters];
    let mut seen = vec![false; num_characters];
    while vertex > 0 {
        let node = &nodes[vertex - 1];
        let (character, state) = node.transition;
        if !seen[character] {
            seen[character] = true;
            row[character] = state;
        }
        vertex = node.parent;
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_matrix() {
        let builder = SyntheticMatrixBuilder::new(12, 6)
            .with_states(StateCount::Three)
            .with_seed(42);
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn test_states_in_range() {
        let two = SyntheticMatrixBuilder::new(30, 10).with_seed(1).build();
        assert!(two.validate(StateCount::Two).is_ok());

        let three = SyntheticMatrixBuilder::new(30, 10)
            .with_states(StateCount::Three)
            .with_seed(1)
            .build();
        assert!(three.validate(StateCount::Three).is_ok());
    }

    #[test]
    fn test_crossing_is_planted() {
        let matrix = SyntheticMatrixBuilder::new(5, 3).with_seed(3).incompatible().build();
        assert_eq!(&matrix.row(2)[1..], &[1, 0]);
        assert_eq!(&matrix.row(3)[1..], &[0, 1]);
        assert_eq!(&matrix.row(4)[1..], &[1, 1]);
        assert_eq!(&matrix.row(0)[1..], &[0, 0]);
    }

    #[test]
    #[should_panic]
    fn test_incompatible_needs_three_taxa() {
        SyntheticMatrixBuilder::new(2, 2).incompatible().build();
    }
}
